//! The `idemsql` rewrite command: load, rewrite, back up, write.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::IdemConfig;
use crate::error::Result;
use crate::loader::{self, LineEnding};
use crate::rewrite::{rewrite, AppliedChange, RewriteDecision, RewriteOutcome};
use crate::scanner::{scan_statements, LexState, StatementKind, StatementSpan};
use crate::writer::{self, backup_path};

/// Statement counts by kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatementSummary {
    pub create_table: usize,
    pub drop_table: usize,
    pub other: usize,
}

impl StatementSummary {
    pub fn from_spans(spans: &[StatementSpan]) -> Self {
        let mut summary = Self::default();
        for span in spans {
            match span.kind {
                StatementKind::CreateTable => summary.create_table += 1,
                StatementKind::DropTable => summary.drop_table += 1,
                StatementKind::Other => summary.other += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.create_table + self.drop_table + self.other
    }
}

/// Report from a rewrite run.
#[derive(Debug, Serialize)]
pub struct RewriteReport {
    /// Script that was rewritten.
    pub target: PathBuf,
    /// Backup location (written unless `written` is false).
    pub backup: PathBuf,
    /// Whether the backup and target were written.
    pub written: bool,
    /// Whether this was a dry run.
    pub dry_run: bool,
    pub line_ending: LineEnding,
    pub lines_scanned: usize,
    pub statements: StatementSummary,
    /// Line edits in order.
    pub changes: Vec<AppliedChange>,
    pub drops_commented: usize,
    pub guards_inserted: usize,
    pub typos_fixed: usize,
    pub already_guarded: usize,
    /// CRC32 of the original content, when a backup was written.
    pub backup_checksum: Option<u32>,
}

impl RewriteReport {
    fn new(config: &IdemConfig, outcome: &RewriteOutcome, spans: &[StatementSpan]) -> Self {
        Self {
            target: config.target.clone(),
            backup: backup_path(&config.target, &config.backup.suffix),
            written: false,
            dry_run: false,
            line_ending: LineEnding::None,
            lines_scanned: outcome.lines,
            statements: StatementSummary::from_spans(spans),
            changes: outcome.changes.clone(),
            drops_commented: outcome.count(RewriteDecision::CommentOut),
            guards_inserted: outcome.count(RewriteDecision::InsertGuard),
            typos_fixed: outcome.count(RewriteDecision::NormalizeTypo),
            already_guarded: outcome.already_guarded,
            backup_checksum: None,
        }
    }
}

/// Warn when an unterminated comment or literal swallowed the tail of the script.
pub(crate) fn warn_trailing_state(config: &IdemConfig, state: LexState) {
    match state {
        LexState::Code => {}
        LexState::BlockComment => log::warn!(
            "Script ends inside an unterminated block comment; lines after it were left unchanged; path={}",
            config.target.display()
        ),
        LexState::Quoted(q) => log::warn!(
            "Script ends inside an unterminated {} literal; lines after it were left unchanged; path={}",
            q,
            config.target.display()
        ),
    }
}

/// Execute the rewrite command.
///
/// The whole rewrite is computed in memory before anything is written.
/// With `dry_run`, nothing is written.
pub fn execute(config: &IdemConfig, dry_run: bool) -> Result<RewriteReport> {
    let script = loader::load(&config.target)?;
    let spans = scan_statements(&script);
    let outcome = rewrite(&script, &config.rewrite);
    warn_trailing_state(config, outcome.trailing_state);

    let mut report = RewriteReport::new(config, &outcome, &spans);
    report.dry_run = dry_run;
    report.line_ending = script.line_ending();

    log::debug!(
        "Scanned script; path={}, lines={}, statements={}, changes={}",
        config.target.display(),
        outcome.lines,
        report.statements.total(),
        outcome.changes.len()
    );

    if dry_run {
        return Ok(report);
    }

    if !outcome.is_changed() && !config.backup.always_write {
        log::info!(
            "Already idempotent, nothing written; path={}",
            config.target.display()
        );
        return Ok(report);
    }

    let written = writer::write_outputs(
        &config.target,
        script.as_bytes(),
        &outcome.text,
        &config.backup.suffix,
    )?;
    report.written = true;
    report.backup = written.backup;
    report.backup_checksum = Some(written.backup_checksum);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(path: PathBuf) -> IdemConfig {
        IdemConfig {
            target: path,
            ..Default::default()
        }
    }

    #[test]
    fn test_execute_writes_backup_and_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("V1.sql");
        let original = "DROP TABLE a;\nCREATE TABLE a (id INT);\n";
        std::fs::write(&path, original).unwrap();

        let report = execute(&config_for(path.clone()), false).unwrap();
        assert!(report.written);
        assert_eq!(report.drops_commented, 1);
        assert_eq!(report.guards_inserted, 1);
        assert_eq!(report.statements.total(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "-- DROP TABLE a;\nCREATE TABLE IF NOT EXISTS a (id INT);\n"
        );
        assert_eq!(std::fs::read_to_string(&report.backup).unwrap(), original);
    }

    #[test]
    fn test_execute_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("V1.sql");
        std::fs::write(&path, "DROP TABLE a;\n").unwrap();

        let report = execute(&config_for(path.clone()), true).unwrap();
        assert!(!report.written);
        assert!(report.dry_run);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "DROP TABLE a;\n");
        assert!(!report.backup.exists());
    }

    #[test]
    fn test_execute_unchanged_skips_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("V1.sql");
        std::fs::write(&path, "CREATE TABLE IF NOT EXISTS a (id INT);\n").unwrap();

        let report = execute(&config_for(path.clone()), false).unwrap();
        assert!(!report.written);
        assert_eq!(report.already_guarded, 1);
        assert!(!report.backup.exists());
    }

    #[test]
    fn test_execute_always_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("V1.sql");
        std::fs::write(&path, "SELECT 1;\n").unwrap();

        let mut config = config_for(path.clone());
        config.backup.always_write = true;
        let report = execute(&config, false).unwrap();
        assert!(report.written);
        assert_eq!(std::fs::read_to_string(&report.backup).unwrap(), "SELECT 1;\n");
    }
}
