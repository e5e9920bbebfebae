//! Backup and target emission.
//!
//! The backup is written and verified before the target is touched. Both
//! files are written through a temporary file in the destination directory
//! and renamed into place, so neither is ever left half-written.

use std::ffi::OsString;
use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{IdemError, Result};

/// Backup settings.
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// Suffix appended to the target's file name.
    pub suffix: String,
    /// Write even when the rewrite changed nothing.
    pub always_write: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            suffix: ".bak".to_string(),
            always_write: false,
        }
    }
}

/// Report from a completed write.
#[derive(Debug, Clone, Serialize)]
pub struct WriteReport {
    pub target: PathBuf,
    pub backup: PathBuf,
    /// CRC32 of the original content, verified against the backup on disk.
    pub backup_checksum: u32,
    pub bytes_written: usize,
}

/// Derive the backup path by appending `suffix` to the full file name.
pub fn backup_path(target: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Write `contents` to `path` via a sibling temporary file and rename.
fn write_atomic(path: &Path, contents: &[u8], permissions: Option<&Permissions>) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    if let Some(perms) = permissions {
        tmp.as_file().set_permissions(perms.clone())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Persist the backup of `original`, then the rewritten target.
///
/// Fails with `BackupWriteError` before touching the target if the backup
/// cannot be written or read back intact. Fails with `TargetWriteError`
/// if the target cannot be replaced; the backup stays on disk.
pub fn write_outputs(
    target: &Path,
    original: &[u8],
    rewritten: &str,
    suffix: &str,
) -> Result<WriteReport> {
    let backup = backup_path(target, suffix);
    let permissions = std::fs::metadata(target).ok().map(|m| m.permissions());
    let checksum = crc32fast::hash(original);

    write_atomic(&backup, original, permissions.as_ref()).map_err(|e| {
        IdemError::BackupWriteError {
            path: backup.clone(),
            reason: e.to_string(),
        }
    })?;

    let on_disk = std::fs::read(&backup).map_err(|e| IdemError::BackupWriteError {
        path: backup.clone(),
        reason: format!("could not read back backup: {}", e),
    })?;
    let found = crc32fast::hash(&on_disk);
    if found != checksum || on_disk.len() != original.len() {
        return Err(IdemError::BackupWriteError {
            path: backup,
            reason: format!(
                "verification failed: expected crc32 {:08x}, found {:08x}",
                checksum, found
            ),
        });
    }
    log::info!("Backup saved; path={}", backup.display());

    write_atomic(target, rewritten.as_bytes(), permissions.as_ref()).map_err(|source| {
        IdemError::TargetWriteError {
            path: target.to_path_buf(),
            backup: backup.clone(),
            source,
        }
    })?;
    log::info!("Patched; path={}", target.display());

    Ok(WriteReport {
        target: target.to_path_buf(),
        backup,
        backup_checksum: checksum,
        bytes_written: rewritten.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("db/V1__DB_IEMR.sql"), ".bak"),
            PathBuf::from("db/V1__DB_IEMR.sql.bak")
        );
        assert_eq!(
            backup_path(Path::new("schema"), ".orig"),
            PathBuf::from("schema.orig")
        );
    }

    #[test]
    fn test_write_outputs_backup_then_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("V1.sql");
        let original = "CREATE TABLE a (id INT);\n";
        std::fs::write(&target, original).unwrap();

        let report = write_outputs(
            &target,
            original.as_bytes(),
            "CREATE TABLE IF NOT EXISTS a (id INT);\n",
            ".bak",
        )
        .unwrap();

        assert_eq!(report.backup, dir.path().join("V1.sql.bak"));
        assert_eq!(std::fs::read_to_string(&report.backup).unwrap(), original);
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "CREATE TABLE IF NOT EXISTS a (id INT);\n"
        );
        assert_eq!(report.backup_checksum, crc32fast::hash(original.as_bytes()));
    }

    #[test]
    fn test_backup_failure_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("V1.sql");
        std::fs::write(&target, "DROP TABLE a;\n").unwrap();
        // A directory occupying the backup path makes the rename fail.
        std::fs::create_dir(dir.path().join("V1.sql.bak")).unwrap();
        std::fs::write(dir.path().join("V1.sql.bak").join("keep"), "x").unwrap();

        let err = write_outputs(&target, b"DROP TABLE a;\n", "-- DROP TABLE a;\n", ".bak")
            .unwrap_err();
        assert!(matches!(err, IdemError::BackupWriteError { .. }));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "DROP TABLE a;\n");
    }

    #[test]
    fn test_target_failure_keeps_backup() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path cannot be replaced by a file.
        let target = dir.path().join("V1.sql");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        let err = write_outputs(&target, b"DROP TABLE a;\n", "-- DROP TABLE a;\n", ".bak")
            .unwrap_err();
        match err {
            IdemError::TargetWriteError { path, backup, .. } => {
                assert_eq!(path, target);
                assert_eq!(backup, dir.path().join("V1.sql.bak"));
                assert_eq!(std::fs::read(&backup).unwrap(), b"DROP TABLE a;\n");
            }
            other => panic!("Expected TargetWriteError, got {:?}", other),
        }
        assert!(target.join("keep").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("V1.sql");
        std::fs::write(&target, "DROP TABLE a;\n").unwrap();
        std::fs::set_permissions(&target, Permissions::from_mode(0o644)).unwrap();

        write_outputs(&target, b"DROP TABLE a;\n", "-- DROP TABLE a;\n", ".bak").unwrap();
        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
