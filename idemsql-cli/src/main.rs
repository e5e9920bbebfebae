//! CLI entry point for idemsql.
//! Parses flags, configures logging, runs one rewrite or check, and maps
//! errors to exit codes by failing stage.

mod output;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use idemsql_core::config::{CliOverrides, IdemConfig};
use idemsql_core::error::IdemError;
use idemsql_core::Idemsql;

/// Make a SQL DDL script safe to re-run.
///
/// Adds IF NOT EXISTS to CREATE TABLE, fixes the IF NOT EXIST typo, and
/// comments out DROP TABLE. The original is kept next to the file with a
/// `.bak` suffix.
#[derive(Parser)]
#[command(name = "idemsql", version, about)]
struct Cli {
    /// Script to rewrite (overrides config)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Suffix appended to the file name for the backup (default: .bak)
    #[arg(long, value_name = "SUFFIX")]
    backup_suffix: Option<String>,

    /// Write backup and target even when nothing changed
    #[arg(long)]
    always_write: bool,

    /// Show what would change without writing anything
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Exit non-zero if the script is not already idempotent; writes nothing
    #[arg(long)]
    check: bool,

    /// Print changed lines as -/+ pairs
    #[arg(long)]
    diff: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,

    /// Leave DROP TABLE statements active
    #[arg(long)]
    no_comment_drops: bool,

    /// Do not add IF NOT EXISTS to CREATE TABLE
    #[arg(long)]
    no_insert_guards: bool,

    /// Do not correct IF NOT EXIST to IF NOT EXISTS
    #[arg(long)]
    no_fix_typos: bool,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging (suppress when JSON output is requested)
    let filter = if cli.json || cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::new()
        .parse_env(env_logger::Env::default().default_filter_or(filter))
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        print_error(&e);
        process::exit(exit_code(&e));
    }
}

fn exit_code(error: &IdemError) -> i32 {
    match error {
        IdemError::ConfigError(_) => 2,
        IdemError::IoError { .. } | IdemError::ScanError { .. } => 3,
        IdemError::BackupWriteError { .. } => 4,
        IdemError::TargetWriteError { .. } => 5,
        IdemError::RewriteNeeded { .. } => 6,
    }
}

fn disabled(flag: bool) -> Option<bool> {
    if flag {
        Some(false)
    } else {
        None
    }
}

fn run(cli: Cli) -> Result<(), IdemError> {
    let overrides = CliOverrides {
        target: cli.file,
        backup_suffix: cli.backup_suffix,
        always_write: if cli.always_write { Some(true) } else { None },
        comment_out_drops: disabled(cli.no_comment_drops),
        insert_guards: disabled(cli.no_insert_guards),
        normalize_typos: disabled(cli.no_fix_typos),
    };

    let config = IdemConfig::load(cli.config.as_deref(), &overrides)?;
    let idemsql = Idemsql::new(config);

    if cli.check {
        let report = idemsql.check()?;
        if cli.json {
            output::print_json(&report);
        } else if !cli.quiet {
            output::print_check_report(&report, cli.diff);
        }
        report.into_result()?;
        return Ok(());
    }

    let report = if cli.dry_run {
        idemsql.dry_run()?
    } else {
        idemsql.rewrite()?
    };
    if cli.json {
        output::print_json(&report);
    } else if !cli.quiet {
        output::print_rewrite_report(&report, cli.diff);
    }

    Ok(())
}

/// Print a formatted error message naming the failing stage, with a hint.
fn print_error(error: &IdemError) {
    eprintln!(
        "{} [{}] {}",
        "ERROR:".red().bold(),
        error.stage(),
        error
    );

    // Provide actionable guidance
    match error {
        IdemError::ConfigError(_) => {
            eprintln!(
                "{}",
                "Hint: Check idemsql.toml or pass the script path as an argument.".dimmed()
            );
        }
        IdemError::IoError { .. } => {
            eprintln!(
                "{}",
                "Hint: Pass the script path as an argument or set IDEMSQL_TARGET.".dimmed()
            );
        }
        IdemError::ScanError { .. } => {
            eprintln!(
                "{}",
                "Hint: Convert the script to UTF-8 before rewriting it.".dimmed()
            );
        }
        IdemError::TargetWriteError { backup, .. } => {
            eprintln!(
                "{}",
                format!(
                    "Hint: Restore the original with: cp {} <target>",
                    backup.display()
                )
                .dimmed()
            );
        }
        IdemError::RewriteNeeded { .. } => {
            eprintln!(
                "{}",
                "Hint: Run idemsql without --check to apply the rewrite.".dimmed()
            );
        }
        IdemError::BackupWriteError { .. } => {}
    }
}
