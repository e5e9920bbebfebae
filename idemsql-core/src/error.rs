//! Error types for idemsql operations.

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Scan,
    Backup,
    Write,
    Check,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Config => write!(f, "config"),
            Stage::Load => write!(f, "load"),
            Stage::Scan => write!(f, "scan"),
            Stage::Backup => write!(f, "backup"),
            Stage::Write => write!(f, "write"),
            Stage::Check => write!(f, "check"),
        }
    }
}

/// All error types that idemsql operations can produce.
#[derive(Error, Debug)]
pub enum IdemError {
    /// Invalid or missing configuration (TOML parse errors, bad values, etc.).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The source script does not exist or could not be read.
    #[error("Could not read {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source script is not decodable as UTF-8 text.
    #[error("{} is not valid UTF-8 (first invalid byte at offset {offset})", path.display())]
    ScanError { path: PathBuf, offset: usize },

    /// The backup could not be persisted or verified. The target was not touched.
    #[error("Failed to write backup {}: {reason}. The target file was left unmodified.", path.display())]
    BackupWriteError { path: PathBuf, reason: String },

    /// The rewritten script could not be persisted after the backup succeeded.
    #[error("Failed to write {}: {source}. The original content is preserved in {}.", path.display(), backup.display())]
    TargetWriteError {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `--check` found lines that are not yet idempotent.
    #[error("{} is not idempotent: {count} line(s) would be rewritten", path.display())]
    RewriteNeeded { path: PathBuf, count: usize },
}

impl IdemError {
    /// The stage of the pipeline that failed.
    pub fn stage(&self) -> Stage {
        match self {
            IdemError::ConfigError(_) => Stage::Config,
            IdemError::IoError { .. } => Stage::Load,
            IdemError::ScanError { .. } => Stage::Scan,
            IdemError::BackupWriteError { .. } => Stage::Backup,
            IdemError::TargetWriteError { .. } => Stage::Write,
            IdemError::RewriteNeeded { .. } => Stage::Check,
        }
    }
}

/// Convenience type alias for `Result<T, IdemError>`.
pub type Result<T> = std::result::Result<T, IdemError>;
