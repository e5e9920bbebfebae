//! Rewrite SQL DDL scripts into an idempotent, re-runnable form.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use idemsql_core::config::{CliOverrides, IdemConfig};
//! use idemsql_core::Idemsql;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IdemConfig::load(None, &CliOverrides::default())?;
//! let report = Idemsql::new(config).rewrite()?;
//! println!("Rewrote {} line(s)", report.changes.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`loader`]: Reads the script, keeping exact bytes and line endings
//! - [`scanner`]: Lexical state, keyword classification, statement spans
//! - [`rewrite`]: The single-pass rewrite engine
//! - [`writer`]: Verified backup, then atomic target write
//! - [`config`]: Configuration loading (TOML, env vars, CLI overrides)
//! - [`commands`]: Rewrite and check command implementations
//! - [`error`]: Error types
//!
//! One file is processed per invocation. Running two instances against the
//! same file concurrently is not guarded against; callers that need this
//! must lock the file externally.

pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod rewrite;
pub mod scanner;
pub mod writer;

use config::IdemConfig;
use error::Result;

pub use commands::check::CheckReport;
pub use commands::rewrite::RewriteReport;
pub use config::CliOverrides;
pub use loader::Script;
pub use rewrite::{RewriteOptions, RewriteOutcome};

/// Main entry point for the idemsql library.
pub struct Idemsql {
    pub config: IdemConfig,
}

impl Idemsql {
    pub fn new(config: IdemConfig) -> Self {
        Self { config }
    }

    /// Rewrite the target in place, keeping a backup of the original.
    pub fn rewrite(&self) -> Result<RewriteReport> {
        commands::rewrite::execute(&self.config, false)
    }

    /// Compute the rewrite without writing anything.
    pub fn dry_run(&self) -> Result<RewriteReport> {
        commands::rewrite::execute(&self.config, true)
    }

    /// Report whether the target is already idempotent.
    pub fn check(&self) -> Result<CheckReport> {
        commands::check::execute(&self.config)
    }
}
