//! The `--check` command: report whether a script is already idempotent.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::IdemConfig;
use crate::error::{IdemError, Result};
use crate::loader;
use crate::rewrite::{rewrite, AppliedChange};

use super::rewrite::warn_trailing_state;

/// Report from a check run.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub target: PathBuf,
    /// True when a rewrite would change nothing.
    pub idempotent: bool,
    /// Edits a rewrite would make.
    pub pending: Vec<AppliedChange>,
}

impl CheckReport {
    /// Convert a failed check into the error the CLI exits with.
    pub fn into_result(self) -> Result<Self> {
        if self.idempotent {
            Ok(self)
        } else {
            Err(IdemError::RewriteNeeded {
                path: self.target,
                count: self.pending.len(),
            })
        }
    }
}

/// Execute the check command. Never writes.
pub fn execute(config: &IdemConfig) -> Result<CheckReport> {
    let script = loader::load(&config.target)?;
    let outcome = rewrite(&script, &config.rewrite);
    warn_trailing_state(config, outcome.trailing_state);

    Ok(CheckReport {
        target: config.target.clone(),
        idempotent: !outcome.is_changed(),
        pending: outcome.changes,
    })
}
