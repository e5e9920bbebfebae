//! Command implementations: rewrite (including dry-run) and check.

pub mod check;
pub mod rewrite;
