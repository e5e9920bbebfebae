//! Configuration loading and resolution.
//!
//! Supports a TOML config file, environment variables, and CLI overrides
//! with a defined priority order (CLI > env > TOML > defaults).

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{IdemError, Result};
use crate::rewrite::RewriteOptions;
use crate::writer::BackupConfig;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "idemsql.toml";

/// Script rewritten when neither config nor CLI names one.
pub const DEFAULT_TARGET: &str = "src/main/resources/db/migration/dbiemr/V1__DB_IEMR.sql";

/// Helper macro to apply an optional owned value directly to a target field.
///
/// Replaces: `if let Some(v) = $opt { $target = v; }`
macro_rules! apply_option {
    ($opt:expr => $target:expr) => {
        if let Some(v) = $opt {
            $target = v;
        }
    };
}

/// Helper macro to clone a borrowed optional value directly to a target field.
///
/// Replaces: `if let Some(ref v) = $opt { $target = v.clone(); }`
macro_rules! apply_option_clone {
    ($opt:expr => $target:expr) => {
        if let Some(ref v) = $opt {
            $target = v.clone();
        }
    };
}

/// Top-level configuration for idemsql.
#[derive(Debug, Clone)]
pub struct IdemConfig {
    /// Script to rewrite in place.
    pub target: PathBuf,
    /// Backup naming and write policy.
    pub backup: BackupConfig,
    /// Which transforms the engine applies.
    pub rewrite: RewriteOptions,
}

impl Default for IdemConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from(DEFAULT_TARGET),
            backup: BackupConfig::default(),
            rewrite: RewriteOptions::default(),
        }
    }
}

/// CLI overrides that take highest priority.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub target: Option<PathBuf>,
    pub backup_suffix: Option<String>,
    pub always_write: Option<bool>,
    pub comment_out_drops: Option<bool>,
    pub insert_guards: Option<bool>,
    pub normalize_typos: Option<bool>,
}

// ── TOML deserialization structs ──

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    target: Option<TomlTargetConfig>,
    backup: Option<TomlBackupConfig>,
    rewrite: Option<TomlRewriteConfig>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlTargetConfig {
    path: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlBackupConfig {
    suffix: Option<String>,
    always_write: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlRewriteConfig {
    comment_out_drops: Option<bool>,
    insert_guards: Option<bool>,
    normalize_typos: Option<bool>,
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl IdemConfig {
    /// Load configuration with the following priority (highest wins):
    /// 1. CLI arguments
    /// 2. Environment variables
    /// 3. TOML config file
    /// 4. Built-in defaults
    pub fn load(config_path: Option<&str>, overrides: &CliOverrides) -> Result<Self> {
        let mut config = IdemConfig::default();

        // Layer 3: TOML config file
        let toml_path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);
        if let Ok(content) = std::fs::read_to_string(toml_path) {
            let toml_config: TomlConfig = toml::from_str(&content).map_err(|e| {
                IdemError::ConfigError(format!(
                    "Failed to parse config file '{}': {}",
                    toml_path, e
                ))
            })?;
            log::debug!("Loaded config file; path={}", toml_path);
            config.apply_toml(toml_config);
        } else if config_path.is_some() {
            // If explicitly specified, error if not found
            return Err(IdemError::ConfigError(format!(
                "Config file '{}' not found",
                toml_path
            )));
        }

        // Layer 2: Environment variables
        config.apply_env();

        // Layer 1: CLI overrides
        config.apply_cli(overrides);

        config.validate()?;
        Ok(config)
    }

    fn apply_toml(&mut self, toml: TomlConfig) {
        if let Some(t) = toml.target {
            if let Some(v) = t.path {
                self.target = PathBuf::from(v);
            }
        }

        if let Some(b) = toml.backup {
            apply_option!(b.suffix => self.backup.suffix);
            apply_option!(b.always_write => self.backup.always_write);
        }

        if let Some(r) = toml.rewrite {
            apply_option!(r.comment_out_drops => self.rewrite.comment_out_drops);
            apply_option!(r.insert_guards => self.rewrite.insert_guards);
            apply_option!(r.normalize_typos => self.rewrite.normalize_typos);
        }
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("IDEMSQL_TARGET") {
            self.target = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("IDEMSQL_BACKUP_SUFFIX") {
            self.backup.suffix = v;
        }
        if let Ok(v) = std::env::var("IDEMSQL_ALWAYS_WRITE") {
            match parse_bool(&v) {
                Some(b) => self.backup.always_write = b,
                None => log::warn!(
                    "Ignoring invalid IDEMSQL_ALWAYS_WRITE '{}'. Valid values: true, false",
                    v
                ),
            }
        }
    }

    fn apply_cli(&mut self, overrides: &CliOverrides) {
        apply_option_clone!(overrides.target => self.target);
        apply_option_clone!(overrides.backup_suffix => self.backup.suffix);
        apply_option!(overrides.always_write => self.backup.always_write);
        apply_option!(overrides.comment_out_drops => self.rewrite.comment_out_drops);
        apply_option!(overrides.insert_guards => self.rewrite.insert_guards);
        apply_option!(overrides.normalize_typos => self.rewrite.normalize_typos);
    }

    fn validate(&self) -> Result<()> {
        if self.target.as_os_str().is_empty() {
            return Err(IdemError::ConfigError(
                "Target path must not be empty".to_string(),
            ));
        }
        let suffix = &self.backup.suffix;
        if suffix.is_empty() {
            return Err(IdemError::ConfigError(
                "Backup suffix must not be empty".to_string(),
            ));
        }
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(IdemError::ConfigError(format!(
                "Backup suffix '{}' must not contain a path separator",
                suffix
            )));
        }
        Ok(())
    }
}
