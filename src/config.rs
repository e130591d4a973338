//! `drugqry.toml` settings
//!
//! Every key is optional. Command-line flags win over the file, and the file
//! wins over the built-in defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use crate::importer::DRUGBANK_NAMESPACE;

pub const DEFAULT_DATABASE: &str = "full_database.db";
pub const DEFAULT_SOURCE: &str = "full database.xml";
pub const CONFIG_FILE: &str = "drugqry.toml";

/// Environment switch that silences import progress regardless of the file
pub const QUIET_ENV: &str = "DRUGQRY_QUIET";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DrugQryConfig {
    /// SQLite file shared by import and query
    pub database: Option<String>,
    /// DrugBank XML export read by import
    pub source: Option<String>,
    /// Namespace the importer matches tags against
    pub namespace: Option<String>,
    /// Suppress the running drug count during import
    pub quiet: Option<bool>,
}

impl DrugQryConfig {
    /// Config with every key set to its built-in default
    pub fn defaults() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE.to_string()),
            source: Some(DEFAULT_SOURCE.to_string()),
            namespace: Some(DRUGBANK_NAMESPACE.to_string()),
            quiet: Some(false),
        }
    }

    /// Read a config file. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };
        let config = toml::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }

    /// Write this config as TOML. Without `force` an existing file is kept.
    pub fn save(&self, path: &Path, force: bool) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;

        let mut options = OpenOptions::new();
        options.write(true);
        if force {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = match options.open(path) {
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display())
            }
            other => other.with_context(|| format!("creating {}", path.display()))?,
        };
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    /// CLI value, then config value, then built-in default
    pub fn resolve_database(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    pub fn resolve_source(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.source.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE))
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DRUGBANK_NAMESPACE)
    }

    /// `DRUGQRY_QUIET=1|true` forces quiet; otherwise the `quiet` key decides
    pub fn is_quiet(&self) -> bool {
        let forced = std::env::var(QUIET_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        forced || self.quiet.unwrap_or(false)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// Create the directory that will hold a new database file
pub fn prepare_database_dir(database: &Path) -> anyhow::Result<()> {
    match database.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating database directory {}", dir.display())),
        _ => Ok(()),
    }
}
