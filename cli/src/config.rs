//! CLI configuration: store location and default actor

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional config file, TOML. Flags always win over the file, the file
/// wins over built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    /// Path to the JSON store holding the ledger and pools
    pub store: Option<PathBuf>,
    /// Actor name used when `--actor` is not given
    pub actor: Option<String>,
}

impl CliConfig {
    /// Load from an explicit path, or from the default location if that
    /// exists; a missing default file is just an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(CliConfig::default()),
            },
        };

        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&data)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Resolve the store path: flag, then config, then `eddy-store.json`
    /// in the current directory.
    pub fn store_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.store.clone())
            .unwrap_or_else(|| PathBuf::from("eddy-store.json"))
    }

    /// Resolve the acting identity name: flag, then config, then "me".
    pub fn actor_name(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.actor.clone())
            .unwrap_or_else(|| "me".to_string())
    }
}

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config/eddy/config.toml"))
}
