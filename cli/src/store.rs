//! JSON-backed engine store
//!
//! The whole engine (ledger plus pools) round-trips through one JSON
//! file. Load-mutate-save per invocation keeps each CLI command a single
//! atomic unit over the store, matching the engine's own one-transition
//! operation model.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eddy_core::{MemoryLedger, PoolEngine};

pub struct Store {
    path: PathBuf,
    pub engine: PoolEngine<MemoryLedger>,
}

impl Store {
    /// Open the store, starting empty if the file does not exist yet
    pub fn open(path: &Path) -> Result<Self> {
        let engine = if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed to read store: {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("failed to parse store: {}", path.display()))?
        } else {
            log::info!("store {} not found, starting empty", path.display());
            PoolEngine::new(MemoryLedger::new())
        };

        Ok(Store {
            path: path.to_path_buf(),
            engine,
        })
    }

    /// Persist the engine back to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let data = serde_json::to_string_pretty(&self.engine).context("failed to encode store")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write store: {}", self.path.display()))
    }
}
