//! Persisted version history: tracking key -> last-known version string.
//!
//! Values stay raw strings so unparsable or pre-release versions survive
//! round-trips. A missing or corrupt file is never fatal; the run starts
//! from an empty history.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to write history file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persisted tracking map.
#[derive(Debug, Default)]
pub struct VersionHistory {
    entries: BTreeMap<String, String>,
}

impl VersionHistory {
    /// Load from `path`. Missing or corrupt files yield an empty history.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => {
                info!("history file {} not found, starting empty", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
            Ok(entries) => {
                info!(
                    "loaded {} tracked versions from {}",
                    entries.len(),
                    path.display()
                );
                Self { entries }
            }
            Err(e) => {
                warn!(
                    "history file {} is corrupt ({}), starting empty",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Last-known version for a tracking key.
    pub fn last_known(&self, tracking_key: &str) -> Option<&str> {
        self.entries.get(tracking_key).map(String::as_str)
    }

    /// Record a newly accepted version. Overwrites any previous value for
    /// the same key; untouched keys are retained.
    pub fn record(&mut self, tracking_key: &str, version: &str) {
        self.entries
            .insert(tracking_key.to_string(), version.to_string());
    }

    /// Persist the full merged map.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json + "\n")?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
