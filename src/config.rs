use crate::error::ConfigError;
use crate::store::{JsonFileBackend, MemoryBackend, Persistence, SnapshotBackend};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// The available storage backends for the process collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Pretty-printed JSON, the same shape as an export. Easy to hand-edit.
    #[default]
    Json,
    /// Compact bincode snapshot.
    Snapshot,
    /// Nothing is written to disk.
    Memory,
}

/// Runtime settings, loaded from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store_path: PathBuf,
    pub backend: BackendChoice,
    /// Shared secret that unlocks editing. A UI lock, not access control.
    pub admin_secret: String,
    pub export_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/processes.json"),
            backend: BackendChoice::Json,
            admin_secret: "admin".to_string(),
            export_file_name: crate::store::EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing keys take their default values.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Opens the configured backend.
    pub fn open_backend(&self) -> Box<dyn Persistence> {
        match self.backend {
            BackendChoice::Json => Box::new(JsonFileBackend::new(self.store_path.clone())),
            BackendChoice::Snapshot => Box::new(SnapshotBackend::new(self.store_path.clone())),
            BackendChoice::Memory => Box::new(MemoryBackend::new()),
        }
    }
}
