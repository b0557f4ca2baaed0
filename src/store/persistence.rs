use crate::error::PersistenceError;
use crate::model::Process;
use bincode::config::standard;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the process collection lives between runs.
///
/// Backends are interchangeable; the store only needs a whole-collection
/// read and write.
pub trait Persistence {
    /// Reads the stored collection. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Process>>, PersistenceError>;

    /// Replaces the stored collection.
    fn save(&mut self, processes: &[Process]) -> Result<(), PersistenceError>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn load(&self) -> Result<Option<Vec<Process>>, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, processes: &[Process]) -> Result<(), PersistenceError> {
        (**self).save(processes)
    }
}

/// Keeps the collection in memory only. Useful for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    stored: Option<Vec<Process>>,
    saves: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_processes(processes: Vec<Process>) -> Self {
        Self {
            stored: Some(processes),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<&[Process]> {
        self.stored.as_deref()
    }

    /// How many times the collection has been written.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryBackend {
    fn load(&self) -> Result<Option<Vec<Process>>, PersistenceError> {
        Ok(self.stored.clone())
    }

    fn save(&mut self, processes: &[Process]) -> Result<(), PersistenceError> {
        self.stored = Some(processes.to_vec());
        self.saves += 1;
        Ok(())
    }
}

/// Stores the collection as pretty-printed JSON, in the same shape as an export.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFileBackend {
    fn load(&self) -> Result<Option<Vec<Process>>, PersistenceError> {
        let Some(content) = read_if_present(&self.path, |p| fs::read_to_string(p))? else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| PersistenceError::Json {
                path: display(&self.path),
                source,
            })
    }

    fn save(&mut self, processes: &[Process]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(processes).map_err(|source| {
            PersistenceError::Json {
                path: display(&self.path),
                source,
            }
        })?;
        write_replacing(&self.path, json.as_bytes())
    }
}

/// Stores the collection as a compact bincode snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    path: PathBuf,
}

impl SnapshotBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes a snapshot from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Vec<Process>, PersistenceError> {
        bincode::decode_from_slice(bytes, standard())
            .map(|(processes, _)| processes)
            .map_err(|e| PersistenceError::Snapshot(format!("Deserialization failed: {}", e)))
    }

    pub fn to_bytes(processes: &[Process]) -> Result<Vec<u8>, PersistenceError> {
        bincode::encode_to_vec(processes, standard())
            .map_err(|e| PersistenceError::Snapshot(format!("Serialization failed: {}", e)))
    }
}

impl Persistence for SnapshotBackend {
    fn load(&self) -> Result<Option<Vec<Process>>, PersistenceError> {
        match read_if_present(&self.path, |p| fs::read(p))? {
            Some(bytes) if !bytes.is_empty() => Self::from_bytes(&bytes).map(Some),
            _ => Ok(None),
        }
    }

    fn save(&mut self, processes: &[Process]) -> Result<(), PersistenceError> {
        let bytes = Self::to_bytes(processes)?;
        write_replacing(&self.path, &bytes)
    }
}

fn read_if_present<T>(
    path: &Path,
    read: impl FnOnce(&Path) -> std::io::Result<T>,
) -> Result<Option<T>, PersistenceError> {
    match read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PersistenceError::Io {
            path: display(path),
            source,
        }),
    }
}

/// Writes to a sibling temporary file first, so a failed write never truncates the old data.
fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    let io_error = |source: std::io::Error| PersistenceError::Io {
        path: display(path),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes).map_err(io_error)?;
    fs::rename(&tmp, path).map_err(|source| {
        if let Err(e) = fs::remove_file(&tmp) {
            log::warn!("Could not remove temporary file '{}': {}", display(&tmp), e);
        }
        io_error(source)
    })
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
