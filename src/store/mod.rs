//! The canonical, name-ordered process collection.
//!
//! [`ProcessStore`] owns the collection and writes it through an injected
//! [`Persistence`] backend. Every operation that changes the collection sorts
//! it by name before persisting, so readers can rely on [`ProcessStore::processes`]
//! always being in name order.
//!
//! When a write fails the in-memory collection keeps the change and the caller
//! receives [`StoreError::NotSaved`], so nothing the user did is silently lost.
use crate::error::StoreError;
use crate::model::Process;

pub mod collation;
pub mod persistence;
pub mod transfer;
pub mod validation;

pub use collation::{CollationKey, compare_names, is_sorted_by_name, sort_by_name};
pub use persistence::{JsonFileBackend, MemoryBackend, Persistence, SnapshotBackend};
pub use transfer::{EXPORT_FILE_NAME, export_collection, parse_collection};
pub use validation::{validate_payload, validate_processes};

pub struct ProcessStore<P: Persistence> {
    backend: P,
    seed: Vec<Process>,
    processes: Vec<Process>,
    loaded: bool,
}

impl<P: Persistence> ProcessStore<P> {
    /// Creates a store that falls back to `seed` when the backend holds nothing.
    pub fn new(backend: P, seed: Vec<Process>) -> Self {
        Self {
            backend,
            seed,
            processes: Vec::new(),
            loaded: false,
        }
    }

    /// Reads the collection from the backend.
    ///
    /// An empty or absent collection is replaced by the seed, which is then
    /// persisted. A read failure leaves the store with its last loaded
    /// collection, or the seed if nothing was loaded yet.
    ///
    /// The store always holds a usable collection afterwards, even on error:
    /// [`StoreError::NotSaved`] means the seed is served but was not written,
    /// [`StoreError::LoadFailed`] means a fallback collection is served.
    pub fn load(&mut self) -> Result<&[Process], StoreError> {
        let outcome = match self.backend.load() {
            Ok(Some(mut processes)) if !processes.is_empty() => {
                sort_by_name(&mut processes);
                log::info!("Loaded {} processes", processes.len());
                self.processes = processes;
                Ok(())
            }
            Ok(_) => {
                let mut seed = self.seed.clone();
                sort_by_name(&mut seed);
                log::info!("No stored processes; seeding {} defaults", seed.len());
                self.processes = seed;
                self.persist()
            }
            Err(e) => {
                log::error!("Failed to load processes: {}", e);
                if !self.loaded {
                    log::warn!("Falling back to {} default processes", self.seed.len());
                    let mut seed = self.seed.clone();
                    sort_by_name(&mut seed);
                    self.processes = seed;
                } else {
                    log::warn!("Keeping last loaded collection");
                }
                Err(StoreError::LoadFailed(e))
            }
        };
        self.loaded = true;
        outcome.map(|()| self.processes.as_slice())
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn get(&self, process_id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == process_id)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }

    /// Replaces the entire collection after validating every entry.
    ///
    /// A malformed entry rejects the whole batch and leaves the collection untouched.
    pub fn replace_all(&mut self, mut processes: Vec<Process>) -> Result<(), StoreError> {
        validate_processes(&processes)?;
        sort_by_name(&mut processes);
        log::info!("Replacing collection with {} processes", processes.len());
        self.processes = processes;
        self.persist()
    }

    /// Replaces the process with the same id, or appends it.
    pub fn upsert(&mut self, process: Process) -> Result<(), StoreError> {
        match self.processes.iter_mut().find(|p| p.id == process.id) {
            Some(existing) => {
                log::debug!("Updating process '{}'", process.id);
                *existing = process;
            }
            None => {
                log::debug!("Adding process '{}'", process.id);
                self.processes.push(process);
            }
        }
        sort_by_name(&mut self.processes);
        self.persist()
    }

    /// Deletes the process with `process_id`. Returns whether anything was removed.
    pub fn remove(&mut self, process_id: &str) -> Result<bool, StoreError> {
        let before = self.processes.len();
        self.processes.retain(|p| p.id != process_id);
        let removed = self.processes.len() != before;
        if !removed {
            log::debug!("Remove ignored; process '{}' not found", process_id);
            return Ok(false);
        }
        log::info!("Removed process '{}'", process_id);
        sort_by_name(&mut self.processes);
        self.persist()?;
        Ok(true)
    }

    /// Imports a JSON payload, replacing the whole collection. Returns the new size.
    pub fn import_json(&mut self, json: &str) -> Result<usize, StoreError> {
        let processes = parse_collection(json)?;
        self.replace_all(processes)?;
        Ok(self.processes.len())
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        export_collection(&self.processes)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.backend.save(&self.processes).map_err(|e| {
            log::error!("Failed to save processes: {}", e);
            StoreError::NotSaved(e)
        })
    }
}
