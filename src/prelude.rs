//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the guia crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use guia::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let settings = Settings::from_file("path/to/settings.json")?;
//! let store = ProcessStore::new(settings.open_backend(), seed_processes());
//! let mut session = Session::new(store, AdminGate::new(settings.admin_secret.clone()));
//! session.load()?;
//!
//! for process in session.search("turno") {
//!     println!("{}", process.name);
//! }
//! # Ok(())
//! # }
//! ```

// Data model
pub use crate::model::{Answer, AnswerAction, Process, Question, fresh_id, seed_processes};

// Engines
pub use crate::editor::{AnswerEdit, DeleteRequest, Draft};
pub use crate::traversal::{Step, Traversal, TraversalState};

// Store and persistence
pub use crate::store::{
    EXPORT_FILE_NAME, JsonFileBackend, MemoryBackend, Persistence, ProcessStore, SnapshotBackend,
};

// Session and configuration
pub use crate::config::{BackendChoice, Settings};
pub use crate::session::{AdminGate, EditCapability, Session};

// Error types
pub use crate::error::{ConfigError, PersistenceError, SessionError, StoreError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
