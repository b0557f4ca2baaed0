use thiserror::Error;

/// A malformed process collection, rejected before it can replace the stored one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Failed to parse process JSON: {0}")]
    JsonParseError(String),

    #[error("Expected a list of processes at the top level, but found {found}")]
    NotACollection { found: String },

    #[error("Process at index {index} is not an object")]
    NotAnObject { index: usize },

    #[error("Process at index {index} is missing the required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Process at index {index} has an empty '{field}'")]
    EmptyField { index: usize, field: &'static str },

    #[error("Process at index {index} has an invalid '{field}': {message}")]
    InvalidField {
        index: usize,
        field: &'static str,
        message: String,
    },
}

/// Errors raised by a persistence backend while reading or writing the collection.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored collection at '{path}' is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Snapshot encoding failed: {0}")]
    Snapshot(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the process store to its callers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid process collection: {0}")]
    Validation(#[from] ValidationError),

    /// The in-memory collection holds the change, but it was not persisted.
    #[error("Changes were not saved: {0}")]
    NotSaved(#[from] PersistenceError),

    /// The stored collection could not be read; the store serves a fallback.
    #[error("Stored processes could not be read, showing a fallback collection: {0}")]
    LoadFailed(#[source] PersistenceError),

    #[error("Failed to serialize the process collection: {0}")]
    Export(String),
}

/// Errors raised by the interactive session coordinator.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Incorrect admin password")]
    WrongSecret,

    #[error("Editing requires an active admin login")]
    NotAuthorized,

    #[error("Process '{0}' not found")]
    ProcessNotFound(String),

    #[error("No process is currently being edited")]
    NoActiveEdit,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings file '{path}' is invalid: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
