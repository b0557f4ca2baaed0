//! JSON import and export of the whole collection.
use super::validation::validate_payload;
use crate::error::{StoreError, ValidationError};
use crate::model::Process;
use serde_json::Value;

/// The file name offered for a downloaded export.
pub const EXPORT_FILE_NAME: &str = "processos.json";

/// Parses and validates an import payload.
pub fn parse_collection(json: &str) -> Result<Vec<Process>, ValidationError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ValidationError::JsonParseError(e.to_string()))?;
    validate_payload(&value)?;
    serde_json::from_value(value).map_err(|e| ValidationError::JsonParseError(e.to_string()))
}

/// Serializes a collection, pretty-printed, in the persisted shape.
pub fn export_collection(processes: &[Process]) -> Result<String, StoreError> {
    serde_json::to_string_pretty(processes).map_err(|e| StoreError::Export(e.to_string()))
}
