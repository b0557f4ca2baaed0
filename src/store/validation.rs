use crate::error::ValidationError;
use crate::model::Process;
use ahash::AHashSet;
use serde_json::{Map, Value};

/// Checks the structure of an untyped payload before it is deserialized.
///
/// The top level must be a list, and every element an object with a non-empty
/// string `id`, a non-empty string `name` and a `questions` list (which may be
/// empty). The first malformed element rejects the whole payload.
pub fn validate_payload(value: &Value) -> Result<(), ValidationError> {
    let entries = value
        .as_array()
        .ok_or_else(|| ValidationError::NotACollection {
            found: describe(value).to_string(),
        })?;

    for (index, entry) in entries.iter().enumerate() {
        let object = entry
            .as_object()
            .ok_or(ValidationError::NotAnObject { index })?;
        require_text(object, index, "id")?;
        require_text(object, index, "name")?;
        match object.get("questions") {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField {
                    index,
                    field: "questions",
                });
            }
            Some(Value::Array(_)) => {}
            Some(other) => {
                return Err(ValidationError::InvalidField {
                    index,
                    field: "questions",
                    message: format!("expected a list, found {}", describe(other)),
                });
            }
        }
    }
    Ok(())
}

/// Checks an already typed collection: every process needs a non-empty `id` and `name`.
pub fn validate_processes(processes: &[Process]) -> Result<(), ValidationError> {
    let mut seen = AHashSet::with_capacity(processes.len());
    for (index, process) in processes.iter().enumerate() {
        if process.id.trim().is_empty() {
            return Err(ValidationError::EmptyField { index, field: "id" });
        }
        if process.name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                index,
                field: "name",
            });
        }
        if !seen.insert(process.id.as_str()) {
            log::warn!(
                "Process id '{}' appears more than once; updates will target the first match",
                process.id
            );
        }
    }
    Ok(())
}

fn require_text(
    object: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<(), ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField { index, field }),
        Some(Value::String(text)) if text.trim().is_empty() => {
            Err(ValidationError::EmptyField { index, field })
        }
        Some(Value::String(_)) => Ok(()),
        Some(other) => Err(ValidationError::InvalidField {
            index,
            field,
            message: format!("expected a string, found {}", describe(other)),
        }),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
