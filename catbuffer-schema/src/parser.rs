//! Catbuffer schema loader.
//!
//! The catbuffer parser emits its type table either as a list of descriptors
//! carrying a `name` key, or as a mapping from name to descriptor. Both shapes
//! are accepted here (JSON documents are valid YAML); declaration order is kept.

use crate::error::ParseError;
use crate::types::{Schema, TypeDescriptor};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;

/// A descriptor in the list form of a schema document.
#[derive(Debug, Deserialize)]
struct NamedDescriptor {
    name: String,
    #[serde(flatten)]
    descriptor: TypeDescriptor,
}

/// Parses a catbuffer schema from a YAML (or JSON) string.
///
/// # Arguments
/// * `yaml` - Schema document content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the document is malformed, uses an unknown type
/// category, or defines a name twice.
pub fn parse_schema(yaml: &str) -> Result<Schema, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(Schema::new());
    }
    let document: Value = serde_yaml::from_str(yaml)?;

    match document {
        Value::Null => Ok(Schema::new()),
        Value::Sequence(_) => {
            let entries: Vec<NamedDescriptor> = serde_yaml::from_value(document)?;
            let mut schema = Schema::new();
            for entry in entries {
                if schema.add_type(entry.name.clone(), entry.descriptor).is_some() {
                    return Err(ParseError::duplicate("type", entry.name));
                }
            }
            Ok(schema)
        }
        Value::Mapping(_) => {
            let entries: IndexMap<String, TypeDescriptor> = serde_yaml::from_value(document)?;
            Ok(entries.into_iter().collect())
        }
        _ => Err(ParseError::invalid_structure(
            "schema document must be a list or a mapping of type descriptors",
        )),
    }
}

/// Parses a catbuffer schema from a file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_schema_file(path: &Path) -> Result<Schema, ParseError> {
    let yaml = std::fs::read_to_string(path)?;
    parse_schema(&yaml)
}
