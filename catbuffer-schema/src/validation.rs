//! Schema validation utilities.
//!
//! This module checks a loaded schema for structural consistency before it
//! reaches the resolution engine.

use crate::error::{ReferenceKind, SchemaError};
use crate::types::{EnumDef, LayoutAttribute, Schema, TypeDescriptor};
use std::collections::HashSet;

/// Validates a loaded schema for correctness.
///
/// `byte_type` is the raw byte alias that attributes may reference without a
/// schema entry (`byte` in catbuffer schemas).
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema, byte_type: &str) -> Result<(), SchemaError> {
    for (name, type_def) in schema.iter() {
        match type_def {
            TypeDescriptor::Enum(enum_def) => validate_enum(name, enum_def)?,
            TypeDescriptor::Struct(struct_def) => {
                validate_layout(schema, name, &struct_def.layout, byte_type)?;
                validate_acyclic(schema, name, &mut Vec::new())?;
            }
            TypeDescriptor::Atomic(_) => {}
        }
    }
    Ok(())
}

/// Validates an enum type definition.
fn validate_enum(name: &str, enum_def: &EnumDef) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    let mut seen_values = HashSet::new();

    for value in &enum_def.values {
        if !seen_names.insert(&value.name) {
            return Err(SchemaError::Validation {
                message: format!("Duplicate enum value name '{}' in enum '{}'", value.name, name),
            });
        }

        if !seen_values.insert(value.value) {
            return Err(SchemaError::Validation {
                message: format!("Duplicate enum value '{}' in enum '{}'", value.value, name),
            });
        }
    }

    Ok(())
}

/// Validates the attributes of a single structure layout.
fn validate_layout(
    schema: &Schema,
    owner: &str,
    layout: &[LayoutAttribute],
    byte_type: &str,
) -> Result<(), SchemaError> {
    for attribute in layout {
        let attribute_name = attribute.display_name();

        if attribute.type_name != byte_type && !schema.has_type(&attribute.type_name) {
            return Err(SchemaError::TypeNotFound {
                owner: owner.to_string(),
                attribute: attribute_name.into_owned(),
                type_name: attribute.type_name.clone(),
            });
        }

        if attribute.is_inline() && schema.layout(&attribute.type_name).is_none() {
            return Err(SchemaError::unresolved(
                owner,
                attribute_name,
                &attribute.type_name,
                ReferenceKind::Type,
            ));
        }

        if let Some(reference) = attribute.size_reference() {
            let is_sibling = layout.iter().any(|s| s.display_name() == reference);
            if !is_sibling {
                return Err(SchemaError::unresolved(
                    owner,
                    attribute_name,
                    reference,
                    ReferenceKind::Size,
                ));
            }
        }
    }

    Ok(())
}

/// Rejects inline compositions that eventually embed themselves.
fn validate_acyclic<'a>(
    schema: &'a Schema,
    name: &'a str,
    path: &mut Vec<&'a str>,
) -> Result<(), SchemaError> {
    if path.contains(&name) {
        path.push(name);
        return Err(SchemaError::circular(path.as_slice()));
    }

    let Some(layout) = schema.layout(name) else {
        return Ok(());
    };

    path.push(name);
    for attribute in layout.iter().filter(|a| a.is_inline()) {
        validate_acyclic(schema, &attribute.type_name, path)?;
    }
    path.pop();

    Ok(())
}
