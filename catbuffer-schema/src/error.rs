//! Error types for schema loading and validation.

use std::fmt;
use thiserror::Error;

/// Error type for schema loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML decoding error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, enum value, etc.).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid schema document structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

/// What a named reference inside a layout attribute points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A `size` naming the sibling that holds a count or byte length.
    Size,
    /// A `condition` naming the discriminant attribute.
    Condition,
    /// A `condition_value` naming a value of the discriminant's enumeration.
    ConditionValue,
    /// A type reference (attribute type or inline target).
    Type,
    /// A `const` value naming a value of an enumeration.
    Constant,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Size => "size",
            Self::Condition => "condition",
            Self::ConditionValue => "condition value",
            Self::Type => "type",
            Self::Constant => "constant",
        };
        f.write_str(kind)
    }
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Loading error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Type not found.
    #[error("type '{type_name}' referenced by '{owner}.{attribute}' not found")]
    TypeNotFound {
        /// Owning type name.
        owner: String,
        /// Attribute name.
        attribute: String,
        /// Missing type name.
        type_name: String,
    },

    /// A named reference does not resolve within the schema.
    #[error("unresolved {kind} reference '{reference}' in '{owner}.{attribute}'")]
    UnresolvedReference {
        /// Owning type name.
        owner: String,
        /// Attribute name.
        attribute: String,
        /// The reference that failed to resolve.
        reference: String,
        /// What the reference points at.
        kind: ReferenceKind,
    },

    /// Circular inline composition.
    #[error("circular inline composition detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates an unresolved reference error.
    pub fn unresolved(
        owner: impl Into<String>,
        attribute: impl Into<String>,
        reference: impl Into<String>,
        kind: ReferenceKind,
    ) -> Self {
        Self::UnresolvedReference {
            owner: owner.into(),
            attribute: attribute.into(),
            reference: reference.into(),
            kind,
        }
    }

    /// Creates a circular reference error from the composition path.
    pub fn circular<S: AsRef<str>>(path: &[S]) -> Self {
        let path = path
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::CircularReference { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_reference_display() {
        let err = SchemaError::unresolved("TransferTransaction", "mosaics", "count", ReferenceKind::Size);
        assert_eq!(
            err.to_string(),
            "unresolved size reference 'count' in 'TransferTransaction.mosaics'"
        );
    }

    #[test]
    fn test_circular_path() {
        let err = SchemaError::circular(&["A", "B", "A"]);
        assert!(err.to_string().contains("A -> B -> A"));
    }

    #[test]
    fn test_parse_error_duplicate() {
        let err = ParseError::duplicate("type", "Amount");
        assert_eq!(err.to_string(), "duplicate type definition: 'Amount'");
    }
}
