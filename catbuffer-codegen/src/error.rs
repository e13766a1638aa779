//! Error types for schema resolution.

use catbuffer_schema::ReferenceKind;
use thiserror::Error;

/// Error type for schema resolution operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema loading error.
    #[error("schema parse error: {0}")]
    Parse(#[from] catbuffer_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] catbuffer_schema::SchemaError),

    /// Invalid generator configuration.
    #[error("invalid generator config: {0}")]
    Config(#[source] serde_yaml::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A named reference does not resolve within the schema.
    #[error("unresolved {kind} reference '{reference}' in '{owner}.{attribute}'")]
    Reference {
        /// Owning type name.
        owner: String,
        /// Attribute name.
        attribute: String,
        /// The reference that failed to resolve.
        reference: String,
        /// What the reference points at.
        kind: ReferenceKind,
    },

    /// An equality condition is keyed on a discriminant that is not an enumeration.
    #[error(
        "discriminant '{discriminant}' of '{owner}.{attribute}' has type '{type_name}', expected an enumeration"
    )]
    NonEnumDiscriminant {
        /// Owning type name.
        owner: String,
        /// Conditional attribute name.
        attribute: String,
        /// Discriminant attribute name.
        discriminant: String,
        /// Discriminant type name.
        type_name: String,
    },

    /// The requested target language is not supported.
    #[error("unknown target language '{name}'")]
    UnknownLanguage {
        /// Requested language name.
        name: String,
    },

    /// No classification rule covers the attribute's shape.
    #[error("attribute '{owner}.{attribute}' cannot be classified")]
    ClassificationExhausted {
        /// Owning type name.
        owner: String,
        /// Attribute name.
        attribute: String,
    },
}

impl CodegenError {
    /// Creates an unresolved reference error.
    pub fn reference(
        owner: impl Into<String>,
        attribute: impl Into<String>,
        reference: impl Into<String>,
        kind: ReferenceKind,
    ) -> Self {
        Self::Reference {
            owner: owner.into(),
            attribute: attribute.into(),
            reference: reference.into(),
            kind,
        }
    }

    /// Returns true if the error is an unresolved schema reference.
    #[must_use]
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Self::Reference { .. }
                | Self::Schema(catbuffer_schema::SchemaError::UnresolvedReference { .. })
                | Self::Schema(catbuffer_schema::SchemaError::TypeNotFound { .. })
        )
    }
}
