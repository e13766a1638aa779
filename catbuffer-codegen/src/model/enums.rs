//! Enum models.
//!
//! Besides its declared values, an enumeration collects one value per
//! generated structure that declares a `const` attribute of its type. This
//! is how type-code enumerations are derived from the structures they tag.

use super::type_comment;
use crate::classify::Classifier;
use crate::error::CodegenError;
use crate::lang::LanguageHelper;
use catbuffer_schema::naming::comment_from_name;
use catbuffer_schema::{EnumDef, LayoutAttribute, ReferenceKind, Scalar, SchemaError, Signedness};
use serde::Serialize;

/// Where an enumeration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Declared in the enumeration itself.
    Declared,
    /// Contributed by a structure's `const` attribute.
    ReverseReference,
}

/// One enumeration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValueModel {
    /// Value name, or the contributing structure name.
    pub name: String,
    /// Target-language constant name.
    pub constant_name: String,
    /// Literal value.
    pub value: u64,
    /// Declared or derived comment.
    pub comment: String,
    /// Origin of the value.
    pub source: ValueSource,
}

/// Resolved enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumModel {
    /// Schema type name.
    pub name: String,
    /// Generated class name.
    pub generated_name: String,
    /// Backing integer size in bytes.
    pub size: u64,
    /// Backing integer type.
    pub generated_type: String,
    /// Backing integer signedness.
    pub signedness: Signedness,
    /// Whether the enumeration is a bitmask.
    pub is_flags: bool,
    /// Declared or derived comment.
    pub comment: String,
    /// Declared values followed by reverse references.
    pub values: Vec<EnumValueModel>,
}

impl EnumModel {
    /// Resolves the named enumeration, scanning the whole schema for `const` references.
    ///
    /// # Errors
    /// Returns `CodegenError::Reference` if the name is not an enumeration or
    /// a `const` value names no value of it.
    pub fn build<L: LanguageHelper>(
        classifier: Classifier<'_>,
        language: &L,
        name: &str,
    ) -> Result<Self, CodegenError> {
        let schema = classifier.schema();
        let Some(enum_def) = schema.get_enum(name) else {
            return Err(CodegenError::reference(name, name, name, ReferenceKind::Type));
        };

        let mut values: Vec<EnumValueModel> = enum_def
            .values
            .iter()
            .map(|value| EnumValueModel {
                name: value.name.clone(),
                constant_name: value.name.clone(),
                value: value.value,
                comment: value.comments.trim().to_string(),
                source: ValueSource::Declared,
            })
            .collect();
        let declared = values.len();

        for (struct_name, struct_def) in schema.structs() {
            if !classifier.config().should_generate_class(struct_name) {
                continue;
            }
            for attribute in struct_def
                .layout
                .iter()
                .filter(|a| a.is_const() && a.type_name == name)
            {
                values.push(EnumValueModel {
                    name: struct_name.to_string(),
                    constant_name: language.enum_constant_name(struct_name),
                    value: const_value(enum_def, struct_name, attribute)?,
                    comment: comment_from_name(struct_name),
                    source: ValueSource::ReverseReference,
                });
            }
        }

        tracing::debug!(
            "Built enum {} with {} declared and {} referenced values",
            name,
            declared,
            values.len() - declared
        );

        Ok(Self {
            name: name.to_string(),
            generated_name: language.generated_class_name_for(schema, name),
            size: enum_def.size,
            generated_type: language.builtin_type_for(enum_def.size, enum_def.signedness).name,
            signedness: enum_def.signedness,
            is_flags: enum_def.is_flags || classifier.config().is_flags_type(name),
            comment: type_comment(&enum_def.comments, name),
            values,
        })
    }

    /// Returns the values contributed by `const` attributes.
    pub fn reverse_references(&self) -> impl Iterator<Item = &EnumValueModel> {
        self.values
            .iter()
            .filter(|v| v.source == ValueSource::ReverseReference)
    }
}

/// Resolves a `const` attribute's value to a literal of the enumeration.
fn const_value(
    enum_def: &EnumDef,
    owner: &str,
    attribute: &LayoutAttribute,
) -> Result<u64, CodegenError> {
    match &attribute.value {
        Some(Scalar::Int(value)) => Ok(*value),
        Some(Scalar::Name(reference)) => enum_def
            .get_value(reference)
            .map(|v| v.value)
            .ok_or_else(|| {
                CodegenError::reference(
                    owner,
                    attribute.display_name(),
                    reference,
                    ReferenceKind::Constant,
                )
            }),
        None => Err(SchemaError::Validation {
            message: format!(
                "const attribute '{}.{}' has no value",
                owner,
                attribute.display_name()
            ),
        }
        .into()),
    }
}
