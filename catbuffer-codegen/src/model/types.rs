//! Type models for atomic aliases.

use super::type_comment;
use crate::classify::{AttributeKind, Classifier, ResolvedSize};
use crate::error::CodegenError;
use crate::lang::LanguageHelper;
use catbuffer_schema::naming::decapitalize;
use catbuffer_schema::{LayoutAttribute, ReferenceKind, Signedness, TypeDescriptor};
use serde::Serialize;

/// Resolved atomic alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeModel {
    /// Schema type name.
    pub name: String,
    /// Generated class name.
    pub generated_name: String,
    /// Size in bytes.
    pub size: u64,
    /// Kind of the wrapped value.
    pub kind: AttributeKind,
    /// Target type of the wrapped value.
    pub generated_type: String,
    /// Integer signedness.
    pub signedness: Signedness,
    /// Declared or derived comment.
    pub comment: String,
}

impl TypeModel {
    /// Resolves the named atomic alias as a raw byte field of its size.
    ///
    /// # Errors
    /// Returns `CodegenError::Reference` if the name is not an atomic alias.
    pub fn build<L: LanguageHelper>(
        classifier: Classifier<'_>,
        language: &L,
        name: &str,
    ) -> Result<Self, CodegenError> {
        let schema = classifier.schema();
        let Some(TypeDescriptor::Atomic(atomic)) = schema.get_type(name) else {
            return Err(CodegenError::reference(name, name, name, ReferenceKind::Type));
        };

        let mut value = LayoutAttribute::new(decapitalize(name), classifier.config().byte_type.as_str())
            .with_size(atomic.size);
        value.signedness = Some(atomic.signedness);

        let kind = classifier
            .classify(&value, &[])
            .ok_or_else(|| CodegenError::ClassificationExhausted {
                owner: name.to_string(),
                attribute: value.display_name().into_owned(),
            })?;
        let generated =
            language.generated_type(&classifier, &value, kind, &ResolvedSize::Literal(atomic.size));

        tracing::debug!("Built type {} as {:?}", name, kind);

        Ok(Self {
            name: name.to_string(),
            generated_name: language.generated_class_name_for(schema, name),
            size: atomic.size,
            kind,
            generated_type: generated.name,
            signedness: atomic.signedness,
            comment: type_comment(&atomic.comments, name),
        })
    }
}
