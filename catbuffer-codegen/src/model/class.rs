//! Class models for structures.

use super::type_comment;
use crate::attribute::ResolvedAttribute;
use crate::classify::Classifier;
use crate::composition::CompositionWalker;
use crate::conditional::{ConstructorVariant, constructor_variants, link_discriminants};
use crate::error::CodegenError;
use crate::lang::LanguageHelper;
use catbuffer_schema::{ReferenceKind, TypeDescriptor};
use serde::Serialize;
use std::collections::BTreeSet;

/// Super-class of a generated class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuperClass {
    /// Schema structure name.
    pub type_name: String,
    /// Generated class name.
    pub generated_name: String,
}

/// Resolved structure, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassModel {
    /// Schema structure name.
    pub name: String,
    /// Generated class name.
    pub generated_name: String,
    /// Declared or derived comment.
    pub comment: String,
    /// Super-class, if the structure extends one.
    pub super_class: Option<SuperClass>,
    /// Flattened attributes in wire order.
    pub attributes: Vec<ResolvedAttribute>,
    /// Constructor variants; never empty.
    pub constructor_variants: Vec<ConstructorVariant>,
    /// Imports the class needs.
    pub required_imports: BTreeSet<String>,
    /// Name of the body class.
    pub body_class_name: String,
}

impl ClassModel {
    /// Resolves the named structure.
    ///
    /// # Errors
    /// Returns `CodegenError` if the name is not a structure or any
    /// reference within its composition does not resolve.
    pub fn build<L: LanguageHelper>(
        classifier: Classifier<'_>,
        language: &L,
        name: &str,
    ) -> Result<Self, CodegenError> {
        let schema = classifier.schema();
        let Some(TypeDescriptor::Struct(struct_def)) = schema.get_type(name) else {
            return Err(CodegenError::reference(name, name, name, ReferenceKind::Type));
        };

        let generated_name = language.generated_class_name_for(schema, name);
        let composition = CompositionWalker::new(classifier, language, name).walk()?;

        let mut attributes = composition.attributes;
        link_discriminants(schema, name, &mut attributes)?;
        let constructor_variants = constructor_variants(schema, classifier.config(), &attributes);

        let super_class = composition.super_class.map(|type_name| SuperClass {
            generated_name: language.generated_class_name_for(schema, &type_name),
            type_name,
        });

        let mut required_imports = composition.required_imports;
        if let Some(base) = super_class.as_ref().filter(|b| b.generated_name != generated_name) {
            required_imports.insert(language.class_import(&base.generated_name));
        }

        tracing::debug!(
            "Built class {} as {}: {} attributes, {} constructor variants",
            name,
            generated_name,
            attributes.len(),
            constructor_variants.len()
        );

        Ok(Self {
            name: name.to_string(),
            generated_name,
            comment: type_comment(&struct_def.comments, name),
            super_class,
            attributes,
            constructor_variants,
            required_imports,
            body_class_name: format!("{name}Body"),
        })
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&ResolvedAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns the attribute a cross reference points at.
    #[must_use]
    pub fn resolve(&self, index: Option<usize>) -> Option<&ResolvedAttribute> {
        index.and_then(|i| self.attributes.get(i))
    }

    /// Returns true if any attribute is gated by a discriminant.
    #[must_use]
    pub fn has_conditionals(&self) -> bool {
        self.attributes.iter().any(|a| a.is_conditional)
    }

    /// Iterates over the attributes the class declares itself or composes,
    /// excluding those inherited from the super-class.
    pub fn own_attributes(&self) -> impl Iterator<Item = &ResolvedAttribute> {
        self.attributes.iter().filter(|a| !a.is_super && !a.is_inherited)
    }
}
