//! Per-language capabilities.
//!
//! The resolution engine is generic over [`LanguageHelper`]. Each target
//! supplies its builtin integer names, container shapes, class naming, and
//! import rules; everything else is shared.

pub mod cpp;
pub mod java;
pub mod python;
pub mod typescript;

pub use cpp::CppHelper;
pub use java::JavaHelper;
pub use python::PythonHelper;
pub use typescript::TypeScriptHelper;

use crate::classify::{AttributeKind, Classifier, ResolvedSize};
use crate::error::CodegenError;
use catbuffer_schema::naming;
use catbuffer_schema::{LayoutAttribute, Schema, Signedness, TypeCategory};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A target-language type, with what it needs in scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedType {
    /// Rendered type name.
    pub name: String,
    /// Generated schema class the type refers to.
    pub class: Option<String>,
    /// Runtime library imports the type needs.
    pub imports: Vec<String>,
}

impl GeneratedType {
    /// Creates a language builtin type.
    #[must_use]
    pub fn builtin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: None,
            imports: Vec::new(),
        }
    }

    /// Creates a reference to a generated class.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            class: Some(name.clone()),
            name,
            imports: Vec::new(),
        }
    }

    /// Wraps this type in a container, keeping the referenced class.
    #[must_use]
    pub fn wrap(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Adds a runtime import.
    #[must_use]
    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }
}

impl fmt::Display for GeneratedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Capability set a target language supplies to the engine.
pub trait LanguageHelper {
    /// Language name.
    fn name(&self) -> &'static str;

    /// Returns the builtin integer type for a byte width.
    fn builtin_type_for(&self, width: u64, signedness: Signedness) -> GeneratedType;

    /// Returns the raw byte block type.
    fn buffer_type(&self, size: &ResolvedSize) -> GeneratedType;

    /// Returns a collection of `element`; `size` is `None` for length-implicit collections.
    fn list_type(&self, element: GeneratedType, size: Option<&ResolvedSize>) -> GeneratedType;

    /// Returns the bitmask set type over a flags enumeration.
    fn flags_type(&self, element: GeneratedType) -> GeneratedType;

    /// Suffix of classes generated for structures.
    fn struct_class_suffix(&self) -> &'static str {
        "Builder"
    }

    /// Suffix of classes generated for atomic aliases and enumerations.
    fn value_class_suffix(&self) -> &'static str {
        "Dto"
    }

    /// Returns the import naming a generated class.
    fn class_import(&self, class: &str) -> String {
        class.to_string()
    }

    /// Returns the generated class name of a schema type.
    fn generated_class_name_for(&self, schema: &Schema, type_name: &str) -> String {
        let suffix = match schema.category(type_name) {
            Some(TypeCategory::Struct) => self.struct_class_suffix(),
            _ => self.value_class_suffix(),
        };
        format!("{type_name}{suffix}")
    }

    /// Returns the target type of a classified attribute.
    fn generated_type(
        &self,
        classifier: &Classifier<'_>,
        attribute: &LayoutAttribute,
        kind: AttributeKind,
        size: &ResolvedSize,
    ) -> GeneratedType {
        let schema = classifier.schema();
        let is_byte = classifier.config().is_byte_type(&attribute.type_name);
        let element = || GeneratedType::class(self.generated_class_name_for(schema, &attribute.type_name));

        match kind {
            AttributeKind::Simple | AttributeKind::SizeField => self.builtin_type_for(
                classifier.fixed_width(attribute).unwrap_or(1),
                classifier.signedness(attribute),
            ),
            AttributeKind::Buffer => self.buffer_type(size),
            AttributeKind::Array | AttributeKind::FillArray | AttributeKind::VarArray if is_byte => {
                self.buffer_type(size)
            }
            AttributeKind::Array => self.list_type(element(), Some(size)),
            AttributeKind::FillArray | AttributeKind::VarArray => self.list_type(element(), None),
            AttributeKind::Custom => element(),
            AttributeKind::Flags => self.flags_type(element()),
        }
    }

    /// Returns the imports a class needs for one of its types, excluding itself.
    fn required_imports_for(
        &self,
        generated: &GeneratedType,
        owner_class: &str,
        _base_class: Option<&str>,
    ) -> BTreeSet<String> {
        let mut imports: BTreeSet<String> = generated.imports.iter().cloned().collect();
        if let Some(class) = generated.class.as_deref().filter(|c| *c != owner_class) {
            imports.insert(self.class_import(class));
        }
        imports
    }

    /// Returns the constant name of an enumeration value.
    fn enum_constant_name(&self, name: &str) -> String {
        naming::enum_constant_name(name)
    }

    /// Returns the target field name of an attribute.
    fn attribute_name(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Target language selected at run start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Java.
    Java,
    /// TypeScript.
    TypeScript,
    /// Python.
    Python,
    /// C++.
    Cpp,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Self; 4] = [Self::Java, Self::TypeScript, Self::Python, Self::Cpp];

    fn helper(&self) -> &'static dyn LanguageHelper {
        match self {
            Self::Java => &JavaHelper,
            Self::TypeScript => &TypeScriptHelper,
            Self::Python => &PythonHelper,
            Self::Cpp => &CppHelper,
        }
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "python" | "py" => Ok(Self::Python),
            "cpp" | "c++" => Ok(Self::Cpp),
            _ => Err(CodegenError::UnknownLanguage {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.helper().name())
    }
}

impl LanguageHelper for Language {
    fn name(&self) -> &'static str {
        self.helper().name()
    }

    fn builtin_type_for(&self, width: u64, signedness: Signedness) -> GeneratedType {
        self.helper().builtin_type_for(width, signedness)
    }

    fn buffer_type(&self, size: &ResolvedSize) -> GeneratedType {
        self.helper().buffer_type(size)
    }

    fn list_type(&self, element: GeneratedType, size: Option<&ResolvedSize>) -> GeneratedType {
        self.helper().list_type(element, size)
    }

    fn flags_type(&self, element: GeneratedType) -> GeneratedType {
        self.helper().flags_type(element)
    }

    fn struct_class_suffix(&self) -> &'static str {
        self.helper().struct_class_suffix()
    }

    fn value_class_suffix(&self) -> &'static str {
        self.helper().value_class_suffix()
    }

    fn class_import(&self, class: &str) -> String {
        self.helper().class_import(class)
    }

    fn enum_constant_name(&self, name: &str) -> String {
        self.helper().enum_constant_name(name)
    }

    fn attribute_name(&self, name: &str) -> String {
        self.helper().attribute_name(name)
    }
}
