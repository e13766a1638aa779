//! # Catbuffer Codegen
//!
//! Resolution engine turning catbuffer schemas into emitter-ready models.
//!
//! This crate provides:
//! - Attribute classification into semantic kinds
//! - Flattening of inline compositions with super-class detection
//! - Discriminant linking and constructor variants for conditional fields
//! - Class, enum, and type models per schema entry
//! - Java, TypeScript, Python, and C++ language capabilities

pub mod attribute;
pub mod classify;
pub mod composition;
pub mod conditional;
pub mod config;
pub mod error;
pub mod generator;
pub mod lang;
pub mod model;

#[cfg(test)]
mod fixtures;

pub use attribute::{ResolvedAttribute, ResolvedCondition};
pub use classify::{AttributeKind, Classifier, ResolvedSize};
pub use composition::{Composition, CompositionWalker, select_super_class};
pub use conditional::{ConstructorArgument, ConstructorVariant};
pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::{Artifact, CompiledSchema, Generator};
pub use lang::{GeneratedType, Language, LanguageHelper};
pub use model::{ClassModel, EnumModel, EnumValueModel, SuperClass, TypeModel, ValueSource};

/// Compiles a catbuffer schema document with the default configuration.
///
/// # Arguments
/// * `yaml` - Schema content, YAML or JSON
/// * `language` - Target language capabilities
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or resolution fails.
pub fn compile_yaml<L: LanguageHelper>(
    yaml: &str,
    language: L,
) -> Result<CompiledSchema, CodegenError> {
    compile_yaml_with(yaml, &GeneratorConfig::default(), language)
}

/// Compiles a catbuffer schema document.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or resolution fails.
pub fn compile_yaml_with<L: LanguageHelper>(
    yaml: &str,
    config: &GeneratorConfig,
    language: L,
) -> Result<CompiledSchema, CodegenError> {
    let schema = catbuffer_schema::parse_schema(yaml)?;
    Generator::new(&schema, config, language).compile()
}

/// Compiles a catbuffer schema file.
///
/// # Arguments
/// * `path` - Path to the schema file
/// * `language` - Target language capabilities
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or resolution fails.
pub fn compile_file<L: LanguageHelper>(
    path: &std::path::Path,
    language: L,
) -> Result<CompiledSchema, CodegenError> {
    let yaml = std::fs::read_to_string(path)?;
    compile_yaml(&yaml, language)
}
