//! Prelude module for convenient imports.
//!
//! ```ignore
//! use catbuffer::prelude::*;
//! ```

// Schema types
pub use catbuffer_schema::{
    LayoutAttribute, ParseError, Schema, SchemaError, TypeDescriptor, parse_schema,
    parse_schema_file, validate_schema,
};

// Resolution engine
pub use catbuffer_codegen::{
    Artifact, AttributeKind, ClassModel, CodegenError, CompiledSchema, ConstructorVariant,
    EnumModel, Generator, GeneratorConfig, Language, LanguageHelper, ResolvedAttribute,
    TypeModel, compile_file, compile_yaml,
};

// Language capabilities
pub use catbuffer_codegen::lang::{CppHelper, JavaHelper, PythonHelper, TypeScriptHelper};
