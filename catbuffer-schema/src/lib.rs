//! # Catbuffer Schema
//!
//! Catbuffer schema data model and loader.
//!
//! This crate provides:
//! - Type descriptors for atomic aliases, enumerations and structures
//! - Raw layout attributes as declared in structure layouts
//! - YAML/JSON loading of the catbuffer parser output
//! - Structural validation of type and size references

pub mod error;
pub mod naming;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, ReferenceKind, SchemaError};
pub use parser::{parse_schema, parse_schema_file};
pub use types::{
    AtomicDef, AttributeSize, ConditionOperation, Disposition, EnumDef, EnumValue,
    LayoutAttribute, Scalar, Schema, Signedness, StructDef, TypeCategory, TypeDescriptor,
};
pub use validation::validate_schema;
