//! # Catbuffer
//!
//! Resolution of catbuffer binary-layout schemas into models ready for
//! serializer/deserializer emission.
//!
//! ## Features
//!
//! - **Schema loading** - YAML or JSON output of the catbuffer parser, list or map form
//! - **Ten-rule classification** - Every attribute gets exactly one semantic kind
//! - **Inline composition** - Nested layouts flattened in wire order with a single super-class
//! - **Constructor variants** - One per discriminant value of conditional fields
//! - **Type codes** - Enumerations collect `const` references from every structure
//!
//! ## Quick Start
//!
//! ```ignore
//! use catbuffer::prelude::*;
//!
//! let schema = parse_schema_file(Path::new("schemas/all.yaml"))?;
//! let config = GeneratorConfig::default();
//! let compiled = Generator::new(&schema, &config, Language::Java).compile()?;
//!
//! for class in compiled.classes() {
//!     println!("{} ({} variants)", class.generated_name, class.constructor_variants.len());
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema data model, loading and validation
//! - [`codegen`] - Classification, composition, conditional variants and models

pub mod prelude;

/// Schema data model, loading and validation.
pub mod schema {
    pub use catbuffer_schema::*;
}

/// Resolution engine and models.
pub mod codegen {
    pub use catbuffer_codegen::*;
}
