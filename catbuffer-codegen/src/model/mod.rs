//! Resolved models handed to emitters.
//!
//! One model per schema entry: [`TypeModel`] for atomic aliases,
//! [`EnumModel`] for enumerations, [`ClassModel`] for structures.

pub mod class;
pub mod enums;
pub mod types;

pub use class::{ClassModel, SuperClass};
pub use enums::{EnumModel, EnumValueModel, ValueSource};
pub use types::TypeModel;

use catbuffer_schema::naming::{comment_from_name, decapitalize};

/// Returns the declared comment, or one derived from the type name.
pub(crate) fn type_comment(declared: &str, name: &str) -> String {
    let declared = declared.trim();
    if declared.is_empty() {
        comment_from_name(&decapitalize(name))
    } else {
        declared.to_string()
    }
}
