//! Java capabilities.

use super::{GeneratedType, LanguageHelper};
use crate::classify::ResolvedSize;
use catbuffer_schema::Signedness;

/// Java target: signed primitives, `ByteBuffer` blocks, `List` collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaHelper;

impl LanguageHelper for JavaHelper {
    fn name(&self) -> &'static str {
        "java"
    }

    fn builtin_type_for(&self, width: u64, _signedness: Signedness) -> GeneratedType {
        // Java has no unsigned primitives; values are widened by the emitter.
        let name = match width {
            1 => "byte",
            2 => "short",
            3 | 4 => "int",
            _ => "long",
        };
        GeneratedType::builtin(name)
    }

    fn buffer_type(&self, _size: &ResolvedSize) -> GeneratedType {
        GeneratedType::builtin("ByteBuffer").with_import("java.nio.ByteBuffer")
    }

    fn list_type(&self, element: GeneratedType, _size: Option<&ResolvedSize>) -> GeneratedType {
        let name = format!("List<{element}>");
        element.wrap(name).with_import("java.util.List")
    }

    fn flags_type(&self, element: GeneratedType) -> GeneratedType {
        let name = format!("EnumSet<{element}>");
        element.wrap(name).with_import("java.util.EnumSet")
    }
}
