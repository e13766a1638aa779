//! TypeScript capabilities.

use super::{GeneratedType, LanguageHelper};
use crate::classify::ResolvedSize;
use catbuffer_schema::Signedness;

/// TypeScript target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptHelper;

impl LanguageHelper for TypeScriptHelper {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn builtin_type_for(&self, width: u64, _signedness: Signedness) -> GeneratedType {
        if width > 4 {
            GeneratedType::builtin("bigint")
        } else {
            GeneratedType::builtin("number")
        }
    }

    fn buffer_type(&self, _size: &ResolvedSize) -> GeneratedType {
        GeneratedType::builtin("Uint8Array")
    }

    fn list_type(&self, element: GeneratedType, _size: Option<&ResolvedSize>) -> GeneratedType {
        let name = format!("{element}[]");
        element.wrap(name)
    }

    fn flags_type(&self, element: GeneratedType) -> GeneratedType {
        let name = format!("{element}[]");
        element.wrap(name)
    }

    fn class_import(&self, class: &str) -> String {
        format!("./{class}")
    }
}
