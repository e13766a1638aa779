//! C++ capabilities.

use super::{GeneratedType, LanguageHelper};
use crate::classify::ResolvedSize;
use catbuffer_schema::Signedness;

/// C++ target: fixed-width integers, `std::array` for literal sizes, headers as imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppHelper;

impl LanguageHelper for CppHelper {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn builtin_type_for(&self, width: u64, signedness: Signedness) -> GeneratedType {
        let bits = match width {
            1 => 8,
            2 => 16,
            3 | 4 => 32,
            _ => 64,
        };
        let prefix = match signedness {
            Signedness::Signed => "int",
            Signedness::Unsigned => "uint",
        };
        GeneratedType::builtin(format!("{prefix}{bits}_t")).with_import("<cstdint>")
    }

    fn buffer_type(&self, size: &ResolvedSize) -> GeneratedType {
        self.list_type(self.builtin_type_for(1, Signedness::Unsigned), Some(size))
    }

    fn list_type(&self, element: GeneratedType, size: Option<&ResolvedSize>) -> GeneratedType {
        match size {
            Some(ResolvedSize::Literal(n)) => {
                let name = format!("std::array<{element}, {n}>");
                element.wrap(name).with_import("<array>")
            }
            _ => {
                let name = format!("std::vector<{element}>");
                element.wrap(name).with_import("<vector>")
            }
        }
    }

    fn flags_type(&self, element: GeneratedType) -> GeneratedType {
        element
    }

    fn struct_class_suffix(&self) -> &'static str {
        ""
    }

    fn value_class_suffix(&self) -> &'static str {
        ""
    }

    fn class_import(&self, class: &str) -> String {
        format!("\"{class}.h\"")
    }
}
