//! Python capabilities.

use super::{GeneratedType, LanguageHelper};
use crate::classify::ResolvedSize;
use catbuffer_schema::Signedness;
use catbuffer_schema::naming::to_snake_case;

/// Python target: snake_case fields, `typing.List` collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonHelper;

impl LanguageHelper for PythonHelper {
    fn name(&self) -> &'static str {
        "python"
    }

    fn builtin_type_for(&self, _width: u64, _signedness: Signedness) -> GeneratedType {
        GeneratedType::builtin("int")
    }

    fn buffer_type(&self, _size: &ResolvedSize) -> GeneratedType {
        GeneratedType::builtin("bytes")
    }

    fn list_type(&self, element: GeneratedType, _size: Option<&ResolvedSize>) -> GeneratedType {
        let name = format!("List[{element}]");
        element.wrap(name).with_import("typing.List")
    }

    fn flags_type(&self, element: GeneratedType) -> GeneratedType {
        self.list_type(element, None)
    }

    fn attribute_name(&self, name: &str) -> String {
        to_snake_case(name)
    }
}
