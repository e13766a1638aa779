//! Resolved attributes.

use crate::classify::{AttributeKind, ResolvedSize};
use catbuffer_schema::{ConditionOperation, Signedness, TypeCategory};
use serde::Serialize;

/// Gate on a conditional attribute, resolved against its discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCondition {
    /// Discriminant attribute name.
    pub discriminant: String,
    /// Comparison applied to the discriminant.
    pub operation: ConditionOperation,
    /// Required value, as the enumeration value name when one matches.
    pub value: Option<String>,
}

impl ResolvedCondition {
    /// Returns true for equality conditions.
    #[must_use]
    pub fn is_equality(&self) -> bool {
        self.operation == ConditionOperation::Equals
    }
}

/// One field of a flattened class layout.
///
/// Cross references (`discriminant`, `size_field`, `sized_attribute`) are
/// indices into the owning class model's attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAttribute {
    /// Semantic kind.
    pub kind: AttributeKind,
    /// Attribute name; inline slots are named after their type.
    pub name: String,
    /// Target-language field name.
    pub field_name: String,
    /// Declared or derived comment.
    pub comment: String,
    /// Referenced schema type.
    pub type_name: String,
    /// Category of the referenced type, if it is a schema entry.
    pub base_type: Option<TypeCategory>,
    /// Target-language type.
    pub generated_type: String,
    /// Generated class name of the referenced type.
    pub generated_class_name: String,
    /// Resolved size.
    pub size: ResolvedSize,
    /// Integer signedness.
    pub signedness: Signedness,
    /// False for conditional attributes and derived sizes.
    pub is_final: bool,
    /// Whether the attribute is gated by a discriminant.
    pub is_conditional: bool,
    /// Gate of a conditional attribute.
    pub condition: Option<ResolvedCondition>,
    /// Index of the discriminant attribute.
    pub discriminant: Option<usize>,
    /// Whether the discriminant is emitted after this attribute.
    pub read_before: bool,
    /// Name of the top-level composition slot this attribute was reached through.
    pub aggregate_name: Option<String>,
    /// Generated structure the attribute was declared in.
    pub aggregate_class: Option<String>,
    /// Whether this attribute is the super-class slot.
    pub is_super: bool,
    /// Whether this attribute was reached through the super-class slot.
    pub is_inherited: bool,
    /// Whether this attribute belongs to a composed member structure.
    pub is_inline: bool,
    /// Whether this attribute is itself an inline composition slot.
    pub is_aggregate: bool,
    /// Whether this attribute is reserved padding.
    pub is_reserved: bool,
    /// Sort key of an ordered collection.
    pub sort_key: Option<String>,
    /// Index of the attribute holding this attribute's count or length.
    pub size_field: Option<usize>,
    /// Index of the attribute this size field measures.
    pub sized_attribute: Option<usize>,
    /// Layout visit the attribute was declared in.
    #[serde(skip)]
    pub(crate) scope: usize,
}

impl ResolvedAttribute {
    /// Returns true if the attribute is a derived size or count.
    #[must_use]
    pub fn is_size_field(&self) -> bool {
        self.kind == AttributeKind::SizeField
    }

    /// Returns true if the attribute is kept ordered by a sort key.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sort_key.is_some()
    }

    /// Returns true if the attribute is gated by equality on the discriminant at `discriminant`.
    #[must_use]
    pub fn is_gated_by(&self, discriminant: usize) -> bool {
        self.discriminant == Some(discriminant)
            && self.condition.as_ref().is_some_and(ResolvedCondition::is_equality)
    }
}
