//! Schema type definitions.
//!
//! This module contains the data structures representing a catbuffer schema:
//! atomic byte aliases, enumerations, and structures with ordered layouts.

use crate::naming::decapitalize;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Complete catbuffer schema: an ordered mapping from type name to descriptor.
///
/// The schema is read-only once loaded; every resolver borrows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    types: IndexMap<String, TypeDescriptor>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type definition, returning the previous definition with the same name.
    pub fn add_type(
        &mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
    ) -> Option<TypeDescriptor> {
        self.types.insert(name.into(), descriptor)
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the category of the named type.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<TypeCategory> {
        self.get_type(name).map(TypeDescriptor::category)
    }

    /// Returns the layout of the named structure.
    #[must_use]
    pub fn layout(&self, name: &str) -> Option<&[LayoutAttribute]> {
        match self.get_type(name) {
            Some(TypeDescriptor::Struct(s)) => Some(&s.layout),
            _ => None,
        }
    }

    /// Returns the named enumeration.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        match self.get_type(name) {
            Some(TypeDescriptor::Enum(e)) => Some(e),
            _ => None,
        }
    }

    /// Iterates over all types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.types.iter().map(|(name, t)| (name.as_str(), t))
    }

    /// Iterates over all structures in declaration order.
    pub fn structs(&self) -> impl Iterator<Item = (&str, &StructDef)> {
        self.iter().filter_map(|(name, t)| match t {
            TypeDescriptor::Struct(s) => Some((name, s)),
            _ => None,
        })
    }

    /// Returns the number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the schema has no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<(String, TypeDescriptor)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, TypeDescriptor)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

/// Category of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeCategory {
    /// Atomic byte alias with a fixed size.
    #[serde(rename = "byte")]
    Atomic,
    /// Enumeration.
    #[serde(rename = "enum")]
    Enum,
    /// Structure with a layout.
    #[serde(rename = "struct")]
    Struct,
}

impl TypeCategory {
    /// Returns the schema keyword of the category.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Atomic => "byte",
            Self::Enum => "enum",
            Self::Struct => "struct",
        }
    }

    /// Parses a category from its schema keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "byte" => Some(Self::Atomic),
            "enum" => Some(Self::Enum),
            "struct" => Some(Self::Struct),
            _ => None,
        }
    }
}

/// Type descriptor variants, tagged by the schema `type` key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum TypeDescriptor {
    /// Atomic byte alias.
    #[serde(rename = "byte")]
    Atomic(AtomicDef),
    /// Enumeration.
    #[serde(rename = "enum")]
    Enum(EnumDef),
    /// Structure.
    #[serde(rename = "struct")]
    Struct(StructDef),
}

impl TypeDescriptor {
    /// Returns the category of the descriptor.
    #[must_use]
    pub const fn category(&self) -> TypeCategory {
        match self {
            Self::Atomic(_) => TypeCategory::Atomic,
            Self::Enum(_) => TypeCategory::Enum,
            Self::Struct(_) => TypeCategory::Struct,
        }
    }

    /// Returns the declared size in bytes, if the descriptor has one.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        match self {
            Self::Atomic(a) => Some(a.size),
            Self::Enum(e) => Some(e.size),
            Self::Struct(_) => None,
        }
    }

    /// Returns the descriptor comments.
    #[must_use]
    pub fn comments(&self) -> &str {
        match self {
            Self::Atomic(a) => &a.comments,
            Self::Enum(e) => &e.comments,
            Self::Struct(s) => &s.comments,
        }
    }

    /// Returns true if this is a structure.
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Returns true if this is an enumeration.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Returns true if this is an atomic alias.
    #[must_use]
    pub const fn is_atomic(&self) -> bool {
        matches!(self, Self::Atomic(_))
    }
}

/// Integer signedness of an atomic or enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signedness {
    /// Unsigned integer (default).
    #[default]
    Unsigned,
    /// Signed integer.
    Signed,
}

/// Atomic type definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AtomicDef {
    /// Size in bytes.
    pub size: u64,
    /// Signedness.
    #[serde(default)]
    pub signedness: Signedness,
    /// Description.
    #[serde(default)]
    pub comments: String,
}

impl AtomicDef {
    /// Creates a new unsigned atomic definition.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            size,
            signedness: Signedness::Unsigned,
            comments: String::new(),
        }
    }
}

/// Enum type definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumDef {
    /// Backing integer size in bytes.
    pub size: u64,
    /// Signedness of the backing integer.
    #[serde(default)]
    pub signedness: Signedness,
    /// Declared values.
    #[serde(default)]
    pub values: Vec<EnumValue>,
    /// Whether the enumeration is a bitmask.
    #[serde(default)]
    pub is_flags: bool,
    /// Description.
    #[serde(default)]
    pub comments: String,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            size,
            signedness: Signedness::Unsigned,
            values: Vec::new(),
            is_flags: false,
            comments: String::new(),
        }
    }

    /// Adds a value to the enum.
    pub fn add_value(&mut self, value: EnumValue) {
        self.values.push(value);
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Looks up the value a scalar refers to, by name or by literal.
    #[must_use]
    pub fn find(&self, scalar: &Scalar) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.matches(scalar))
    }
}

/// Enum value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumValue {
    /// Value name.
    pub name: String,
    /// Literal value.
    pub value: u64,
    /// Description.
    #[serde(default)]
    pub comments: String,
}

impl EnumValue {
    /// Creates a new enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
            comments: String::new(),
        }
    }

    /// Returns true if the scalar names this value or equals its literal.
    #[must_use]
    pub fn matches(&self, scalar: &Scalar) -> bool {
        match scalar {
            Scalar::Int(v) => *v == self.value,
            Scalar::Name(n) => *n == self.name,
        }
    }
}

/// Structure type definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StructDef {
    /// Ordered layout.
    #[serde(default)]
    pub layout: Vec<LayoutAttribute>,
    /// Description.
    #[serde(default)]
    pub comments: String,
}

impl StructDef {
    /// Creates a structure from its layout.
    #[must_use]
    pub fn new(layout: Vec<LayoutAttribute>) -> Self {
        Self {
            layout,
            comments: String::new(),
        }
    }
}

/// Structural role of a layout attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Inline composition of another structure.
    Inline,
    /// Compile-time constant, never an instance field.
    Const,
    /// Collection consuming the remaining bytes.
    Fill,
    /// Self-delimited variable collection.
    Var,
    /// A disposition this version of the model does not know.
    #[serde(other)]
    Unknown,
}

/// Comparison applied between a discriminant and a `condition_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOperation {
    /// Attribute present when the discriminant equals the value.
    #[default]
    #[serde(alias = "==")]
    Equals,
    /// Attribute present when the discriminant bitmask has the value.
    Has,
}

/// Declared size of a layout attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttributeSize {
    /// Literal byte width or element count.
    Fixed(u64),
    /// Name of the sibling holding the count or byte length.
    Field(String),
}

impl fmt::Display for AttributeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Field(name) => f.write_str(name),
        }
    }
}

/// A scalar that is either an integer literal or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer literal.
    Int(u64),
    /// Symbolic name.
    Name(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Raw attribute as declared in a structure layout.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LayoutAttribute {
    /// Attribute name (absent for inline compositions).
    #[serde(default)]
    pub name: Option<String>,
    /// Referenced type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Structural role.
    #[serde(default)]
    pub disposition: Option<Disposition>,
    /// Literal size, or the name of the sibling holding it.
    #[serde(default)]
    pub size: Option<AttributeSize>,
    /// Signedness of an inline integer.
    #[serde(default)]
    pub signedness: Option<Signedness>,
    /// Name of the discriminant gating this attribute.
    #[serde(default)]
    pub condition: Option<String>,
    /// Comparison against the discriminant.
    #[serde(default)]
    pub condition_operation: Option<ConditionOperation>,
    /// Value the discriminant must hold.
    #[serde(default)]
    pub condition_value: Option<Scalar>,
    /// Field keeping a variable collection ordered on insertion.
    #[serde(default)]
    pub sort_key: Option<String>,
    /// Value of a `const` attribute.
    #[serde(default)]
    pub value: Option<Scalar>,
    /// Description.
    #[serde(default)]
    pub comments: String,
}

impl LayoutAttribute {
    /// Creates a plain named attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Creates an inline composition of the named structure.
    #[must_use]
    pub fn inline(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            disposition: Some(Disposition::Inline),
            ..Self::default()
        }
    }

    /// Sets the disposition.
    #[must_use]
    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = Some(disposition);
        self
    }

    /// Sets a literal size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(AttributeSize::Fixed(size));
        self
    }

    /// Sets a size-by-name reference.
    #[must_use]
    pub fn with_size_field(mut self, field: impl Into<String>) -> Self {
        self.size = Some(AttributeSize::Field(field.into()));
        self
    }

    /// Gates the attribute on `discriminant == value`.
    #[must_use]
    pub fn with_condition(mut self, discriminant: impl Into<String>, value: Scalar) -> Self {
        self.condition = Some(discriminant.into());
        self.condition_operation = Some(ConditionOperation::Equals);
        self.condition_value = Some(value);
        self
    }

    /// Sets the constant value of a `const` attribute.
    #[must_use]
    pub fn with_value(mut self, value: Scalar) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the attribute name; inline compositions are named after their type.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(decapitalize(&self.type_name)),
        }
    }

    /// Returns true if the attribute is an inline composition.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.disposition == Some(Disposition::Inline)
    }

    /// Returns true if the attribute is a compile-time constant.
    #[must_use]
    pub fn is_const(&self) -> bool {
        self.disposition == Some(Disposition::Const)
    }

    /// Returns true if the attribute is a fill-to-end collection.
    #[must_use]
    pub fn is_fill_array(&self) -> bool {
        self.disposition == Some(Disposition::Fill)
    }

    /// Returns true if the attribute is a self-delimited collection.
    #[must_use]
    pub fn is_var_array(&self) -> bool {
        self.disposition == Some(Disposition::Var)
    }

    /// Returns true if the attribute is gated by a discriminant.
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Returns true if the collection is kept ordered by a sort key.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sort_key.is_some()
    }

    /// Returns true for padding fields such as `entityBody_Reserved1`.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.size.is_some()
            && self
                .name
                .as_deref()
                .is_some_and(|name| name.contains("_Reserved"))
    }

    /// Returns the comparison applied to the discriminant, defaulting to equality.
    #[must_use]
    pub fn condition_operation(&self) -> ConditionOperation {
        self.condition_operation.unwrap_or_default()
    }

    /// Returns the sibling named by a size-by-name reference.
    #[must_use]
    pub fn size_reference(&self) -> Option<&str> {
        match &self.size {
            Some(AttributeSize::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns the literal size, if declared.
    #[must_use]
    pub fn literal_size(&self) -> Option<u64> {
        match self.size {
            Some(AttributeSize::Fixed(n)) => Some(n),
            _ => None,
        }
    }
}
