//! Attribute classification.
//!
//! Pure functions over the schema that decide what an attribute is on the
//! wire: its [`AttributeKind`], its resolved size, and the category of the
//! type it references.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use catbuffer_schema::naming::comment_from_name;
use catbuffer_schema::{
    AttributeSize, Disposition, LayoutAttribute, ReferenceKind, Schema, Signedness, TypeCategory,
    TypeDescriptor,
};
use serde::Serialize;

/// Semantic kind of a resolved attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Fixed-width integer of at most the builtin width limit.
    Simple,
    /// Raw byte block, fixed or named length.
    Buffer,
    /// Homogeneous sequence of non-byte elements, fixed or named count.
    Array,
    /// Nested structure or enum value, or inline composition.
    Custom,
    /// Bitmask enumeration.
    Flags,
    /// Derived byte length or element count of a sibling.
    SizeField,
    /// Collection consuming the remaining bytes.
    FillArray,
    /// Self-delimited collection.
    VarArray,
}

impl AttributeKind {
    /// Returns true for any of the collection kinds.
    #[must_use]
    pub const fn is_any_array(&self) -> bool {
        matches!(self, Self::Array | Self::FillArray | Self::VarArray)
    }

    /// Returns true if values of this kind are derived, never supplied by callers.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(self, Self::SizeField)
    }
}

/// Size of an attribute after resolution against the schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedSize {
    /// Literal byte width or element count.
    Literal(u64),
    /// Name of the sibling holding the count or byte length.
    Field(String),
}

impl From<&AttributeSize> for ResolvedSize {
    fn from(size: &AttributeSize) -> Self {
        match size {
            AttributeSize::Fixed(n) => Self::Literal(*n),
            AttributeSize::Field(name) => Self::Field(name.clone()),
        }
    }
}

/// Classifies attributes against one schema and configuration.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfig,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier over a schema.
    #[must_use]
    pub const fn new(schema: &'a Schema, config: &'a GeneratorConfig) -> Self {
        Self { schema, config }
    }

    /// Returns the schema being classified against.
    #[must_use]
    pub const fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Classifies an attribute given the layout it is declared in.
    ///
    /// Rules are evaluated in order and the first match wins:
    ///
    /// 1. `var` disposition: [`AttributeKind::VarArray`]
    /// 2. `fill` disposition: [`AttributeKind::FillArray`]
    /// 3. `inline` disposition of a generated structure: [`AttributeKind::Custom`]
    /// 4. a sibling's size names this attribute: [`AttributeKind::SizeField`]
    /// 5. type name ends with the flags suffix: [`AttributeKind::Flags`]
    /// 6. type name is a category keyword, or no size: [`AttributeKind::Custom`]
    /// 7. size names a sibling: [`AttributeKind::Buffer`] for raw bytes, else [`AttributeKind::Array`]
    /// 8. literal size of non-byte elements: [`AttributeKind::Array`]
    /// 9. raw bytes no wider than the builtin limit: [`AttributeKind::Simple`]
    /// 10. otherwise: [`AttributeKind::Buffer`]
    ///
    /// Returns `None` only for a disposition outside the table.
    #[must_use]
    pub fn classify(
        &self,
        attribute: &LayoutAttribute,
        siblings: &[LayoutAttribute],
    ) -> Option<AttributeKind> {
        match attribute.disposition {
            Some(Disposition::Var) => return Some(AttributeKind::VarArray),
            Some(Disposition::Fill) => return Some(AttributeKind::FillArray),
            Some(Disposition::Inline) if self.config.should_generate_class(&attribute.type_name) => {
                return Some(AttributeKind::Custom);
            }
            Some(Disposition::Unknown) => return None,
            _ => {}
        }

        if Self::is_size_field(attribute, siblings) {
            return Some(AttributeKind::SizeField);
        }

        let type_name = attribute.type_name.as_str();
        if self.config.is_flags_type(type_name) {
            return Some(AttributeKind::Flags);
        }

        let is_byte = self.config.is_byte_type(type_name);
        let kind = match &attribute.size {
            _ if matches!(type_name, "struct" | "enum") => AttributeKind::Custom,
            None => AttributeKind::Custom,
            Some(AttributeSize::Field(_)) if is_byte => AttributeKind::Buffer,
            Some(AttributeSize::Field(_)) => AttributeKind::Array,
            Some(AttributeSize::Fixed(_)) if !is_byte => AttributeKind::Array,
            Some(AttributeSize::Fixed(n)) if *n <= self.config.builtin_width_limit => {
                AttributeKind::Simple
            }
            Some(AttributeSize::Fixed(_)) => AttributeKind::Buffer,
        };
        Some(kind)
    }

    /// Returns true if some sibling declares its size by this attribute's name.
    #[must_use]
    pub fn is_size_field(attribute: &LayoutAttribute, siblings: &[LayoutAttribute]) -> bool {
        let name = attribute.display_name();
        siblings
            .iter()
            .any(|sibling| sibling.size_reference() == Some(name.as_ref()))
    }

    /// Checks that a size-by-name reference names a sibling.
    ///
    /// # Errors
    /// Returns `CodegenError::Reference` if no sibling carries the name.
    pub fn check_size_reference(
        &self,
        owner: &str,
        attribute: &LayoutAttribute,
        siblings: &[LayoutAttribute],
    ) -> Result<(), CodegenError> {
        let Some(reference) = attribute.size_reference() else {
            return Ok(());
        };
        if siblings.iter().any(|s| s.display_name() == reference) {
            Ok(())
        } else {
            Err(CodegenError::reference(
                owner,
                attribute.display_name(),
                reference,
                ReferenceKind::Size,
            ))
        }
    }

    /// Resolves an attribute's size.
    ///
    /// The declared size wins; otherwise the referenced type's own size, or 1
    /// for types without one.
    ///
    /// # Errors
    /// Returns `CodegenError::Reference` if the referenced type does not exist.
    pub fn attribute_size(
        &self,
        owner: &str,
        attribute: &LayoutAttribute,
    ) -> Result<ResolvedSize, CodegenError> {
        if let Some(size) = &attribute.size {
            return Ok(size.into());
        }
        if self.config.is_byte_type(&attribute.type_name) {
            return Ok(ResolvedSize::Literal(1));
        }
        match self.schema.get_type(&attribute.type_name) {
            Some(descriptor) => Ok(ResolvedSize::Literal(descriptor.size().unwrap_or(1))),
            None => Err(CodegenError::reference(
                owner,
                attribute.display_name(),
                &attribute.type_name,
                ReferenceKind::Type,
            )),
        }
    }

    /// Returns the fixed byte width of a scalar attribute, if it has one.
    #[must_use]
    pub fn fixed_width(&self, attribute: &LayoutAttribute) -> Option<u64> {
        match &attribute.size {
            Some(AttributeSize::Fixed(n)) => Some(*n),
            Some(AttributeSize::Field(_)) => None,
            None => self
                .schema
                .get_type(&attribute.type_name)
                .and_then(|descriptor| descriptor.size()),
        }
    }

    /// Returns the signedness of an attribute, falling back to its type's.
    #[must_use]
    pub fn signedness(&self, attribute: &LayoutAttribute) -> Signedness {
        if let Some(signedness) = attribute.signedness {
            return signedness;
        }
        match self.schema.get_type(&attribute.type_name) {
            Some(TypeDescriptor::Atomic(atomic)) => atomic.signedness,
            Some(TypeDescriptor::Enum(enum_def)) => enum_def.signedness,
            _ => Signedness::Unsigned,
        }
    }

    /// Returns the category of a referenced type.
    #[must_use]
    pub fn base_type(&self, type_name: &str) -> Option<TypeCategory> {
        self.schema.category(type_name)
    }

    /// Returns true if the attribute is a raw byte field a builtin integer can hold.
    #[must_use]
    pub fn is_builtin(&self, attribute: &LayoutAttribute) -> bool {
        self.config.is_byte_type(&attribute.type_name)
            && attribute
                .literal_size()
                .is_some_and(|n| n <= self.config.builtin_width_limit)
    }

    /// Returns the attribute comment, derived from its name when not declared.
    #[must_use]
    pub fn comment(attribute: &LayoutAttribute) -> String {
        let comment = attribute.comments.trim();
        if !comment.is_empty() {
            return comment.to_string();
        }
        comment_from_name(&attribute.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catbuffer_schema::{AtomicDef, EnumDef, StructDef, TypeDescriptor};

    fn test_schema() -> Schema {
        let mut schema = Schema::new();
        schema.add_type("Amount", TypeDescriptor::Atomic(AtomicDef::new(8)));
        schema.add_type("Hash256", TypeDescriptor::Atomic(AtomicDef::new(32)));
        schema.add_type("LinkAction", TypeDescriptor::Enum(EnumDef::new(1)));
        schema.add_type("MosaicFlags", TypeDescriptor::Enum(EnumDef::new(1)));
        schema.add_type("Mosaic", TypeDescriptor::Struct(StructDef::default()));
        schema.add_type("EntityBody", TypeDescriptor::Struct(StructDef::default()));
        schema
    }

    fn kind(attribute: &LayoutAttribute, siblings: &[LayoutAttribute]) -> Option<AttributeKind> {
        let schema = test_schema();
        let config = GeneratorConfig::default();
        Classifier::new(&schema, &config).classify(attribute, siblings)
    }

    #[test]
    fn test_rule_var_array() {
        let attr = LayoutAttribute::new("transactions", "Mosaic")
            .with_disposition(Disposition::Var)
            .with_size_field("payloadSize");
        assert_eq!(kind(&attr, &[]), Some(AttributeKind::VarArray));
    }

    #[test]
    fn test_rule_fill_array() {
        let attr = LayoutAttribute::new("message", "byte").with_disposition(Disposition::Fill);
        assert_eq!(kind(&attr, &[]), Some(AttributeKind::FillArray));
    }

    #[test]
    fn test_rule_inline_generated() {
        let attr = LayoutAttribute::inline("Mosaic");
        assert_eq!(kind(&attr, &[]), Some(AttributeKind::Custom));
    }

    #[test]
    fn test_rule_inline_excluded_falls_through() {
        // No size: rule 6 still yields Custom, but only after the sibling and flags rules.
        let attr = LayoutAttribute::inline("EntityBody");
        let siblings = vec![LayoutAttribute::new("items", "byte").with_size_field("entityBody")];
        assert_eq!(kind(&attr, &siblings), Some(AttributeKind::SizeField));
    }

    #[test]
    fn test_rule_size_field() {
        let count = LayoutAttribute::new("mosaicsCount", "byte").with_size(1);
        let mosaics = LayoutAttribute::new("mosaics", "Mosaic").with_size_field("mosaicsCount");
        let siblings = vec![count.clone(), mosaics];
        assert_eq!(kind(&count, &siblings), Some(AttributeKind::SizeField));
    }

    #[test]
    fn test_rule_size_field_precedes_flags() {
        let count = LayoutAttribute::new("countFlags", "MosaicFlags");
        let siblings = vec![LayoutAttribute::new("mosaics", "Mosaic").with_size_field("countFlags")];
        assert_eq!(kind(&count, &siblings), Some(AttributeKind::SizeField));
    }

    #[test]
    fn test_rule_flags() {
        let attr = LayoutAttribute::new("flags", "MosaicFlags");
        assert_eq!(kind(&attr, &[]), Some(AttributeKind::Flags));
    }

    #[test]
    fn test_rule_custom_without_size() {
        assert_eq!(
            kind(&LayoutAttribute::new("linkAction", "LinkAction"), &[]),
            Some(AttributeKind::Custom)
        );
        assert_eq!(
            kind(&LayoutAttribute::new("amount", "Amount"), &[]),
            Some(AttributeKind::Custom)
        );
    }

    #[test]
    fn test_rule_custom_category_keyword() {
        let attr = LayoutAttribute::new("raw", "struct").with_size(4);
        assert_eq!(kind(&attr, &[]), Some(AttributeKind::Custom));
    }

    #[test]
    fn test_rule_named_size() {
        let buffer = LayoutAttribute::new("payload", "byte").with_size_field("payloadSize");
        assert_eq!(kind(&buffer, &[]), Some(AttributeKind::Buffer));

        let array = LayoutAttribute::new("mosaics", "Mosaic").with_size_field("mosaicsCount");
        assert_eq!(kind(&array, &[]), Some(AttributeKind::Array));
    }

    #[test]
    fn test_rule_literal_array() {
        let attr = LayoutAttribute::new("hashes", "Hash256").with_size(3);
        assert_eq!(kind(&attr, &[]), Some(AttributeKind::Array));
    }

    #[test]
    fn test_rule_simple() {
        for width in [1, 2, 4, 8] {
            let attr = LayoutAttribute::new("version", "byte").with_size(width);
            assert_eq!(kind(&attr, &[]), Some(AttributeKind::Simple));
        }
    }

    #[test]
    fn test_rule_fallback_buffer() {
        let attr = LayoutAttribute::new("signature", "byte").with_size(64);
        assert_eq!(kind(&attr, &[]), Some(AttributeKind::Buffer));
    }

    #[test]
    fn test_unknown_disposition_unclassified() {
        let attr = LayoutAttribute::new("items", "byte").with_disposition(Disposition::Unknown);
        assert_eq!(kind(&attr, &[]), None);
    }

    #[test]
    fn test_classify_deterministic() {
        let siblings = vec![
            LayoutAttribute::new("mosaicsCount", "byte").with_size(1),
            LayoutAttribute::new("mosaics", "Mosaic").with_size_field("mosaicsCount"),
            LayoutAttribute::new("flags", "MosaicFlags"),
        ];
        for attribute in &siblings {
            let first = kind(attribute, &siblings);
            for _ in 0..3 {
                assert_eq!(kind(attribute, &siblings), first);
            }
        }
    }

    #[test]
    fn test_builtin_width_limit_config() {
        let schema = test_schema();
        let config = GeneratorConfig::default().builtin_width_limit(4);
        let classifier = Classifier::new(&schema, &config);
        let attr = LayoutAttribute::new("height", "byte").with_size(8);
        assert_eq!(classifier.classify(&attr, &[]), Some(AttributeKind::Buffer));
        assert!(!classifier.is_builtin(&attr));
    }

    #[test]
    fn test_attribute_size() {
        let schema = test_schema();
        let config = GeneratorConfig::default();
        let classifier = Classifier::new(&schema, &config);

        let literal = LayoutAttribute::new("version", "byte").with_size(1);
        assert_eq!(
            classifier.attribute_size("Block", &literal).expect("size"),
            ResolvedSize::Literal(1)
        );

        let named = LayoutAttribute::new("mosaics", "Mosaic").with_size_field("mosaicsCount");
        assert_eq!(
            classifier.attribute_size("Block", &named).expect("size"),
            ResolvedSize::Field("mosaicsCount".into())
        );

        let atomic = LayoutAttribute::new("fee", "Amount");
        assert_eq!(
            classifier.attribute_size("Block", &atomic).expect("size"),
            ResolvedSize::Literal(8)
        );

        let structure = LayoutAttribute::new("mosaic", "Mosaic");
        assert_eq!(
            classifier.attribute_size("Block", &structure).expect("size"),
            ResolvedSize::Literal(1)
        );

        let missing = LayoutAttribute::new("ghost", "Ghost");
        let err = classifier
            .attribute_size("Block", &missing)
            .expect_err("missing type");
        assert!(err.is_reference_error());
    }

    #[test]
    fn test_check_size_reference() {
        let schema = test_schema();
        let config = GeneratorConfig::default();
        let classifier = Classifier::new(&schema, &config);

        let count = LayoutAttribute::new("mosaicsCount", "byte").with_size(1);
        let mosaics = LayoutAttribute::new("mosaics", "Mosaic").with_size_field("mosaicsCount");
        let orphan = LayoutAttribute::new("payload", "byte").with_size_field("payloadSize");
        let siblings = vec![count, mosaics.clone(), orphan.clone()];

        assert!(classifier.check_size_reference("Block", &mosaics, &siblings).is_ok());
        match classifier.check_size_reference("Block", &orphan, &siblings) {
            Err(CodegenError::Reference {
                owner,
                attribute,
                reference,
                kind,
            }) => {
                assert_eq!(owner, "Block");
                assert_eq!(attribute, "payload");
                assert_eq!(reference, "payloadSize");
                assert_eq!(kind, ReferenceKind::Size);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_fixed_width_and_base_type() {
        let schema = test_schema();
        let config = GeneratorConfig::default();
        let classifier = Classifier::new(&schema, &config);

        assert_eq!(classifier.fixed_width(&LayoutAttribute::new("fee", "Amount")), Some(8));
        assert_eq!(
            classifier.fixed_width(&LayoutAttribute::new("count", "byte").with_size(2)),
            Some(2)
        );
        assert_eq!(
            classifier.fixed_width(&LayoutAttribute::new("p", "byte").with_size_field("n")),
            None
        );
        assert_eq!(classifier.base_type("LinkAction"), Some(TypeCategory::Enum));
        assert_eq!(classifier.base_type("byte"), None);
    }

    #[test]
    fn test_signedness_fallback() {
        let mut schema = test_schema();
        let mut signed = AtomicDef::new(4);
        signed.signedness = Signedness::Signed;
        schema.add_type("Delta", TypeDescriptor::Atomic(signed));
        let config = GeneratorConfig::default();
        let classifier = Classifier::new(&schema, &config);

        assert_eq!(
            classifier.signedness(&LayoutAttribute::new("change", "Delta")),
            Signedness::Signed
        );
        assert_eq!(
            classifier.signedness(&LayoutAttribute::new("fee", "Amount")),
            Signedness::Unsigned
        );

        let mut explicit = LayoutAttribute::new("offset", "byte").with_size(2);
        explicit.signedness = Some(Signedness::Signed);
        assert_eq!(classifier.signedness(&explicit), Signedness::Signed);
    }

    #[test]
    fn test_comment() {
        let mut attr = LayoutAttribute::new("maxFee", "Amount");
        assert_eq!(Classifier::comment(&attr), "Max fee");

        attr.comments = "  maximum fee allowed  ".to_string();
        assert_eq!(Classifier::comment(&attr), "maximum fee allowed");

        assert_eq!(Classifier::comment(&LayoutAttribute::inline("Mosaic")), "Mosaic");
        assert_eq!(
            Classifier::comment(&LayoutAttribute::inline("TransferTransactionBody")),
            "Transfer transaction body"
        );
    }
}
