//! Composition walker.
//!
//! Flattens a structure and every structure it composes inline into one
//! ordered attribute list. The schema is never touched: per-visit facts
//! (owning aggregate, declaring scope, super-class ancestry) live in the
//! walker and on the [`ResolvedAttribute`] values it produces.

use crate::attribute::{ResolvedAttribute, ResolvedCondition};
use crate::classify::{AttributeKind, Classifier, ResolvedSize};
use crate::error::CodegenError;
use crate::lang::LanguageHelper;
use catbuffer_schema::{Disposition, LayoutAttribute, ReferenceKind, SchemaError};
use std::collections::BTreeSet;
use std::ptr;

/// Selects the super-class slot of a structure layout.
///
/// The first top-level inline composition of a generated structure wins.
/// Later candidates, and every candidate at deeper levels, are composition
/// members. Returns `None` when super-class detection is disabled.
#[must_use]
pub fn select_super_class<'s>(
    layout: &'s [LayoutAttribute],
    classifier: &Classifier<'_>,
) -> Option<&'s LayoutAttribute> {
    let config = classifier.config();
    if !config.use_super_class {
        return None;
    }
    layout
        .iter()
        .find(|attribute| attribute.is_inline() && config.should_generate_class(&attribute.type_name))
}

/// Flattened layout of one structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    /// Attributes in wire order.
    pub attributes: Vec<ResolvedAttribute>,
    /// Type name of the super-class slot.
    pub super_class: Option<String>,
    /// Imports required by the attribute types.
    pub required_imports: BTreeSet<String>,
}

/// One layout visit.
struct Frame<'a> {
    class_name: &'a str,
    layout: &'a [LayoutAttribute],
    scope: usize,
    aggregate: Option<String>,
    aggregate_class: Option<&'a str>,
    inherited: bool,
}

/// Depth-first walker over inline compositions.
pub struct CompositionWalker<'a, L> {
    classifier: Classifier<'a>,
    language: &'a L,
    root: &'a str,
    generated_name: String,
    base_class: Option<String>,
    super_slot: Option<&'a LayoutAttribute>,
    attributes: Vec<ResolvedAttribute>,
    imports: BTreeSet<String>,
    stack: Vec<&'a str>,
    next_scope: usize,
}

impl<'a, L: LanguageHelper> CompositionWalker<'a, L> {
    /// Creates a walker for the named structure.
    #[must_use]
    pub fn new(classifier: Classifier<'a>, language: &'a L, root: &'a str) -> Self {
        let schema = classifier.schema();
        let super_slot = schema
            .layout(root)
            .and_then(|layout| select_super_class(layout, &classifier));
        let base_class = super_slot
            .map(|slot| language.generated_class_name_for(schema, &slot.type_name));

        Self {
            classifier,
            language,
            root,
            generated_name: language.generated_class_name_for(schema, root),
            base_class,
            super_slot,
            attributes: Vec::new(),
            imports: BTreeSet::new(),
            stack: Vec::new(),
            next_scope: 0,
        }
    }

    /// Walks the structure and returns its flattened layout.
    ///
    /// # Errors
    /// Returns `CodegenError` if a reference does not resolve, an inline
    /// composition embeds itself, or an attribute cannot be classified.
    pub fn walk(mut self) -> Result<Composition, CodegenError> {
        let layout = self.classifier.schema().layout(self.root).ok_or_else(|| {
            CodegenError::reference(self.root, self.root, self.root, ReferenceKind::Type)
        })?;

        self.visit(Frame {
            class_name: self.root,
            layout,
            scope: 0,
            aggregate: None,
            aggregate_class: None,
            inherited: false,
        })?;
        link_sizes(&mut self.attributes, self.root)?;

        Ok(Composition {
            attributes: self.attributes,
            super_class: self.super_slot.map(|slot| slot.type_name.clone()),
            required_imports: self.imports,
        })
    }

    fn visit(&mut self, frame: Frame<'a>) -> Result<(), CodegenError> {
        if self.stack.contains(&frame.class_name) {
            let mut path = self.stack.clone();
            path.push(frame.class_name);
            return Err(SchemaError::circular(path.as_slice()).into());
        }
        self.stack.push(frame.class_name);
        tracing::debug!(
            "Composing {} into {} at depth {}",
            frame.class_name,
            self.root,
            self.stack.len() - 1
        );

        let schema = self.classifier.schema();
        let config = self.classifier.config();

        for attribute in frame.layout {
            match attribute.disposition {
                Some(Disposition::Const) => {}
                Some(Disposition::Inline) => {
                    let generated = config.should_generate_class(&attribute.type_name);
                    if generated {
                        self.emit(attribute, &frame)?;
                    }

                    let child_layout = schema.layout(&attribute.type_name).ok_or_else(|| {
                        CodegenError::reference(
                            frame.class_name,
                            attribute.display_name(),
                            &attribute.type_name,
                            ReferenceKind::Type,
                        )
                    })?;
                    let aggregate = match &frame.aggregate {
                        None if generated => Some(attribute.display_name().into_owned()),
                        other => other.clone(),
                    };
                    let child_class = attribute.type_name.as_str();
                    let aggregate_class = (child_class != self.root && generated).then_some(child_class);
                    let inherited = frame.inherited || self.is_super_slot(attribute);

                    self.next_scope += 1;
                    let scope = self.next_scope;
                    self.visit(Frame {
                        class_name: child_class,
                        layout: child_layout,
                        scope,
                        aggregate,
                        aggregate_class,
                        inherited,
                    })?;
                }
                _ => self.emit(attribute, &frame)?,
            }
        }

        self.stack.pop();
        Ok(())
    }

    fn is_super_slot(&self, attribute: &LayoutAttribute) -> bool {
        self.super_slot.is_some_and(|slot| ptr::eq(slot, attribute))
    }

    fn emit(&mut self, attribute: &LayoutAttribute, frame: &Frame<'a>) -> Result<(), CodegenError> {
        let classifier = self.classifier;
        let config = classifier.config();
        let name = attribute.display_name().into_owned();

        let kind = classifier.classify(attribute, frame.layout).ok_or_else(|| {
            CodegenError::ClassificationExhausted {
                owner: frame.class_name.to_string(),
                attribute: name.clone(),
            }
        })?;
        classifier.check_size_reference(frame.class_name, attribute, frame.layout)?;
        let size = classifier.attribute_size(frame.class_name, attribute)?;

        let generated = self.language.generated_type(&classifier, attribute, kind, &size);
        self.imports.extend(self.language.required_imports_for(
            &generated,
            &self.generated_name,
            self.base_class.as_deref(),
        ));

        let is_super = self.is_super_slot(attribute);
        let is_conditional = attribute.is_conditional();
        let condition = attribute.condition.as_ref().map(|discriminant| ResolvedCondition {
            discriminant: discriminant.clone(),
            operation: attribute.condition_operation(),
            value: attribute.condition_value.as_ref().map(ToString::to_string),
        });
        let read_before = attribute
            .condition
            .as_deref()
            .is_some_and(|discriminant| !self.attributes.iter().any(|a| a.name == discriminant));

        tracing::trace!("Resolved {}.{} as {:?} ({})", self.root, name, kind, generated);

        self.attributes.push(ResolvedAttribute {
            kind,
            field_name: self.language.attribute_name(&name),
            comment: Classifier::comment(attribute),
            type_name: attribute.type_name.clone(),
            base_type: classifier.base_type(&attribute.type_name),
            generated_type: generated.name,
            generated_class_name: self
                .language
                .generated_class_name_for(classifier.schema(), &attribute.type_name),
            size,
            signedness: classifier.signedness(attribute),
            is_final: !is_conditional
                && kind != AttributeKind::SizeField
                && !config.is_entity_size_field(&name),
            is_conditional,
            condition,
            discriminant: None,
            read_before,
            aggregate_name: frame.aggregate.clone(),
            aggregate_class: frame.aggregate_class.map(str::to_string),
            is_super,
            is_inherited: frame.inherited,
            is_inline: !is_super && !frame.inherited && frame.aggregate.is_some(),
            is_aggregate: attribute.is_inline(),
            is_reserved: attribute.is_reserved(),
            sort_key: attribute.sort_key.clone(),
            size_field: None,
            sized_attribute: None,
            scope: frame.scope,
            name,
        });
        Ok(())
    }
}

/// Pairs named sizes with the attribute holding them, within the declaring layout.
fn link_sizes(attributes: &mut [ResolvedAttribute], owner: &str) -> Result<(), CodegenError> {
    for index in 0..attributes.len() {
        let (scope, reference) = match &attributes[index].size {
            ResolvedSize::Field(reference) => (attributes[index].scope, reference.clone()),
            ResolvedSize::Literal(_) => continue,
        };

        let target = attributes
            .iter()
            .position(|a| a.scope == scope && a.name == reference)
            .ok_or_else(|| {
                CodegenError::reference(
                    owner,
                    &attributes[index].name,
                    &reference,
                    ReferenceKind::Size,
                )
            })?;

        attributes[index].size_field = Some(target);
        if attributes[target].sized_attribute.is_none() {
            attributes[target].sized_attribute = Some(index);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::fixtures::{aggregate_schema, transfer_schema};
    use crate::lang::Language;
    use catbuffer_schema::{Schema, parse_schema};

    fn walk(schema: &Schema, config: &GeneratorConfig, name: &str) -> Result<Composition, CodegenError> {
        let classifier = Classifier::new(schema, config);
        CompositionWalker::new(classifier, &Language::Java, name).walk()
    }

    fn names(composition: &Composition) -> Vec<&str> {
        composition.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    fn find<'c>(composition: &'c Composition, name: &str) -> &'c ResolvedAttribute {
        composition
            .attributes
            .iter()
            .find(|a| a.name == name)
            .expect("attribute present")
    }

    #[test]
    fn test_flattened_order_splices_inline() {
        let schema = transfer_schema();
        let config = GeneratorConfig::default();
        let composition = walk(&schema, &config, "TransferTransaction").expect("Failed to walk");

        assert_eq!(
            names(&composition),
            vec![
                "transaction",
                "size",
                "verifiableEntityHeader_Reserved1",
                "signature",
                "signerPublicKey",
                "entityBody_Reserved1",
                "version",
                "network",
                "type",
                "fee",
                "deadline",
                "transferTransactionBody",
                "recipientAddress",
                "messageSize",
                "mosaicsCount",
                "mosaics",
                "message",
            ]
        );
    }

    #[test]
    fn test_single_super_slot() {
        let schema = transfer_schema();
        let config = GeneratorConfig::default();
        let composition = walk(&schema, &config, "TransferTransaction").expect("Failed to walk");

        let supers: Vec<_> = composition.attributes.iter().filter(|a| a.is_super).collect();
        assert_eq!(supers.len(), 1);
        assert_eq!(supers[0].name, "transaction");
        assert!(supers[0].is_aggregate);
        assert_eq!(composition.super_class.as_deref(), Some("Transaction"));

        let fee = find(&composition, "fee");
        assert!(fee.is_inherited);
        assert!(!fee.is_inline);
        assert_eq!(fee.aggregate_name.as_deref(), Some("transaction"));
        assert_eq!(fee.aggregate_class.as_deref(), Some("Transaction"));

        let signature = find(&composition, "signature");
        assert!(signature.is_inherited);
        assert_eq!(signature.aggregate_class, None);
    }

    #[test]
    fn test_composition_members_are_inline() {
        let schema = transfer_schema();
        let config = GeneratorConfig::default();
        let composition = walk(&schema, &config, "TransferTransaction").expect("Failed to walk");

        let body = find(&composition, "transferTransactionBody");
        assert!(body.is_aggregate);
        assert!(!body.is_super);
        assert!(!body.is_inline);
        assert_eq!(body.aggregate_name, None);

        let mosaics = find(&composition, "mosaics");
        assert!(mosaics.is_inline);
        assert!(!mosaics.is_inherited);
        assert_eq!(mosaics.aggregate_name.as_deref(), Some("transferTransactionBody"));
        assert_eq!(mosaics.aggregate_class.as_deref(), Some("TransferTransactionBody"));
        assert_eq!(mosaics.sort_key.as_deref(), Some("mosaicId"));
    }

    #[test]
    fn test_super_class_disabled() {
        let schema = transfer_schema();
        let config = GeneratorConfig::default().use_super_class(false);
        let composition = walk(&schema, &config, "TransferTransaction").expect("Failed to walk");

        assert!(composition.attributes.iter().all(|a| !a.is_super && !a.is_inherited));
        assert_eq!(composition.super_class, None);
        assert!(find(&composition, "fee").is_inline);
    }

    #[test]
    fn test_size_fields_linked_and_not_final() {
        let schema = transfer_schema();
        let config = GeneratorConfig::default();
        let composition = walk(&schema, &config, "TransferTransaction").expect("Failed to walk");

        let count_index = composition
            .attributes
            .iter()
            .position(|a| a.name == "mosaicsCount")
            .expect("attribute present");
        let mosaics_index = composition
            .attributes
            .iter()
            .position(|a| a.name == "mosaics")
            .expect("attribute present");

        let count = &composition.attributes[count_index];
        assert_eq!(count.kind, AttributeKind::SizeField);
        assert!(!count.is_final);
        assert_eq!(count.sized_attribute, Some(mosaics_index));
        assert_eq!(composition.attributes[mosaics_index].size_field, Some(count_index));
        assert_eq!(composition.attributes[mosaics_index].kind, AttributeKind::Array);

        assert_eq!(find(&composition, "message").kind, AttributeKind::Buffer);
        assert!(!find(&composition, "size").is_final);
        assert!(find(&composition, "fee").is_final);
        assert!(find(&composition, "entityBody_Reserved1").is_reserved);
    }

    #[test]
    fn test_required_imports() {
        let schema = transfer_schema();
        let config = GeneratorConfig::default();
        let composition = walk(&schema, &config, "TransferTransaction").expect("Failed to walk");

        assert!(composition.required_imports.contains("AmountDto"));
        assert!(composition.required_imports.contains("MosaicBuilder"));
        assert!(composition.required_imports.contains("java.util.List"));
        assert!(composition.required_imports.contains("java.nio.ByteBuffer"));
        assert!(!composition.required_imports.contains("TransferTransactionBuilder"));
    }

    #[test]
    fn test_walk_is_idempotent() {
        let schema = transfer_schema();
        let config = GeneratorConfig::default();
        let first = walk(&schema, &config, "TransferTransaction").expect("Failed to walk");
        let second = walk(&schema, &config, "TransferTransaction").expect("Failed to walk");
        assert_eq!(first, second);
        assert_eq!(schema, transfer_schema());
    }

    #[test]
    fn test_circular_inline_rejected() {
        let yaml = r#"
- name: A
  type: struct
  layout:
    - disposition: inline
      type: B
- name: B
  type: struct
  layout:
    - disposition: inline
      type: A
"#;
        let schema = parse_schema(yaml).expect("Failed to parse");
        let config = GeneratorConfig::default();
        match walk(&schema, &config, "A") {
            Err(CodegenError::Schema(SchemaError::CircularReference { path })) => {
                assert_eq!(path, "A -> B -> A");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_size_reference() {
        let yaml = r#"
- name: Block
  type: struct
  layout:
    - name: payload
      type: byte
      size: payloadSize
"#;
        let schema = parse_schema(yaml).expect("Failed to parse");
        let config = GeneratorConfig::default();
        match walk(&schema, &config, "Block") {
            Err(CodegenError::Reference {
                owner,
                attribute,
                kind,
                ..
            }) => {
                assert_eq!(owner, "Block");
                assert_eq!(attribute, "payload");
                assert_eq!(kind, ReferenceKind::Size);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_var_and_fill_arrays_in_composed_body() {
        let schema = aggregate_schema();
        let config = GeneratorConfig::default();
        let composition = walk(&schema, &config, "AggregateTransaction").expect("Failed to walk");

        assert_eq!(
            names(&composition),
            vec![
                "size",
                "aggregateTransactionBody",
                "transactionsHash",
                "payloadSize",
                "aggregateTransactionHeader_Reserved1",
                "transactions",
                "cosignatures",
            ]
        );
        let kinds: Vec<AttributeKind> = composition.attributes.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AttributeKind::Simple,
                AttributeKind::Custom,
                AttributeKind::Custom,
                AttributeKind::SizeField,
                AttributeKind::Simple,
                AttributeKind::VarArray,
                AttributeKind::FillArray,
            ]
        );

        let payload_size = find(&composition, "payloadSize");
        assert_eq!(payload_size.sized_attribute, Some(5));
        assert!(!payload_size.is_final);

        let transactions = find(&composition, "transactions");
        assert_eq!(transactions.size, ResolvedSize::Field("payloadSize".into()));
        assert_eq!(transactions.size_field, Some(3));
        assert_eq!(transactions.generated_type, "List<EmbeddedTransferBuilder>");
        assert_eq!(
            transactions.aggregate_name.as_deref(),
            Some("aggregateTransactionBody")
        );
        assert!(transactions.is_inherited);
        assert!(!transactions.is_inline);

        let cosignatures = find(&composition, "cosignatures");
        assert_eq!(cosignatures.generated_type, "List<CosignatureBuilder>");
        assert_eq!(cosignatures.size_field, None);

        assert!(find(&composition, "aggregateTransactionHeader_Reserved1").is_reserved);
        assert!(composition.attributes.iter().all(|a| a.name != "recipient" && a.name != "version"));
        assert!(composition.required_imports.contains("java.util.List"));
        assert!(composition.required_imports.contains("EmbeddedTransferBuilder"));
        assert!(composition.required_imports.contains("CosignatureBuilder"));
    }

    #[test]
    fn test_unknown_disposition_is_exhausted() {
        let yaml = r#"
- name: Block
  type: struct
  layout:
    - name: items
      type: byte
      disposition: sparse
"#;
        let schema = parse_schema(yaml).expect("Failed to parse");
        let config = GeneratorConfig::default();
        assert!(matches!(
            walk(&schema, &config, "Block"),
            Err(CodegenError::ClassificationExhausted { .. })
        ));
    }

    #[test]
    fn test_select_super_class_first_wins() {
        let layout = vec![
            LayoutAttribute::inline("SizePrefixedEntity"),
            LayoutAttribute::inline("Transaction"),
            LayoutAttribute::inline("TransferTransactionBody"),
        ];
        let schema = Schema::new();
        let config = GeneratorConfig::default();
        let classifier = Classifier::new(&schema, &config);

        let selected = select_super_class(&layout, &classifier).expect("super class");
        assert_eq!(selected.type_name, "Transaction");
        assert!(ptr::eq(selected, &layout[1]));
    }
}
