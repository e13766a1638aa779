//! Conditional attributes and constructor variants.
//!
//! Runs once a class's attribute list is complete. Every conditional
//! attribute is linked to its discriminant, and the class gets one
//! constructor variant per discriminant value some attribute requires.

use crate::attribute::ResolvedAttribute;
use crate::classify::AttributeKind;
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use catbuffer_schema::{ConditionOperation, EnumDef, ReferenceKind, Scalar, Schema};
use serde::Serialize;

/// One constructor parameter within a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorArgument {
    /// Index of the attribute in the class model.
    pub attribute: usize,
    /// Attribute name.
    pub name: String,
    /// False when the variant excludes this conditional attribute.
    pub condition_provide: bool,
    /// Value fixed by the variant, for its discriminant.
    pub forced_value: Option<String>,
}

/// One valid combination of present conditional attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorVariant {
    /// Discriminant the variant is keyed on.
    pub discriminant: Option<String>,
    /// Discriminant value; `None` for the unconstrained variant.
    pub value: Option<String>,
    /// Constructor parameters in attribute order.
    pub arguments: Vec<ConstructorArgument>,
}

impl ConstructorVariant {
    /// Returns the argument for the named attribute.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ConstructorArgument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Returns the names of the arguments callers must supply.
    pub fn provided(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .filter(|a| a.condition_provide && a.forced_value.is_none())
            .map(|a| a.name.as_str())
    }
}

/// Finds the discriminant a conditional attribute is keyed on.
///
/// Directly declared attributes take precedence over ones spliced in from
/// composed structures.
#[must_use]
pub fn find_discriminant(attributes: &[ResolvedAttribute], name: &str) -> Option<usize> {
    attributes
        .iter()
        .position(|a| a.scope == 0 && a.name == name)
        .or_else(|| attributes.iter().position(|a| a.name == name))
}

/// Links every conditional attribute to its discriminant.
///
/// The condition value is normalized to the name of the enumeration value it
/// selects.
///
/// # Errors
/// Returns `CodegenError::Reference` for a missing discriminant or an unknown
/// condition value, and `CodegenError::NonEnumDiscriminant` for an equality
/// condition on a discriminant that is not an enumeration.
pub fn link_discriminants(
    schema: &Schema,
    owner: &str,
    attributes: &mut [ResolvedAttribute],
) -> Result<(), CodegenError> {
    for index in 0..attributes.len() {
        let Some(condition) = attributes[index].condition.clone() else {
            continue;
        };
        let name = attributes[index].name.clone();

        let target = find_discriminant(attributes, &condition.discriminant).ok_or_else(|| {
            CodegenError::reference(owner, &name, &condition.discriminant, ReferenceKind::Condition)
        })?;
        let discriminant_type = attributes[target].type_name.clone();

        let value = match (schema.get_enum(&discriminant_type), condition.operation) {
            (Some(enum_def), _) => match &condition.value {
                Some(raw) => Some(resolve_value(enum_def, owner, &name, raw)?),
                None => None,
            },
            (None, ConditionOperation::Equals) => {
                return Err(CodegenError::NonEnumDiscriminant {
                    owner: owner.to_string(),
                    attribute: name,
                    discriminant: condition.discriminant,
                    type_name: discriminant_type,
                });
            }
            (None, ConditionOperation::Has) => condition.value.clone(),
        };

        tracing::trace!(
            "Linked {}.{} to discriminant {}",
            owner,
            name,
            condition.discriminant
        );

        let attribute = &mut attributes[index];
        attribute.discriminant = Some(target);
        if let Some(resolved) = attribute.condition.as_mut() {
            resolved.value = value;
        }
    }
    Ok(())
}

fn resolve_value(
    enum_def: &EnumDef,
    owner: &str,
    attribute: &str,
    raw: &str,
) -> Result<String, CodegenError> {
    let scalar = raw
        .parse::<u64>()
        .map_or_else(|_| Scalar::Name(raw.to_string()), Scalar::Int);
    enum_def
        .find(&scalar)
        .map(|value| value.name.clone())
        .ok_or_else(|| CodegenError::reference(owner, attribute, raw, ReferenceKind::ConditionValue))
}

/// Returns true if the attribute is a constructor parameter.
///
/// Derived sizes and the entity size are computed, never supplied.
#[must_use]
pub fn is_constructor_param(attribute: &ResolvedAttribute, config: &GeneratorConfig) -> bool {
    attribute.kind != AttributeKind::SizeField && !config.is_entity_size_field(&attribute.name)
}

/// Computes the constructor variants of a class.
///
/// Without equality-conditional attributes there is exactly one variant.
/// Otherwise, per discriminant in first-use order, there is one variant for
/// each enumeration value some attribute requires, in declaration order, and
/// one unconstrained variant if any value is required by none.
/// Attributes must already be linked with [`link_discriminants`].
#[must_use]
pub fn constructor_variants(
    schema: &Schema,
    config: &GeneratorConfig,
    attributes: &[ResolvedAttribute],
) -> Vec<ConstructorVariant> {
    let params: Vec<usize> = attributes
        .iter()
        .enumerate()
        .filter(|(_, a)| is_constructor_param(a, config))
        .map(|(index, _)| index)
        .collect();

    let mut discriminants: Vec<usize> = Vec::new();
    for attribute in attributes {
        let Some(target) = attribute.discriminant else {
            continue;
        };
        if attribute.is_gated_by(target) && !discriminants.contains(&target) {
            discriminants.push(target);
        }
    }

    if discriminants.is_empty() {
        return vec![variant(attributes, &params, None, None)];
    }

    let mut variants = Vec::new();
    for discriminant in discriminants {
        let required: Vec<&str> = attributes
            .iter()
            .filter(|a| a.is_gated_by(discriminant))
            .filter_map(|a| a.condition.as_ref()?.value.as_deref())
            .collect();
        let Some(enum_def) = schema.get_enum(&attributes[discriminant].type_name) else {
            continue;
        };

        for value in &enum_def.values {
            if required.contains(&value.name.as_str()) {
                variants.push(variant(
                    attributes,
                    &params,
                    Some(discriminant),
                    Some(value.name.as_str()),
                ));
            }
        }
        if enum_def.values.iter().any(|v| !required.contains(&v.name.as_str())) {
            variants.push(variant(attributes, &params, Some(discriminant), None));
        }
    }
    variants
}

fn variant(
    attributes: &[ResolvedAttribute],
    params: &[usize],
    discriminant: Option<usize>,
    value: Option<&str>,
) -> ConstructorVariant {
    let arguments = params
        .iter()
        .map(|&index| {
            let attribute = &attributes[index];
            let is_discriminant = discriminant == Some(index);
            let excluded = discriminant.is_some_and(|d| {
                attribute.is_gated_by(d)
                    && attribute.condition.as_ref().and_then(|c| c.value.as_deref()) != value
            });

            ConstructorArgument {
                attribute: index,
                name: attribute.name.clone(),
                condition_provide: !excluded,
                forced_value: if is_discriminant { value.map(str::to_string) } else { None },
            }
        })
        .collect();

    ConstructorVariant {
        discriminant: discriminant.map(|d| attributes[d].name.clone()),
        value: value.map(str::to_string),
        arguments,
    }
}
