//! Multi-pass resolution of raw input into a [`Schema`].
//!
//! Every pass runs regardless of what earlier passes found; problems are
//! pushed onto a single [`Diagnostics`] collector that is threaded through.

use std::collections::{BTreeMap, HashSet};

use super::diagnostic::{Diagnostic, Diagnostics, NameNamespace, ValidationFailure};
use super::input::{PrimaryThroughput, RawSchemaInput};
use super::synthesis::{apply_synthesis_rules, generated_hash_key};
use super::types::{
    LengthBounds, LengthValidation, Schema, SchemaParts, ThroughputConfig, ThroughputUnits,
    ValidationRuleSet, PRIMARY_TARGET,
};
use crate::token::{parse_attribute, parse_index, AttributeDescriptor, SecondaryIndexDescriptor};

/// Resolves a raw input into a schema, or reports every problem found.
///
/// Without an explicit hash key, only an attribute that is neither a range
/// key nor a collection type is promoted for containing `uuid`.
///
/// # Examples
///
/// ```
/// use recordgen_core::schema::{resolve_schema, RawSchemaInput};
///
/// let input = RawSchemaInput::new("Post")
///     .with_attributes(["forum_uuid:hkey", "post_id:rkey"])
///     .with_table_config("primary", "5-2");
///
/// let schema = resolve_schema(&input).unwrap();
/// assert_eq!(schema.hash_key(), "forum_uuid");
/// assert_eq!(schema.range_key(), Some("post_id"));
/// ```
pub fn resolve_schema(input: &RawSchemaInput) -> Result<Schema, ValidationFailure> {
    let mut diagnostics = Diagnostics::new();

    let mut attributes = parse_attributes(&input.attributes, &mut diagnostics);
    apply_synthesis_rules(&mut attributes, &input.options);
    check_unique_names(&attributes, &mut diagnostics);
    let (hash_key, range_key) = resolve_primary_key(&mut attributes, &mut diagnostics);

    let indexes = resolve_indexes(&input.indexes, &attributes, &mut diagnostics);

    let throughput = if input.options.skip_table_config {
        None
    } else {
        resolve_throughput(
            &input.table_config,
            &indexes,
            input.options.primary_throughput,
            &mut diagnostics,
        )
    };

    let validations = resolve_validations(input, &attributes, &mut diagnostics);

    let table_name = input
        .options
        .table_name
        .clone()
        .unwrap_or_else(|| input.model_name.clone());

    diagnostics.finish(Schema::from_parts(SchemaParts {
        model_name: input.model_name.clone(),
        table_name,
        attributes,
        hash_key,
        range_key,
        indexes,
        throughput,
        validations,
        mutation_tracking: !input.options.disable_mutation_tracking,
    }))
}

fn parse_attributes(tokens: &[String], diagnostics: &mut Diagnostics) -> Vec<AttributeDescriptor> {
    tokens
        .iter()
        .filter_map(|token| match parse_attribute(token) {
            Ok(attribute) => Some(attribute),
            Err(reason) => {
                diagnostics.push(Diagnostic::malformed(token.as_str(), reason));
                None
            }
        })
        .collect()
}

/// Attribute names and storage names share one namespace.
fn check_unique_names(attributes: &[AttributeDescriptor], diagnostics: &mut Diagnostics) {
    let mut used: HashSet<&str> = HashSet::new();

    for attribute in attributes {
        if !used.insert(attribute.name.as_str()) {
            diagnostics.push(Diagnostic::DuplicateName {
                name: attribute.name.clone(),
                namespace: NameNamespace::Attribute,
            });
        }

        // A storage name equal to the attribute's own name is redundant, not a clash.
        if let Some(storage_name) = attribute.storage_name() {
            if storage_name != attribute.name && !used.insert(storage_name) {
                diagnostics.push(Diagnostic::DuplicateName {
                    name: storage_name.to_string(),
                    namespace: NameNamespace::DatabaseAttributeName,
                });
            }
        }
    }
}

/// Returns the hash key and range key names.
///
/// The first declaration of each key wins. Without any hash key, the last
/// attribute whose name contains `uuid` is promoted, or a `uuid` attribute is
/// prepended.
fn resolve_primary_key(
    attributes: &mut Vec<AttributeDescriptor>,
    diagnostics: &mut Diagnostics,
) -> (String, Option<String>) {
    let mut hash_key: Option<String> = None;
    let mut range_key: Option<String> = None;
    let mut uuid_candidate: Option<usize> = None;

    for (position, attribute) in attributes.iter().enumerate() {
        if attribute.is_hash_key() {
            if let Some(original) = &hash_key {
                diagnostics.push(Diagnostic::DuplicateHashKey {
                    name: attribute.name.clone(),
                    original: original.clone(),
                });
            } else {
                hash_key = Some(attribute.name.clone());
            }
        } else if attribute.is_range_key() {
            if let Some(original) = &range_key {
                diagnostics.push(Diagnostic::DuplicateRangeKey {
                    name: attribute.name.clone(),
                    original: original.clone(),
                });
            } else {
                range_key = Some(attribute.name.clone());
            }
        } else if attribute.name.contains("uuid") && attribute.attribute_type.can_be_hash_key() {
            uuid_candidate = Some(position);
        }
    }

    if let Some(hash_key) = hash_key {
        return (hash_key, range_key);
    }

    if let Some(position) = uuid_candidate {
        let attribute = &mut attributes[position];
        attribute.options.hash_key = true;
        return (attribute.name.clone(), range_key);
    }

    let generated = generated_hash_key();
    let collides = attributes
        .iter()
        .any(|a| a.name == generated.name || a.storage_name() == Some(generated.name.as_str()));
    if collides {
        diagnostics.push(Diagnostic::DuplicateName {
            name: generated.name.clone(),
            namespace: NameNamespace::Attribute,
        });
    }

    let name = generated.name.clone();
    attributes.insert(0, generated);
    (name, range_key)
}

/// Parses index tokens and keeps those whose key fields exist.
fn resolve_indexes(
    tokens: &[String],
    attributes: &[AttributeDescriptor],
    diagnostics: &mut Diagnostics,
) -> Vec<SecondaryIndexDescriptor> {
    let known: HashSet<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut indexes = Vec::new();

    for token in tokens {
        let index = match parse_index(token) {
            Ok(index) => index,
            Err(reason) => {
                diagnostics.push(Diagnostic::malformed(token.as_str(), reason));
                continue;
            }
        };

        let mut keep = true;

        if !known.contains(index.hash_key.as_str()) {
            diagnostics.push(Diagnostic::MissingHashKeyReference {
                index: index.name.clone(),
                field: index.hash_key.clone(),
            });
            keep = false;
        }

        if let Some(range_key) = &index.range_key {
            if !known.contains(range_key.as_str()) {
                diagnostics.push(Diagnostic::MissingRangeKeyReference {
                    index: index.name.clone(),
                    field: range_key.clone(),
                });
                keep = false;
            }
        }

        if !seen.insert(index.name.clone()) {
            diagnostics.push(Diagnostic::DuplicateName {
                name: index.name.clone(),
                namespace: NameNamespace::Index,
            });
            keep = false;
        }

        if keep {
            indexes.push(index);
        }
    }

    indexes
}

/// Returns `None` only when the primary entry is missing or malformed, in
/// which case a diagnostic has been pushed.
fn resolve_throughput(
    table_config: &[(String, String)],
    indexes: &[SecondaryIndexDescriptor],
    policy: PrimaryThroughput,
    diagnostics: &mut Diagnostics,
) -> Option<ThroughputConfig> {
    // Later entries for the same target replace earlier ones.
    let mut entries: Vec<(&str, &str)> = Vec::new();
    for (target, raw) in table_config {
        match entries.iter_mut().find(|(t, _)| *t == target.as_str()) {
            Some(entry) => entry.1 = raw.as_str(),
            None => entries.push((target.as_str(), raw.as_str())),
        }
    }
    let lookup = |target: &str| {
        entries
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, raw)| *raw)
    };

    let primary = match (lookup(PRIMARY_TARGET), policy) {
        (Some(raw), _) => parse_units(PRIMARY_TARGET, raw, diagnostics),
        (None, PrimaryThroughput::Default(units)) => Some(units),
        (None, PrimaryThroughput::Required) => {
            diagnostics.push(Diagnostic::MissingThroughputConfig {
                target: PRIMARY_TARGET.to_string(),
            });
            None
        }
    };

    let mut index_units = BTreeMap::new();
    for index in indexes {
        match lookup(index.name.as_str()) {
            Some(raw) => {
                if let Some(units) = parse_units(&index.name, raw, diagnostics) {
                    index_units.insert(index.name.clone(), units);
                }
            }
            None => diagnostics.push(Diagnostic::MissingThroughputConfig {
                target: index.name.clone(),
            }),
        }
    }

    for (target, _) in &entries {
        if *target != PRIMARY_TARGET && !indexes.iter().any(|i| i.name == *target) {
            diagnostics.push(Diagnostic::UnreferencedThroughputConfig {
                target: target.to_string(),
            });
        }
    }

    primary.map(|primary| ThroughputConfig {
        primary,
        indexes: index_units,
    })
}

fn parse_units(target: &str, raw: &str, diagnostics: &mut Diagnostics) -> Option<ThroughputUnits> {
    ThroughputUnits::parse(raw)
        .map_err(|reason| diagnostics.push(Diagnostic::malformed(format!("{target}:{raw}"), reason)))
        .ok()
}

fn resolve_validations(
    input: &RawSchemaInput,
    attributes: &[AttributeDescriptor],
    diagnostics: &mut Diagnostics,
) -> ValidationRuleSet {
    let known: HashSet<&str> = attributes.iter().map(|a| a.name.as_str()).collect();
    let mut rules = ValidationRuleSet::default();

    for field in &input.required {
        if !known.contains(field.as_str()) {
            diagnostics.push(Diagnostic::UnknownRequiredField {
                field: field.clone(),
            });
        } else if !rules.is_required(field) {
            rules.required.push(field.clone());
        }
    }

    for (field, raw) in &input.length_validations {
        let is_known = known.contains(field.as_str());
        if !is_known {
            diagnostics.push(Diagnostic::UnknownLengthValidationField {
                field: field.clone(),
            });
        }

        match LengthBounds::parse(raw) {
            Ok(bounds) if is_known => rules.lengths.push(LengthValidation {
                field: field.clone(),
                bounds,
            }),
            Ok(_) => {}
            Err(reason) => {
                diagnostics.push(Diagnostic::malformed(format!("{field}:{raw}"), reason));
            }
        }
    }

    rules
}
