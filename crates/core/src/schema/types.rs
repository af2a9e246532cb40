use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::{parse_range, AttributeDescriptor, SecondaryIndexDescriptor, TokenError};

/// Throughput target name for the table's own key structure.
pub const PRIMARY_TARGET: &str = "primary";

/// Provisioned read/write capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThroughputUnits {
    pub read: u64,
    pub write: u64,
}

impl ThroughputUnits {
    pub fn new(read: u64, write: u64) -> Self {
        Self { read, write }
    }

    /// Parses a `read-write` pair, e.g. `"10-5"` or `"10:5"`.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let (read, write) = parse_range(raw)?;
        Ok(Self { read, write })
    }
}

impl fmt::Display for ThroughputUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} read / {} write", self.read, self.write)
    }
}

/// Resolved capacity for the primary key structure and each secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThroughputConfig {
    pub primary: ThroughputUnits,
    pub indexes: BTreeMap<String, ThroughputUnits>,
}

impl ThroughputConfig {
    /// Looks up a target by name; `"primary"` names the table itself.
    pub fn get(&self, target: &str) -> Option<ThroughputUnits> {
        if target == PRIMARY_TARGET {
            Some(self.primary)
        } else {
            self.indexes.get(target).copied()
        }
    }
}

/// Inclusive length range for a length validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: u64,
    pub max: u64,
}

impl LengthBounds {
    /// Parses a `min-max` pair. An inverted pair is rejected.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let (min, max) = parse_range(raw)?;
        if min > max {
            return Err(TokenError::InvertedBounds {
                raw: raw.to_string(),
            });
        }
        Ok(Self { min, max })
    }
}

impl fmt::Display for LengthBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthValidation {
    pub field: String,
    pub bounds: LengthBounds,
}

/// Field-level validation rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationRuleSet {
    pub required: Vec<String>,
    pub lengths: Vec<LengthValidation>,
}

impl ValidationRuleSet {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.lengths.is_empty()
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.iter().any(|r| r == field)
    }

    pub fn length_of(&self, field: &str) -> Option<LengthBounds> {
        self.lengths
            .iter()
            .find(|l| l.field == field)
            .map(|l| l.bounds)
    }
}

/// A fully resolved model schema.
///
/// Only produced by a validation run that found no problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    model_name: String,
    table_name: String,
    attributes: Vec<AttributeDescriptor>,
    hash_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    range_key: Option<String>,
    indexes: Vec<SecondaryIndexDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    throughput: Option<ThroughputConfig>,
    validations: ValidationRuleSet,
    mutation_tracking: bool,
}

/// Everything a [`Schema`] is built from.
pub(crate) struct SchemaParts {
    pub model_name: String,
    pub table_name: String,
    pub attributes: Vec<AttributeDescriptor>,
    pub hash_key: String,
    pub range_key: Option<String>,
    pub indexes: Vec<SecondaryIndexDescriptor>,
    pub throughput: Option<ThroughputConfig>,
    pub validations: ValidationRuleSet,
    pub mutation_tracking: bool,
}

impl Schema {
    pub(crate) fn from_parts(parts: SchemaParts) -> Self {
        Self {
            model_name: parts.model_name,
            table_name: parts.table_name,
            attributes: parts.attributes,
            hash_key: parts.hash_key,
            range_key: parts.range_key,
            indexes: parts.indexes,
            throughput: parts.throughput,
            validations: parts.validations,
            mutation_tracking: parts.mutation_tracking,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Attributes in resolved order.
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Name of the partition key attribute.
    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    /// Name of the sort key attribute, if any.
    pub fn range_key(&self) -> Option<&str> {
        self.range_key.as_deref()
    }

    pub fn hash_key_attribute(&self) -> Option<&AttributeDescriptor> {
        self.attribute(&self.hash_key)
    }

    pub fn range_key_attribute(&self) -> Option<&AttributeDescriptor> {
        self.range_key.as_deref().and_then(|name| self.attribute(name))
    }

    pub fn indexes(&self) -> &[SecondaryIndexDescriptor] {
        &self.indexes
    }

    pub fn index(&self, name: &str) -> Option<&SecondaryIndexDescriptor> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// `None` when table configuration was skipped.
    pub fn throughput(&self) -> Option<&ThroughputConfig> {
        self.throughput.as_ref()
    }

    pub fn validations(&self) -> &ValidationRuleSet {
        &self.validations
    }

    pub fn has_validations(&self) -> bool {
        !self.validations.is_empty()
    }

    pub fn mutation_tracking(&self) -> bool {
        self.mutation_tracking
    }
}
