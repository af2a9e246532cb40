//! Raw, unvalidated input to a validation run.
//!
//! These types are shared between the command line and JSON input files.
//! Following the Functional Core pattern, they are pure data with no I/O.

use serde::{Deserialize, Serialize};

use super::types::ThroughputUnits;
use crate::serde_ext::deserialize_ordered_pairs;

/// What to do when no `primary` throughput entry is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimaryThroughput {
    /// A missing `primary` entry is a diagnostic.
    #[default]
    Required,
    /// A missing `primary` entry falls back to these units.
    Default(ThroughputUnits),
}

/// Standing options that are not tied to a single token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Append `created` and `updated` datetime attributes.
    pub timestamps: bool,
    /// Append a `password_digest` attribute.
    pub password_digest: bool,
    pub disable_mutation_tracking: bool,
    /// Skip throughput resolution entirely (model-only runs).
    pub skip_table_config: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip)]
    pub primary_throughput: PrimaryThroughput,
}

/// Raw tokens and mappings for one model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawSchemaInput {
    pub model_name: String,
    pub attributes: Vec<String>,
    #[serde(alias = "gsi")]
    pub indexes: Vec<String>,
    /// `(target, "read-write")` pairs.
    #[serde(deserialize_with = "deserialize_ordered_pairs")]
    pub table_config: Vec<(String, String)>,
    pub required: Vec<String>,
    /// `(field, "min-max")` pairs.
    #[serde(deserialize_with = "deserialize_ordered_pairs")]
    pub length_validations: Vec<(String, String)>,
    pub options: SchemaOptions,
}

impl RawSchemaInput {
    /// Create an empty input for the named model.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Self::default()
        }
    }

    pub fn with_attributes<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn with_index(mut self, token: impl Into<String>) -> Self {
        self.indexes.push(token.into());
        self
    }

    pub fn with_table_config(mut self, target: impl Into<String>, units: impl Into<String>) -> Self {
        self.table_config.push((target.into(), units.into()));
        self
    }

    pub fn with_required(mut self, field: impl Into<String>) -> Self {
        self.required.push(field.into());
        self
    }

    pub fn with_length_validation(
        mut self,
        field: impl Into<String>,
        bounds: impl Into<String>,
    ) -> Self {
        self.length_validations.push((field.into(), bounds.into()));
        self
    }

    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Appends another input's tokens and mappings to this one.
    ///
    /// Flags are OR-ed; an explicit table name in `other` wins.
    pub fn merge(mut self, other: RawSchemaInput) -> Self {
        if self.model_name.is_empty() {
            self.model_name = other.model_name;
        }
        self.attributes.extend(other.attributes);
        self.indexes.extend(other.indexes);
        self.table_config.extend(other.table_config);
        self.required.extend(other.required);
        self.length_validations.extend(other.length_validations);

        let options = &mut self.options;
        options.timestamps |= other.options.timestamps;
        options.password_digest |= other.options.password_digest;
        options.disable_mutation_tracking |= other.options.disable_mutation_tracking;
        options.skip_table_config |= other.options.skip_table_config;
        if other.options.table_name.is_some() {
            options.table_name = other.options.table_name;
        }
        self
    }
}
