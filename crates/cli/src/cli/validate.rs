//! `validate` command arguments.

use std::path::PathBuf;

use clap::Args;

/// Arguments of the `validate` command.
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Model name.
    pub model: String,

    /// Attribute tokens: `name[:type][:opt[,opt...]]`.
    pub attributes: Vec<String>,

    /// Secondary index token: `name:hkey{field}[,rkey{field}][,proj_type{TYPE}]`.
    #[arg(long = "gsi", value_name = "TOKEN")]
    pub indexes: Vec<String>,

    /// Throughput for `primary` or an index, e.g. `primary:5-2`.
    #[arg(long, value_name = "TARGET:R-W", value_parser = parse_keyed_pair)]
    pub table_config: Vec<(String, String)>,

    /// Field that must be present.
    #[arg(long, value_name = "FIELD")]
    pub required: Vec<String>,

    /// Length bounds for a field, e.g. `title:5-10`.
    #[arg(long, value_name = "FIELD:MIN-MAX", value_parser = parse_keyed_pair)]
    pub length_validations: Vec<(String, String)>,

    /// Add `created` and `updated` timestamp attributes.
    #[arg(long)]
    pub timestamps: bool,

    /// Add a `password_digest` attribute.
    #[arg(long)]
    pub password_digest: bool,

    #[arg(long)]
    pub disable_mutation_tracking: bool,

    /// Resolve the model only, without throughput.
    #[arg(long)]
    pub skip_table_config: bool,

    /// Table name (defaults to the model name).
    #[arg(long)]
    pub table_name: Option<String>,

    /// JSON file with attributes, indexes and options; arguments are appended.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Splits `KEY:VALUE` on the first `:`.
pub fn parse_keyed_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY:VALUE, got '{raw}'")),
    }
}
