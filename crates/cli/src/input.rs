//! Assembles a [`RawSchemaInput`] from command arguments and an optional
//! JSON input file.

use std::fs;
use std::path::Path;

use recordgen_core::schema::{RawSchemaInput, SchemaOptions};

use crate::cli::validate::ValidateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};

/// Pure function: Convert arguments into a raw input.
pub fn input_from_args(args: &ValidateArgs) -> RawSchemaInput {
    let mut input = RawSchemaInput::new(args.model.as_str())
        .with_attributes(args.attributes.iter().cloned())
        .with_options(SchemaOptions {
            timestamps: args.timestamps,
            password_digest: args.password_digest,
            disable_mutation_tracking: args.disable_mutation_tracking,
            skip_table_config: args.skip_table_config,
            table_name: args.table_name.clone(),
            ..SchemaOptions::default()
        });

    input.indexes.extend(args.indexes.iter().cloned());
    input.table_config.extend(args.table_config.iter().cloned());
    input.required.extend(args.required.iter().cloned());
    input
        .length_validations
        .extend(args.length_validations.iter().cloned());
    input
}

/// Read a raw input from a JSON file.
pub fn load_input_file(path: &Path) -> Result<RawSchemaInput> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::InvalidInputFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Build the input for a `validate` run.
///
/// File contents come first; argument tokens are appended. The model name
/// from the arguments always wins.
pub fn build_input(args: &ValidateArgs, config: &Config) -> Result<RawSchemaInput> {
    let from_args = input_from_args(args);

    let mut input = match &args.input {
        Some(path) => {
            let mut file_input = load_input_file(path)?;
            file_input.model_name = args.model.clone();
            file_input.merge(from_args)
        }
        None => from_args,
    };

    input.options.primary_throughput = config.primary_throughput();
    Ok(input)
}
