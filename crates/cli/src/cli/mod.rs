//! CLI command definitions.

pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};

/// Validate attribute, index and table-config tokens for a model.
#[derive(Debug, Parser)]
#[command(name = "recordgen")]
#[command(version, about = "Validate model attribute and table definitions", long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, default_value = "pretty", env = "RECORDGEN_FORMAT")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output with colors.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a model's attributes, indexes and table config into a schema.
    Validate(validate::ValidateArgs),
    /// Parse a single attribute token.
    ParseAttribute {
        /// Attribute token, e.g. `tags:sset:default_value{Set.new}`.
        token: String,
    },
    /// Parse a single secondary index token.
    ParseIndex {
        /// Index token, e.g. `by_author:hkey{author},rkey{post_id}`.
        token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_pretty() {
        let cli = Cli::try_parse_from(["recordgen", "parse-attribute", "uuid:hkey"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(!cli.quiet);
        assert!(matches!(cli.command, Commands::ParseAttribute { token } if token == "uuid:hkey"));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "recordgen",
            "--format",
            "json",
            "--quiet",
            "parse-index",
            "idx1:hkey{title}",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::ParseIndex { .. }));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["recordgen", "--format", "yaml", "parse-index", "x"]);
        assert!(result.is_err());
    }
}
