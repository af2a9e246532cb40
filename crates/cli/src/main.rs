//! recordgen CLI entry point.

use anyhow::Result;
use clap::Parser;
use recordgen::cli::{validate::ValidateArgs, Cli, Commands, OutputFormat};
use recordgen::input::build_input;
use recordgen::output::style::{aeprintln, aprintln, highlight, p_r};
use recordgen::output::{render_attribute, render_diagnostics, render_index, render_schema};
use recordgen::{CliError, Config};
use recordgen_core::schema::resolve_schema;
use recordgen_core::token::{parse_attribute, parse_index};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recordgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Validate(args) => validate(&cli, args)?,
        Commands::ParseAttribute { token } => {
            let attr = parse_attribute(token).map_err(CliError::from)?;
            print_lines(&render_attribute(&attr, cli.format)?);
        }
        Commands::ParseIndex { token } => {
            let index = parse_index(token).map_err(CliError::from)?;
            print_lines(&render_index(&index, cli.format)?);
        }
    }

    Ok(())
}

fn validate(cli: &Cli, args: &ValidateArgs) -> Result<()> {
    let config = Config::from_env();
    let input = build_input(args, &config)?;

    tracing::info!(
        model = %input.model_name,
        attributes = input.attributes.len(),
        indexes = input.indexes.len(),
        "resolving schema"
    );

    match resolve_schema(&input) {
        Ok(schema) => {
            tracing::info!(
                model = %schema.model_name(),
                hash_key = %schema.hash_key(),
                attributes = schema.attributes().len(),
                indexes = schema.indexes().len(),
                "schema resolved"
            );
            if !(cli.quiet && cli.format == OutputFormat::Pretty) {
                print_lines(&render_schema(&schema, cli.format)?);
            }
            Ok(())
        }
        Err(failure) => {
            for diagnostic in failure.diagnostics() {
                tracing::debug!(kind = %diagnostic.kind(), "{}", diagnostic);
            }
            tracing::info!(problems = failure.diagnostics().len(), "schema rejected");

            for line in render_diagnostics(failure.diagnostics(), cli.format)? {
                match cli.format {
                    OutputFormat::Json => eprintln!("{}", line),
                    OutputFormat::Pretty => aeprintln!("{}", p_r(&line)),
                }
            }
            Err(CliError::from(failure).into())
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        aprintln!("{}", highlight(line));
    }
}
