//! Output rendering for each command, in either format.
//!
//! Renderers return lines; printing and coloring are left to `main`.

pub mod json;
pub mod pretty;
pub mod style;

use recordgen_core::schema::{Diagnostic, Schema};
use recordgen_core::token::{AttributeDescriptor, SecondaryIndexDescriptor};

use crate::cli::OutputFormat;
use crate::error::Result;

/// Render a resolved schema.
pub fn render_schema(schema: &Schema, format: OutputFormat) -> Result<Vec<String>> {
    match format {
        OutputFormat::Json => Ok(vec![json::format_json(schema)?]),
        OutputFormat::Pretty => Ok(pretty::format_schema(schema)),
    }
}

/// Render a single parsed attribute.
pub fn render_attribute(attr: &AttributeDescriptor, format: OutputFormat) -> Result<Vec<String>> {
    match format {
        OutputFormat::Json => Ok(vec![json::format_json(attr)?]),
        OutputFormat::Pretty => Ok(pretty::format_attribute(attr)),
    }
}

/// Render a single parsed secondary index.
pub fn render_index(index: &SecondaryIndexDescriptor, format: OutputFormat) -> Result<Vec<String>> {
    match format {
        OutputFormat::Json => Ok(vec![json::format_json(index)?]),
        OutputFormat::Pretty => Ok(pretty::format_index(index)),
    }
}

/// Render the diagnostics of a rejected schema.
pub fn render_diagnostics(diagnostics: &[Diagnostic], format: OutputFormat) -> Result<Vec<String>> {
    match format {
        OutputFormat::Json => Ok(vec![json::format_json(&diagnostics)?]),
        OutputFormat::Pretty => Ok(pretty::format_diagnostics(diagnostics)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgen_core::schema::{resolve_schema, RawSchemaInput};
    use recordgen_core::token::parse_attribute;

    #[test]
    fn test_render_schema_formats() {
        let input = RawSchemaInput::new("Post")
            .with_attributes(["uuid:hkey"])
            .with_table_config("primary", "5-2");
        let schema = resolve_schema(&input).unwrap();

        let json = render_schema(&schema, OutputFormat::Json).unwrap();
        assert_eq!(json.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&json[0]).unwrap();
        assert_eq!(value["hash_key"], "uuid");
        assert_eq!(value["throughput"]["primary"]["read"], 5);

        let pretty = render_schema(&schema, OutputFormat::Pretty).unwrap();
        assert_eq!(pretty[0], "+ Model: Post (table: Post)");
    }

    #[test]
    fn test_render_attribute_formats() {
        let attr = parse_attribute("count:int").unwrap();
        assert_eq!(
            render_attribute(&attr, OutputFormat::Json).unwrap(),
            vec![r#"{"name":"count","type":"integer"}"#]
        );
        assert_eq!(
            render_attribute(&attr, OutputFormat::Pretty).unwrap()[0],
            "count (integer)"
        );
    }

    #[test]
    fn test_render_diagnostics_formats() {
        let input = RawSchemaInput::new("Post").with_attributes(["uuid:hkey"]);
        let failure = resolve_schema(&input).unwrap_err();

        assert_eq!(
            render_diagnostics(failure.diagnostics(), OutputFormat::Pretty).unwrap(),
            vec!["1. [missing_throughput_config] Please provide a table_config definition for primary"]
        );
        let json = render_diagnostics(failure.diagnostics(), OutputFormat::Json).unwrap();
        assert!(json[0].starts_with(r#"[{"kind":"missing_throughput_config""#));
    }
}
