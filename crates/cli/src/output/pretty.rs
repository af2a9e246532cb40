//! Pretty output formatting.
//!
//! Every function returns plain lines; coloring happens when printing.

use recordgen_core::schema::{Diagnostic, Schema};
use recordgen_core::token::{AttributeDescriptor, SecondaryIndexDescriptor};

/// Pure function: Format a resolved schema as a plan.
pub fn format_schema(schema: &Schema) -> Vec<String> {
    let mut lines = vec![format!(
        "+ Model: {} (table: {})",
        schema.model_name(),
        schema.table_name()
    )];

    match schema.hash_key_attribute() {
        Some(attr) => lines.push(format!(
            "  Partition key: {} ({})",
            attr.name, attr.attribute_type
        )),
        None => lines.push(format!("  Partition key: {}", schema.hash_key())),
    }
    if let Some(attr) = schema.range_key_attribute() {
        lines.push(format!("  Sort key: {} ({})", attr.name, attr.attribute_type));
    }

    lines.push(format!("  Attributes ({}):", schema.attributes().len()));
    for attr in schema.attributes() {
        lines.push(format!("    {}", attr.to_token()));
    }

    for index in schema.indexes() {
        lines.extend(format_index(index).into_iter().map(|line| format!("  {}", line)));
    }

    if let Some(throughput) = schema.throughput() {
        lines.push(format!("  Throughput: primary {}", throughput.primary));
        for (name, units) in &throughput.indexes {
            lines.push(format!("    {}: {}", name, units));
        }
    }

    let validations = schema.validations();
    if !validations.required.is_empty() {
        lines.push(format!("  Required: {}", validations.required.join(", ")));
    }
    for length in &validations.lengths {
        lines.push(format!("  Length: {} {}", length.field, length.bounds));
    }

    if !schema.mutation_tracking() {
        lines.push("  ! Mutation tracking: disabled".to_string());
    }

    lines
}

/// Pure function: Format a single attribute.
pub fn format_attribute(attr: &AttributeDescriptor) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", attr.name, attr.attribute_type)];
    let options = &attr.options;

    if options.hash_key {
        lines.push("  Partition key".to_string());
    }
    if options.range_key {
        lines.push("  Sort key".to_string());
    }
    if options.persist_nil {
        lines.push("  Persist nil".to_string());
    }
    if options.digest {
        lines.push("  Digest".to_string());
    }
    if let Some(name) = attr.storage_name() {
        lines.push(format!("  Storage name: {}", name));
    }
    if let Some(ddb_type) = &options.dynamodb_type {
        lines.push(format!("  Storage type: {}", ddb_type.tag()));
    }
    if let Some(default) = &options.default_value {
        lines.push(format!("  Default: {}", default));
    }
    lines.push(format!("  Token: {}", attr.to_token()));
    lines
}

/// Pure function: Format a single secondary index.
pub fn format_index(index: &SecondaryIndexDescriptor) -> Vec<String> {
    let mut lines = vec![
        format!("+ GSI: {} ({})", index.name, index.projection),
        format!("  Partition key: {}", index.hash_key),
    ];
    if let Some(range_key) = &index.range_key {
        lines.push(format!("  Sort key: {}", range_key));
    }
    lines
}

/// Pure function: Format diagnostics as a numbered list.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. [{}] {}", i + 1, d.kind(), d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgen_core::schema::{resolve_schema, RawSchemaInput, SchemaOptions};
    use recordgen_core::token::{parse_attribute, parse_index};

    #[test]
    fn test_format_schema() {
        let input = RawSchemaInput::new("Post")
            .with_attributes(["forum_uuid:hkey", "post_id:rkey", "author"])
            .with_index("by_author:hkey{author},rkey{post_id}")
            .with_table_config("primary", "5-2")
            .with_table_config("by_author", "1-1")
            .with_required("author")
            .with_options(SchemaOptions {
                disable_mutation_tracking: true,
                ..SchemaOptions::default()
            });
        let schema = resolve_schema(&input).unwrap();

        assert_eq!(
            format_schema(&schema),
            vec![
                "+ Model: Post (table: Post)",
                "  Partition key: forum_uuid (string)",
                "  Sort key: post_id (string)",
                "  Attributes (3):",
                "    forum_uuid:string:hkey",
                "    post_id:string:rkey",
                "    author:string",
                "  + GSI: by_author (ALL)",
                "    Partition key: author",
                "    Sort key: post_id",
                "  Throughput: primary 5 read / 2 write",
                "    by_author: 1 read / 1 write",
                "  Required: author",
                "  ! Mutation tracking: disabled",
            ]
        );
    }

    #[test]
    fn test_format_attribute() {
        let attr = parse_attribute("tags:sset:db_attr_name{t},default_value{Set.new}").unwrap();
        assert_eq!(
            format_attribute(&attr),
            vec![
                "tags (sset)",
                "  Storage name: t",
                "  Default: Set.new",
                "  Token: tags:sset:db_attr_name{t},default_value{Set.new}",
            ]
        );
    }

    #[test]
    fn test_format_index() {
        let index = parse_index("idx1:hkey{title},proj_type{KEYS_ONLY}").unwrap();
        assert_eq!(
            format_index(&index),
            vec!["+ GSI: idx1 (KEYS_ONLY)", "  Partition key: title"]
        );
    }

    #[test]
    fn test_format_diagnostics() {
        let input = RawSchemaInput::new("Post")
            .with_attributes(["uuid:hkey", "uuid"])
            .with_index("idx1:hkey{missing_field}")
            .with_table_config("primary", "5-2");
        let failure = resolve_schema(&input).unwrap_err();

        assert_eq!(
            format_diagnostics(failure.diagnostics()),
            vec![
                "1. [duplicate_name] Found duplicated field name: uuid, in attribute",
                "2. [missing_hash_key_reference] Could not find attribute missing_field for gsi idx1 hkey",
            ]
        );
    }
}
