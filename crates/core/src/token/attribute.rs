//! Attribute tokens: `name[:type][:opt[,opt...]]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TokenError;
use super::segments::{is_word, split_clause, split_top_level};

/// Semantic type of a model attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    List,
    Map,
    StringSet,
    NumericSet,
}

impl AttributeType {
    /// Parses a type tag, accepting the aliases used on the command line.
    /// Matching is case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "string" => Some(Self::String),
            "int" | "integer" => Some(Self::Integer),
            "float" => Some(Self::Float),
            "bool" | "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            "datetime" => Some(Self::DateTime),
            "list" => Some(Self::List),
            "map" => Some(Self::Map),
            "sset" | "s_set" | "string_set" => Some(Self::StringSet),
            "nset" | "num_set" | "numeric_set" => Some(Self::NumericSet),
            _ => None,
        }
    }

    /// Canonical tag, as written back into a token.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::List => "list",
            Self::Map => "map",
            Self::StringSet => "sset",
            Self::NumericSet => "nset",
        }
    }

    /// Collection types cannot be used as a partition key.
    pub fn can_be_hash_key(&self) -> bool {
        !matches!(
            self,
            Self::List | Self::Map | Self::StringSet | Self::NumericSet
        )
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Explicit storage-level type override (`ddb_type{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DynamoType {
    S,
    N,
    B,
    Bool,
    Ss,
    Ns,
    Bs,
    M,
    L,
}

impl DynamoType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "S" => Some(Self::S),
            "N" => Some(Self::N),
            "B" => Some(Self::B),
            "BOOL" => Some(Self::Bool),
            "SS" => Some(Self::Ss),
            "NS" => Some(Self::Ns),
            "BS" => Some(Self::Bs),
            "M" => Some(Self::M),
            "L" => Some(Self::L),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::N => "N",
            Self::B => "B",
            Self::Bool => "BOOL",
            Self::Ss => "SS",
            Self::Ns => "NS",
            Self::Bs => "BS",
            Self::M => "M",
            Self::L => "L",
        }
    }
}

/// Options attached to an attribute.
///
/// Argument values are kept as the literal text found between the braces;
/// nothing here interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOptions {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hash_key: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub range_key: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub persist_nil: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub digest: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_attribute_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamodb_type: Option<DynamoType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl AttributeOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Renders the options as token clauses in a fixed order.
    fn clauses(&self) -> Vec<String> {
        let mut clauses = Vec::new();
        if self.hash_key {
            clauses.push("hkey".to_string());
        }
        if self.range_key {
            clauses.push("rkey".to_string());
        }
        if self.persist_nil {
            clauses.push("persist_nil".to_string());
        }
        if self.digest {
            clauses.push("digest".to_string());
        }
        if let Some(db_name) = &self.database_attribute_name {
            clauses.push(format!("db_attr_name{{{}}}", db_name));
        }
        if let Some(ddb_type) = &self.dynamodb_type {
            clauses.push(format!("ddb_type{{{}}}", ddb_type.tag()));
        }
        if let Some(default) = &self.default_value {
            clauses.push(format!("default_value{{{}}}", default));
        }
        clauses
    }
}

/// A single parsed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(default, skip_serializing_if = "AttributeOptions::is_empty")]
    pub options: AttributeOptions,
}

impl AttributeDescriptor {
    /// Create an attribute with no options.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            options: AttributeOptions::default(),
        }
    }

    /// Replace the attribute's options.
    pub fn with_options(mut self, options: AttributeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_hash_key(&self) -> bool {
        self.options.hash_key
    }

    pub fn is_range_key(&self) -> bool {
        self.options.range_key
    }

    /// Name used at the storage level, when it differs from the attribute name.
    pub fn storage_name(&self) -> Option<&str> {
        self.options.database_attribute_name.as_deref()
    }

    /// Canonical token form; parsing it yields an equal descriptor.
    pub fn to_token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AttributeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.attribute_type)?;
        let clauses = self.options.clauses();
        if !clauses.is_empty() {
            write!(f, ":{}", clauses.join(","))?;
        }
        Ok(())
    }
}

impl FromStr for AttributeDescriptor {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_attribute(s)
    }
}

/// Parses one attribute token.
///
/// The type segment is optional: when the second segment is an option list
/// (`uuid:hkey`) the type defaults to string.
///
/// # Examples
///
/// ```
/// use recordgen_core::token::{parse_attribute, AttributeType};
///
/// let attr = parse_attribute("tags:sset:default_value{Set.new}").unwrap();
/// assert_eq!(attr.name, "tags");
/// assert_eq!(attr.attribute_type, AttributeType::StringSet);
/// assert_eq!(attr.options.default_value.as_deref(), Some("Set.new"));
///
/// let key = parse_attribute("uuid:hkey").unwrap();
/// assert_eq!(key.attribute_type, AttributeType::String);
/// assert!(key.is_hash_key());
///
/// assert!(parse_attribute("uuid:invalid_type:hkey").is_err());
/// ```
pub fn parse_attribute(raw: &str) -> Result<AttributeDescriptor, TokenError> {
    let raw = raw.trim();
    let segments = split_top_level(raw, ':');
    if segments.len() > 3 {
        return Err(TokenError::TooManySegments {
            token: raw.to_string(),
        });
    }

    let name = segments[0].trim();
    if name.is_empty() {
        return Err(TokenError::EmptyAttributeName);
    }
    if !is_word(name) {
        return Err(TokenError::InvalidAttributeName {
            name: name.to_string(),
        });
    }

    let (type_tag, raw_options) = match (segments.get(1), segments.get(2)) {
        (None, _) => (None, None),
        (Some(second), None) if looks_like_options(second) => (None, Some(*second)),
        (Some(second), third) => (Some(second.trim()), third.copied()),
    };

    let attribute_type = match type_tag {
        None => AttributeType::String,
        Some(tag) => AttributeType::from_tag(tag).ok_or_else(|| TokenError::UnknownType {
            name: name.to_string(),
            type_tag: tag.to_string(),
        })?,
    };

    let options = match raw_options {
        Some(raw_options) => parse_options(name, raw_options)?,
        None => AttributeOptions::default(),
    };

    validate_option_combinations(name, attribute_type, &options)?;

    Ok(AttributeDescriptor {
        name: name.to_string(),
        attribute_type,
        options,
    })
}

fn is_option_key(key: &str) -> bool {
    matches!(
        key,
        "hkey"
            | "hash_key"
            | "rkey"
            | "range_key"
            | "persist_nil"
            | "digest"
            | "db_attr_name"
            | "database_attribute_name"
            | "ddb_type"
            | "dynamodb_type"
            | "default_value"
    )
}

/// True when a segment in type position is really an option list.
fn looks_like_options(segment: &str) -> bool {
    split_top_level(segment, ',').into_iter().any(|item| {
        split_clause(item.trim()).is_some_and(|clause| is_option_key(clause.key))
    })
}

fn parse_options(name: &str, raw: &str) -> Result<AttributeOptions, TokenError> {
    let mut options = AttributeOptions::default();
    for item in split_top_level(raw, ',')
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
    {
        apply_option(name, item, &mut options)?;
    }
    Ok(options)
}

fn apply_option(name: &str, item: &str, options: &mut AttributeOptions) -> Result<(), TokenError> {
    let unknown = || TokenError::UnknownOption {
        name: name.to_string(),
        option: item.to_string(),
    };
    let clause = split_clause(item).ok_or_else(unknown)?;

    match (clause.key, clause.argument) {
        ("hkey" | "hash_key", None) => options.hash_key = true,
        ("rkey" | "range_key", None) => options.range_key = true,
        ("persist_nil", None) => options.persist_nil = true,
        ("digest", None) => options.digest = true,
        ("db_attr_name" | "database_attribute_name", argument) => {
            let argument = required_argument(name, clause.key, argument)?;
            if !is_word(argument) {
                return Err(invalid_argument(name, clause.key, argument));
            }
            options.database_attribute_name = Some(argument.to_string());
        }
        ("ddb_type" | "dynamodb_type", argument) => {
            let argument = required_argument(name, clause.key, argument)?;
            let ddb_type = DynamoType::from_tag(argument)
                .ok_or_else(|| invalid_argument(name, clause.key, argument))?;
            options.dynamodb_type = Some(ddb_type);
        }
        ("default_value", argument) => {
            let argument = required_argument(name, clause.key, argument)?;
            options.default_value = Some(argument.to_string());
        }
        _ => return Err(unknown()),
    }
    Ok(())
}

fn required_argument<'a>(
    name: &str,
    option: &str,
    argument: Option<&'a str>,
) -> Result<&'a str, TokenError> {
    match argument {
        Some(argument) if !argument.is_empty() => Ok(argument),
        _ => Err(TokenError::MissingArgument {
            name: name.to_string(),
            option: option.to_string(),
        }),
    }
}

fn invalid_argument(name: &str, option: &str, argument: &str) -> TokenError {
    TokenError::InvalidArgument {
        name: name.to_string(),
        option: option.to_string(),
        argument: argument.to_string(),
    }
}

fn validate_option_combinations(
    name: &str,
    attribute_type: AttributeType,
    options: &AttributeOptions,
) -> Result<(), TokenError> {
    if options.hash_key && options.range_key {
        return Err(TokenError::ConflictingKeys {
            name: name.to_string(),
        });
    }
    if options.hash_key && !attribute_type.can_be_hash_key() {
        return Err(TokenError::InvalidHashKeyType {
            name: name.to_string(),
            type_tag: attribute_type.tag().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== type parsing ====================

    #[test]
    fn test_name_only_defaults_to_string() {
        let attr = parse_attribute("author_username").unwrap();
        assert_eq!(attr, AttributeDescriptor::new("author_username", AttributeType::String));
    }

    #[test]
    fn test_explicit_type() {
        let attr = parse_attribute("moderation:boolean").unwrap();
        assert_eq!(attr.attribute_type, AttributeType::Boolean);
        assert!(attr.options.is_empty());
    }

    #[test]
    fn test_type_aliases() {
        let cases = [
            ("int", AttributeType::Integer),
            ("INTEGER", AttributeType::Integer),
            ("bool", AttributeType::Boolean),
            ("s_set", AttributeType::StringSet),
            ("string_set", AttributeType::StringSet),
            ("num_set", AttributeType::NumericSet),
            ("numeric_set", AttributeType::NumericSet),
            ("DateTime", AttributeType::DateTime),
        ];
        for (tag, expected) in cases {
            assert_eq!(AttributeType::from_tag(tag), Some(expected), "tag {}", tag);
        }
    }

    #[test]
    fn test_unknown_type_fails() {
        let err = parse_attribute("uuid:invalid_type:hkey").unwrap_err();
        assert_eq!(
            err,
            TokenError::UnknownType {
                name: "uuid".to_string(),
                type_tag: "invalid_type".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_single_segment_is_a_type_error() {
        let err = parse_attribute("title:text").unwrap_err();
        assert!(matches!(err, TokenError::UnknownType { .. }));
    }

    // ==================== option parsing ====================

    #[test]
    fn test_options_in_type_position() {
        let attr = parse_attribute("uuid:hkey").unwrap();
        assert_eq!(attr.attribute_type, AttributeType::String);
        assert!(attr.is_hash_key());
    }

    #[test]
    fn test_long_key_flags() {
        let attr = parse_attribute("post_id:integer:range_key").unwrap();
        assert!(attr.is_range_key());
        assert!(!attr.is_hash_key());
    }

    #[test]
    fn test_db_attr_name_is_storage_name() {
        let attr = parse_attribute("created_at:datetime:db_attr_name{PostCreatedAtTime}").unwrap();
        assert_eq!(attr.storage_name(), Some("PostCreatedAtTime"));

        let long = parse_attribute("created_at:datetime:database_attribute_name{At}").unwrap();
        assert_eq!(long.storage_name(), Some("At"));
    }

    #[test]
    fn test_default_value_is_opaque() {
        let attr = parse_attribute("tags:sset:default_value{Set.new([1, 2])}").unwrap();
        assert_eq!(attr.options.default_value.as_deref(), Some("Set.new([1, 2])"));
    }

    #[test]
    fn test_default_value_may_contain_colons() {
        let attr = parse_attribute("at:datetime:default_value{Time.parse('12:00')}").unwrap();
        assert_eq!(
            attr.options.default_value.as_deref(),
            Some("Time.parse('12:00')")
        );
    }

    #[test]
    fn test_ddb_type_is_normalized() {
        let attr = parse_attribute("flag:boolean:ddb_type{bool}").unwrap();
        assert_eq!(attr.options.dynamodb_type, Some(DynamoType::Bool));
    }

    #[test]
    fn test_persist_nil_and_digest_flags() {
        let attr = parse_attribute("password_digest:string:digest,persist_nil").unwrap();
        assert!(attr.options.digest);
        assert!(attr.options.persist_nil);
    }

    #[test]
    fn test_unknown_option_fails() {
        let err = parse_attribute("uuid:hkey,invalid_opt").unwrap_err();
        assert_eq!(
            err,
            TokenError::UnknownOption {
                name: "uuid".to_string(),
                option: "invalid_opt".to_string(),
            }
        );
    }

    #[test]
    fn test_argument_option_without_braces_fails() {
        let err = parse_attribute("title:string:default_value").unwrap_err();
        assert!(matches!(err, TokenError::MissingArgument { ref option, .. } if option == "default_value"));

        let err = parse_attribute("title:string:db_attr_name{}").unwrap_err();
        assert!(matches!(err, TokenError::MissingArgument { .. }));
    }

    #[test]
    fn test_invalid_arguments_fail() {
        let err = parse_attribute("title:string:db_attr_name{not a word}").unwrap_err();
        assert!(matches!(err, TokenError::InvalidArgument { .. }));

        let err = parse_attribute("title:string:ddb_type{XYZ}").unwrap_err();
        assert!(matches!(err, TokenError::InvalidArgument { .. }));
    }

    #[test]
    fn test_flag_with_argument_is_unknown() {
        let err = parse_attribute("uuid:string:hkey{yes}").unwrap_err();
        assert!(matches!(err, TokenError::UnknownOption { .. }));
    }

    #[test]
    fn test_empty_option_items_are_ignored() {
        let attr = parse_attribute("uuid:string:hkey,").unwrap();
        assert!(attr.is_hash_key());

        let bare = parse_attribute("title:string:").unwrap();
        assert!(bare.options.is_empty());
    }

    // ==================== invalid combinations ====================

    #[test]
    fn test_hash_and_range_key_conflict() {
        let err = parse_attribute("uuid:string:hkey,rkey").unwrap_err();
        assert_eq!(
            err,
            TokenError::ConflictingKeys {
                name: "uuid".to_string()
            }
        );
    }

    #[test]
    fn test_collection_hash_key_rejected() {
        let err = parse_attribute("uuid:map:hkey").unwrap_err();
        assert_eq!(
            err,
            TokenError::InvalidHashKeyType {
                name: "uuid".to_string(),
                type_tag: "map".to_string(),
            }
        );
        assert!(parse_attribute("tags:sset:rkey").is_ok());
    }

    #[test]
    fn test_empty_name_fails() {
        assert_eq!(
            parse_attribute(":string").unwrap_err(),
            TokenError::EmptyAttributeName
        );
        assert_eq!(parse_attribute("").unwrap_err(), TokenError::EmptyAttributeName);
    }

    #[test]
    fn test_name_must_be_a_word() {
        for (token, name) in [
            ("a-b", "a-b"),
            ("bad name:string", "bad name"),
            ("x{y}:string", "x{y}"),
            ("é", "é"),
        ] {
            assert_eq!(
                parse_attribute(token).unwrap_err(),
                TokenError::InvalidAttributeName {
                    name: name.to_string()
                },
                "token {}",
                token
            );
        }
    }

    #[test]
    fn test_too_many_segments_fails() {
        let err = parse_attribute("a:string:hkey:extra").unwrap_err();
        assert!(matches!(err, TokenError::TooManySegments { .. }));
    }

    // ==================== canonical form ====================

    #[test]
    fn test_round_trip_preserves_type_and_options() {
        let tokens = [
            "forum_uuid:hkey",
            "post_id:rkey",
            "tags:sset:default_value{Set.new}",
            "created_at:datetime:db_attr_name{PostCreatedAtTime}",
            "moderation:boolean:default_value{false}",
            "score:nset:ddb_type{ns},persist_nil",
        ];
        for token in tokens {
            let parsed = parse_attribute(token).unwrap();
            let reparsed: AttributeDescriptor = parsed.to_token().parse().unwrap();
            assert_eq!(parsed, reparsed, "token {}", token);
        }
    }

    #[test]
    fn test_canonical_token_form() {
        let attr = parse_attribute("uuid:hkey").unwrap();
        assert_eq!(attr.to_token(), "uuid:string:hkey");

        let attr = parse_attribute("count:int").unwrap();
        assert_eq!(attr.to_token(), "count:integer");
    }

    #[test]
    fn test_serialized_shape() {
        let attr = parse_attribute("forum_uuid:hkey").unwrap();
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["name"], "forum_uuid");
        assert_eq!(json["type"], "string");
        assert_eq!(json["options"]["hash_key"], true);
        assert!(json["options"].get("range_key").is_none());
    }
}
