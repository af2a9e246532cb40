use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when parsing a single raw token.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum TokenError {
    #[error("Token '{token}' has too many ':' separated segments")]
    TooManySegments { token: String },
    #[error("Attribute name cannot be empty")]
    EmptyAttributeName,
    #[error("Invalid attribute name '{name}': only letters, digits and '_' are allowed")]
    InvalidAttributeName { name: String },
    #[error("Invalid type for {name}: {type_tag}")]
    UnknownType { name: String, type_tag: String },
    #[error("You provided an invalid option for {name}: {option}")]
    UnknownOption { name: String, option: String },
    #[error("Option {option} for {name} requires an argument in braces")]
    MissingArgument { name: String, option: String },
    #[error("Invalid argument for option {option} of {name}: {argument}")]
    InvalidArgument {
        name: String,
        option: String,
        argument: String,
    },
    #[error("Field {name} cannot be a range key and hash key simultaneously")]
    ConflictingKeys { name: String },
    #[error("Field {name} cannot be a hash key and be of type {type_tag}")]
    InvalidHashKeyType { name: String, type_tag: String },
    #[error("You must provide a name for the secondary index")]
    EmptyIndexName,
    #[error("You must provide a hash key for secondary index {name}")]
    MissingIndexHashKey { name: String },
    #[error("Clause {clause} given more than once for secondary index {name}")]
    DuplicateIndexClause { name: String, clause: String },
    #[error("Invalid option for secondary index {name}: {clause}")]
    UnknownIndexClause { name: String, clause: String },
    #[error("Invalid projection type for secondary index {name}: {projection}")]
    UnknownProjection { name: String, projection: String },
    #[error("Expected two bounds in '{raw}', found {found}")]
    BoundCount { raw: String, found: usize },
    #[error("Invalid bound '{bound}' in '{raw}'")]
    InvalidBound { raw: String, bound: String },
    #[error("Invalid bounds '{raw}': minimum is greater than maximum")]
    InvertedBounds { raw: String },
}
