//! Secondary index tokens:
//! `name:hkey{field}[,rkey{field}][,proj_type{ALL|KEYS_ONLY|INCLUDE}]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TokenError;
use super::segments::{is_word, split_clause, split_top_level};

/// Which attributes a secondary index carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionType {
    #[default]
    All,
    KeysOnly,
    Include,
}

impl ProjectionType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ALL" => Some(Self::All),
            "KEYS_ONLY" => Some(Self::KeysOnly),
            "INCLUDE" => Some(Self::Include),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::KeysOnly => "KEYS_ONLY",
            Self::Include => "INCLUDE",
        }
    }
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A parsed secondary index declaration.
///
/// Key field names are not checked against any attribute set here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryIndexDescriptor {
    pub name: String,
    pub hash_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_key: Option<String>,
    #[serde(default)]
    pub projection: ProjectionType,
}

impl SecondaryIndexDescriptor {
    /// Create an index with an `ALL` projection and no range key.
    pub fn new(name: impl Into<String>, hash_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash_key: hash_key.into(),
            range_key: None,
            projection: ProjectionType::All,
        }
    }

    pub fn with_range_key(mut self, range_key: impl Into<String>) -> Self {
        self.range_key = Some(range_key.into());
        self
    }

    pub fn with_projection(mut self, projection: ProjectionType) -> Self {
        self.projection = projection;
        self
    }

    /// Canonical token form.
    pub fn to_token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SecondaryIndexDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:hkey{{{}}}", self.name, self.hash_key)?;
        if let Some(range_key) = &self.range_key {
            write!(f, ",rkey{{{}}}", range_key)?;
        }
        write!(f, ",proj_type{{{}}}", self.projection)
    }
}

impl FromStr for SecondaryIndexDescriptor {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_index(s)
    }
}

/// Parses one secondary index token.
///
/// # Examples
///
/// ```
/// use recordgen_core::token::{parse_index, ProjectionType};
///
/// let idx = parse_index("by_author:hkey{author_username},rkey{post_id}").unwrap();
/// assert_eq!(idx.hash_key, "author_username");
/// assert_eq!(idx.range_key.as_deref(), Some("post_id"));
/// assert_eq!(idx.projection, ProjectionType::All);
///
/// assert!(parse_index("by_author:rkey{post_id}").is_err());
/// ```
pub fn parse_index(raw: &str) -> Result<SecondaryIndexDescriptor, TokenError> {
    let raw = raw.trim();
    let segments = split_top_level(raw, ':');
    if segments.len() > 2 {
        return Err(TokenError::TooManySegments {
            token: raw.to_string(),
        });
    }

    let name = segments[0].trim();
    if name.is_empty() {
        return Err(TokenError::EmptyIndexName);
    }

    let mut hash_key = None;
    let mut range_key = None;
    let mut projection = None;

    let clauses = segments.get(1).copied().unwrap_or_default();
    for item in split_top_level(clauses, ',')
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
    {
        let unknown = || TokenError::UnknownIndexClause {
            name: name.to_string(),
            clause: item.to_string(),
        };
        let clause = split_clause(item).ok_or_else(unknown)?;
        let argument = clause.argument.filter(|a| is_word(a)).ok_or_else(unknown)?;

        let already_set = match clause.key {
            "hkey" => hash_key.is_some(),
            "rkey" => range_key.is_some(),
            "proj_type" => projection.is_some(),
            _ => false,
        };
        if already_set {
            return Err(TokenError::DuplicateIndexClause {
                name: name.to_string(),
                clause: clause.key.to_string(),
            });
        }

        match clause.key {
            "hkey" => hash_key = Some(argument.to_string()),
            "rkey" => range_key = Some(argument.to_string()),
            "proj_type" => {
                let parsed = ProjectionType::from_tag(argument).ok_or_else(|| {
                    TokenError::UnknownProjection {
                        name: name.to_string(),
                        projection: argument.to_string(),
                    }
                })?;
                projection = Some(parsed);
            }
            _ => return Err(unknown()),
        }
    }

    let hash_key = hash_key.ok_or_else(|| TokenError::MissingIndexHashKey {
        name: name.to_string(),
    })?;

    Ok(SecondaryIndexDescriptor {
        name: name.to_string(),
        hash_key,
        range_key,
        projection: projection.unwrap_or_default(),
    })
}
