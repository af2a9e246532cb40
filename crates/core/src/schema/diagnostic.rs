use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::token::TokenError;

/// Namespace in which a duplicated name was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameNamespace {
    /// Attribute names and storage names, checked jointly.
    Attribute,
    /// An explicit `db_attr_name{...}` storage name.
    DatabaseAttributeName,
    /// Secondary index names.
    Index,
}

impl fmt::Display for NameNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute => f.write_str("attribute"),
            Self::DatabaseAttributeName => f.write_str("database_attribute_name"),
            Self::Index => f.write_str("index"),
        }
    }
}

/// A single non-fatal problem found while resolving a schema.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("Malformed token '{token}': {reason}")]
    MalformedToken { token: String, reason: TokenError },
    #[error("Found duplicated field name: {name}, in {namespace}")]
    DuplicateName {
        name: String,
        namespace: NameNamespace,
    },
    #[error("Redefinition of hash_key attr: {name}, original declaration of hash_key on: {original}")]
    DuplicateHashKey { name: String, original: String },
    #[error("Redefinition of range_key attr: {name}, original declaration of range_key on: {original}")]
    DuplicateRangeKey { name: String, original: String },
    #[error("Could not find attribute {field} for gsi {index} hkey")]
    MissingHashKeyReference { index: String, field: String },
    #[error("Could not find attribute {field} for gsi {index} rkey")]
    MissingRangeKeyReference { index: String, field: String },
    #[error("Please provide a table_config definition for {target}")]
    MissingThroughputConfig { target: String },
    #[error("Could not find a gsi declaration for {target}")]
    UnreferencedThroughputConfig { target: String },
    #[error("No such field {field} in required validations")]
    UnknownRequiredField { field: String },
    #[error("No such field {field} in length validations")]
    UnknownLengthValidationField { field: String },
}

/// Discriminant of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    MalformedToken,
    DuplicateName,
    DuplicateHashKey,
    DuplicateRangeKey,
    MissingHashKeyReference,
    MissingRangeKeyReference,
    MissingThroughputConfig,
    UnreferencedThroughputConfig,
    UnknownRequiredField,
    UnknownLengthValidationField,
}

impl DiagnosticKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MalformedToken => "malformed_token",
            Self::DuplicateName => "duplicate_name",
            Self::DuplicateHashKey => "duplicate_hash_key",
            Self::DuplicateRangeKey => "duplicate_range_key",
            Self::MissingHashKeyReference => "missing_hash_key_reference",
            Self::MissingRangeKeyReference => "missing_range_key_reference",
            Self::MissingThroughputConfig => "missing_throughput_config",
            Self::UnreferencedThroughputConfig => "unreferenced_throughput_config",
            Self::UnknownRequiredField => "unknown_required_field",
            Self::UnknownLengthValidationField => "unknown_length_validation_field",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::MalformedToken { .. } => DiagnosticKind::MalformedToken,
            Self::DuplicateName { .. } => DiagnosticKind::DuplicateName,
            Self::DuplicateHashKey { .. } => DiagnosticKind::DuplicateHashKey,
            Self::DuplicateRangeKey { .. } => DiagnosticKind::DuplicateRangeKey,
            Self::MissingHashKeyReference { .. } => DiagnosticKind::MissingHashKeyReference,
            Self::MissingRangeKeyReference { .. } => DiagnosticKind::MissingRangeKeyReference,
            Self::MissingThroughputConfig { .. } => DiagnosticKind::MissingThroughputConfig,
            Self::UnreferencedThroughputConfig { .. } => {
                DiagnosticKind::UnreferencedThroughputConfig
            }
            Self::UnknownRequiredField { .. } => DiagnosticKind::UnknownRequiredField,
            Self::UnknownLengthValidationField { .. } => {
                DiagnosticKind::UnknownLengthValidationField
            }
        }
    }

    /// The offending identifiers, most specific first.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::MalformedToken { token, .. } => vec![token.as_str()],
            Self::DuplicateName { name, .. } => vec![name.as_str()],
            Self::DuplicateHashKey { name, original }
            | Self::DuplicateRangeKey { name, original } => vec![name.as_str(), original.as_str()],
            Self::MissingHashKeyReference { index, field }
            | Self::MissingRangeKeyReference { index, field } => {
                vec![index.as_str(), field.as_str()]
            }
            Self::MissingThroughputConfig { target }
            | Self::UnreferencedThroughputConfig { target } => vec![target.as_str()],
            Self::UnknownRequiredField { field } | Self::UnknownLengthValidationField { field } => {
                vec![field.as_str()]
            }
        }
    }

    pub(crate) fn malformed(token: impl Into<String>, reason: TokenError) -> Self {
        Self::MalformedToken {
            token: token.into(),
            reason,
        }
    }
}

/// Accumulates every diagnostic of a validation run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind() == kind).count()
    }

    /// Returns `value` when nothing was collected, the full list otherwise.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationFailure> {
        if self.items.is_empty() {
            Ok(value)
        } else {
            Err(ValidationFailure {
                diagnostics: self.items,
            })
        }
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// A failed validation run, carrying every diagnostic found.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{} problem(s) found while resolving the schema", .diagnostics.len())]
pub struct ValidationFailure {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationFailure {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Kinds in discovery order.
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics.iter().map(Diagnostic::kind).collect()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        assert_eq!(
            Diagnostic::DuplicateName {
                name: "uuid".to_string(),
                namespace: NameNamespace::Attribute,
            }
            .to_string(),
            "Found duplicated field name: uuid, in attribute"
        );
        assert_eq!(
            Diagnostic::MissingHashKeyReference {
                index: "idx1".to_string(),
                field: "missing_field".to_string(),
            }
            .to_string(),
            "Could not find attribute missing_field for gsi idx1 hkey"
        );
        assert_eq!(
            Diagnostic::UnreferencedThroughputConfig {
                target: "idx9".to_string()
            }
            .to_string(),
            "Could not find a gsi declaration for idx9"
        );
    }

    #[test]
    fn test_malformed_token_display_includes_reason() {
        let diagnostic = Diagnostic::malformed("uuid:map:hkey", TokenError::EmptyIndexName);
        assert_eq!(
            diagnostic.to_string(),
            "Malformed token 'uuid:map:hkey': You must provide a name for the secondary index"
        );
    }

    #[test]
    fn test_names_lists_offending_identifiers() {
        let diagnostic = Diagnostic::DuplicateHashKey {
            name: "b".to_string(),
            original: "a".to_string(),
        };
        assert_eq!(diagnostic.names(), vec!["b", "a"]);
        assert_eq!(diagnostic.kind(), DiagnosticKind::DuplicateHashKey);
    }

    #[test]
    fn test_collector_keeps_every_diagnostic_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::UnknownRequiredField {
            field: "a".to_string(),
        });
        diagnostics.extend([
            Diagnostic::UnknownRequiredField {
                field: "b".to_string(),
            },
            Diagnostic::MissingThroughputConfig {
                target: "primary".to_string(),
            },
        ]);

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::UnknownRequiredField), 2);

        let failure = diagnostics.finish(()).unwrap_err();
        assert_eq!(
            failure.kinds(),
            vec![
                DiagnosticKind::UnknownRequiredField,
                DiagnosticKind::UnknownRequiredField,
                DiagnosticKind::MissingThroughputConfig,
            ]
        );
        assert_eq!(
            failure.to_string(),
            "3 problem(s) found while resolving the schema"
        );
    }

    #[test]
    fn test_empty_collector_finishes_ok() {
        assert_eq!(Diagnostics::new().finish(42), Ok(42));
    }

    #[test]
    fn test_serialized_kind_tag() {
        let diagnostic = Diagnostic::MalformedToken {
            token: "x:bad".to_string(),
            reason: TokenError::UnknownType {
                name: "x".to_string(),
                type_tag: "bad".to_string(),
            },
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "malformed_token");
        assert_eq!(json["reason"]["error"], "unknown_type");
        assert_eq!(json["reason"]["type_tag"], "bad");
    }
}
