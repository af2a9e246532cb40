//! Semantic layer: cross-checks parsed tokens against each other and
//! resolves them into a [`Schema`].

mod diagnostic;
mod input;
mod synthesis;
mod types;
mod validator;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, NameNamespace, ValidationFailure};
pub use input::{PrimaryThroughput, RawSchemaInput, SchemaOptions};
pub use synthesis::{
    apply_synthesis_rules, generated_hash_key, SynthesisRule, CREATED, CURRENT_TIME_DEFAULT,
    GENERATED_HASH_KEY, PASSWORD_DIGEST, UPDATED,
};
pub use types::{
    LengthBounds, LengthValidation, Schema, ThroughputConfig, ThroughputUnits, ValidationRuleSet,
    PRIMARY_TARGET,
};
pub use validator::resolve_schema;
