//! Attributes added to a model by standing options rather than tokens.

use super::input::SchemaOptions;
use crate::token::{AttributeDescriptor, AttributeOptions, AttributeType};

pub const PASSWORD_DIGEST: &str = "password_digest";
pub const CREATED: &str = "created";
pub const UPDATED: &str = "updated";

/// Name of the identifier synthesized when no hash key can be found.
pub const GENERATED_HASH_KEY: &str = "uuid";

/// Default literal bound to timestamp attributes; interpreted by the generator.
pub const CURRENT_TIME_DEFAULT: &str = "Time.now";

/// A rule that appends attributes when its option is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisRule {
    PasswordDigest,
    Timestamps,
}

impl SynthesisRule {
    /// Application order. Password digest always precedes timestamps.
    pub const ORDER: [SynthesisRule; 2] = [Self::PasswordDigest, Self::Timestamps];

    pub fn is_enabled(&self, options: &SchemaOptions) -> bool {
        match self {
            Self::PasswordDigest => options.password_digest,
            Self::Timestamps => options.timestamps,
        }
    }

    /// Attributes produced by this rule, in append order.
    pub fn attributes(&self) -> Vec<AttributeDescriptor> {
        match self {
            Self::PasswordDigest => vec![
                AttributeDescriptor::new(PASSWORD_DIGEST, AttributeType::String).with_options(
                    AttributeOptions {
                        digest: true,
                        ..AttributeOptions::default()
                    },
                ),
            ],
            Self::Timestamps => vec![timestamp(CREATED), timestamp(UPDATED)],
        }
    }
}

fn timestamp(name: &str) -> AttributeDescriptor {
    AttributeDescriptor::new(name, AttributeType::DateTime).with_options(AttributeOptions {
        default_value: Some(CURRENT_TIME_DEFAULT.to_string()),
        ..AttributeOptions::default()
    })
}

/// Appends the attributes of every enabled rule, in [`SynthesisRule::ORDER`].
pub fn apply_synthesis_rules(attributes: &mut Vec<AttributeDescriptor>, options: &SchemaOptions) {
    for rule in SynthesisRule::ORDER {
        if rule.is_enabled(options) {
            attributes.extend(rule.attributes());
        }
    }
}

/// The string identifier prepended as hash key when none was declared.
pub fn generated_hash_key() -> AttributeDescriptor {
    AttributeDescriptor::new(GENERATED_HASH_KEY, AttributeType::String).with_options(
        AttributeOptions {
            hash_key: true,
            ..AttributeOptions::default()
        },
    )
}
