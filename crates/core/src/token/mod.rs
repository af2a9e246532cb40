//! Syntactic layer: one raw token in, one descriptor (or one error) out.
//!
//! Nothing in this module looks at more than the token it was given.

mod attribute;
mod error;
mod index;
mod range;
mod segments;

pub use attribute::{
    parse_attribute, AttributeDescriptor, AttributeOptions, AttributeType, DynamoType,
};
pub use error::TokenError;
pub use index::{parse_index, ProjectionType, SecondaryIndexDescriptor};
pub use range::{parse_range, split_bounds};
