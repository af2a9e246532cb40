//! JSON output formatting.

use serde::Serialize;

use crate::error::Result;

/// Format a value as a single JSON line.
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
