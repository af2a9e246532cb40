//! Serde helper functions for raw input files.
//!
//! Mapping-shaped options (`table_config`, `length_validations`) are read
//! into ordered pairs so that diagnostics follow the order of the document.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::Deserializer;

/// Deserialize a map of strings into `(key, value)` pairs, in document order.
pub fn deserialize_ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of names to strings")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, String>()? {
                pairs.push((key, value));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    /// Test struct that uses the deserializer function
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_ordered_pairs")]
        pairs: Vec<(String, String)>,
    }

    #[test]
    fn test_pairs_keep_document_order() {
        let json = r#"{"pairs": {"zeta": "1-2", "alpha": "3-4", "primary": "5-6"}}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.pairs,
            vec![
                ("zeta".to_string(), "1-2".to_string()),
                ("alpha".to_string(), "3-4".to_string()),
                ("primary".to_string(), "5-6".to_string()),
            ]
        );
    }

    #[test]
    fn test_pairs_missing() {
        let result: TestStruct = serde_json::from_str("{}").unwrap();
        assert!(result.pairs.is_empty());
    }

    #[test]
    fn test_pairs_reject_non_string_values() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"pairs": {"a": 1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_pairs_reject_lists() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"pairs": ["a"]}"#);
        assert!(result.is_err());
    }
}
