//! Serde helpers for provider payloads and persisted session blobs.
//!
//! Providers are loose about optional fields: an absent picture may arrive as
//! `""` and GitHub reports user ids as numbers. These helpers normalize both.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an identifier that may be a JSON string or an integer.
pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Unsigned(n) => n.to_string(),
        Id::Signed(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test struct that uses the deserializer functions
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_string_or_number")]
        id: String,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let json = r#"{"string_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_deserialize_optional_string_null_and_missing() {
        let result: TestStruct = serde_json::from_str(r#"{"string_field": null}"#).unwrap();
        assert_eq!(result.string_field, None);
        let result: TestStruct = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_id_from_string() {
        let result: TestStruct = serde_json::from_str(r#"{"id": "demo_github_user"}"#).unwrap();
        assert_eq!(result.id, "demo_github_user");
    }

    #[test]
    fn test_deserialize_id_from_number() {
        let result: TestStruct = serde_json::from_str(r#"{"id": 583231}"#).unwrap();
        assert_eq!(result.id, "583231");
    }

    #[test]
    fn test_deserialize_id_rejects_other_types() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"id": [1]}"#);
        assert!(result.is_err());
    }
}
