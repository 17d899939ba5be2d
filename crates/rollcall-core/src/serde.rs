//! Serde helpers for query strings, where browsers send empty values
//! (`?section=&session_id=`) for fields the user left blank.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Deserializes an optional UUID-backed ID, treating an empty string as `None`.
pub fn deserialize_optional_uuid<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<Uuid>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Uuid::parse_str(s.trim())
            .map(|id| Some(T::from(id)))
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Deserializes an optional string, trimming it and treating blanks as `None`.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Deserializes an optional boolean sent as `true`/`false`/`1`/`0`.
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        id: Option<Uuid>,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        section: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        active: Option<bool>,
    }

    #[test]
    fn test_empty_values_are_none() {
        let q: Query = serde_json::from_str(r#"{"id":"","section":"  "}"#).unwrap();
        assert!(q.id.is_none());
        assert!(q.section.is_none());
        assert!(q.active.is_none());
    }

    #[test]
    fn test_bool_from_text() {
        let q: Query = serde_json::from_str(r#"{"active":"1"}"#).unwrap();
        assert_eq!(q.active, Some(true));

        let q: Query = serde_json::from_str(r#"{"active":"false"}"#).unwrap();
        assert_eq!(q.active, Some(false));

        assert!(serde_json::from_str::<Query>(r#"{"active":"maybe"}"#).is_err());
    }

    #[test]
    fn test_values_are_parsed_and_trimmed() {
        let q: Query = serde_json::from_str(
            r#"{"id":"12345678-1234-1234-1234-123456789abc","section":" B "}"#,
        )
        .unwrap();
        assert_eq!(
            q.id,
            Some(Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc))
        );
        assert_eq!(q.section.as_deref(), Some("B"));
    }

    #[test]
    fn test_invalid_uuid_is_error() {
        let result: Result<Query, _> = serde_json::from_str(r#"{"id":"not-a-uuid"}"#);
        assert!(result.is_err());
    }
}
