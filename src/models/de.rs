//! Serde helpers for the loosely typed API payloads.

use chrono::NaiveDateTime;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{GvpError, Result};
use crate::utils::date::parse_timestamp;

/// Decode a JSON value into a model, reporting failures as decoding errors.
pub fn decode<T: DeserializeOwned>(value: Value, context: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| GvpError::decoding(context, e))
}

/// Ids arrive either as numbers or as numeric strings.
pub(crate) fn int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got '{s}'"))),
    }
}

/// ISO 8601 timestamp.
pub(crate) fn timestamp<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).map_err(de::Error::custom)
}

/// A string that may be `null`, read as empty.
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "int")]
        id: i64,
        #[serde(deserialize_with = "timestamp")]
        date: NaiveDateTime,
        #[serde(default, deserialize_with = "string_or_empty")]
        name: String,
    }

    #[test]
    fn test_int_accepts_number_and_string() {
        let a: Probe = decode(json!({"id": 5, "date": "2020-01-01"}), "probe").unwrap();
        let raw = json!({"id": "5", "date": "2020-01-01", "name": null});
        let b: Probe = decode(raw, "probe").unwrap();
        assert_eq!(a.id, 5);
        assert_eq!(b.id, 5);
        assert_eq!(b.name, "");
    }

    #[test]
    fn test_bad_fields_are_decoding_errors() {
        let raw = json!({"id": "five", "date": "2020-01-01"});
        let err = decode::<Probe>(raw, "probe").unwrap_err();
        assert!(err.is_decoding());

        let err = decode::<Probe>(json!({"id": 1, "date": "yesterday"}), "probe").unwrap_err();
        assert!(err.is_decoding());

        let err = decode::<Probe>(json!({"date": "2020-01-01"}), "probe").unwrap_err();
        assert!(err.is_decoding());
    }
}
