//! Request payload validation
//!
//! Payload structs declare their rules with `#[derive(Validate)]`; handlers
//! receive them through the [`ValidatedJson`] extractor. The `serde` helpers
//! here normalize string fields before the rules run.

pub mod extractor;

pub use extractor::ValidatedJson;

use serde::{Deserialize, Deserializer};

/// Deserialize a string with surrounding whitespace removed
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

/// Like [`trimmed`] for optional fields; pair with `#[serde(default)]`
pub fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Names {
        #[serde(deserialize_with = "trimmed")]
        name: String,
        #[serde(default, deserialize_with = "trimmed_opt")]
        alias: Option<String>,
    }

    #[test]
    fn test_trims_required_and_optional() {
        let names: Names =
            serde_json::from_str(r#"{"name": "  Books ", "alias": " b "}"#).unwrap();
        assert_eq!(names.name, "Books");
        assert_eq!(names.alias.as_deref(), Some("b"));
    }

    #[test]
    fn test_missing_optional_is_none() {
        let names: Names = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(names.alias, None);
    }
}
