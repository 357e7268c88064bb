//! Request bodies shared by the simple lookup resources

use serde::Deserialize;
use validator::Validate;

use crate::core::validation::{trimmed, trimmed_opt};

/// Serde default for `is_active` flags
pub fn default_active() -> bool {
    true
}

/// POST body for name-only resources (types, languages)
#[derive(Debug, Deserialize, Validate)]
pub struct NewName {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct NamePatch {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}

/// POST body for tag resources
#[derive(Debug, Deserialize, Validate)]
pub struct NewTag {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TagPatch {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_defaults_to_active() {
        let tag: NewTag = serde_json::from_value(json!({ "name": "new" })).unwrap();
        assert!(tag.is_active);
        assert!(tag.validate().is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        let long: NewName = serde_json::from_value(json!({ "name": "x".repeat(101) })).unwrap();
        assert!(long.validate().is_err());

        let exact: NewName = serde_json::from_value(json!({ "name": "x".repeat(100) })).unwrap();
        assert!(exact.validate().is_ok());
    }

    #[test]
    fn test_empty_patch_is_valid() {
        let patch: TagPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.validate().is_ok());
        assert_eq!(patch.name, None);
        assert_eq!(patch.is_active, None);
    }

    #[test]
    fn test_blank_patch_name_is_rejected() {
        let patch: NamePatch = serde_json::from_value(json!({ "name": "  " })).unwrap();
        assert!(patch.validate().is_err());
    }
}
