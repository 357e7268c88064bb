//! Inventory item and the lookup records it references

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::core::{Entity, Resource};
use crate::core::resource::Reference;
use crate::core::validation::{trimmed, trimmed_opt};
use crate::entities::{NamePatch, NewName, NewTag, TagPatch, default_active};
use crate::impl_entity;

/// Kind of inventory item (e.g. "Book", "Film")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryType {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(InventoryType, "inventory_type", "inventory_types");

/// Language an inventory item is in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLanguage {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(InventoryLanguage, "inventory_language", "inventory_languages");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTag {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(InventoryTag, "inventory_tag", "inventory_tags");

/// An inventory entry
///
/// Only `created_at` drives the time-windowed listing; it is set once when
/// the item is created and never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,

    /// Id of the [`InventoryType`]
    #[serde(rename = "type")]
    pub inventory_type: Uuid,

    /// Id of the [`InventoryLanguage`]
    pub language: Uuid,

    /// Ids of [`InventoryTag`]s
    #[serde(default)]
    pub tags: Vec<Uuid>,

    #[serde(default)]
    pub metadata: Map<String, Value>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(InventoryItem, "inventory_item", "inventory_items");

impl InventoryItem {
    pub fn new(name: impl Into<String>, inventory_type: Uuid, language: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            inventory_type,
            language,
            tags: Vec::new(),
            metadata: Map::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// POST body for an inventory item
#[derive(Debug, Deserialize, Validate)]
pub struct NewInventoryItem {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(rename = "type")]
    pub inventory_type: Uuid,

    pub language: Uuid,

    #[serde(default)]
    pub tags: Vec<Uuid>,

    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// PATCH body for an inventory item
#[derive(Debug, Default, Deserialize, Validate)]
pub struct InventoryItemPatch {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[serde(default, rename = "type")]
    pub inventory_type: Option<Uuid>,

    #[serde(default)]
    pub language: Option<Uuid>,

    #[serde(default)]
    pub tags: Option<Vec<Uuid>>,

    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl Resource for InventoryItem {
    type Create = NewInventoryItem;
    type Patch = InventoryItemPatch;

    fn from_payload(payload: NewInventoryItem) -> Self {
        let mut item = InventoryItem::new(payload.name, payload.inventory_type, payload.language);
        item.tags = payload.tags;
        item.metadata = payload.metadata;
        item
    }

    fn apply_patch(&mut self, patch: InventoryItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(inventory_type) = patch.inventory_type {
            self.inventory_type = inventory_type;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
    }

    fn references(&self) -> Vec<Reference> {
        let mut references = vec![
            Reference::new("type", InventoryType::resource_name_singular(), self.inventory_type),
            Reference::new(
                "language",
                InventoryLanguage::resource_name_singular(),
                self.language,
            ),
        ];
        references.extend(
            self.tags
                .iter()
                .map(|id| Reference::new("tags", InventoryTag::resource_name_singular(), *id)),
        );
        references
    }
}

impl Resource for InventoryType {
    type Create = NewName;
    type Patch = NamePatch;

    fn from_payload(payload: NewName) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: NamePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

impl Resource for InventoryLanguage {
    type Create = NewName;
    type Patch = NamePatch;

    fn from_payload(payload: NewName) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: NamePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

impl Resource for InventoryTag {
    type Create = NewTag;
    type Patch = TagPatch;

    fn from_payload(payload: NewTag) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            is_active: payload.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: TagPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_serializes_type_field() {
        let type_id = Uuid::new_v4();
        let item = InventoryItem::new("Dune", type_id, Uuid::new_v4());
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["type"], type_id.to_string());
        assert_eq!(value["tags"], json!([]));
        assert_eq!(value["metadata"], json!({}));
        assert!(value.get("inventory_type").is_none());
    }

    #[test]
    fn test_payload_trims_and_defaults() {
        let payload: NewInventoryItem = serde_json::from_value(json!({
            "name": "  Dune  ",
            "type": Uuid::nil(),
            "language": Uuid::nil(),
        }))
        .unwrap();

        let item = InventoryItem::from_payload(payload);
        assert_eq!(item.name, "Dune");
        assert!(item.tags.is_empty());
        assert!(item.metadata.is_empty());
    }

    #[test]
    fn test_metadata_must_be_an_object() {
        let result: Result<NewInventoryItem, _> = serde_json::from_value(json!({
            "name": "Dune",
            "type": Uuid::nil(),
            "language": Uuid::nil(),
            "metadata": [1, 2, 3],
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let payload: NewInventoryItem = serde_json::from_value(json!({
            "name": "   ",
            "type": Uuid::nil(),
            "language": Uuid::nil(),
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_patch_keeps_created_at() {
        let mut item = InventoryItem::new("Dune", Uuid::new_v4(), Uuid::new_v4());
        let created_at = item.created_at();
        let language = Uuid::new_v4();

        item.apply_patch(InventoryItemPatch {
            name: Some("Dune Messiah".to_string()),
            language: Some(language),
            ..Default::default()
        });

        assert_eq!(item.name, "Dune Messiah");
        assert_eq!(item.language, language);
        assert_eq!(item.created_at(), created_at);
    }

    #[test]
    fn test_references_cover_type_language_and_tags() {
        let mut item = InventoryItem::new("Dune", Uuid::new_v4(), Uuid::new_v4());
        item.tags = vec![Uuid::new_v4(), Uuid::new_v4()];

        let references = item.references();
        let fields: Vec<&str> = references.iter().map(|r| r.field).collect();
        assert_eq!(fields, vec!["type", "language", "tags", "tags"]);
        assert_eq!(references[0].entity_type, "inventory_type");
        assert_eq!(references[2].id, item.tags[0]);
    }
}
