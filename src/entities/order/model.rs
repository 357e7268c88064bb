//! Orders placed against inventory items

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::resource::Reference;
use crate::core::{Entity, Resource};
use crate::entities::{InventoryItem, NewTag, TagPatch, default_active};
use crate::impl_entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTag {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(OrderTag, "order_tag", "order_tags");

/// An order for one inventory item over a date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,

    /// Id of the ordered [`InventoryItem`]
    pub inventory: Uuid,

    pub start_date: NaiveDate,
    pub embargo_date: NaiveDate,

    /// Ids of [`OrderTag`]s
    #[serde(default)]
    pub tags: Vec<Uuid>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Order, "order", "orders");

impl Order {
    pub fn new(inventory: Uuid, start_date: NaiveDate, embargo_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            inventory,
            start_date,
            embargo_date,
            tags: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_new_order_window"))]
pub struct NewOrder {
    pub inventory: Uuid,
    pub start_date: NaiveDate,
    pub embargo_date: NaiveDate,

    #[serde(default)]
    pub tags: Vec<Uuid>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn validate_new_order_window(order: &NewOrder) -> Result<(), ValidationError> {
    check_window(order.start_date, order.embargo_date)
}

/// PATCH body for an order
///
/// The date window is checked on the merged order, see
/// [`Order::validate_record`](Resource::validate_record).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct OrderPatch {
    #[serde(default)]
    pub inventory: Option<Uuid>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub embargo_date: Option<NaiveDate>,

    #[serde(default)]
    pub tags: Option<Vec<Uuid>>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

fn check_window(start: NaiveDate, embargo: NaiveDate) -> Result<(), ValidationError> {
    if embargo < start {
        let mut error = ValidationError::new("embargo_before_start");
        error.message = Some("embargo_date must not be before start_date".into());
        return Err(error);
    }
    Ok(())
}

impl Resource for Order {
    type Create = NewOrder;
    type Patch = OrderPatch;

    fn from_payload(payload: NewOrder) -> Self {
        let mut order = Order::new(payload.inventory, payload.start_date, payload.embargo_date);
        order.tags = payload.tags;
        order.is_active = payload.is_active;
        order
    }

    fn apply_patch(&mut self, patch: OrderPatch) {
        if let Some(inventory) = patch.inventory {
            self.inventory = inventory;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(embargo_date) = patch.embargo_date {
            self.embargo_date = embargo_date;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    fn validate_record(&self) -> Result<(), ValidationErrors> {
        check_window(self.start_date, self.embargo_date).map_err(|error| {
            let mut errors = ValidationErrors::new();
            errors.add("__all__", error);
            errors
        })
    }

    fn references(&self) -> Vec<Reference> {
        std::iter::once(Reference::new(
            "inventory",
            InventoryItem::resource_name_singular(),
            self.inventory,
        ))
        .chain(
            self.tags
                .iter()
                .map(|id| Reference::new("tags", OrderTag::resource_name_singular(), *id)),
        )
        .collect()
    }
}

impl Resource for OrderTag {
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dates_serialize_as_iso() {
        let order = Order::new(Uuid::new_v4(), date(2025, 3, 1), date(2025, 4, 1));
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["start_date"], "2025-03-01");
        assert_eq!(value["embargo_date"], "2025-04-01");
        assert_eq!(value["is_active"], true);
    }

    #[test]
    fn test_new_order_defaults() {
        let payload: NewOrder = serde_json::from_value(json!({
            "inventory": Uuid::nil(),
            "start_date": "2025-03-01",
            "embargo_date": "2025-04-01",
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        let order = Order::from_payload(payload);
        assert!(order.is_active);
        assert!(order.tags.is_empty());
    }

    #[test]
    fn test_embargo_before_start_is_rejected() {
        let payload: NewOrder = serde_json::from_value(json!({
            "inventory": Uuid::nil(),
            "start_date": "2025-04-01",
            "embargo_date": "2025-03-01",
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_embargo_only_patch_is_checked_against_stored_start() {
        let mut order = Order::new(Uuid::new_v4(), date(2025, 3, 10), date(2025, 3, 20));
        assert!(order.validate_record().is_ok());

        order.apply_patch(OrderPatch {
            embargo_date: Some(date(2025, 1, 1)),
            ..Default::default()
        });
        let errors = order.validate_record().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn test_start_only_patch_past_embargo_is_rejected() {
        let mut order = Order::new(Uuid::new_v4(), date(2025, 3, 10), date(2025, 3, 20));
        order.apply_patch(OrderPatch {
            start_date: Some(date(2025, 3, 21)),
            ..Default::default()
        });
        assert!(order.validate_record().is_err());

        order.apply_patch(OrderPatch {
            start_date: Some(date(2025, 3, 20)),
            ..Default::default()
        });
        assert!(order.validate_record().is_ok());
    }

    #[test]
    fn test_references_cover_inventory_and_tags() {
        let mut order = Order::new(Uuid::new_v4(), date(2025, 3, 1), date(2025, 4, 1));
        let tag = Uuid::new_v4();
        order.tags = vec![tag];

        let references = order.references();
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].entity_type, "inventory_item");
        assert_eq!(references[0].id, order.inventory);
        assert_eq!(references[1], Reference::new("tags", "order_tag", tag));
    }
}
