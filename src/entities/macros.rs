//! Macros for reducing boilerplate when defining entities

/// Implement [`Entity`](crate::core::entity::Entity) for a struct carrying
/// the standard `id`, `created_at` and `updated_at` fields.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct InventoryType {
///     pub id: Uuid,
///     pub name: String,
///     pub created_at: DateTime<Utc>,
///     pub updated_at: DateTime<Utc>,
/// }
///
/// impl_entity!(InventoryType, "inventory_type", "inventory_types");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $singular:expr, $plural:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
