//! Route paths served by the engine.

pub const HEALTH: &str = "/api/health";
pub const CHARACTER: &str = "/api/character";
pub const INVENTORY: &str = "/api/character/inventory";

/// Axum path template for removing one inventory entry.
pub const INVENTORY_ITEM: &str = "/api/character/inventory/item/{item_id}";

/// Concrete path for removing the entry for `item_id`.
pub fn inventory_item(item_id: u32) -> String {
    format!("{}/item/{}", INVENTORY, item_id)
}
