//! Item entity - catalog objects a character can carry

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// A catalog entry. Owned by the catalog, referenced by id from inventories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Free-form category (e.g., "Weapon", "Consumable")
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub description: String,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            item_type: item_type.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A catalog item joined with how many of it a character carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item: Item,
    pub quantity: u32,
}

/// Request to add `quantity` of a catalog item to an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterItem {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl CharacterItem {
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}
