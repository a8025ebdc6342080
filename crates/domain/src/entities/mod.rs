//! Entities - domain objects with identity that are owned elsewhere

mod item;

pub use item::{CharacterItem, InventoryItem, Item};
