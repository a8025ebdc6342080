//! Inventory aggregate - quantity-tracked catalog items for one character

use serde::{Deserialize, Serialize};

use crate::entities::{InventoryItem, Item};
use crate::error::DomainError;
use crate::ids::ItemId;

/// Lookup of item definitions by id.
pub trait ItemCatalog: Send + Sync {
    fn resolve(&self, id: ItemId) -> Option<Item>;
}

/// Outcome of adding to an inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was created
    Added { item_id: ItemId, quantity: u32 },
    /// The quantity was summed into an existing entry
    Merged { item_id: ItemId, quantity: u32 },
}

/// Outcome of removing from an inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed { item_id: ItemId, quantity: u32 },
    /// Nothing held under that id; not an error
    NotPresent,
}

/// Items held by a character, at most one entry per item id.
///
/// Entries keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryLedger {
    entries: Vec<InventoryItem>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `item_id`.
    ///
    /// An existing entry has the quantity summed in; otherwise the item is
    /// resolved through `catalog` and appended.
    ///
    /// # Errors
    ///
    /// - `Validation` when `quantity` is zero
    /// - `UnknownItem` when a new id cannot be resolved
    pub fn add(
        &mut self,
        catalog: &dyn ItemCatalog,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<AddOutcome, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id == item_id) {
            entry.quantity = entry.quantity.saturating_add(quantity);
            return Ok(AddOutcome::Merged {
                item_id,
                quantity: entry.quantity,
            });
        }

        let item = catalog
            .resolve(item_id)
            .ok_or(DomainError::UnknownItem(item_id))?;
        self.entries.push(InventoryItem { item, quantity });
        Ok(AddOutcome::Added { item_id, quantity })
    }

    /// Delete the whole entry for `item_id`.
    pub fn remove(&mut self, item_id: ItemId) -> RemoveOutcome {
        match self.entries.iter().position(|e| e.item.id == item_id) {
            Some(index) => {
                let removed = self.entries.remove(index);
                RemoveOutcome::Removed {
                    item_id,
                    quantity: removed.quantity,
                }
            }
            None => RemoveOutcome::NotPresent,
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.entries
    }

    pub fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.entries
            .iter()
            .find(|e| e.item.id == item_id)
            .map_or(0, |e| e.quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<InventoryItem>> for InventoryLedger {
    /// Build from a stored list, merging any duplicate ids.
    fn from(items: Vec<InventoryItem>) -> Self {
        let mut ledger = Self::new();
        for incoming in items {
            match ledger.entries.iter_mut().find(|e| e.item.id == incoming.item.id) {
                Some(entry) => entry.quantity = entry.quantity.saturating_add(incoming.quantity),
                None => ledger.entries.push(incoming),
            }
        }
        ledger
    }
}
