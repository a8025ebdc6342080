//! Local mirror of the inventory.
//!
//! Never edited optimistically. Each authoritative list replaces the mirror
//! wholesale.

use charsheet_domain::{InventoryItem, ItemId};

use super::sequencer::{RequestSequencer, RequestTag};
use crate::application::SyncError;

#[derive(Debug, Default)]
pub struct InventoryMirror {
    items: Vec<InventoryItem>,
    sequencer: RequestSequencer,
}

impl InventoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn quantity_of(&self, item_id: ItemId) -> u32 {
        self.items
            .iter()
            .find(|entry| entry.item.id == item_id)
            .map_or(0, |entry| entry.quantity)
    }

    pub fn begin_request(&mut self) -> RequestTag {
        self.sequencer.issue()
    }

    pub fn apply_response(
        &mut self,
        tag: RequestTag,
        items: Vec<InventoryItem>,
    ) -> Result<(), SyncError> {
        if !self.sequencer.accept(tag) {
            return Err(SyncError::Stale);
        }
        self.items = items;
        Ok(())
    }
}
