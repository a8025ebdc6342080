//! Remove item use case.
//!
//! Deletes a whole inventory entry. Removing an item that is not held is not
//! an error; the unchanged list is returned.

use std::sync::Arc;

use charsheet_domain::{CharacterId, InventoryItem, ItemId, RemoveOutcome};
use tokio::sync::Mutex;

use crate::infrastructure::ports::InventoryRepo;

use super::error::InventoryError;

pub struct RemoveItem {
    inventory_repo: Arc<dyn InventoryRepo>,
    write_lock: Arc<Mutex<()>>,
}

impl RemoveItem {
    pub fn new(inventory_repo: Arc<dyn InventoryRepo>, write_lock: Arc<Mutex<()>>) -> Self {
        Self {
            inventory_repo,
            write_lock,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        item_id: ItemId,
    ) -> Result<Vec<InventoryItem>, InventoryError> {
        let _guard = self.write_lock.lock().await;

        let mut ledger = self.inventory_repo.get(character_id).await?;
        match ledger.remove(item_id) {
            RemoveOutcome::Removed { item_id, quantity } => {
                self.inventory_repo.save(character_id, &ledger).await?;
                tracing::info!(
                    character_id = %character_id,
                    item_id = %item_id,
                    quantity = quantity,
                    "Item removed from inventory"
                );
            }
            RemoveOutcome::NotPresent => {
                tracing::debug!(
                    character_id = %character_id,
                    item_id = %item_id,
                    "Remove requested for item not in inventory"
                );
            }
        }

        Ok(ledger.items().to_vec())
    }
}
