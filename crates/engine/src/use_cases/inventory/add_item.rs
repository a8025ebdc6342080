//! Add item use case.
//!
//! Adds a quantity of a catalog item to a character's inventory, merging into
//! an existing entry when the item is already held.

use std::sync::Arc;

use charsheet_domain::{AddOutcome, CharacterId, CharacterItem, InventoryItem, ItemCatalog};
use tokio::sync::Mutex;

use crate::infrastructure::ports::InventoryRepo;

use super::error::InventoryError;

pub struct AddItem {
    inventory_repo: Arc<dyn InventoryRepo>,
    catalog: Arc<dyn ItemCatalog>,
    write_lock: Arc<Mutex<()>>,
}

impl AddItem {
    pub fn new(
        inventory_repo: Arc<dyn InventoryRepo>,
        catalog: Arc<dyn ItemCatalog>,
        write_lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            inventory_repo,
            catalog,
            write_lock,
        }
    }

    /// Execute the add item use case.
    ///
    /// # Returns
    /// * `Ok(Vec<InventoryItem>)` - The full inventory after the add
    /// * `Err(InventoryError::UnknownItem)` - The catalog has no such item
    /// * `Err(InventoryError::Validation)` - Quantity was zero
    pub async fn execute(
        &self,
        character_id: CharacterId,
        request: CharacterItem,
    ) -> Result<Vec<InventoryItem>, InventoryError> {
        let _guard = self.write_lock.lock().await;

        let mut ledger = self.inventory_repo.get(character_id).await?;
        let outcome = ledger.add(self.catalog.as_ref(), request.item_id, request.quantity)?;
        self.inventory_repo.save(character_id, &ledger).await?;

        match outcome {
            AddOutcome::Added { item_id, quantity } => tracing::info!(
                character_id = %character_id,
                item_id = %item_id,
                quantity = quantity,
                "Item added to inventory"
            ),
            AddOutcome::Merged { item_id, quantity } => tracing::info!(
                character_id = %character_id,
                item_id = %item_id,
                quantity = quantity,
                "Item quantity increased"
            ),
        }

        Ok(ledger.items().to_vec())
    }
}
