//! List inventory use case.

use std::sync::Arc;

use charsheet_domain::{CharacterId, InventoryItem};

use crate::infrastructure::ports::InventoryRepo;

use super::error::InventoryError;

pub struct ListItems {
    inventory_repo: Arc<dyn InventoryRepo>,
}

impl ListItems {
    pub fn new(inventory_repo: Arc<dyn InventoryRepo>) -> Self {
        Self { inventory_repo }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<InventoryItem>, InventoryError> {
        let ledger = self.inventory_repo.get(character_id).await?;
        Ok(ledger.items().to_vec())
    }
}
