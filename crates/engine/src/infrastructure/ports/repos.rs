use async_trait::async_trait;
use charsheet_domain::{CharacterId, CharacterRecord, InventoryLedger};

use super::error::RepoError;

// =============================================================================
// Storage Ports (one per aggregate)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError>;
    async fn save(&self, record: &CharacterRecord) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepo: Send + Sync {
    /// Ledger for a character. Empty when nothing was ever stored.
    async fn get(&self, character_id: CharacterId) -> Result<InventoryLedger, RepoError>;
    async fn save(
        &self,
        character_id: CharacterId,
        ledger: &InventoryLedger,
    ) -> Result<(), RepoError>;
}
