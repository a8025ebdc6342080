//! Sync Gateway Port - the authority as seen by the client session.

use async_trait::async_trait;

use charsheet_domain::{CharacterItem, CharacterSheet, InventoryItem, ItemId, SheetUpdate};

/// Why a gateway call failed.
///
/// Transport details stay in the adapter; callers only see these kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The authority could not be contacted or answered with garbage.
    #[error("Authority unreachable: {0}")]
    Unreachable(String),
    /// The authority was reached and declined the write.
    #[error("Rejected by authority: {0}")]
    Rejected(String),
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SyncGateway: Send + Sync {
    async fn fetch_sheet(&self) -> Result<CharacterSheet, GatewayError>;

    /// Persist the sheet's inputs; returns the recomputed sheet.
    async fn persist_sheet(&self, update: SheetUpdate) -> Result<CharacterSheet, GatewayError>;

    async fn fetch_inventory(&self) -> Result<Vec<InventoryItem>, GatewayError>;

    /// Returns the full inventory after the add.
    async fn add_inventory_item(
        &self,
        request: CharacterItem,
    ) -> Result<Vec<InventoryItem>, GatewayError>;

    /// Returns the full inventory after the removal.
    async fn remove_inventory_item(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<InventoryItem>, GatewayError>;
}
