//! In-memory repositories.
//!
//! The authority keeps its state in process memory. Each store is a map behind
//! a tokio `RwLock`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use charsheet_domain::{CharacterId, CharacterRecord, InventoryLedger};

use super::ports::{CharacterRepo, InventoryRepo, RepoError};

#[derive(Default)]
pub struct InMemoryCharacterRepo {
    records: RwLock<HashMap<CharacterId, CharacterRecord>>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding a single seeded record.
    pub fn seeded(record: CharacterRecord) -> Self {
        let mut records = HashMap::new();
        records.insert(record.id, record);
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn save(&self, record: &CharacterRecord) -> Result<(), RepoError> {
        self.records.write().await.insert(record.id, record.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryInventoryRepo {
    ledgers: RwLock<HashMap<CharacterId, InventoryLedger>>,
}

impl InMemoryInventoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryRepo for InMemoryInventoryRepo {
    async fn get(&self, character_id: CharacterId) -> Result<InventoryLedger, RepoError> {
        Ok(self
            .ledgers
            .read()
            .await
            .get(&character_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(
        &self,
        character_id: CharacterId,
        ledger: &InventoryLedger,
    ) -> Result<(), RepoError> {
        self.ledgers
            .write()
            .await
            .insert(character_id, ledger.clone());
        Ok(())
    }
}
