//! Application state and composition.

use std::sync::Arc;

use charsheet_domain::{CharacterId, Dnd5eSystem, ItemCatalog, SkillMap};

use crate::infrastructure::{
    memory::{InMemoryCharacterRepo, InMemoryInventoryRepo},
    ports::{CharacterRepo, InventoryRepo},
    seed::{self, SeedError, StaticItemCatalog},
    settings::EngineSettings,
};
use crate::use_cases::{CharacterSheetUseCases, InventoryUseCases};

/// Main application state.
///
/// Holds all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    /// The character this authority serves.
    pub character_id: CharacterId,
    pub welcome_message: String,
}

/// Container for all use cases.
pub struct UseCases {
    pub character_sheet: CharacterSheetUseCases,
    pub inventory: InventoryUseCases,
}

impl App {
    pub fn new(
        character_id: CharacterId,
        welcome_message: impl Into<String>,
        character_repo: Arc<dyn CharacterRepo>,
        inventory_repo: Arc<dyn InventoryRepo>,
        catalog: Arc<dyn ItemCatalog>,
    ) -> Self {
        let use_cases = UseCases {
            character_sheet: CharacterSheetUseCases::new(
                character_repo,
                Arc::new(Dnd5eSystem::new()),
                SkillMap::standard(),
            ),
            inventory: InventoryUseCases::new(inventory_repo, catalog),
        };

        Self {
            use_cases,
            character_id,
            welcome_message: welcome_message.into(),
        }
    }

    /// Build an in-memory authority from settings, loading any configured
    /// catalog and seed character files.
    pub fn from_settings(settings: &EngineSettings) -> Result<Self, SeedError> {
        let catalog = match &settings.catalog_path {
            Some(path) => {
                let catalog = StaticItemCatalog::load(path)?;
                tracing::info!(path = %path.display(), items = catalog.len(), "Loaded item catalog");
                catalog
            }
            None => StaticItemCatalog::builtin(),
        };

        let record = match &settings.character_path {
            Some(path) => {
                let record = seed::load_character(path)?;
                tracing::info!(path = %path.display(), character_id = %record.id, "Loaded seed character");
                record
            }
            None => seed::builtin_character(),
        };

        Ok(Self::new(
            record.id,
            settings.welcome_message.clone(),
            Arc::new(InMemoryCharacterRepo::seeded(record)),
            Arc::new(InMemoryInventoryRepo::new()),
            Arc::new(catalog),
        ))
    }
}
