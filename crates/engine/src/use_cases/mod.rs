//! Use cases - user story orchestration over repositories and domain rules.

pub mod character_sheet;
pub mod inventory;

pub use character_sheet::{CharacterSheetError, CharacterSheetUseCases};
pub use inventory::{InventoryError, InventoryUseCases};
