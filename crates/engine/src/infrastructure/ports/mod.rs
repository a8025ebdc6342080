//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Character record storage (in memory today)
//! - Inventory storage

mod error;
mod repos;

pub use error::RepoError;
pub use repos::{CharacterRepo, InventoryRepo};

#[cfg(test)]
pub use repos::{MockCharacterRepo, MockInventoryRepo};
