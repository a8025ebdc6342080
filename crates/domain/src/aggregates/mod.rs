//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome enums from mutations

pub mod inventory;

pub use inventory::{AddOutcome, InventoryLedger, ItemCatalog, RemoveOutcome};
