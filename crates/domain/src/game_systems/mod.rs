//! Game system implementations.
//!
//! This module provides the calculation engine that derives sheet values from
//! a character's authoritative inputs. Each system implements the core traits
//! defined in `traits.rs`.
//!
//! # Supported Systems
//!
//! - D&D 5th Edition (`dnd5e`)

mod dnd5e;
mod traits;

pub use dnd5e::Dnd5eSystem;
pub use traits::{CalculationEngine, GameSystem};
