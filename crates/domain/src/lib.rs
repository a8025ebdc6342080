//! Domain model for the character sheet: ability rules, proficiencies, the
//! inventory ledger, and the sheet aggregate.
//!
//! Pure data and rules. No I/O, no async.

pub mod aggregates;
pub mod character_sheet;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use aggregates::{AddOutcome, InventoryLedger, ItemCatalog, RemoveOutcome};
pub use character_sheet::{
    CharacterIdentity, CharacterRecord, CharacterSheet, IdentityField, SheetUpdate,
    MAX_ABILITY_SCORE, MIN_ABILITY_SCORE,
};
pub use entities::{CharacterItem, InventoryItem, Item};
pub use error::DomainError;
pub use game_systems::{CalculationEngine, Dnd5eSystem, GameSystem};
pub use ids::{CharacterId, ItemId};
pub use value_objects::{
    Ability, AbilityModifiers, AbilityScores, HitPoints, Level, ProficiencySet,
    SavingThrowProficiencies, Skill, SkillMap, SkillProficiencies,
};
