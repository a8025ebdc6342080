//! Game system traits for sheet-derivation rules.
//!
//! A game system owns the arithmetic that turns the authoritative inputs of a
//! character (scores, level, proficiencies) into the numbers shown on the
//! sheet. Every method is pure and total.

use crate::value_objects::{AbilityScores, Level};

/// Core trait all game systems must implement.
pub trait GameSystem: Send + Sync {
    /// Unique identifier for this game system (e.g., "dnd5e").
    fn system_id(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    /// Get the calculation engine for this system.
    fn calculation_engine(&self) -> &dyn CalculationEngine;
}

/// Calculation rules that vary per game system.
pub trait CalculationEngine: Send + Sync {
    /// Calculate ability modifier from score.
    ///
    /// For D&D-like systems: floor((score - 10) / 2)
    fn ability_modifier(&self, score: i32) -> i32;

    /// Calculate proficiency bonus from character level.
    fn proficiency_bonus(&self, level: Level) -> i32;

    /// Bonus for a check governed by `ability`, with or without proficiency.
    fn skill_modifier(&self, governing_score: i32, level: Level, proficient: bool) -> i32;

    /// Saving throw bonus for one ability.
    fn saving_throw_modifier(&self, score: i32, level: Level, proficient: bool) -> i32;

    /// Unarmored Armor Class.
    fn armor_class(&self, scores: &AbilityScores) -> i32;

    fn initiative(&self, scores: &AbilityScores) -> i32;

    /// Calculate max HP from level and constitution modifier.
    fn max_hit_points(&self, level: Level, constitution_modifier: i32) -> i32;
}
