//! D&D 5th Edition game system implementation.
//!
//! Implements the calculation rules used to derive a character sheet.

use super::traits::{CalculationEngine, GameSystem};
use crate::value_objects::{AbilityScores, Level};

/// Hit points granted before constitution is applied.
const BASE_HIT_POINTS: i32 = 8;

/// Armor Class without armor or dexterity.
const BASE_ARMOR_CLASS: i32 = 10;

/// D&D 5th Edition game system.
#[derive(Debug, Clone, Copy)]
pub struct Dnd5eSystem;

impl Default for Dnd5eSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Dnd5eSystem {
    /// Create a new D&D 5e system instance.
    pub fn new() -> Self {
        Self
    }
}

impl GameSystem for Dnd5eSystem {
    fn system_id(&self) -> &str {
        "dnd5e"
    }

    fn display_name(&self) -> &str {
        "D&D 5th Edition"
    }

    fn calculation_engine(&self) -> &dyn CalculationEngine {
        self
    }
}

impl CalculationEngine for Dnd5eSystem {
    fn ability_modifier(&self, score: i32) -> i32 {
        // Floor division; widened so i32::MIN does not overflow.
        saturate((i64::from(score) - 10).div_euclid(2))
    }

    fn proficiency_bonus(&self, level: Level) -> i32 {
        ((i32::from(level.get()) - 1) / 4) + 2
    }

    fn skill_modifier(&self, governing_score: i32, level: Level, proficient: bool) -> i32 {
        let modifier = self.ability_modifier(governing_score);
        if proficient {
            modifier.saturating_add(self.proficiency_bonus(level))
        } else {
            modifier
        }
    }

    fn saving_throw_modifier(&self, score: i32, level: Level, proficient: bool) -> i32 {
        // Saves and skills share the same formula in 5e.
        self.skill_modifier(score, level, proficient)
    }

    fn armor_class(&self, scores: &AbilityScores) -> i32 {
        BASE_ARMOR_CLASS.saturating_add(self.ability_modifier(scores.dexterity))
    }

    fn initiative(&self, scores: &AbilityScores) -> i32 {
        self.ability_modifier(scores.dexterity)
    }

    fn max_hit_points(&self, level: Level, constitution_modifier: i32) -> i32 {
        constitution_modifier
            .saturating_mul(i32::from(level.get()))
            .saturating_add(BASE_HIT_POINTS)
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: i64) -> Level {
        Level::clamped(n)
    }

    #[test]
    fn ability_modifier_calculation() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.ability_modifier(1), -5);
        assert_eq!(system.ability_modifier(7), -2);
        assert_eq!(system.ability_modifier(8), -1);
        assert_eq!(system.ability_modifier(9), -1);
        assert_eq!(system.ability_modifier(10), 0);
        assert_eq!(system.ability_modifier(11), 0);
        assert_eq!(system.ability_modifier(12), 1);
        assert_eq!(system.ability_modifier(15), 2);
        assert_eq!(system.ability_modifier(20), 5);
        assert_eq!(system.ability_modifier(30), 10);
    }

    #[test]
    fn ability_modifier_is_total_outside_usual_range() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.ability_modifier(0), -5);
        assert_eq!(system.ability_modifier(-1), -6);
        assert_eq!(system.ability_modifier(45), 17);
    }

    #[test]
    fn proficiency_bonus_progression() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.proficiency_bonus(level(1)), 2);
        assert_eq!(system.proficiency_bonus(level(4)), 2);
        assert_eq!(system.proficiency_bonus(level(5)), 3);
        assert_eq!(system.proficiency_bonus(level(8)), 3);
        assert_eq!(system.proficiency_bonus(level(9)), 4);
        assert_eq!(system.proficiency_bonus(level(13)), 5);
        assert_eq!(system.proficiency_bonus(level(17)), 6);
        assert_eq!(system.proficiency_bonus(level(20)), 6);
    }

    #[test]
    fn skill_modifier_with_proficiency() {
        let system = Dnd5eSystem::new();
        // DEX 14 at level 5
        assert_eq!(system.skill_modifier(14, level(5), false), 2);
        assert_eq!(system.skill_modifier(14, level(5), true), 5);
    }

    #[test]
    fn saving_throw_adds_bonus_only_when_proficient() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.saving_throw_modifier(8, level(1), false), -1);
        assert_eq!(system.saving_throw_modifier(8, level(1), true), 1);
    }

    #[test]
    fn armor_class_initiative_and_hit_points() {
        let system = Dnd5eSystem::new();
        let scores = AbilityScores::new(10, 16, 14, 10, 10, 10);
        assert_eq!(system.armor_class(&scores), 13);
        assert_eq!(system.initiative(&scores), 3);
        assert_eq!(system.max_hit_points(level(3), 2), 14);
        assert_eq!(system.max_hit_points(level(5), -1), 3);
    }

    #[test]
    fn extreme_scores_do_not_overflow() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.ability_modifier(i32::MIN), -1_073_741_829);
        assert_eq!(system.ability_modifier(i32::MAX), 1_073_741_818);

        let huge = AbilityScores::uniform(i32::MAX);
        assert_eq!(system.armor_class(&huge), 1_073_741_828);
        assert_eq!(system.skill_modifier(i32::MAX, level(20), true), 1_073_741_824);
        assert_eq!(system.max_hit_points(level(20), i32::MAX), i32::MAX);
        assert_eq!(system.max_hit_points(level(20), i32::MIN), i32::MIN + 8);
    }

    #[test]
    fn identifies_itself() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.system_id(), "dnd5e");
        assert_eq!(system.display_name(), "D&D 5th Edition");
        assert_eq!(system.calculation_engine().ability_modifier(14), 2);
    }
}
