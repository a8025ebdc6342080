//! The character sheet aggregate and the records it is derived from.
//!
//! # Shapes
//!
//! - [`CharacterRecord`]: what the authority stores (inputs only)
//! - [`SheetUpdate`]: what a client sends to persist its edits
//! - [`CharacterSheet`]: inputs plus every derived value, as displayed
//!
//! Derived values only ever come from [`CharacterRecord::derive_sheet`]. A
//! client holding a sheet may edit its inputs, after which the derived fields
//! are stale until the next authoritative recomputation replaces the sheet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::game_systems::CalculationEngine;
use crate::ids::CharacterId;
use crate::value_objects::{
    Ability, AbilityModifiers, AbilityScores, HitPoints, Level, SavingThrowProficiencies, Skill,
    SkillMap, SkillProficiencies,
};

/// Lowest ability score the authority accepts.
pub const MIN_ABILITY_SCORE: i32 = 1;
/// Highest ability score the authority accepts.
pub const MAX_ABILITY_SCORE: i32 = 30;

/// Free-text identity fields of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityField {
    Name,
    Class,
    Race,
    Alignment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterIdentity {
    pub name: String,
    pub class: String,
    pub race: String,
    pub alignment: String,
}

impl CharacterIdentity {
    pub fn get(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::Name => &self.name,
            IdentityField::Class => &self.class,
            IdentityField::Race => &self.race,
            IdentityField::Alignment => &self.alignment,
        }
    }

    pub fn set(&mut self, field: IdentityField, value: impl Into<String>) {
        let slot = match field {
            IdentityField::Name => &mut self.name,
            IdentityField::Class => &mut self.class,
            IdentityField::Race => &mut self.race,
            IdentityField::Alignment => &mut self.alignment,
        };
        *slot = value.into();
    }
}

/// Authoritative inputs of one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: CharacterId,
    #[serde(flatten)]
    pub identity: CharacterIdentity,
    pub level: Level,
    pub current_hit_points: i32,
    pub ability_scores: AbilityScores,
    #[serde(default)]
    pub skill_proficiencies: SkillProficiencies,
    #[serde(default)]
    pub saving_throw_proficiencies: SavingThrowProficiencies,
}

impl CharacterRecord {
    /// A level 1 character with average scores.
    pub fn new(id: CharacterId, identity: CharacterIdentity) -> Self {
        Self {
            id,
            identity,
            level: Level::default(),
            current_hit_points: 0,
            ability_scores: AbilityScores::default(),
            skill_proficiencies: SkillProficiencies::new(),
            saving_throw_proficiencies: SavingThrowProficiencies::new(),
        }
    }

    /// Overwrite every input with the values from `update`.
    ///
    /// `hitPoints.max` in the update is ignored; max is always derived.
    pub fn apply_update(&mut self, update: SheetUpdate) {
        self.identity = update.identity;
        self.level = update.level;
        self.current_hit_points = update.hit_points.current;
        self.ability_scores = update.ability_scores;
        self.skill_proficiencies = update.skill_proficiencies;
        self.saving_throw_proficiencies = update.saving_throw_proficiencies;
    }

    /// Compute the full sheet.
    ///
    /// Current hit points above the derived maximum are lowered to it.
    pub fn derive_sheet(&self, engine: &dyn CalculationEngine, skill_map: &SkillMap) -> CharacterSheet {
        let scores = &self.ability_scores;
        let level = self.level;
        let ability_modifiers = AbilityModifiers::project(scores, |s| engine.ability_modifier(s));

        let saving_throws = Ability::ALL
            .into_iter()
            .map(|ability| {
                let proficient = self.saving_throw_proficiencies.contains(ability);
                let bonus = engine.saving_throw_modifier(scores.get(ability), level, proficient);
                (ability, bonus)
            })
            .collect();

        let skills = skill_map
            .iter()
            .map(|(skill, ability)| {
                let proficient = self.skill_proficiencies.contains(skill);
                let bonus = engine.skill_modifier(scores.get(ability), level, proficient);
                (skill, bonus)
            })
            .collect();

        let max = engine.max_hit_points(level, ability_modifiers.constitution);

        CharacterSheet {
            identity: self.identity.clone(),
            level,
            proficiency_bonus: engine.proficiency_bonus(level),
            hit_points: HitPoints::new(self.current_hit_points, max).clamped_to_max(),
            armor_class: engine.armor_class(scores),
            initiative: engine.initiative(scores),
            ability_scores: *scores,
            ability_modifiers,
            saving_throws,
            skills,
            skill_map: skill_map.clone(),
            skill_proficiencies: self.skill_proficiencies.clone(),
            saving_throw_proficiencies: self.saving_throw_proficiencies.clone(),
        }
    }
}

/// Persist request: the editable inputs of a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetUpdate {
    #[serde(flatten)]
    pub identity: CharacterIdentity,
    pub level: Level,
    pub hit_points: HitPoints,
    pub ability_scores: AbilityScores,
    #[serde(default)]
    pub skill_proficiencies: SkillProficiencies,
    #[serde(default)]
    pub saving_throw_proficiencies: SavingThrowProficiencies,
}

impl SheetUpdate {
    /// Check the rules the authority enforces before accepting a write.
    pub fn validate(&self) -> Result<(), DomainError> {
        let out_of_range: Vec<String> = self
            .ability_scores
            .iter()
            .filter(|(_, score)| !(MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(score))
            .map(|(ability, score)| format!("{}={}", ability, score))
            .collect();

        if out_of_range.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "ability scores must be between {} and {}: {}",
                MIN_ABILITY_SCORE,
                MAX_ABILITY_SCORE,
                out_of_range.join(", ")
            )))
        }
    }
}

/// The full displayed sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    #[serde(flatten)]
    pub identity: CharacterIdentity,
    pub level: Level,
    pub proficiency_bonus: i32,
    pub hit_points: HitPoints,
    pub armor_class: i32,
    pub initiative: i32,
    pub ability_scores: AbilityScores,
    pub ability_modifiers: AbilityModifiers,
    pub saving_throws: BTreeMap<Ability, i32>,
    pub skills: BTreeMap<Skill, i32>,
    pub skill_map: SkillMap,
    pub skill_proficiencies: SkillProficiencies,
    pub saving_throw_proficiencies: SavingThrowProficiencies,
}

impl CharacterSheet {
    /// The inputs of this sheet, as sent on save.
    pub fn to_update(&self) -> SheetUpdate {
        SheetUpdate {
            identity: self.identity.clone(),
            level: self.level,
            hit_points: self.hit_points,
            ability_scores: self.ability_scores,
            skill_proficiencies: self.skill_proficiencies.clone(),
            saving_throw_proficiencies: self.saving_throw_proficiencies.clone(),
        }
    }

    /// Recompute every derived field from this sheet's current inputs.
    ///
    /// Applies the same rules as the authority, including the hit point clamp.
    pub fn rederive(&self, engine: &dyn CalculationEngine) -> CharacterSheet {
        let mut record = CharacterRecord::new(CharacterId::default(), CharacterIdentity::default());
        record.apply_update(self.to_update());
        record.derive_sheet(engine, &self.skill_map)
    }

    pub fn skill_bonus(&self, skill: Skill) -> Option<i32> {
        self.skills.get(&skill).copied()
    }

    pub fn saving_throw(&self, ability: Ability) -> Option<i32> {
        self.saving_throws.get(&ability).copied()
    }
}
