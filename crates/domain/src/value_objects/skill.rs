//! Skills and the table mapping each skill to its governing ability.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use crate::error::DomainError;

/// The eighteen standard skills. Wire name is the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Acrobatics,
    #[serde(rename = "Animal Handling")]
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    #[serde(rename = "Sleight of Hand")]
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    /// All skills in alphabetical order.
    pub const ALL: [Skill; 18] = [
        Skill::Acrobatics,
        Skill::AnimalHandling,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Deception,
        Skill::History,
        Skill::Insight,
        Skill::Intimidation,
        Skill::Investigation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Perception,
        Skill::Performance,
        Skill::Persuasion,
        Skill::Religion,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Survival,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Deception => "Deception",
            Skill::History => "History",
            Skill::Insight => "Insight",
            Skill::Intimidation => "Intimidation",
            Skill::Investigation => "Investigation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Perception => "Perception",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::Religion => "Religion",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Skill::ALL
            .into_iter()
            .find(|skill| skill.display_name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}

/// Static table from every [`Skill`] to the [`Ability`] that governs it.
///
/// A `SkillMap` always covers all eighteen skills; both constructors and
/// deserialization enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Skill, Ability>",
    into = "BTreeMap<Skill, Ability>"
)]
pub struct SkillMap {
    entries: BTreeMap<Skill, Ability>,
}

impl SkillMap {
    /// The standard table.
    pub fn standard() -> Self {
        let entries = Skill::ALL
            .into_iter()
            .map(|skill| (skill, standard_ability(skill)))
            .collect();
        Self { entries }
    }

    /// Build a map from name pairs as found in data files.
    ///
    /// Fails on unknown skill or ability names, on a skill listed twice, and
    /// on any skill left unmapped.
    pub fn from_entries<'a, I>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries = BTreeMap::new();
        for (skill_name, ability_name) in pairs {
            let skill: Skill = skill_name
                .parse()
                .map_err(|_| DomainError::configuration(format!("unknown skill '{}'", skill_name)))?;
            let ability: Ability = ability_name.parse().map_err(|_| {
                DomainError::configuration(format!(
                    "unknown ability '{}' for skill {}",
                    ability_name, skill
                ))
            })?;
            if entries.insert(skill, ability).is_some() {
                return Err(DomainError::configuration(format!(
                    "skill {} is mapped twice",
                    skill
                )));
            }
        }
        Self::validated(entries)
    }

    fn validated(entries: BTreeMap<Skill, Ability>) -> Result<Self, DomainError> {
        let missing: Vec<&str> = Skill::ALL
            .iter()
            .filter(|skill| !entries.contains_key(skill))
            .map(Skill::display_name)
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::configuration(format!(
                "skills without a governing ability: {}",
                missing.join(", ")
            )));
        }
        Ok(Self { entries })
    }

    pub fn governing_ability(&self, skill: Skill) -> Ability {
        // Completeness is checked on construction.
        self.entries
            .get(&skill)
            .copied()
            .unwrap_or_else(|| standard_ability(skill))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, Ability)> + '_ {
        self.entries.iter().map(|(s, a)| (*s, *a))
    }
}

impl Default for SkillMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<BTreeMap<Skill, Ability>> for SkillMap {
    type Error = DomainError;

    fn try_from(entries: BTreeMap<Skill, Ability>) -> Result<Self, Self::Error> {
        Self::validated(entries)
    }
}

impl From<SkillMap> for BTreeMap<Skill, Ability> {
    fn from(map: SkillMap) -> Self {
        map.entries
    }
}

fn standard_ability(skill: Skill) -> Ability {
    match skill {
        Skill::Athletics => Ability::Strength,
        Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
        Skill::Arcana | Skill::History | Skill::Investigation | Skill::Nature | Skill::Religion => {
            Ability::Intelligence
        }
        Skill::AnimalHandling
        | Skill::Insight
        | Skill::Medicine
        | Skill::Perception
        | Skill::Survival => Ability::Wisdom,
        Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
            Ability::Charisma
        }
    }
}
