//! Toggleable proficiency membership for skills and saving throws.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use super::skill::Skill;

/// Ordered set of keys the character is proficient in.
///
/// Serialized as a JSON array of names. Mutation produces a new set and leaves
/// the receiver untouched, so a store can swap sets wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProficiencySet<K: Ord> {
    members: BTreeSet<K>,
}

pub type SkillProficiencies = ProficiencySet<Skill>;
pub type SavingThrowProficiencies = ProficiencySet<Ability>;

impl<K: Ord + Copy> ProficiencySet<K> {
    pub fn new() -> Self {
        Self {
            members: BTreeSet::new(),
        }
    }

    /// Return a copy with `key` present iff `is_proficient`.
    ///
    /// Idempotent in both directions.
    #[must_use]
    pub fn toggle(&self, key: K, is_proficient: bool) -> Self {
        let mut members = self.members.clone();
        if is_proficient {
            members.insert(key);
        } else {
            members.remove(&key);
        }
        Self { members }
    }

    pub fn contains(&self, key: K) -> bool {
        self.members.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<K: Ord + Copy> Default for ProficiencySet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> FromIterator<K> for ProficiencySet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
