//! Value objects - Immutable objects defined by their attributes

mod ability;
mod hit_points;
mod level;
mod proficiency;
mod skill;

pub use ability::{Ability, AbilityModifiers, AbilityScores};
pub use hit_points::HitPoints;
pub use level::Level;
pub use proficiency::{ProficiencySet, SavingThrowProficiencies, SkillProficiencies};
pub use skill::{Skill, SkillMap};
