//! Local mirror of the character sheet.
//!
//! Edits apply to the local copy immediately and leave derived fields as they
//! were. Only an authoritative response (fetch or save) refreshes them, by
//! replacing the whole sheet.

use charsheet_domain::{
    Ability, CalculationEngine, CharacterSheet, IdentityField, Level, SheetUpdate, Skill,
};

use super::sequencer::{RequestSequencer, RequestTag};
use crate::application::SyncError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetState {
    #[default]
    Unloaded,
    Loaded(CharacterSheet),
}

#[derive(Debug, Default)]
pub struct CharacterSheetStore {
    state: SheetState,
    sequencer: RequestSequencer,
}

impl CharacterSheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SheetState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SheetState::Loaded(_))
    }

    pub fn sheet(&self) -> Option<&CharacterSheet> {
        match &self.state {
            SheetState::Loaded(sheet) => Some(sheet),
            SheetState::Unloaded => None,
        }
    }

    pub fn apply_field_edit(&mut self, field: IdentityField, value: impl Into<String>) {
        self.edit(|sheet| sheet.identity.set(field, value));
    }

    pub fn apply_ability_edit(&mut self, ability: Ability, score: i32) {
        self.edit(|sheet| sheet.ability_scores.set(ability, score));
    }

    /// Out-of-range levels clamp to 1..=20.
    pub fn apply_level_edit(&mut self, level: i64) {
        self.edit(|sheet| sheet.level = Level::clamped(level));
    }

    /// Not clamped against max hit points; the authority does that.
    pub fn apply_hp_edit(&mut self, current: i32) {
        self.edit(|sheet| sheet.hit_points.current = current);
    }

    pub fn toggle_skill_proficiency(&mut self, skill: Skill, proficient: bool) {
        self.edit(|sheet| {
            sheet.skill_proficiencies = sheet.skill_proficiencies.toggle(skill, proficient);
        });
    }

    pub fn toggle_save_proficiency(&mut self, ability: Ability, proficient: bool) {
        self.edit(|sheet| {
            sheet.saving_throw_proficiencies =
                sheet.saving_throw_proficiencies.toggle(ability, proficient);
        });
    }

    /// The sheet with every derived field recomputed locally.
    ///
    /// Leaves the stored mirror untouched.
    pub fn preview(&self, engine: &dyn CalculationEngine) -> Option<CharacterSheet> {
        self.sheet().map(|sheet| sheet.rederive(engine))
    }

    /// Tag an outgoing fetch or save.
    pub fn begin_request(&mut self) -> RequestTag {
        self.sequencer.issue()
    }

    /// The inputs to persist, or `None` while unloaded.
    pub fn pending_update(&self) -> Option<SheetUpdate> {
        self.sheet().map(CharacterSheet::to_update)
    }

    /// Replace the whole local sheet with an authoritative one.
    ///
    /// Fails with [`SyncError::Stale`] when a newer response was already applied.
    pub fn apply_response(&mut self, tag: RequestTag, sheet: CharacterSheet) -> Result<(), SyncError> {
        if !self.sequencer.accept(tag) {
            return Err(SyncError::Stale);
        }
        self.state = SheetState::Loaded(sheet);
        Ok(())
    }

    fn edit(&mut self, f: impl FnOnce(&mut CharacterSheet)) {
        if let SheetState::Loaded(sheet) = &mut self.state {
            f(sheet);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsheet_domain::{
        AbilityScores, CharacterId, CharacterIdentity, CharacterRecord, Dnd5eSystem, HitPoints,
        SkillMap,
    };

    fn server_sheet() -> CharacterSheet {
        let identity = CharacterIdentity {
            name: "Aria".into(),
            class: "Ranger".into(),
            race: "Half-Elf".into(),
            alignment: "Neutral Good".into(),
        };
        let mut record = CharacterRecord::new(CharacterId::new(1), identity);
        record.level = Level::clamped(5);
        record.current_hit_points = 20;
        record.ability_scores = AbilityScores::new(10, 14, 12, 10, 12, 8);
        record.skill_proficiencies = [Skill::Stealth].into_iter().collect();
        record.derive_sheet(&Dnd5eSystem::new(), &SkillMap::standard())
    }

    fn loaded() -> CharacterSheetStore {
        let mut store = CharacterSheetStore::new();
        let tag = store.begin_request();
        store.apply_response(tag, server_sheet()).unwrap();
        store
    }

    #[test]
    fn edits_are_ignored_while_unloaded() {
        let mut store = CharacterSheetStore::new();

        store.apply_field_edit(IdentityField::Name, "Nobody");
        store.apply_ability_edit(Ability::Strength, 18);
        store.apply_level_edit(4);
        store.apply_hp_edit(3);
        store.toggle_skill_proficiency(Skill::Arcana, true);
        store.toggle_save_proficiency(Ability::Wisdom, true);

        assert_eq!(store.state(), &SheetState::Unloaded);
        assert!(store.pending_update().is_none());
        assert!(store.preview(&Dnd5eSystem::new()).is_none());
    }

    #[test]
    fn first_response_loads_the_sheet() {
        let store = loaded();
        assert!(store.is_loaded());
        assert_eq!(store.sheet(), Some(&server_sheet()));
    }

    #[test]
    fn field_edit_replaces_identity_field() {
        let mut store = loaded();
        store.apply_field_edit(IdentityField::Alignment, "Chaotic Good");
        assert_eq!(store.sheet().unwrap().identity.alignment, "Chaotic Good");
    }

    #[test]
    fn ability_edit_leaves_derived_values_stale() {
        let mut store = loaded();
        store.apply_ability_edit(Ability::Dexterity, 20);

        let sheet = store.sheet().unwrap();
        assert_eq!(sheet.ability_scores.dexterity, 20);
        assert_eq!(sheet.ability_modifiers.dexterity, 2);
        assert_eq!(sheet.skill_bonus(Skill::Stealth), Some(5));
    }

    #[test]
    fn level_edit_clamps_and_keeps_bonus_stale() {
        let mut store = loaded();

        store.apply_level_edit(25);
        assert_eq!(store.sheet().unwrap().level.get(), 20);
        assert_eq!(store.sheet().unwrap().proficiency_bonus, 3);

        store.apply_level_edit(0);
        assert_eq!(store.sheet().unwrap().level.get(), 1);
    }

    #[test]
    fn hp_edit_is_not_clamped() {
        let mut store = loaded();
        store.apply_hp_edit(500);
        assert_eq!(store.sheet().unwrap().hit_points.current, 500);
    }

    #[test]
    fn toggles_replace_proficiency_sets() {
        let mut store = loaded();
        store.toggle_skill_proficiency(Skill::Stealth, false);
        store.toggle_skill_proficiency(Skill::Survival, true);
        store.toggle_save_proficiency(Ability::Wisdom, true);

        let sheet = store.sheet().unwrap();
        assert!(!sheet.skill_proficiencies.contains(Skill::Stealth));
        assert!(sheet.skill_proficiencies.contains(Skill::Survival));
        assert!(sheet.saving_throw_proficiencies.contains(Ability::Wisdom));
    }

    #[test]
    fn preview_recomputes_without_touching_the_mirror() {
        let mut store = loaded();
        store.apply_ability_edit(Ability::Dexterity, 20);
        store.apply_hp_edit(500);

        let preview = store.preview(&Dnd5eSystem::new()).unwrap();

        assert_eq!(preview.ability_modifiers.dexterity, 5);
        assert_eq!(preview.skill_bonus(Skill::Stealth), Some(8));
        // 8 + CON(+1) * 5
        assert_eq!(preview.hit_points, HitPoints::new(13, 13));
        assert_eq!(store.sheet().unwrap().ability_modifiers.dexterity, 2);
        assert_eq!(store.sheet().unwrap().hit_points.current, 500);
    }

    #[test]
    fn preview_handles_extreme_scores() {
        let mut store = loaded();
        store.apply_ability_edit(Ability::Constitution, 1_000_000_000);
        store.apply_ability_edit(Ability::Dexterity, i32::MIN);

        let preview = store.preview(&Dnd5eSystem::new()).unwrap();

        assert_eq!(preview.ability_modifiers.constitution, 499_999_995);
        // 499_999_995 * 5 saturates
        assert_eq!(preview.hit_points.max, i32::MAX);
        assert_eq!(preview.ability_modifiers.dexterity, -1_073_741_829);
        assert_eq!(preview.armor_class, -1_073_741_819);
    }

    #[test]
    fn pending_update_carries_local_edits() {
        let mut store = loaded();
        store.apply_level_edit(7);
        store.apply_field_edit(IdentityField::Name, "Aria Thornwood");

        let update = store.pending_update().unwrap();
        assert_eq!(update.level.get(), 7);
        assert_eq!(update.identity.name, "Aria Thornwood");
    }

    #[test]
    fn response_replaces_every_field() {
        let mut store = loaded();
        store.apply_field_edit(IdentityField::Name, "Local only");
        store.apply_ability_edit(Ability::Strength, 18);

        let mut fresh = server_sheet();
        fresh.identity.class = "Druid".into();
        let tag = store.begin_request();
        store.apply_response(tag, fresh.clone()).unwrap();

        assert_eq!(store.sheet(), Some(&fresh));
    }

    #[test]
    fn superseded_response_is_stale() {
        let mut store = CharacterSheetStore::new();
        let first = store.begin_request();
        let second = store.begin_request();

        let mut newer = server_sheet();
        newer.level = Level::clamped(9);
        store.apply_response(second, newer.clone()).unwrap();

        assert_eq!(
            store.apply_response(first, server_sheet()),
            Err(SyncError::Stale)
        );
        assert_eq!(store.sheet(), Some(&newer));
    }
}
