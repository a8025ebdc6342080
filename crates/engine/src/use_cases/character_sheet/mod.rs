//! Character sheet use cases.
//!
//! Reads the stored record and recomputes the full sheet on every request.
//! Writes replace the record's inputs and return the recomputed sheet.

mod error;

pub use error::CharacterSheetError;

use std::sync::Arc;

use charsheet_domain::{CharacterId, CharacterRecord, CharacterSheet, GameSystem, SheetUpdate, SkillMap};

use crate::infrastructure::ports::CharacterRepo;

/// Character sheet operations.
pub struct CharacterSheetUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    system: Arc<dyn GameSystem>,
    skill_map: SkillMap,
}

impl CharacterSheetUseCases {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        system: Arc<dyn GameSystem>,
        skill_map: SkillMap,
    ) -> Self {
        Self {
            character_repo,
            system,
            skill_map,
        }
    }

    /// Rules used to derive sheets.
    pub fn game_system(&self) -> &dyn GameSystem {
        self.system.as_ref()
    }

    /// Get the derived sheet for a character.
    pub async fn get_sheet(
        &self,
        character_id: CharacterId,
    ) -> Result<CharacterSheet, CharacterSheetError> {
        let record = self.load(character_id).await?;
        tracing::debug!(character_id = %character_id, "Deriving character sheet");
        Ok(self.derive(&record))
    }

    /// Replace the character's inputs and return the recomputed sheet.
    ///
    /// Ability scores outside the accepted range reject the whole update.
    pub async fn update_sheet(
        &self,
        character_id: CharacterId,
        update: SheetUpdate,
    ) -> Result<CharacterSheet, CharacterSheetError> {
        update.validate()?;

        let mut record = self.load(character_id).await?;
        record.apply_update(update);
        self.character_repo.save(&record).await?;

        tracing::info!(
            character_id = %character_id,
            level = %record.level,
            current_hit_points = record.current_hit_points,
            "Character updated"
        );

        Ok(self.derive(&record))
    }

    async fn load(&self, character_id: CharacterId) -> Result<CharacterRecord, CharacterSheetError> {
        self.character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterSheetError::CharacterNotFound(character_id))
    }

    fn derive(&self, record: &CharacterRecord) -> CharacterSheet {
        record.derive_sheet(self.system.calculation_engine(), &self.skill_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, RepoError};
    use charsheet_domain::{
        Ability, AbilityScores, CharacterIdentity, DomainError, Dnd5eSystem, HitPoints, Level,
        Skill,
    };

    fn stored_record() -> CharacterRecord {
        let mut record = CharacterRecord::new(
            CharacterId::new(1),
            CharacterIdentity {
                name: "Aria".into(),
                class: "Ranger".into(),
                race: "Half-Elf".into(),
                alignment: "Neutral Good".into(),
            },
        );
        record.level = Level::clamped(5);
        record.current_hit_points = 20;
        record.ability_scores = AbilityScores::new(10, 14, 14, 10, 12, 8);
        record.skill_proficiencies = [Skill::Stealth].into_iter().collect();
        record
    }

    fn use_case(repo: MockCharacterRepo) -> CharacterSheetUseCases {
        CharacterSheetUseCases::new(
            Arc::new(repo),
            Arc::new(Dnd5eSystem::new()),
            SkillMap::standard(),
        )
    }

    #[tokio::test]
    async fn get_sheet_derives_from_stored_record() {
        let record = stored_record();
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .withf(|id| *id == CharacterId::new(1))
            .returning(move |_| Ok(Some(record.clone())));

        let sheet = use_case(repo).get_sheet(CharacterId::new(1)).await.unwrap();

        assert_eq!(sheet.proficiency_bonus, 3);
        assert_eq!(sheet.skill_bonus(Skill::Stealth), Some(5));
        // 8 + 2 * 5
        assert_eq!(sheet.hit_points, HitPoints::new(18, 18));
    }

    #[test]
    fn derives_with_dnd5e_rules() {
        let use_case = use_case(MockCharacterRepo::new());
        let system = use_case.game_system();
        assert_eq!(system.system_id(), "dnd5e");
        assert_eq!(system.display_name(), "D&D 5th Edition");
    }

    #[tokio::test]
    async fn get_sheet_for_missing_character_fails() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let result = use_case(repo).get_sheet(CharacterId::new(9)).await;

        assert!(matches!(
            result,
            Err(CharacterSheetError::CharacterNotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_sheet_saves_inputs_and_returns_recomputed_sheet() {
        let record = stored_record();
        let mut update = record
            .derive_sheet(&Dnd5eSystem::new(), &SkillMap::standard())
            .to_update();
        update.ability_scores.set(Ability::Dexterity, 18);
        update.level = Level::clamped(9);
        update.hit_points = HitPoints::new(500, 500);

        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        repo.expect_save()
            .withf(|saved| saved.ability_scores.dexterity == 18 && saved.level.get() == 9)
            .times(1)
            .returning(|_| Ok(()));

        let sheet = use_case(repo)
            .update_sheet(CharacterId::new(1), update)
            .await
            .unwrap();

        assert_eq!(sheet.ability_modifiers.dexterity, 4);
        assert_eq!(sheet.proficiency_bonus, 4);
        assert_eq!(sheet.skill_bonus(Skill::Stealth), Some(8));
        // 8 + 2 * 9, current clamped
        assert_eq!(sheet.hit_points, HitPoints::new(26, 26));
    }

    #[tokio::test]
    async fn update_sheet_rejects_out_of_range_scores_without_saving() {
        let record = stored_record();
        let mut update = record
            .derive_sheet(&Dnd5eSystem::new(), &SkillMap::standard())
            .to_update();
        update.ability_scores.set(Ability::Strength, 31);

        let mut repo = MockCharacterRepo::new();
        repo.expect_get().never();
        repo.expect_save().never();

        let result = use_case(repo).update_sheet(CharacterId::new(1), update).await;

        assert!(matches!(
            result,
            Err(CharacterSheetError::Domain(DomainError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn update_sheet_surfaces_repo_failure() {
        let record = stored_record();
        let update = record
            .derive_sheet(&Dnd5eSystem::new(), &SkillMap::standard())
            .to_update();

        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(record.clone())));
        repo.expect_save()
            .returning(|_| Err(RepoError::storage("save_character", "unavailable")));

        let result = use_case(repo).update_sheet(CharacterId::new(1), update).await;

        assert!(matches!(result, Err(CharacterSheetError::Repo(_))));
    }
}
