//! Sheet Session - the one editing session for a character.
//!
//! Owns the sheet and inventory mirrors and drives every round-trip to the
//! authority. Network calls run outside the state lock, so edits keep
//! working while a request is in flight.
//!
//! Request futures are `'static` and hold only a weak reference to the
//! session state. If the session is dropped before a response arrives, the
//! response is discarded.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use charsheet_domain::{
    Ability, CharacterItem, CharacterSheet, Dnd5eSystem, GameSystem, IdentityField,
    InventoryItem, ItemId, Skill,
};

use crate::application::SyncError;
use crate::ports::outbound::{GatewayError, SyncGateway};
use crate::state::{CharacterSheetStore, InventoryMirror};

/// What happened to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The response replaced the local mirror.
    Applied,
    /// A newer response was already applied, or the session is gone.
    Discarded,
    /// Nothing to send (sheet not loaded yet).
    Skipped,
}

#[derive(Debug, Default)]
struct SessionState {
    sheet: CharacterSheetStore,
    inventory: InventoryMirror,
}

pub struct SheetSession {
    state: Arc<Mutex<SessionState>>,
    gateway: Arc<dyn SyncGateway>,
    system: Arc<dyn GameSystem>,
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    // State is only replaced wholesale, so a poisoned lock still holds a usable mirror.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Apply a gateway result to the session, if it still exists.
fn settle<T>(
    state: &Weak<Mutex<SessionState>>,
    operation: &'static str,
    result: Result<T, GatewayError>,
    apply: impl FnOnce(&mut SessionState, T) -> Result<(), SyncError>,
) -> Result<SyncOutcome, SyncError> {
    let value = result.map_err(|e| {
        tracing::warn!(operation, error = %e, "Sync request failed");
        SyncError::from(e)
    })?;

    let Some(state) = state.upgrade() else {
        tracing::debug!(operation, "Session dropped before response arrived");
        return Ok(SyncOutcome::Discarded);
    };

    let mut guard = lock(&state);
    match apply(&mut guard, value) {
        Ok(()) => Ok(SyncOutcome::Applied),
        Err(SyncError::Stale) => {
            tracing::debug!(operation, "Discarded stale response");
            Ok(SyncOutcome::Discarded)
        }
        Err(e) => Err(e),
    }
}

impl SheetSession {
    pub fn new(gateway: Arc<dyn SyncGateway>) -> Self {
        Self::with_system(gateway, Arc::new(Dnd5eSystem::new()))
    }

    /// Use `system` for [`preview`](Self::preview).
    pub fn with_system(gateway: Arc<dyn SyncGateway>, system: Arc<dyn GameSystem>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            gateway,
            system,
        }
    }

    pub fn is_loaded(&self) -> bool {
        lock(&self.state).sheet.is_loaded()
    }

    /// Snapshot of the mirrored sheet, derived fields as last received.
    pub fn sheet(&self) -> Option<CharacterSheet> {
        lock(&self.state).sheet.sheet().cloned()
    }

    /// The mirrored sheet with derived fields recomputed from local edits.
    pub fn preview(&self) -> Option<CharacterSheet> {
        lock(&self.state)
            .sheet
            .preview(self.system.calculation_engine())
    }

    pub fn inventory(&self) -> Vec<InventoryItem> {
        lock(&self.state).inventory.items().to_vec()
    }

    pub fn apply_field_edit(&self, field: IdentityField, value: impl Into<String>) {
        lock(&self.state).sheet.apply_field_edit(field, value);
    }

    pub fn apply_ability_edit(&self, ability: Ability, score: i32) {
        lock(&self.state).sheet.apply_ability_edit(ability, score);
    }

    pub fn apply_level_edit(&self, level: i64) {
        lock(&self.state).sheet.apply_level_edit(level);
    }

    pub fn apply_hp_edit(&self, current: i32) {
        lock(&self.state).sheet.apply_hp_edit(current);
    }

    pub fn toggle_skill_proficiency(&self, skill: Skill, proficient: bool) {
        lock(&self.state)
            .sheet
            .toggle_skill_proficiency(skill, proficient);
    }

    pub fn toggle_save_proficiency(&self, ability: Ability, proficient: bool) {
        lock(&self.state)
            .sheet
            .toggle_save_proficiency(ability, proficient);
    }

    /// Fetch the sheet and inventory together.
    ///
    /// Returns the sheet's outcome. An inventory failure is still reported
    /// after a successful sheet fetch has been applied.
    pub fn load(&self) -> impl Future<Output = Result<SyncOutcome, SyncError>> + Send + 'static {
        let sheet = self.refresh_sheet();
        let inventory = self.refresh_inventory();
        async move {
            let (sheet, inventory) = tokio::join!(sheet, inventory);
            let outcome = sheet?;
            inventory?;
            Ok(outcome)
        }
    }

    pub fn refresh_sheet(
        &self,
    ) -> impl Future<Output = Result<SyncOutcome, SyncError>> + Send + 'static {
        let tag = lock(&self.state).sheet.begin_request();
        let state = Arc::downgrade(&self.state);
        let gateway = Arc::clone(&self.gateway);

        async move {
            let result = gateway.fetch_sheet().await;
            settle(&state, "fetch_sheet", result, |s, sheet| {
                s.sheet.apply_response(tag, sheet)
            })
        }
    }

    /// Persist the local sheet.
    ///
    /// On success the whole local sheet is replaced by the authority's
    /// response, including edits made after this call. On failure local
    /// state is kept as is.
    pub fn save(&self) -> impl Future<Output = Result<SyncOutcome, SyncError>> + Send + 'static {
        let pending = {
            let mut guard = lock(&self.state);
            guard
                .sheet
                .pending_update()
                .map(|update| (guard.sheet.begin_request(), update))
        };
        let state = Arc::downgrade(&self.state);
        let gateway = Arc::clone(&self.gateway);

        async move {
            let Some((tag, update)) = pending else {
                tracing::debug!("Save skipped: sheet not loaded");
                return Ok(SyncOutcome::Skipped);
            };
            tracing::debug!(request = tag.get(), level = %update.level, "Saving character sheet");

            let result = gateway.persist_sheet(update).await;
            settle(&state, "persist_sheet", result, |s, sheet| {
                s.sheet.apply_response(tag, sheet)
            })
        }
    }

    pub fn refresh_inventory(
        &self,
    ) -> impl Future<Output = Result<SyncOutcome, SyncError>> + Send + 'static {
        let tag = lock(&self.state).inventory.begin_request();
        let state = Arc::downgrade(&self.state);
        let gateway = Arc::clone(&self.gateway);

        async move {
            let result = gateway.fetch_inventory().await;
            settle(&state, "fetch_inventory", result, |s, items| {
                s.inventory.apply_response(tag, items)
            })
        }
    }

    /// Add `quantity` of a catalog item. The list is left alone until the
    /// authority answers.
    pub fn add_item(
        &self,
        item_id: ItemId,
        quantity: u32,
    ) -> impl Future<Output = Result<SyncOutcome, SyncError>> + Send + 'static {
        let tag = lock(&self.state).inventory.begin_request();
        let state = Arc::downgrade(&self.state);
        let gateway = Arc::clone(&self.gateway);

        async move {
            tracing::debug!(item_id = %item_id, quantity, "Adding inventory item");
            let result = gateway
                .add_inventory_item(CharacterItem::new(item_id, quantity))
                .await;
            settle(&state, "add_inventory_item", result, |s, items| {
                s.inventory.apply_response(tag, items)
            })
        }
    }

    pub fn remove_item(
        &self,
        item_id: ItemId,
    ) -> impl Future<Output = Result<SyncOutcome, SyncError>> + Send + 'static {
        let tag = lock(&self.state).inventory.begin_request();
        let state = Arc::downgrade(&self.state);
        let gateway = Arc::clone(&self.gateway);

        async move {
            tracing::debug!(item_id = %item_id, "Removing inventory item");
            let result = gateway.remove_inventory_item(item_id).await;
            settle(&state, "remove_inventory_item", result, |s, items| {
                s.inventory.apply_response(tag, items)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockSyncGateway;
    use charsheet_domain::{
        AbilityScores, CharacterId, CharacterIdentity, CharacterRecord, HitPoints, Item, Level,
        SheetUpdate, SkillMap,
    };

    fn authority_sheet(update: SheetUpdate) -> CharacterSheet {
        let mut record = CharacterRecord::new(CharacterId::new(1), CharacterIdentity::default());
        record.apply_update(update);
        record.derive_sheet(&Dnd5eSystem::new(), &SkillMap::standard())
    }

    fn stored_sheet() -> CharacterSheet {
        let identity = CharacterIdentity {
            name: "Aria".into(),
            class: "Ranger".into(),
            race: "Half-Elf".into(),
            alignment: "Neutral Good".into(),
        };
        let mut record = CharacterRecord::new(CharacterId::new(1), identity);
        record.level = Level::clamped(3);
        record.current_hit_points = 14;
        record.ability_scores = AbilityScores::new(12, 16, 14, 10, 13, 8);
        record.skill_proficiencies = [Skill::Stealth].into_iter().collect();
        record.derive_sheet(&Dnd5eSystem::new(), &SkillMap::standard())
    }

    fn torch(quantity: u32) -> InventoryItem {
        InventoryItem {
            item: Item::new(ItemId::new(6), "Torch", "Gear"),
            quantity,
        }
    }

    /// Gateway that serves the stored sheet and a one-torch inventory.
    fn gateway() -> MockSyncGateway {
        let mut gateway = MockSyncGateway::new();
        gateway
            .expect_fetch_sheet()
            .returning(|| Ok(stored_sheet()));
        gateway
            .expect_fetch_inventory()
            .returning(|| Ok(vec![torch(1)]));
        gateway
    }

    async fn loaded(gateway: MockSyncGateway) -> SheetSession {
        let session = SheetSession::new(Arc::new(gateway));
        assert_eq!(session.load().await, Ok(SyncOutcome::Applied));
        session
    }

    #[tokio::test]
    async fn load_fills_both_mirrors() {
        let session = loaded(gateway()).await;

        assert!(session.is_loaded());
        assert_eq!(session.sheet(), Some(stored_sheet()));
        assert_eq!(session.inventory(), vec![torch(1)]);
    }

    #[tokio::test]
    async fn load_failure_leaves_session_unloaded() {
        let mut gateway = MockSyncGateway::new();
        gateway
            .expect_fetch_sheet()
            .returning(|| Err(GatewayError::Unreachable("connection refused".into())));
        gateway.expect_fetch_inventory().returning(|| Ok(vec![]));

        let session = SheetSession::new(Arc::new(gateway));
        let result = session.load().await;

        assert!(matches!(result, Err(SyncError::Unreachable(_))));
        assert!(!session.is_loaded());
    }

    #[tokio::test]
    async fn save_before_load_is_skipped() {
        let mut gateway = MockSyncGateway::new();
        gateway.expect_persist_sheet().never();

        let session = SheetSession::new(Arc::new(gateway));
        session.apply_level_edit(4);

        assert_eq!(session.save().await, Ok(SyncOutcome::Skipped));
        assert!(session.sheet().is_none());
    }

    #[tokio::test]
    async fn save_replaces_sheet_with_authority_response() {
        let mut gateway = gateway();
        gateway
            .expect_persist_sheet()
            .withf(|update| update.ability_scores.strength == 18 && update.level.get() == 5)
            .times(1)
            .returning(|update| Ok(authority_sheet(update)));
        let session = loaded(gateway).await;

        session.apply_ability_edit(Ability::Strength, 18);
        session.apply_level_edit(5);
        // Stale until the round-trip completes
        assert_eq!(session.sheet().unwrap().ability_modifiers.strength, 1);

        let expected = authority_sheet(session.sheet().unwrap().to_update());
        assert_eq!(session.save().await, Ok(SyncOutcome::Applied));

        let sheet = session.sheet().unwrap();
        assert_eq!(sheet, expected);
        assert_eq!(sheet.ability_modifiers.strength, 4);
        assert_eq!(sheet.proficiency_bonus, 3);
    }

    #[tokio::test]
    async fn edits_made_during_save_are_replaced() {
        let mut gateway = gateway();
        gateway
            .expect_persist_sheet()
            .returning(|update| Ok(authority_sheet(update)));
        let session = loaded(gateway).await;

        let save = session.save();
        session.apply_field_edit(IdentityField::Name, "Renamed mid-flight");
        save.await.unwrap();

        assert_eq!(session.sheet().unwrap().identity.name, "Aria");
    }

    #[tokio::test]
    async fn later_save_wins_when_responses_arrive_out_of_order() {
        let mut gateway = gateway();
        gateway
            .expect_persist_sheet()
            .times(2)
            .returning(|update| Ok(authority_sheet(update)));
        let session = loaded(gateway).await;

        session.apply_level_edit(5);
        let save_a = session.save();
        session.apply_level_edit(9);
        let save_b = session.save();

        assert_eq!(save_b.await, Ok(SyncOutcome::Applied));
        assert_eq!(save_a.await, Ok(SyncOutcome::Discarded));

        let sheet = session.sheet().unwrap();
        assert_eq!(sheet.level.get(), 9);
        assert_eq!(sheet.proficiency_bonus, 4);
    }

    #[tokio::test]
    async fn failed_save_keeps_local_edits() {
        let mut gateway = gateway();
        gateway
            .expect_persist_sheet()
            .returning(|_| Err(GatewayError::Rejected("strength=31".into())));
        let session = loaded(gateway).await;

        session.apply_ability_edit(Ability::Strength, 31);
        session.apply_hp_edit(2);

        let result = session.save().await;

        assert_eq!(result, Err(SyncError::Rejected("strength=31".into())));
        let sheet = session.sheet().unwrap();
        assert_eq!(sheet.ability_scores.strength, 31);
        assert_eq!(sheet.hit_points.current, 2);
    }

    #[tokio::test]
    async fn dropping_session_discards_in_flight_save() {
        let mut gateway = gateway();
        gateway
            .expect_persist_sheet()
            .times(1)
            .returning(|update| Ok(authority_sheet(update)));
        let session = loaded(gateway).await;

        let save = session.save();
        drop(session);

        assert_eq!(save.await, Ok(SyncOutcome::Discarded));
    }

    #[tokio::test]
    async fn preview_recomputes_locally() {
        let session = loaded(gateway()).await;
        session.apply_ability_edit(Ability::Dexterity, 20);

        let preview = session.preview().unwrap();

        assert_eq!(preview.ability_modifiers.dexterity, 5);
        // DEX +5, proficient at level 3
        assert_eq!(preview.skill_bonus(Skill::Stealth), Some(7));
        assert_eq!(session.sheet().unwrap().ability_modifiers.dexterity, 3);
    }

    #[tokio::test]
    async fn add_item_replaces_inventory_with_response() {
        let mut gateway = gateway();
        gateway
            .expect_add_inventory_item()
            .withf(|request| *request == CharacterItem::new(ItemId::new(6), 3))
            .times(1)
            .returning(|_| Ok(vec![torch(4)]));
        let session = loaded(gateway).await;

        assert_eq!(
            session.add_item(ItemId::new(6), 3).await,
            Ok(SyncOutcome::Applied)
        );
        assert_eq!(session.inventory(), vec![torch(4)]);
    }

    #[tokio::test]
    async fn unknown_item_leaves_inventory_unchanged() {
        let mut gateway = gateway();
        gateway
            .expect_add_inventory_item()
            .returning(|request| Err(GatewayError::UnknownItem(request.item_id)));
        let session = loaded(gateway).await;

        let result = session.add_item(ItemId::new(999), 1).await;

        assert_eq!(result, Err(SyncError::UnknownItem(ItemId::new(999))));
        assert_eq!(session.inventory(), vec![torch(1)]);
    }

    #[tokio::test]
    async fn remove_item_applies_authority_list() {
        let mut gateway = gateway();
        gateway
            .expect_remove_inventory_item()
            .withf(|id| *id == ItemId::new(6))
            .returning(|_| Ok(vec![]));
        let session = loaded(gateway).await;

        assert_eq!(
            session.remove_item(ItemId::new(6)).await,
            Ok(SyncOutcome::Applied)
        );
        assert!(session.inventory().is_empty());
    }

    #[tokio::test]
    async fn stale_inventory_response_is_discarded() {
        let mut gateway = gateway();
        gateway
            .expect_add_inventory_item()
            .returning(|_| Ok(vec![torch(2)]));
        gateway
            .expect_remove_inventory_item()
            .returning(|_| Ok(vec![]));
        let session = loaded(gateway).await;

        let add = session.add_item(ItemId::new(6), 1);
        let remove = session.remove_item(ItemId::new(6));

        assert_eq!(remove.await, Ok(SyncOutcome::Applied));
        assert_eq!(add.await, Ok(SyncOutcome::Discarded));
        assert!(session.inventory().is_empty());
    }

    #[tokio::test]
    async fn hp_edit_is_clamped_only_by_the_authority() {
        let mut gateway = gateway();
        gateway
            .expect_persist_sheet()
            .returning(|update| Ok(authority_sheet(update)));
        let session = loaded(gateway).await;

        session.apply_hp_edit(99);
        assert_eq!(session.sheet().unwrap().hit_points.current, 99);

        session.save().await.unwrap();
        // 8 + CON(+2) * 3
        assert_eq!(session.sheet().unwrap().hit_points, HitPoints::new(14, 14));
    }
}
