//! Charsheet Player - headless client.
//!
//! Loads the character sheet and inventory from the authority and logs them.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charsheet_player::infrastructure::HttpSyncGateway;
use charsheet_player::SheetSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let gateway = HttpSyncGateway::from_env()?;
    tracing::info!(engine = %gateway.base_url(), "Starting Charsheet Player");

    let session = SheetSession::new(Arc::new(gateway));
    session.load().await?;

    if let Some(sheet) = session.sheet() {
        let hit_points = format!("{}/{}", sheet.hit_points.current, sheet.hit_points.max);
        tracing::info!(
            name = %sheet.identity.name,
            class = %sheet.identity.class,
            race = %sheet.identity.race,
            level = %sheet.level,
            proficiency_bonus = sheet.proficiency_bonus,
            armor_class = sheet.armor_class,
            initiative = sheet.initiative,
            hit_points = %hit_points,
            "Loaded character sheet"
        );
        for (ability, score) in sheet.ability_scores.iter() {
            tracing::debug!(
                ability = %ability,
                score,
                modifier = sheet.ability_modifiers.get(ability),
                save = sheet.saving_throw(ability).unwrap_or_default(),
                "Ability"
            );
        }
        for (skill, bonus) in &sheet.skills {
            tracing::debug!(skill = %skill, bonus, "Skill");
        }
    }

    let inventory = session.inventory();
    tracing::info!(entries = inventory.len(), "Loaded inventory");
    for entry in &inventory {
        tracing::info!(
            item_id = %entry.item.id,
            name = %entry.item.name,
            item_type = %entry.item.item_type,
            quantity = entry.quantity,
            "Inventory item"
        );
    }

    Ok(())
}
