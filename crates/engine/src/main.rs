//! Character sheet authority - Main entry point.

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charsheet_engine::api;
use charsheet_engine::infrastructure::settings::EngineSettings;
use charsheet_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting character sheet authority");

    let settings = EngineSettings::load()?;
    let app = Arc::new(App::from_settings(&settings)?);
    let system = app.use_cases.character_sheet.game_system();
    tracing::info!(
        character_id = %app.character_id,
        system_id = system.system_id(),
        system = system.display_name(),
        "Serving character"
    );

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    match api::http::cors_layer(&settings.allowed_origin) {
        Some(cors) => router = router.layer(cors),
        None => tracing::warn!(
            origin = %settings.allowed_origin,
            "CORS disabled: allowed origin is empty or invalid"
        ),
    }

    let addr = settings.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
