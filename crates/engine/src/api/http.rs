//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use charsheet_domain::{CharacterItem, CharacterSheet, InventoryItem, ItemId, SheetUpdate};
use charsheet_shared::{routes, ErrorCode, ErrorResponse, HealthResponse};

use crate::app::App;
use crate::use_cases::{CharacterSheetError, InventoryError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route(routes::HEALTH, get(health))
        .route(routes::CHARACTER, get(get_character).post(update_character))
        .route(routes::INVENTORY, get(get_inventory).post(add_inventory_item))
        .route(routes::INVENTORY_ITEM, delete(remove_inventory_item))
}

/// CORS for the browser client at `allowed_origin`.
///
/// Returns `None` when the origin is empty or not a valid header value.
pub fn cors_layer(allowed_origin: &str) -> Option<CorsLayer> {
    let origin = allowed_origin.trim();
    if origin.is_empty() {
        return None;
    }
    let origin = HeaderValue::from_str(origin).ok()?;

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE]),
    )
}

async fn health(State(app): State<Arc<App>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(app.welcome_message.clone()))
}

async fn get_character(State(app): State<Arc<App>>) -> Result<Json<CharacterSheet>, ApiError> {
    let sheet = app
        .use_cases
        .character_sheet
        .get_sheet(app.character_id)
        .await?;
    Ok(Json(sheet))
}

async fn update_character(
    State(app): State<Arc<App>>,
    payload: Result<Json<SheetUpdate>, JsonRejection>,
) -> Result<Json<CharacterSheet>, ApiError> {
    let Json(update) = payload?;
    let sheet = app
        .use_cases
        .character_sheet
        .update_sheet(app.character_id, update)
        .await?;
    Ok(Json(sheet))
}

async fn get_inventory(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let items = app.use_cases.inventory.list.execute(app.character_id).await?;
    Ok(Json(items))
}

async fn add_inventory_item(
    State(app): State<Arc<App>>,
    payload: Result<Json<CharacterItem>, JsonRejection>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let Json(request) = payload?;
    let items = app
        .use_cases
        .inventory
        .add
        .execute(app.character_id, request)
        .await?;
    Ok(Json(items))
}

async fn remove_inventory_item(
    State(app): State<Arc<App>>,
    Path(item_id): Path<String>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let item_id: ItemId = item_id
        .parse()
        .map_err(|e: charsheet_domain::DomainError| ApiError::BadRequest(e.to_string()))?;
    let items = app
        .use_cases
        .inventory
        .remove
        .execute(app.character_id, item_id)
        .await?;
    Ok(Json(items))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation(String),
    UnknownItem(ItemId),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::BadRequest, msg),
            ),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(ErrorCode::ValidationError, msg),
            ),
            ApiError::UnknownItem(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::UnknownItem, format!("Unknown item: {}", id)),
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::InternalError, "Internal error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<CharacterSheetError> for ApiError {
    fn from(e: CharacterSheetError) -> Self {
        match e {
            CharacterSheetError::Domain(err) => ApiError::Validation(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::UnknownItem(id) => ApiError::UnknownItem(id),
            InventoryError::Validation(err) => ApiError::Validation(err.to_string()),
            InventoryError::Repo(err) => ApiError::Internal(err.to_string()),
        }
    }
}
