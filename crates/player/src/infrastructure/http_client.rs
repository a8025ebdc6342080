//! HTTP adapter for the authority's REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use charsheet_domain::{CharacterItem, CharacterSheet, InventoryItem, ItemId, SheetUpdate};
use charsheet_shared::{routes, ErrorCode, ErrorResponse};

use crate::ports::outbound::{GatewayError, SyncGateway};

/// Default authority base URL.
pub const DEFAULT_ENGINE_URL: &str = "http://localhost:8080";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub const ENGINE_URL_ENV: &str = "CHARSHEET_ENGINE_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "CHARSHEET_REQUEST_TIMEOUT_MS";

#[derive(Debug, thiserror::Error)]
pub enum GatewayConfigError {
    #[error("Invalid engine URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Engine URL must use http or https: {0}")]
    UnsupportedScheme(String),
    #[error("Invalid request timeout '{0}': expected milliseconds")]
    InvalidTimeout(String),
}

/// What a request was doing, for mapping failure responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Read,
    Write,
    AddItem(ItemId),
    /// Removal cannot be declined; any failure is a transport fault.
    Remove,
}

/// [`SyncGateway`] over the authority's JSON API.
#[derive(Clone)]
pub struct HttpSyncGateway {
    client: Client,
    base_url: String,
}

impl HttpSyncGateway {
    pub fn new(base_url: &Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Create from `CHARSHEET_ENGINE_URL` and `CHARSHEET_REQUEST_TIMEOUT_MS`,
    /// falling back to defaults when unset.
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        let url = std::env::var(ENGINE_URL_ENV).ok();
        let timeout = std::env::var(REQUEST_TIMEOUT_ENV).ok();
        Self::from_values(url.as_deref(), timeout.as_deref())
    }

    fn from_values(url: Option<&str>, timeout_ms: Option<&str>) -> Result<Self, GatewayConfigError> {
        let base_url = parse_base_url(url.unwrap_or(DEFAULT_ENGINE_URL))?;
        let timeout_ms = match timeout_ms {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| GatewayConfigError::InvalidTimeout(raw.to_string()))?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        Ok(Self::new(&base_url, Duration::from_millis(timeout_ms)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, GatewayConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| GatewayConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(GatewayConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn unreachable(e: reqwest::Error) -> GatewayError {
    GatewayError::Unreachable(e.to_string())
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    kind: RequestKind,
) -> Result<T, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| GatewayError::Unreachable(format!("Invalid response body: {}", e)));
    }

    // Missing or non-JSON error bodies still classify by status.
    let body = response.json::<ErrorResponse>().await.ok();
    let error = failure(status, body, kind);
    tracing::warn!(status = %status, error = %error, "Authority request failed");
    Err(error)
}

fn failure(status: StatusCode, body: Option<ErrorResponse>, kind: RequestKind) -> GatewayError {
    let message = body
        .as_ref()
        .map(|b| b.message.clone())
        .unwrap_or_else(|| status.to_string());

    match kind {
        RequestKind::AddItem(item_id)
            if body.as_ref().map(|b| b.code) == Some(ErrorCode::UnknownItem) =>
        {
            GatewayError::UnknownItem(item_id)
        }
        RequestKind::Write | RequestKind::AddItem(_) if status.is_client_error() => {
            GatewayError::Rejected(message)
        }
        _ => GatewayError::Unreachable(message),
    }
}

#[async_trait]
impl SyncGateway for HttpSyncGateway {
    async fn fetch_sheet(&self) -> Result<CharacterSheet, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(routes::CHARACTER))
            .send()
            .await
            .map_err(unreachable)?;
        decode(response, RequestKind::Read).await
    }

    async fn persist_sheet(&self, update: SheetUpdate) -> Result<CharacterSheet, GatewayError> {
        let response = self
            .client
            .post(self.endpoint(routes::CHARACTER))
            .json(&update)
            .send()
            .await
            .map_err(unreachable)?;
        decode(response, RequestKind::Write).await
    }

    async fn fetch_inventory(&self) -> Result<Vec<InventoryItem>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(routes::INVENTORY))
            .send()
            .await
            .map_err(unreachable)?;
        decode(response, RequestKind::Read).await
    }

    async fn add_inventory_item(
        &self,
        request: CharacterItem,
    ) -> Result<Vec<InventoryItem>, GatewayError> {
        let response = self
            .client
            .post(self.endpoint(routes::INVENTORY))
            .json(&request)
            .send()
            .await
            .map_err(unreachable)?;
        decode(response, RequestKind::AddItem(request.item_id)).await
    }

    async fn remove_inventory_item(
        &self,
        item_id: ItemId,
    ) -> Result<Vec<InventoryItem>, GatewayError> {
        let response = self
            .client
            .delete(self.endpoint(&routes::inventory_item(item_id.get())))
            .send()
            .await
            .map_err(unreachable)?;
        decode(response, RequestKind::Remove).await
    }
}
