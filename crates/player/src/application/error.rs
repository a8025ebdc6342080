//! Session error types

use charsheet_domain::ItemId;

use crate::ports::outbound::GatewayError;

/// Errors surfaced by session operations.
///
/// `Stale` never reaches callers; the session turns it into
/// [`SyncOutcome::Discarded`](super::services::SyncOutcome::Discarded).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("Authority unreachable: {0}")]
    Unreachable(String),
    #[error("Rejected by authority: {0}")]
    Rejected(String),
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("Response superseded by a newer request")]
    Stale,
}

impl From<GatewayError> for SyncError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Unreachable(msg) => SyncError::Unreachable(msg),
            GatewayError::Rejected(msg) => SyncError::Rejected(msg),
            GatewayError::UnknownItem(id) => SyncError::UnknownItem(id),
        }
    }
}
