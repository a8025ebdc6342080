//! Outbound ports - Interfaces for external services
//!
//! The session talks to the authority only through these traits, so tests
//! and alternative transports can stand in for the HTTP adapter.

mod sync_gateway;

pub use sync_gateway::{GatewayError, SyncGateway};

#[cfg(any(test, feature = "testing"))]
pub use sync_gateway::MockSyncGateway;
