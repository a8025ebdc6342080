//! Application layer - the client session over the sync gateway.

pub mod error;
pub mod services;

pub use error::SyncError;
