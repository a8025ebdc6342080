//! Infrastructure adapters.

pub mod http_client;

pub use http_client::HttpSyncGateway;
