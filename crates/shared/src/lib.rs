//! Charsheet Protocol - Shared types for Engine and Player communication
//!
//! This crate contains the parts of the HTTP contract that are not domain
//! types: route paths, the error body, and the health body. Sheet and
//! inventory payloads are the domain types themselves.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde
//! 2. **No business logic** - Pure data types and serialization

pub mod responses;
pub mod routes;

pub use responses::{ErrorCode, ErrorResponse, HealthResponse};
