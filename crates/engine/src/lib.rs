//! Character sheet authority.
//!
//! Owns the stored character and inventory and serves both over HTTP.
//!
//! ## Structure
//!
//! - `use_cases/` - Sheet and inventory operations over the repositories
//! - `infrastructure/` - Ports, in-memory adapters, seed data, settings
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
