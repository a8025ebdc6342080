//! Player crate.
//!
//! Mirrors one character sheet and its inventory from the authority. Local
//! edits are optimistic; every server response replaces the mirrored copy.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod state;

pub use application::services::{SheetSession, SyncOutcome};
pub use application::SyncError;
