//! Infrastructure implementations.
//!
//! Contains port trait implementations, settings, and startup data.

pub mod memory;
pub mod ports;
pub mod seed;
pub mod settings;
