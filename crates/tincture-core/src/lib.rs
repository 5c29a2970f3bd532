//! Core types, error taxonomy and naming rules for the Tincture token pipeline.
//!
//! This crate provides the foundational types used across all other tincture crates:
//! - Flat keys, modes and resolved themes
//! - Mapping rules and mapping tables
//! - External token naming
//! - Error types

pub mod errors;
pub mod mapping;
pub mod names;
pub mod types;

pub use errors::*;
pub use mapping::*;
pub use types::*;
