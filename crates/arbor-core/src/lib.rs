//! Arbor Core: shared types, errors, and primitives.
//!
//! This crate provides the foundational types used across all Arbor crates.
//! It has no internal Arbor dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`privilege`]: Fixed-capacity privilege bit sets
//! - [`value`]: Typed property values carried by restrictions

pub mod error;
pub mod privilege;
pub mod value;

mod proptests;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use privilege::PrivilegeBits;
pub use value::{PropertyType, Value};
