//! Shared types and models for the Blend Vinos client
//!
//! This crate contains types shared between the native client core and the
//! browser-facing WASM bindings of the application.

pub mod models;
pub mod token;
pub mod types;
pub mod validation;

pub use models::*;
pub use token::*;
pub use types::*;
pub use validation::*;
