//! Typed client for the collaborator REST API
//!
//! The API is an opaque collaborator; its contract is fixed by the call
//! sites here. Every call except login carries the session's bearer token.

pub mod client;

pub use client::ApiClient;
