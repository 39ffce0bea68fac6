//! Screen state machines driven by the browser shell
//!
//! A screen owns its state exclusively for the lifetime of one mount; the
//! shell renders it and forwards input events. The only asynchronous work a
//! screen does is bound to that lifetime and aborted on teardown.

pub mod movements;

pub use movements::{MovementsScreen, PartyLoader};
