//! Domain models for wines, movements, and parties

mod movement;
mod party;
mod user;
mod wine;

pub use movement::*;
pub use party::*;
pub use user::*;
pub use wine::*;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Pull a typed list out of a collaborator response that may be a bare array
/// or an object wrapping the array under one of `keys`. Unexpected shapes
/// become an empty list; elements that do not fit are dropped.
pub(crate) fn list_from_value<T: DeserializeOwned>(value: Value, keys: &[&str]) -> Vec<T> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match keys.iter().find_map(|key| map.remove(*key)) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}
