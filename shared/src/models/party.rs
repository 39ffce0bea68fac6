//! Parties (users and clients) attributable to a movement

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user or client that may be attributed to a movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Party {
    pub id: i64,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub rol_id: Option<i64>,
}

impl Party {
    /// First of name, username, email that is present and non-blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.username.as_deref().filter(|s| !s.trim().is_empty()))
            .or_else(|| self.email.as_deref().filter(|s| !s.trim().is_empty()))
    }

    /// Label for selection lists; falls back to the numeric id.
    pub fn display_label(&self) -> String {
        self.display_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

/// Normalize the user-listing response. The collaborator has been observed
/// returning both a bare array and an `{items: [...]}` wrapper.
pub fn parties_from_value(value: Value) -> Vec<Party> {
    super::list_from_value(value, &["items"])
}
