//! Common types used across the client

use serde::{Deserialize, Serialize};

/// Supported UI languages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Spanish,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }
}

/// Sort direction as the collaborator API spells it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[default]
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Query parameters for the paginated wine listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinePageQuery {
    pub page: u32,
    pub limit: u32,
    pub order: SortOrder,
    /// Column the listing is sorted by; the inventory screen defaults to the
    /// accumulated stock column.
    pub order_by: String,
    /// Optional free-text search; blank values are not sent.
    pub q: Option<String>,
}

impl Default for WinePageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            limit: 5,
            order: SortOrder::Desc,
            order_by: "total".to_string(),
            q: None,
        }
    }
}

impl WinePageQuery {
    /// Search term with surrounding whitespace removed, if anything remains.
    pub fn search_term(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
