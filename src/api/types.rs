//! Data models for the groups.io listing API.

use serde::Deserialize;

/// A subscription the account has access to; root of one output tree.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// Remote group identifier.
    pub group_id: u64,
    /// Display name; used as the root output directory.
    pub group_name: String,
}

/// A named collection of photos within a group.
///
/// Enumerated once per run; one output subdirectory is created per album.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Album {
    /// Remote album identifier.
    pub id: u64,
    /// Album title; used as the subdirectory name.
    pub title: String,
}

/// One photo inside an album.
///
/// Transient — exists only for the duration of one download attempt.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Photo {
    /// Remote photo identifier.
    pub id: u64,
    /// Remote display name. May be empty or lack an extension.
    #[serde(default)]
    pub name: String,
    /// URL streaming the raw photo bytes.
    pub download_url: String,
}

/// One batch of listing results plus the continuation cursor.
///
/// `data` is an `Option` so an absent or null item array (the protocol
/// violation signal) stays distinguishable from an empty page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Items in server order. Order is authoritative.
    pub data: Option<Vec<T>>,
    /// Whether another page exists.
    #[serde(default)]
    pub has_more: bool,
    /// Opaque cursor for the next page; present when `has_more` is true.
    #[serde(default)]
    pub next_page_token: Option<serde_json::Value>,
}

impl<T> Page<T> {
    /// Returns the continuation token as a query-parameter string, if any.
    ///
    /// groups.io serves the token as a JSON number; string tokens are
    /// accepted too since the cursor is opaque to the client.
    #[must_use]
    pub fn next_token(&self) -> Option<String> {
        match self.next_page_token.as_ref()? {
            serde_json::Value::String(token) => Some(token.clone()),
            serde_json::Value::Number(token) => Some(token.to_string()),
            _ => None,
        }
    }
}
