use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier. Fresh ids are UUID v4 strings, but stored ids are kept
/// exactly as written, whatever their shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl TodoId {
    pub fn new() -> Self { Self(Uuid::new_v4().to_string()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for TodoId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self { Self(id.to_string()) }
}

/// A single list entry.
///
/// Serialized with the field names the browser build used (`createdAt`),
/// so snapshots written by either side load in the other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh, not yet completed todo stamped with the current time.
    /// `text` is expected to be already normalized.
    pub fn new(text: String) -> Self {
        Self { id: TodoId::new(), text, completed: false, created_at: Utc::now() }
    }
}

/// Trims `raw` and rejects it when nothing is left.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterType {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterType {
    pub const ALL: [FilterType; 3] = [FilterType::All, FilterType::Active, FilterType::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Active => !todo.completed,
            FilterType::Completed => todo.completed,
        }
    }

    /// Next selector in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            FilterType::All => FilterType::Active,
            FilterType::Active => FilterType::Completed,
            FilterType::Completed => FilterType::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::All => "all",
            FilterType::Active => "active",
            FilterType::Completed => "completed",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}
