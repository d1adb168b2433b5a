use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored post, as supplied by the item store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    /// Upstream post type (e.g. "text", "photo", "video"), when known.
    pub content_type: Option<String>,
}

impl Item {
    pub fn new(id: String, text: String, author_id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            author_id,
            created_at,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }
}

/// A curated feed entry. Only the field relevant to the requested sort mode
/// is populated; the other stays `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedItem {
    pub item: Item,
    pub relevance_score: Option<f64>,
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Time,
    Priority,
    Relevance,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Time => "time",
            SortMode::Priority => "priority",
            SortMode::Relevance => "relevance",
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "time" => Ok(SortMode::Time),
            "priority" => Ok(SortMode::Priority),
            "relevance" => Ok(SortMode::Relevance),
            _ => Err(format!("Unknown sort mode: {}", s)),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
