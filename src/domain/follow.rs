use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::Item;

/// Priority assigned to a scope entry when the caller does not pick one.
pub const DEFAULT_PRIORITY: u8 = 5;

/// Valid range for scope priorities, inclusive.
pub const PRIORITY_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// One followed account in a consumer's scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeEntry {
    pub account_id: String,
    pub priority: u8,
}

impl ScopeEntry {
    pub fn new(account_id: String, priority: u8) -> Self {
        Self {
            account_id,
            priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Keyword,
    Hashtag,
    ContentType,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Keyword => "keyword",
            FilterKind::Hashtag => "hashtag",
            FilterKind::ContentType => "content_type",
        }
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyword" => Ok(FilterKind::Keyword),
            "hashtag" => Ok(FilterKind::Hashtag),
            "content_type" => Ok(FilterKind::ContentType),
            _ => Err(format!("Unknown filter kind: {}", s)),
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A deny-list rule: an item matching any of a consumer's rules is excluded
/// from that consumer's feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    pub kind: FilterKind,
    pub value: String,
}

impl FilterRule {
    pub fn new(kind: FilterKind, value: String) -> Self {
        Self { kind, value }
    }

    /// Case-insensitive match of this rule against an item.
    pub fn matches(&self, item: &Item) -> bool {
        match self.kind {
            FilterKind::Keyword => {
                let needle = self.value.to_lowercase();
                !needle.is_empty() && item.text.to_lowercase().contains(&needle)
            }
            FilterKind::Hashtag => {
                let wanted = self.value.trim_start_matches('#').to_lowercase();
                !wanted.is_empty()
                    && hashtag_pattern()
                        .captures_iter(&item.text)
                        .any(|c| c[1].to_lowercase() == wanted)
            }
            FilterKind::ContentType => item
                .content_type
                .as_deref()
                .is_some_and(|ct| ct.eq_ignore_ascii_case(&self.value)),
        }
    }
}

fn hashtag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(text: &str) -> Item {
        Item::new(
            "1".to_string(),
            text.to_string(),
            "acct-1".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_keyword_matches_substring_case_insensitive() {
        let rule = FilterRule::new(FilterKind::Keyword, "blockchain".to_string());
        assert!(rule.matches(&item("The Blockchain Revolution continues")));
        assert!(rule.matches(&item("all about blockchains"))); // partial word
        assert!(!rule.matches(&item("about distributed ledgers")));
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let rule = FilterRule::new(FilterKind::Keyword, "".to_string());
        assert!(!rule.matches(&item("anything at all")));
    }

    #[test]
    fn test_hashtag_matches_token_not_substring() {
        let rule = FilterRule::new(FilterKind::Hashtag, "ai".to_string());
        assert!(rule.matches(&item("big news #AI today")));
        assert!(!rule.matches(&item("#aint the same tag")));
        assert!(!rule.matches(&item("plain ai mention, no tag")));
    }

    #[test]
    fn test_hashtag_value_may_carry_hash() {
        let rule = FilterRule::new(FilterKind::Hashtag, "#Rust".to_string());
        assert!(rule.matches(&item("shipping #rust code")));
    }

    #[test]
    fn test_content_type_requires_known_type() {
        let rule = FilterRule::new(FilterKind::ContentType, "video".to_string());
        let tagged = item("watch this").with_content_type(Some("Video".to_string()));
        assert!(rule.matches(&tagged));
        assert!(!rule.matches(&item("watch this"))); // untyped items never match
    }
}
