use chrono::{DateTime, Utc};

use crate::domain::{FetchYieldState, FilterRule, Item, ScopeEntry};
use crate::errors::WeirResult;

/// Per-account crawl yield history.
#[cfg_attr(test, mockall::automock)]
pub trait YieldRepository: Send + Sync {
    fn get(&self, account_id: &str) -> WeirResult<Option<FetchYieldState>>;
    fn upsert(&self, state: &FetchYieldState) -> WeirResult<()>;
}

/// The platform's tracked-account roster.
#[cfg_attr(test, mockall::automock)]
pub trait AccountRegistry: Send + Sync {
    fn list_active(&self) -> WeirResult<Vec<String>>;
    fn is_active(&self, account_id: &str) -> WeirResult<bool>;
}

/// A consumer's follow scope: which accounts they see, at what priority.
#[cfg_attr(test, mockall::automock)]
pub trait ScopeRepository: Send + Sync {
    fn get_scope(&self, consumer_id: &str) -> WeirResult<Vec<ScopeEntry>>;
    fn has_scope(&self, consumer_id: &str) -> WeirResult<bool>;
    /// Fails with `ScopeAlreadyExists` if the pairing is already present.
    fn add(&self, consumer_id: &str, account_id: &str, priority: u8) -> WeirResult<()>;
    /// Inserts at default priority, skipping pairings already present.
    fn bulk_add(&self, consumer_id: &str, account_ids: &[String]) -> WeirResult<()>;
    /// Idempotent: removing an absent pairing is a no-op.
    fn remove(&self, consumer_id: &str, account_id: &str) -> WeirResult<()>;
}

/// A consumer's deny-list filter rules.
#[cfg_attr(test, mockall::automock)]
pub trait FilterRuleRepository: Send + Sync {
    fn get_rules(&self, consumer_id: &str) -> WeirResult<Vec<FilterRule>>;
    fn add_rule(&self, consumer_id: &str, rule: &FilterRule) -> WeirResult<()>;
    fn remove_rule(&self, consumer_id: &str, rule: &FilterRule) -> WeirResult<()>;
}

/// The accumulated item store.
#[cfg_attr(test, mockall::automock)]
pub trait ItemRepository: Send + Sync {
    /// Items authored by any of `author_ids`, optionally bounded to those
    /// created at or after `since`, newest first.
    fn list_by_authors(
        &self,
        author_ids: &[String],
        since: Option<DateTime<Utc>>,
    ) -> WeirResult<Vec<Item>>;
    fn add(&self, item: &Item) -> WeirResult<()>;
}
