//! Adaptive crawl planning and personalized feed curation.
//!
//! Two independent cores: a fetch-yield tracker plus limit controller that
//! decide how many items to request when an account is next crawled, and a
//! curation pipeline (scope -> filter -> score -> sort -> cap) that builds a
//! consumer's feed from the item store. Crawl transport and the surrounding
//! API are the enclosing service's business; this crate talks to them only
//! through the repository traits in [`storage::traits`].

pub mod config;
pub mod domain;
pub mod errors;
pub mod limiter;
pub mod scoring;
pub mod services;
pub mod storage;

pub use config::{Config, CrawlConfig};
pub use domain::{
    FetchYieldState, FilterKind, FilterRule, Item, RankedItem, ScopeEntry, SortMode,
    DEFAULT_PRIORITY,
};
pub use errors::{WeirError, WeirResult};
pub use limiter::next_limit;
pub use scoring::{KeywordScorer, RelevanceScorer, ScoreError};
pub use services::{CrawlService, CurationService, FeedRequest, ScopeService};
