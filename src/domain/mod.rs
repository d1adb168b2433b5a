pub mod fetch_yield;
pub mod follow;
pub mod item;

pub use fetch_yield::FetchYieldState;
pub use follow::{FilterKind, FilterRule, ScopeEntry, DEFAULT_PRIORITY, PRIORITY_RANGE};
pub use item::{Item, RankedItem, SortMode};
