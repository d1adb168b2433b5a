pub mod sqlite;
pub mod traits;

pub use sqlite::{
    SqliteAccountRegistry, SqliteFilterRuleRepository, SqliteItemRepository,
    SqliteScopeRepository, SqliteStorage, SqliteYieldRepository,
};
pub use traits::{
    AccountRegistry, FilterRuleRepository, ItemRepository, ScopeRepository, YieldRepository,
};
