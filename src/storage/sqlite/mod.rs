mod account_registry;
mod connection;
mod item_repository;
mod rule_repository;
mod scope_repository;
mod yield_repository;

pub use account_registry::SqliteAccountRegistry;
pub use connection::SqliteStorage;
pub use item_repository::SqliteItemRepository;
pub use rule_repository::SqliteFilterRuleRepository;
pub use scope_repository::SqliteScopeRepository;
pub use yield_repository::SqliteYieldRepository;

use chrono::{DateTime, Utc};

/// Timestamps are stored as RFC 3339 text; map parse failures onto the row
/// error so `query_map` callers surface them as database errors.
pub(crate) fn parse_timestamp(column: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
