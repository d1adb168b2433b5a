use crate::domain::{FilterKind, FilterRule};
use crate::errors::WeirResult;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::FilterRuleRepository;

pub struct SqliteFilterRuleRepository {
    storage: SqliteStorage,
}

impl SqliteFilterRuleRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl FilterRuleRepository for SqliteFilterRuleRepository {
    fn get_rules(&self, consumer_id: &str) -> WeirResult<Vec<FilterRule>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT kind, value FROM filter_rules WHERE consumer_id = ?1 ORDER BY kind, value",
        )?;

        let rules = stmt.query_map([consumer_id], |row| {
            let kind_str: String = row.get(0)?;

            Ok(FilterRule {
                kind: kind_str.parse().unwrap_or(FilterKind::Keyword),
                value: row.get(1)?,
            })
        })?;

        rules.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn add_rule(&self, consumer_id: &str, rule: &FilterRule) -> WeirResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT OR IGNORE INTO filter_rules (consumer_id, kind, value) VALUES (?1, ?2, ?3)",
            (consumer_id, rule.kind.as_str(), &rule.value),
        )?;
        Ok(())
    }

    fn remove_rule(&self, consumer_id: &str, rule: &FilterRule) -> WeirResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "DELETE FROM filter_rules WHERE consumer_id = ?1 AND kind = ?2 AND value = ?3",
            (consumer_id, rule.kind.as_str(), &rule.value),
        )?;
        Ok(())
    }
}
