use crate::domain::{ScopeEntry, DEFAULT_PRIORITY};
use crate::errors::{WeirError, WeirResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::ScopeRepository;

pub struct SqliteScopeRepository {
    storage: SqliteStorage,
}

impl SqliteScopeRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl ScopeRepository for SqliteScopeRepository {
    fn get_scope(&self, consumer_id: &str) -> WeirResult<Vec<ScopeEntry>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT account_id, priority FROM scopes WHERE consumer_id = ?1 ORDER BY account_id",
        )?;

        let entries = stmt.query_map([consumer_id], |row| {
            Ok(ScopeEntry {
                account_id: row.get(0)?,
                priority: row.get::<_, i64>(1)? as u8,
            })
        })?;

        entries.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn has_scope(&self, consumer_id: &str) -> WeirResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt =
            conn.prepare("SELECT EXISTS(SELECT 1 FROM scopes WHERE consumer_id = ?1)")?;
        let exists: bool = stmt.query_row([consumer_id], |row| row.get(0))?;
        Ok(exists)
    }

    fn add(&self, consumer_id: &str, account_id: &str, priority: u8) -> WeirResult<()> {
        let conn = self.storage.connection()?;

        // Check within the same connection so the duplicate error is ours,
        // not a raw constraint violation.
        let mut stmt = conn.prepare(
            "SELECT EXISTS(SELECT 1 FROM scopes WHERE consumer_id = ?1 AND account_id = ?2)",
        )?;
        let exists: bool = stmt.query_row([consumer_id, account_id], |row| row.get(0))?;
        drop(stmt);

        if exists {
            return Err(WeirError::ScopeAlreadyExists {
                consumer_id: consumer_id.to_string(),
                account_id: account_id.to_string(),
            });
        }

        conn.execute(
            "INSERT INTO scopes (consumer_id, account_id, priority) VALUES (?1, ?2, ?3)",
            (consumer_id, account_id, i64::from(priority)),
        )?;
        Ok(())
    }

    fn bulk_add(&self, consumer_id: &str, account_ids: &[String]) -> WeirResult<()> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO scopes (consumer_id, account_id, priority) VALUES (?1, ?2, ?3)",
        )?;

        for account_id in account_ids {
            stmt.execute((consumer_id, account_id, i64::from(DEFAULT_PRIORITY)))?;
        }
        Ok(())
    }

    fn remove(&self, consumer_id: &str, account_id: &str) -> WeirResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "DELETE FROM scopes WHERE consumer_id = ?1 AND account_id = ?2",
            [consumer_id, account_id],
        )?;
        Ok(())
    }
}
