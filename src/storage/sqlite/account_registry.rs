use crate::errors::WeirResult;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::AccountRegistry;

pub struct SqliteAccountRegistry {
    storage: SqliteStorage,
}

impl SqliteAccountRegistry {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    /// Add an account to the tracked roster (or reactivate it).
    pub fn register(&self, account_id: &str) -> WeirResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO accounts (account_id, active) VALUES (?1, 1) \
             ON CONFLICT(account_id) DO UPDATE SET active = 1",
            [account_id],
        )?;
        Ok(())
    }

    /// Keep the account's history but stop treating it as tracked.
    pub fn deactivate(&self, account_id: &str) -> WeirResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "UPDATE accounts SET active = 0 WHERE account_id = ?1",
            [account_id],
        )?;
        Ok(())
    }
}

impl AccountRegistry for SqliteAccountRegistry {
    fn list_active(&self) -> WeirResult<Vec<String>> {
        let conn = self.storage.connection()?;
        let mut stmt =
            conn.prepare("SELECT account_id FROM accounts WHERE active = 1 ORDER BY account_id")?;

        let ids = stmt.query_map([], |row| row.get(0))?;
        ids.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn is_active(&self, account_id: &str) -> WeirResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt = conn
            .prepare("SELECT EXISTS(SELECT 1 FROM accounts WHERE account_id = ?1 AND active = 1)")?;
        let active: bool = stmt.query_row([account_id], |row| row.get(0))?;
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_registry() -> SqliteAccountRegistry {
        let storage = SqliteStorage::in_memory().unwrap();
        SqliteAccountRegistry::new(storage)
    }

    #[test]
    fn test_register_and_list() {
        let registry = setup_registry();
        registry.register("b-acct").unwrap();
        registry.register("a-acct").unwrap();

        let active = registry.list_active().unwrap();
        assert_eq!(active, vec!["a-acct".to_string(), "b-acct".to_string()]);
    }

    #[test]
    fn test_register_is_idempotent() {
        let registry = setup_registry();
        registry.register("acct-1").unwrap();
        registry.register("acct-1").unwrap();

        assert_eq!(registry.list_active().unwrap().len(), 1);
    }

    #[test]
    fn test_deactivate_hides_account() {
        let registry = setup_registry();
        registry.register("acct-1").unwrap();
        assert!(registry.is_active("acct-1").unwrap());

        registry.deactivate("acct-1").unwrap();
        assert!(!registry.is_active("acct-1").unwrap());
        assert!(registry.list_active().unwrap().is_empty());

        // Re-registering reactivates.
        registry.register("acct-1").unwrap();
        assert!(registry.is_active("acct-1").unwrap());
    }

    #[test]
    fn test_unknown_account_is_inactive() {
        let registry = setup_registry();
        assert!(!registry.is_active("ghost").unwrap());
    }
}
