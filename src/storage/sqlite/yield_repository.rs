use crate::domain::FetchYieldState;
use crate::errors::{WeirError, WeirResult};
use crate::storage::sqlite::{parse_timestamp, SqliteStorage};
use crate::storage::traits::YieldRepository;

pub struct SqliteYieldRepository {
    storage: SqliteStorage,
}

impl SqliteYieldRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl YieldRepository for SqliteYieldRepository {
    fn get(&self, account_id: &str) -> WeirResult<Option<FetchYieldState>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT account_id, last_fetch_at, last_requested_count, last_new_count, \
             total_fetches, avg_new_rate, consecutive_empty_fetches \
             FROM fetch_yields WHERE account_id = ?1",
        )?;

        let state = stmt.query_row([account_id], |row| {
            let fetched_at: String = row.get(1)?;

            Ok(FetchYieldState {
                account_id: row.get(0)?,
                last_fetch_at: parse_timestamp(1, fetched_at)?,
                last_requested_count: row.get::<_, i64>(2)? as u32,
                last_new_count: row.get::<_, i64>(3)? as u32,
                total_fetches: row.get::<_, i64>(4)? as u64,
                avg_new_rate: row.get(5)?,
                consecutive_empty_fetches: row.get::<_, i64>(6)? as u32,
            })
        });

        match state {
            Ok(s) => Ok(Some(s)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(WeirError::from(e)),
        }
    }

    fn upsert(&self, state: &FetchYieldState) -> WeirResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO fetch_yields (account_id, last_fetch_at, last_requested_count, \
             last_new_count, total_fetches, avg_new_rate, consecutive_empty_fetches) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
             ON CONFLICT(account_id) DO UPDATE SET \
             last_fetch_at = excluded.last_fetch_at, \
             last_requested_count = excluded.last_requested_count, \
             last_new_count = excluded.last_new_count, \
             total_fetches = excluded.total_fetches, \
             avg_new_rate = excluded.avg_new_rate, \
             consecutive_empty_fetches = excluded.consecutive_empty_fetches",
            (
                &state.account_id,
                state.last_fetch_at.to_rfc3339(),
                i64::from(state.last_requested_count),
                i64::from(state.last_new_count),
                state.total_fetches as i64,
                state.avg_new_rate,
                i64::from(state.consecutive_empty_fetches),
            ),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn setup_repo() -> SqliteYieldRepository {
        let storage = SqliteStorage::in_memory().unwrap();
        SqliteYieldRepository::new(storage)
    }

    fn sample_state() -> FetchYieldState {
        FetchYieldState {
            account_id: "acct-1".to_string(),
            last_fetch_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            last_requested_count: 40,
            last_new_count: 12,
            total_fetches: 7,
            avg_new_rate: 0.31,
            consecutive_empty_fetches: 0,
        }
    }

    #[test]
    fn test_get_missing_returns_none() {
        let repo = setup_repo();
        assert!(repo.get("nobody").unwrap().is_none());
    }

    #[test]
    fn test_upsert_and_get_round_trip() {
        let repo = setup_repo();
        let state = sample_state();

        repo.upsert(&state).unwrap();
        let loaded = repo.get("acct-1").unwrap().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_upsert_overwrites_existing_row() {
        let repo = setup_repo();
        let mut state = sample_state();
        repo.upsert(&state).unwrap();

        state.total_fetches = 8;
        state.last_new_count = 0;
        state.consecutive_empty_fetches = 1;
        repo.upsert(&state).unwrap();

        let loaded = repo.get("acct-1").unwrap().unwrap();
        assert_eq!(loaded.total_fetches, 8);
        assert_eq!(loaded.consecutive_empty_fetches, 1);
    }
}
