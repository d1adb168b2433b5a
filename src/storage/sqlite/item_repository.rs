use chrono::{DateTime, Utc};
use rusqlite::params_from_iter;

use crate::domain::Item;
use crate::errors::WeirResult;
use crate::storage::sqlite::{parse_timestamp, SqliteStorage};
use crate::storage::traits::ItemRepository;

pub struct SqliteItemRepository {
    storage: SqliteStorage,
}

impl SqliteItemRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl ItemRepository for SqliteItemRepository {
    fn list_by_authors(
        &self,
        author_ids: &[String],
        since: Option<DateTime<Utc>>,
    ) -> WeirResult<Vec<Item>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; author_ids.len()].join(", ");
        let mut sql = format!(
            "SELECT id, text, author_id, created_at, content_type FROM items \
             WHERE author_id IN ({})",
            placeholders
        );

        let mut params: Vec<String> = author_ids.to_vec();
        if let Some(since) = since {
            sql.push_str(" AND created_at >= ?");
            params.push(since.to_rfc3339());
        }
        sql.push_str(" ORDER BY created_at DESC");

        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&sql)?;

        let items = stmt.query_map(params_from_iter(params.iter()), |row| {
            let created_at: String = row.get(3)?;

            Ok(Item {
                id: row.get(0)?,
                text: row.get(1)?,
                author_id: row.get(2)?,
                created_at: parse_timestamp(3, created_at)?,
                content_type: row.get(4)?,
            })
        })?;

        items.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn add(&self, item: &Item) -> WeirResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO items (id, text, author_id, created_at, content_type) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                &item.id,
                &item.text,
                &item.author_id,
                item.created_at.to_rfc3339(),
                &item.content_type,
            ),
        )?;
        Ok(())
    }
}
