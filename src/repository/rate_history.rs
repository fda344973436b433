use crate::model::RateHistoryEntry;
use anyhow::Error;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Row};

pub struct RateHistoryRepository {
    pool: Pool<SqliteConnectionManager>,
}

impl RateHistoryRepository {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> RateHistoryRepository {
        RateHistoryRepository { pool }
    }

    // All entries land in one transaction, the table itself is
    // append-only
    pub fn insert_batch(&self, rows: &[RateHistoryEntry]) -> anyhow::Result<()> {
        let mut conn = self.pool.get().unwrap();
        let tx = conn.transaction().map_err(Error::new)?;
        for row in rows {
            tx.execute(
                "INSERT INTO rate_history (id, pair, price, timestamp) VALUES (?, ?, ?, ?)",
                params![&row.id, &row.pair, row.price, &row.timestamp],
            )?;
        }
        tx.commit().map_err(Error::new)
    }

    pub fn select_by_pair(&self, pair: &str) -> anyhow::Result<Vec<RateHistoryEntry>> {
        let conn = self.pool.get().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, pair, price, timestamp
            FROM rate_history
            WHERE pair = ?
            ORDER BY timestamp",
        )?;
        let rows = stmt.query_map(params![pair], map_row)?;
        rows.collect::<rusqlite::Result<Vec<RateHistoryEntry>>>()
            .map_err(Error::new)
    }

    pub fn count(&self) -> anyhow::Result<i64> {
        self.pool
            .get()
            .unwrap()
            .query_row("SELECT count(*) FROM rate_history", [], |row| row.get(0))
            .map_err(Error::new)
    }
}

fn map_row(row: &Row) -> rusqlite::Result<RateHistoryEntry> {
    Ok(RateHistoryEntry {
        id: row.get(0)?,
        pair: row.get(1)?,
        price: row.get(2)?,
        timestamp: row.get(3)?,
    })
}
