use crate::model::ExchangeRate;
use anyhow::Error;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row};

pub struct ExchangeRateRepository {
    pool: Pool<SqliteConnectionManager>,
}

impl ExchangeRateRepository {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> ExchangeRateRepository {
        ExchangeRateRepository { pool }
    }

    // The row id survives conflicting inserts, so a pair keeps its
    // identity across refreshes
    pub fn upsert(&self, row: &ExchangeRate) -> anyhow::Result<()> {
        let query = "INSERT INTO exchange_rate (
                id, pair, price, price_change_24h, volume_24h,
                high_24h, low_24h, market_cap, last_updated
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (pair) DO UPDATE SET
                price = excluded.price,
                price_change_24h = excluded.price_change_24h,
                volume_24h = excluded.volume_24h,
                high_24h = excluded.high_24h,
                low_24h = excluded.low_24h,
                market_cap = excluded.market_cap,
                last_updated = excluded.last_updated";
        let params = params![
            &row.id,
            &row.pair,
            row.price,
            row.price_change_24h,
            row.volume_24h,
            row.high_24h,
            row.low_24h,
            row.market_cap,
            &row.last_updated,
        ];
        self.pool
            .get()
            .unwrap()
            .execute(query, params)
            .map(|_| ())
            .map_err(Error::new)
    }

    pub fn select_all(&self) -> anyhow::Result<Vec<ExchangeRate>> {
        let conn = self.pool.get().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, pair, price, price_change_24h, volume_24h,
                high_24h, low_24h, market_cap, last_updated
            FROM exchange_rate
            ORDER BY pair",
        )?;
        let rows = stmt.query_map([], map_row)?;
        rows.collect::<rusqlite::Result<Vec<ExchangeRate>>>()
            .map_err(Error::new)
    }

    pub fn select_by_pair(&self, pair: &str) -> anyhow::Result<Option<ExchangeRate>> {
        self.pool
            .get()
            .unwrap()
            .query_row(
                "SELECT id, pair, price, price_change_24h, volume_24h,
                    high_24h, low_24h, market_cap, last_updated
                FROM exchange_rate
                WHERE pair = ?",
                params![pair],
                map_row,
            )
            .optional()
            .map_err(Error::new)
    }
}

fn map_row(row: &Row) -> rusqlite::Result<ExchangeRate> {
    Ok(ExchangeRate {
        id: row.get(0)?,
        pair: row.get(1)?,
        price: row.get(2)?,
        price_change_24h: row.get(3)?,
        volume_24h: row.get(4)?,
        high_24h: row.get(5)?,
        low_24h: row.get(6)?,
        market_cap: row.get(7)?,
        last_updated: row.get(8)?,
    })
}
