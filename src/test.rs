use crate::{
    conf::Conf,
    db::migrate_to_latest,
    prepare,
    provider::{CoinGeckoConf, Provider, SpotPrice},
};
use anyhow::{bail, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rocket::local::blocking::Client;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

static COUNTER: AtomicUsize = AtomicUsize::new(1);

pub fn pool() -> Pool<SqliteConnectionManager> {
    let db_name = COUNTER.fetch_add(1, Ordering::Relaxed);
    let db_url = format!("file::testdb_{}:?mode=memory&cache=shared", db_name);
    let manager = SqliteConnectionManager::file(&db_url);
    let pool = Pool::new(manager).unwrap();
    migrate_to_latest(&mut pool.get().unwrap()).unwrap();
    pool
}

pub fn client() -> (Client, Pool<SqliteConnectionManager>) {
    client_with(Box::new(FakeProvider::new()))
}

pub fn client_with(provider: Box<dyn Provider>) -> (Client, Pool<SqliteConnectionManager>) {
    let pool = pool();
    let rocket = prepare(rocket::build(), pool.clone(), provider);
    (Client::untracked(rocket).unwrap(), pool)
}

/// Serves the conf's asset list with fixed prices, no network involved.
pub struct FakeProvider {
    pub conf: CoinGeckoConf,
    pub prices: HashMap<String, SpotPrice>,
    pub fail: bool,
}

impl FakeProvider {
    pub fn new() -> FakeProvider {
        let conf = Conf::new().unwrap().providers.coingecko;
        let prices = conf
            .assets
            .iter()
            .enumerate()
            .map(|(i, asset)| {
                (
                    asset.clone(),
                    SpotPrice {
                        usd: 100.0 * (i + 1) as f64,
                        usd_24h_change: Some(1.5),
                        usd_24h_vol: Some(1_000_000.0),
                        usd_market_cap: Some(10_000_000.0),
                    },
                )
            })
            .collect();
        FakeProvider {
            conf,
            prices,
            fail: false,
        }
    }

    pub fn failing() -> FakeProvider {
        let mut provider = FakeProvider::new();
        provider.fail = true;
        provider
    }
}

#[rocket::async_trait]
impl Provider for FakeProvider {
    fn name(&self) -> String {
        "fake".into()
    }

    fn assets(&self) -> &[String] {
        &self.conf.assets
    }

    fn pair(&self, asset: &str) -> Option<&str> {
        self.conf.pairs.get(asset).map(|it| it.as_str())
    }

    async fn spot_prices(&self) -> Result<HashMap<String, SpotPrice>> {
        if self.fail {
            bail!("fake provider is down");
        }
        Ok(self.prices.clone())
    }
}
