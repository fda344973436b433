use crate::{
    conf::Conf,
    db,
    model::{ExchangeRate, Id, RateHistoryEntry, RefreshResponse},
    provider::{CoinGecko, Provider, SpotPrice},
    repository::{ExchangeRateRepository, RateHistoryRepository},
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::{process::exit, str::FromStr};
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Fetches spot prices, upserts one row per mapped pair, appends the
/// history batch and reads the current rows back. A rejected row is
/// logged and skipped, only a provider failure aborts the whole run.
pub async fn run(
    provider: &dyn Provider,
    rates: &ExchangeRateRepository,
    history: &RateHistoryRepository,
) -> Result<RefreshResponse> {
    let prices = provider.spot_prices().await?;
    let now = Utc::now();
    let mut written: Vec<RateHistoryEntry> = Vec::new();

    for asset in provider.assets() {
        let price = match prices.get(asset) {
            Some(price) => price,
            None => continue,
        };
        // Assets with no configured pair are skipped, not failed
        let pair = match provider.pair(asset) {
            Some(pair) => pair,
            None => continue,
        };
        let row = rate(pair, price, now);
        match rates.upsert(&row) {
            Ok(()) => written.push(RateHistoryEntry {
                id: Id::new(),
                pair: row.pair,
                price: row.price,
                timestamp: now,
            }),
            Err(e) => error!(%e, pair, "Unable to upsert exchange rate"),
        }
    }

    if !written.is_empty() {
        if let Err(e) = history.insert_batch(&written) {
            error!(%e, "Unable to append rate history");
        }
    }

    let updated = written.into_iter().map(|it| it.pair).collect();
    let rows = rates.select_all()?;
    Ok(RefreshResponse::new(updated, rows))
}

fn rate(pair: &str, price: &SpotPrice, now: DateTime<Utc>) -> ExchangeRate {
    ExchangeRate {
        id: Id::new(),
        pair: pair.to_string(),
        price: price.usd,
        price_change_24h: price.usd_24h_change.unwrap_or(0.0),
        volume_24h: price.usd_24h_vol.unwrap_or(0.0),
        high_24h: price.usd * 1.02,
        low_24h: price.usd * 0.98,
        market_cap: price.usd_market_cap.unwrap_or(0.0),
        last_updated: now,
    }
}

pub async fn cli(args: &[String]) {
    let conf = Conf::new().unwrap_or_else(|e| {
        error!(%e, "Unable to load conf");
        exit(1);
    });
    let pool = db::pool().unwrap_or_else(|e| {
        error!(%e, "Unable to open database");
        exit(1);
    });
    db::migrate_to_latest(&mut pool.get().unwrap()).unwrap_or_else(|e| {
        error!(%e, "Unable to migrate database");
        exit(1);
    });
    let provider = CoinGecko::new(conf.providers.coingecko.clone());
    let rates = ExchangeRateRepository::new(pool.clone());
    let history = RateHistoryRepository::new(pool);

    match args.first().map(String::as_str) {
        None => schedule(&conf.refresh.schedule, &provider, &rates, &history)
            .await
            .unwrap_or_else(|e| {
                error!(%e, "Unable to schedule refresh");
                exit(1);
            }),
        Some("now") => match run(&provider, &rates, &history).await {
            Ok(res) => info!(updated = res.updated.len(), "Refreshed rates"),
            Err(e) => {
                error!(%e, "Refresh failed");
                exit(1);
            }
        },
        Some(_) => {
            error!(?args, "Unknown argument");
            exit(1);
        }
    }
}

async fn schedule(
    expr: &str,
    provider: &dyn Provider,
    rates: &ExchangeRateRepository,
    history: &RateHistoryRepository,
) -> Result<()> {
    warn!(provider = %provider.name(), schedule = expr, "Scheduling rate refresh...");
    let schedule = Schedule::from_str(expr)?;

    for next_tick in schedule.upcoming(Utc) {
        let time_to_next_tick = next_tick.signed_duration_since(Utc::now());
        if time_to_next_tick.num_milliseconds() < 0 {
            warn!("Skipping a tick because the old one didn't finish in time");
            continue;
        }
        sleep(time_to_next_tick.to_std()?).await;
        info!(provider = %provider.name(), %next_tick, "Refreshing rates");
        match run(provider, rates, history).await {
            Ok(res) => info!(updated = res.updated.len(), "Refreshed rates"),
            Err(e) => error!(%e, "Scheduled refresh failed"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::run;
    use crate::{
        provider::SpotPrice,
        repository::{ExchangeRateRepository, RateHistoryRepository},
        test::{pool, FakeProvider},
    };
    use anyhow::Result;
    use chrono::Utc;

    #[tokio::test]
    async fn overwrites_rows_and_grows_history() -> Result<()> {
        let pool = pool();
        let rates = ExchangeRateRepository::new(pool.clone());
        let history = RateHistoryRepository::new(pool);
        let provider = FakeProvider::new();

        let first = run(&provider, &rates, &history).await?;
        let second = run(&provider, &rates, &history).await?;

        assert_eq!(10, first.updated.len());
        assert_eq!(first.updated, second.updated);
        assert_eq!(first.rates.len(), second.rates.len());
        let first_ids: Vec<_> = first.rates.iter().map(|it| it.id.clone()).collect();
        let second_ids: Vec<_> = second.rates.iter().map(|it| it.id.clone()).collect();
        assert_eq!(first_ids, second_ids);
        assert_eq!(20, history.count()?);
        Ok(())
    }

    #[tokio::test]
    async fn derives_high_and_low_from_spot() -> Result<()> {
        let pool = pool();
        let rates = ExchangeRateRepository::new(pool.clone());
        let history = RateHistoryRepository::new(pool);
        let res = run(&FakeProvider::new(), &rates, &history).await?;
        for row in &res.rates {
            assert_eq!(row.price * 1.02, row.high_24h);
            assert_eq!(row.price * 0.98, row.low_24h);
        }
        Ok(())
    }

    #[tokio::test]
    async fn skips_unmapped_assets() -> Result<()> {
        let pool = pool();
        let rates = ExchangeRateRepository::new(pool.clone());
        let history = RateHistoryRepository::new(pool);
        let mut provider = FakeProvider::new();
        provider.conf.assets.push("shiba-inu".into());
        provider.prices.insert(
            "shiba-inu".into(),
            SpotPrice {
                usd: 0.00001,
                usd_24h_change: None,
                usd_24h_vol: None,
                usd_market_cap: None,
            },
        );

        let res = run(&provider, &rates, &history).await?;
        assert_eq!(10, res.updated.len());
        assert_eq!(10, res.rates.len());
        Ok(())
    }

    #[tokio::test]
    async fn empty_provider_response() -> Result<()> {
        let pool = pool();
        let rates = ExchangeRateRepository::new(pool.clone());
        let history = RateHistoryRepository::new(pool);
        let mut provider = FakeProvider::new();
        provider.prices.clear();

        let res = run(&provider, &rates, &history).await?;
        assert!(res.updated.is_empty());
        assert!(res.rates.is_empty());
        assert_eq!(0, history.count()?);
        Ok(())
    }

    #[tokio::test]
    async fn defaults_missing_fields_to_zero() -> Result<()> {
        let pool = pool();
        let rates = ExchangeRateRepository::new(pool.clone());
        let history = RateHistoryRepository::new(pool);
        let mut provider = FakeProvider::new();
        for price in provider.prices.values_mut() {
            price.usd_24h_change = None;
            price.usd_24h_vol = None;
            price.usd_market_cap = None;
        }

        let res = run(&provider, &rates, &history).await?;
        for row in &res.rates {
            assert_eq!(0.0, row.price_change_24h);
            assert_eq!(0.0, row.volume_24h);
            assert_eq!(0.0, row.market_cap);
        }
        Ok(())
    }

    #[tokio::test]
    async fn provider_failure_aborts() -> Result<()> {
        let pool = pool();
        let rates = ExchangeRateRepository::new(pool.clone());
        let history = RateHistoryRepository::new(pool);
        assert!(run(&FakeProvider::failing(), &rates, &history)
            .await
            .is_err());
        assert!(rates.select_all()?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn response_timestamp_is_fresh() -> Result<()> {
        let pool = pool();
        let rates = ExchangeRateRepository::new(pool.clone());
        let history = RateHistoryRepository::new(pool);
        let before = Utc::now();
        let res = run(&FakeProvider::new(), &rates, &history).await?;
        assert!(res.timestamp >= before);
        assert!(res.timestamp <= Utc::now());
        Ok(())
    }
}
