use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Deserialize)]
pub struct SpotPrice {
    pub usd: f64,
    pub usd_24h_change: Option<f64>,
    pub usd_24h_vol: Option<f64>,
    pub usd_market_cap: Option<f64>,
}

#[rocket::async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> String;

    fn assets(&self) -> &[String];

    fn pair(&self, asset: &str) -> Option<&str>;

    async fn spot_prices(&self) -> Result<HashMap<String, SpotPrice>>;
}
