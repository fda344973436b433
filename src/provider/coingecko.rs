use crate::provider::{Provider, SpotPrice};
use anyhow::{bail, Result};
use serde::Deserialize;
use std::collections::HashMap;

pub struct CoinGecko {
    conf: CoinGeckoConf,
}

#[derive(Clone, Deserialize)]
pub struct CoinGeckoConf {
    pub url: String,
    pub assets: Vec<String>,
    pub pairs: HashMap<String, String>,
}

impl CoinGecko {
    pub fn new(conf: CoinGeckoConf) -> CoinGecko {
        CoinGecko { conf }
    }
}

#[rocket::async_trait]
impl Provider for CoinGecko {
    fn name(&self) -> String {
        "coingecko".into()
    }

    fn assets(&self) -> &[String] {
        &self.conf.assets
    }

    fn pair(&self, asset: &str) -> Option<&str> {
        self.conf.pairs.get(asset).map(|it| it.as_str())
    }

    async fn spot_prices(&self) -> Result<HashMap<String, SpotPrice>> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true&include_24hr_vol=true&include_market_cap=true",
            self.conf.url,
            self.conf.assets.join(",")
        );
        let res = reqwest::get(&url).await?;
        if !res.status().is_success() {
            bail!("CoinGecko API error: {}", res.status());
        }
        Ok(res.json().await?)
    }
}
