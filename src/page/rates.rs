use super::PageConf;
use crate::model::RefreshResponse;
use anyhow::Result;
use tracing::error;

pub struct RatesClient {
    http: reqwest::Client,
    url: String,
    key: String,
}

impl RatesClient {
    pub fn new(conf: &PageConf) -> RatesClient {
        // A missing conf value degrades the widget, it never halts the page
        if conf.service_url.is_empty() || conf.service_key.is_empty() {
            error!("Service url or key is missing, live rates will be unavailable");
        }
        RatesClient {
            http: reqwest::Client::new(),
            url: conf.service_url.clone(),
            key: conf.service_key.clone(),
        }
    }

    pub async fn refresh(&self) -> Result<RefreshResponse> {
        let url = format!("{}/rates/refresh", self.url);
        let res = self.http.get(&url).bearer_auth(&self.key).send().await?;
        Ok(res.json().await?)
    }
}
