use crate::model::ExchangeRate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub updated: Vec<String>,
    pub rates: Vec<ExchangeRate>,
    pub timestamp: DateTime<Utc>,
}

impl RefreshResponse {
    pub fn new(updated: Vec<String>, rates: Vec<ExchangeRate>) -> RefreshResponse {
        RefreshResponse {
            success: true,
            updated,
            rates,
            timestamp: Utc::now(),
        }
    }
}
