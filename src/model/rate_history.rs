use crate::model::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateHistoryEntry {
    pub id: Id,
    pub pair: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}
