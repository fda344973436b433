use crate::{
    model::{ApiResult, ExchangeRate, RateHistoryEntry},
    repository::{ExchangeRateRepository, RateHistoryRepository},
    service::{exchange_rate, rate_history},
};
use rocket::{get, State};

#[get("/rates")]
pub async fn get_all(repo: &State<ExchangeRateRepository>) -> ApiResult<Vec<ExchangeRate>> {
    ApiResult::new(exchange_rate::get_all(repo).map(Some))
}

#[get("/rates/<pair>")]
pub async fn get_one(pair: &str, repo: &State<ExchangeRateRepository>) -> ApiResult<ExchangeRate> {
    ApiResult::new(exchange_rate::get_by_pair(pair, repo))
}

#[get("/rates/<pair>/history")]
pub async fn get_history(
    pair: &str,
    repo: &State<RateHistoryRepository>,
) -> ApiResult<Vec<RateHistoryEntry>> {
    ApiResult::new(rate_history::get_by_pair(pair, repo).map(Some))
}
