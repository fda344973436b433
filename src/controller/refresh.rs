use crate::{
    model::{ApiError, ApiResult, RefreshResponse},
    provider::Provider,
    repository::{ExchangeRateRepository, RateHistoryRepository},
    service::refresh,
};
use rocket::{get, options, post, serde::json::Json, State};

#[get("/rates/refresh")]
pub async fn get(
    provider: &State<Box<dyn Provider>>,
    rates: &State<ExchangeRateRepository>,
    history: &State<RateHistoryRepository>,
) -> ApiResult<RefreshResponse> {
    refresh_now(provider, rates, history).await
}

#[post("/rates/refresh")]
pub async fn post(
    provider: &State<Box<dyn Provider>>,
    rates: &State<ExchangeRateRepository>,
    history: &State<RateHistoryRepository>,
) -> ApiResult<RefreshResponse> {
    refresh_now(provider, rates, history).await
}

// CORS preflight, the headers come from the response fairing
#[options("/<_..>")]
pub fn preflight() {}

async fn refresh_now(
    provider: &State<Box<dyn Provider>>,
    rates: &State<ExchangeRateRepository>,
    history: &State<RateHistoryRepository>,
) -> ApiResult<RefreshResponse> {
    match refresh::run(provider.inner().as_ref(), rates, history).await {
        Ok(body) => ApiResult::Ok(Json(body)),
        Err(e) => ApiError::new(500, e).into(),
    }
}
