use crate::{model::ExchangeRate, repository::ExchangeRateRepository};
use anyhow::Result;

pub fn get_all(repo: &ExchangeRateRepository) -> Result<Vec<ExchangeRate>> {
    repo.select_all()
}

pub fn get_by_pair(pair: &str, repo: &ExchangeRateRepository) -> Result<Option<ExchangeRate>> {
    repo.select_by_pair(pair)
}
