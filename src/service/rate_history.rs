use crate::{model::RateHistoryEntry, repository::RateHistoryRepository};
use anyhow::Result;

pub fn get_by_pair(pair: &str, repo: &RateHistoryRepository) -> Result<Vec<RateHistoryEntry>> {
    repo.select_by_pair(pair)
}
