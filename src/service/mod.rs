pub mod exchange_rate;
pub mod rate_history;
pub mod refresh;
