pub mod exchange_rate;
pub use exchange_rate::ExchangeRateRepository;
pub mod rate_history;
pub use rate_history::RateHistoryRepository;
