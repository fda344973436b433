pub mod api_error;
pub use api_error::ApiError;
pub mod api_result;
pub use api_result::ApiResult;
pub mod exchange_rate;
pub use exchange_rate::ExchangeRate;
pub mod id;
pub use id::Id;
pub mod lead;
pub use lead::Lead;
pub mod rate_history;
pub use rate_history::RateHistoryEntry;
pub mod refresh;
pub use refresh::RefreshResponse;
