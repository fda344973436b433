pub mod rates;
pub mod refresh;
