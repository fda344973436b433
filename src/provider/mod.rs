mod provider;
pub use provider::{Provider, SpotPrice};
mod coingecko;
pub use coingecko::{CoinGecko, CoinGeckoConf};
