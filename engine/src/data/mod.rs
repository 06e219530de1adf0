// Market data acquisition and shaping
pub mod coingecko;
pub mod transform;

pub use coingecko::{CoinGeckoClient, PriceSource};
pub use transform::build_price_series;
