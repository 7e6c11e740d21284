//! Exchange-rate source adapters.

mod cached;
mod fixed;
mod open_exchange;

pub use cached::CachedExchangeRates;
pub use fixed::FixedExchangeRates;
pub use open_exchange::{OpenExchangeConfig, OpenExchangeSource};
