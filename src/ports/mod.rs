//! Ports - trait interfaces between the application core and adapters.

mod exchange_rates;
mod fuel_surcharge_reader;
mod markup_reader;
mod quote_cache;
mod rate_provider;
mod rate_sheet_reader;
mod regression_model_reader;
mod surcharge_rule_reader;

pub use exchange_rates::{ExchangeRateError, ExchangeRateSource};
pub use fuel_surcharge_reader::FuelSurchargeReader;
pub use markup_reader::MarkupReader;
pub use quote_cache::{CacheError, QuoteCache};
pub use rate_provider::{CarrierRate, ProviderInfo, RateError, RateProvider};
pub use rate_sheet_reader::RateSheetReader;
pub use regression_model_reader::RegressionModelReader;
pub use surcharge_rule_reader::SurchargeRuleReader;
