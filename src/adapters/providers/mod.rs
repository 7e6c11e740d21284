//! Rate provider adapters: the pricing sources the aggregator fans out to.

mod mock;
mod rate_sheet;
mod regression;

pub use mock::MockRateProvider;
pub use rate_sheet::RateSheetProvider;
pub use regression::RegressionProvider;
