//! Application layer - the rating pipeline.

mod aggregator;
mod landed_cost;

pub use aggregator::{ProviderFailure, RateAggregator, RateRequest, RatedResponse};
pub use landed_cost::LandedCostEngine;
