//! Regression pricing model ("ubbe ML").
//!
//! A per-lane linear model fitted offline against historical quotes:
//! price = intercept + slope x chargeable weight, floored at a minimum
//! charge. Models below a confidence floor (r squared) are not offered.

mod model;

pub use model::RegressionModel;
