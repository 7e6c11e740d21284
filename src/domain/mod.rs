//! Domain layer - pure rating logic, no I/O.

pub mod foundation;
pub mod pricing;
pub mod regression;
pub mod ratesheet;
pub mod rules;
pub mod shipment;
