//! ubbe - Multi-carrier freight rating backend.
//!
//! Quotes shipments against multiple pricing sources (static rate sheets,
//! a regression pricing model, live-style providers) and computes landed
//! cost: freight, surcharge rules, fuel, tax, currency conversion, markup.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
