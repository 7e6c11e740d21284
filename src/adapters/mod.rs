//! Adapters - infrastructure implementations of the ports.

pub mod cache;
pub mod currency;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod providers;
