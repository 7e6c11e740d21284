//! Pricing types: quotes, markups, sales tax.

mod markup;
mod quote;
mod tax;

pub use markup::Markup;
pub use quote::{Quote, RateSource, TaxLine};
pub use tax::tax_rate_for;
pub use tax::TaxRate;
