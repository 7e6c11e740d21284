//! The customer-facing quote produced by the landed-cost pipeline.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, Money, QuoteId};
use crate::domain::rules::Surcharge;

/// Which pricing source produced a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    RateSheet,
    Regression,
    Live,
}

/// The tax line on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    /// Tax code shown to the customer (GST, HST).
    pub code: String,
    pub percentage: f64,
    pub amount: Money,
}

/// A landed, marked-up, currency-normalized quote.
///
/// Line amounts (freight, surcharges, fuel) are customer prices in the
/// quote currency; `subtotal` is their sum and `total` adds the tax line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: QuoteId,
    pub carrier_code: String,
    pub carrier_name: String,
    pub service_code: String,
    pub service_name: String,
    pub freight: Money,
    pub surcharges: Vec<Surcharge>,
    pub fuel: Option<Surcharge>,
    pub tax: TaxLine,
    pub subtotal: Money,
    pub total: Money,
    pub currency: Currency,
    pub transit_days: Option<u32>,
    pub source: RateSource,
}

impl Quote {
    /// Dedup key: one quote per carrier/service pair survives merging.
    pub fn dedup_key(&self) -> (String, String) {
        (self.carrier_code.clone(), self.service_code.clone())
    }
}
