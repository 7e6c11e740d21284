//! Static rate-sheet pricing: lane plus weight-break tables.
//!
//! Used for carriers without a live quoting API. Each lane carries a set of
//! weight breaks priced per 100 lb and a minimum charge.

mod lane;

pub use lane::{RateSheetLane, WeightBreak};
