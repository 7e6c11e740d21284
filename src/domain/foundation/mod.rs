//! Foundation types shared across the domain: money, errors, ids, time.

mod currency;
mod errors;
mod ids;
mod money;
mod timestamp;

pub use currency::Currency;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AccountId, QuoteId, QuoteRequestId};
pub use money::Money;
pub use timestamp::Timestamp;
