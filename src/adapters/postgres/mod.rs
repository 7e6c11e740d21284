//! PostgreSQL implementations of the reader ports.

mod fuel_surcharge_reader;
mod markup_reader;
mod rate_sheet_reader;
mod regression_model_reader;
mod surcharge_rule_reader;

pub use fuel_surcharge_reader::PostgresFuelSurchargeReader;
pub use markup_reader::PostgresMarkupReader;
pub use rate_sheet_reader::PostgresRateSheetReader;
pub use regression_model_reader::PostgresRegressionModelReader;
pub use surcharge_rule_reader::PostgresSurchargeRuleReader;

use crate::domain::foundation::{Currency, DomainError, ErrorCode};

pub(crate) fn db_error(err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, err.to_string())
}

pub(crate) fn parse_currency(code: &str) -> Result<Currency, DomainError> {
    Currency::parse(code).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid currency value: {}", code),
        )
    })
}
