//! PostgreSQL implementation of MarkupReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::pricing::Markup;
use crate::ports::MarkupReader;

use super::db_error;

/// Default margin applied when a subaccount has no markup row.
const DEFAULT_BASE_PERCENTAGE: f64 = 15.0;

/// Reads per-subaccount markups and carrier overrides.
pub struct PostgresMarkupReader {
    pool: PgPool,
}

impl PostgresMarkupReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MarkupRow {
    base_percentage: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct OverrideRow {
    carrier_code: String,
    percentage: f64,
}

#[async_trait]
impl MarkupReader for PostgresMarkupReader {
    async fn markup_for(&self, account: &AccountId) -> Result<Markup, DomainError> {
        let row: Option<MarkupRow> = sqlx::query_as(
            r#"
            SELECT base_percentage
            FROM account_markups
            WHERE account_id = $1
            "#,
        )
        .bind(account.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        let base = match row {
            Some(row) => row.base_percentage,
            None => {
                tracing::debug!(account = %account, "no markup row, using default");
                DEFAULT_BASE_PERCENTAGE
            }
        };

        let overrides: Vec<OverrideRow> = sqlx::query_as(
            r#"
            SELECT carrier_code, percentage
            FROM carrier_markup_overrides
            WHERE account_id = $1
            "#,
        )
        .bind(account.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let mut markup = Markup::new(base);
        for row in overrides {
            markup = markup.with_carrier_override(row.carrier_code, row.percentage);
        }
        Ok(markup)
    }
}
