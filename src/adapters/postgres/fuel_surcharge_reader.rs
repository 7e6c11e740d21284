//! PostgreSQL implementation of FuelSurchargeReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::ports::FuelSurchargeReader;

use super::db_error;

/// Reads the weekly-updated fuel surcharge table.
pub struct PostgresFuelSurchargeReader {
    pool: PgPool,
}

impl PostgresFuelSurchargeReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FuelRow {
    percentage: f64,
}

#[async_trait]
impl FuelSurchargeReader for PostgresFuelSurchargeReader {
    async fn fuel_percentage(
        &self,
        carrier_code: &str,
        cross_border: bool,
    ) -> Result<Option<f64>, DomainError> {
        let row: Option<FuelRow> = sqlx::query_as(
            r#"
            SELECT percentage
            FROM fuel_surcharges
            WHERE carrier_code = $1 AND cross_border = $2
            "#,
        )
        .bind(carrier_code)
        .bind(cross_border)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(|r| r.percentage))
    }
}
