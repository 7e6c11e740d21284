//! PostgreSQL implementation of RegressionModelReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::regression::RegressionModel;
use crate::ports::RegressionModelReader;

use super::{db_error, parse_currency};

/// Reads fitted pricing models produced by the offline training job.
pub struct PostgresRegressionModelReader {
    pool: PgPool,
}

impl PostgresRegressionModelReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ModelRow {
    carrier_code: String,
    carrier_name: String,
    service_code: String,
    service_name: String,
    origin_region: String,
    destination_region: String,
    currency: String,
    intercept_cents: i64,
    cents_per_kg: f64,
    minimum_charge_cents: i64,
    r_squared: f64,
    transit_days: i32,
}

#[async_trait]
impl RegressionModelReader for PostgresRegressionModelReader {
    async fn models_for(
        &self,
        origin_region: &str,
        destination_region: &str,
    ) -> Result<Vec<RegressionModel>, DomainError> {
        let rows: Vec<ModelRow> = sqlx::query_as(
            r#"
            SELECT carrier_code, carrier_name, service_code, service_name,
                   origin_region, destination_region, currency,
                   intercept_cents, cents_per_kg, minimum_charge_cents,
                   r_squared, transit_days
            FROM regression_models
            WHERE origin_region = $1 AND destination_region = $2
            "#,
        )
        .bind(origin_region)
        .bind(destination_region)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(RegressionModel {
                    currency: parse_currency(&row.currency)?,
                    carrier_code: row.carrier_code,
                    carrier_name: row.carrier_name,
                    service_code: row.service_code,
                    service_name: row.service_name,
                    origin_region: row.origin_region,
                    destination_region: row.destination_region,
                    intercept_cents: row.intercept_cents,
                    cents_per_kg: row.cents_per_kg,
                    minimum_charge_cents: row.minimum_charge_cents,
                    r_squared: row.r_squared,
                    transit_days: row.transit_days.max(0) as u32,
                })
            })
            .collect()
    }
}
