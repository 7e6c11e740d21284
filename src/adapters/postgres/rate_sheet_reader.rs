//! PostgreSQL implementation of RateSheetReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::ratesheet::{RateSheetLane, WeightBreak};
use crate::domain::shipment::Location;
use crate::ports::RateSheetReader;

use super::{db_error, parse_currency};

/// Reads rate-sheet lanes and their weight breaks.
pub struct PostgresRateSheetReader {
    pool: PgPool,
}

impl PostgresRateSheetReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LaneRow {
    id: Uuid,
    carrier_code: String,
    carrier_name: String,
    service_code: String,
    service_name: String,
    origin_city: String,
    origin_region: String,
    destination_city: String,
    destination_region: String,
    currency: String,
    minimum_charge_cents: i64,
    transit_days: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct BreakRow {
    lane_id: Uuid,
    min_weight_lb: f64,
    per_100lb_cents: i64,
}

#[async_trait]
impl RateSheetReader for PostgresRateSheetReader {
    async fn lanes_for(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<Vec<RateSheetLane>, DomainError> {
        let lanes: Vec<LaneRow> = sqlx::query_as(
            r#"
            SELECT id, carrier_code, carrier_name, service_code, service_name,
                   origin_city, origin_region, destination_city, destination_region,
                   currency, minimum_charge_cents, transit_days
            FROM rate_sheet_lanes
            WHERE LOWER(origin_city) = LOWER($1) AND origin_region = $2
              AND LOWER(destination_city) = LOWER($3) AND destination_region = $4
            "#,
        )
        .bind(origin.city())
        .bind(origin.region_code())
        .bind(destination.city())
        .bind(destination.region_code())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        if lanes.is_empty() {
            return Ok(Vec::new());
        }

        let lane_ids: Vec<Uuid> = lanes.iter().map(|l| l.id).collect();
        let breaks: Vec<BreakRow> = sqlx::query_as(
            r#"
            SELECT lane_id, min_weight_lb, per_100lb_cents
            FROM rate_sheet_breaks
            WHERE lane_id = ANY($1)
            "#,
        )
        .bind(&lane_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let mut result = Vec::with_capacity(lanes.len());
        for lane in lanes {
            let lane_breaks: Vec<WeightBreak> = breaks
                .iter()
                .filter(|b| b.lane_id == lane.id)
                .map(|b| WeightBreak {
                    min_weight_lb: b.min_weight_lb,
                    per_100lb_cents: b.per_100lb_cents,
                })
                .collect();
            if lane_breaks.is_empty() {
                // A lane without breaks cannot price anything; skip it
                // rather than failing every quote on the pair.
                tracing::warn!(
                    carrier = %lane.carrier_code,
                    service = %lane.service_code,
                    "rate sheet lane has no weight breaks, skipping"
                );
                continue;
            }
            result.push(RateSheetLane::new(
                lane.carrier_code,
                lane.carrier_name,
                lane.service_code,
                lane.service_name,
                lane.origin_city,
                lane.origin_region,
                lane.destination_city,
                lane.destination_region,
                parse_currency(&lane.currency)?,
                lane.minimum_charge_cents,
                lane.transit_days.max(0) as u32,
                lane_breaks,
            )?);
        }

        Ok(result)
    }
}
