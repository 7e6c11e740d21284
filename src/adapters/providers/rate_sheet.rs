//! Rate-sheet provider: prices shipments against static lane tables.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::pricing::RateSource;
use crate::domain::shipment::Shipment;
use crate::ports::{CarrierRate, ProviderInfo, RateError, RateProvider, RateSheetReader};

/// Prices shipments against DB-stored rate sheets.
///
/// For carriers without a live quoting API. Each matching lane rates the
/// shipment's chargeable weight (in pounds, per the sheets) independently;
/// a lane that fails to rate is skipped with a warning rather than sinking
/// the provider.
pub struct RateSheetProvider {
    reader: Arc<dyn RateSheetReader>,
    cubic_factor: f64,
}

impl RateSheetProvider {
    pub fn new(reader: Arc<dyn RateSheetReader>, cubic_factor: f64) -> Self {
        Self {
            reader,
            cubic_factor,
        }
    }
}

#[async_trait]
impl RateProvider for RateSheetProvider {
    async fn rate(&self, shipment: &Shipment) -> Result<Vec<CarrierRate>, RateError> {
        let lanes = self
            .reader
            .lanes_for(shipment.origin(), shipment.destination())
            .await
            .map_err(|e| RateError::unavailable(e.to_string()))?;

        let weight_lb = shipment.chargeable_weight_lb(self.cubic_factor);

        let mut rates = Vec::with_capacity(lanes.len());
        for lane in lanes {
            match lane.freight_for(weight_lb) {
                Ok(freight) => rates.push(CarrierRate {
                    carrier_code: lane.carrier_code.clone(),
                    carrier_name: lane.carrier_name.clone(),
                    service_code: lane.service_code.clone(),
                    service_name: lane.service_name.clone(),
                    freight,
                    transit_days: Some(lane.transit_days),
                    source: RateSource::RateSheet,
                }),
                Err(err) => {
                    tracing::warn!(
                        carrier = %lane.carrier_code,
                        service = %lane.service_code,
                        error = %err,
                        "skipping lane that failed to rate"
                    );
                }
            }
        }

        Ok(rates)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("ratesheet", RateSource::RateSheet)
    }
}
