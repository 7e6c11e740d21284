//! Regression provider: prices shipments with fitted lane models.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::pricing::RateSource;
use crate::domain::shipment::Shipment;
use crate::ports::{CarrierRate, ProviderInfo, RateError, RateProvider, RegressionModelReader};

/// Offers estimated rates from offline-fitted linear models.
///
/// Models below the confidence floor are filtered out rather than offered
/// with a caveat; an unreliable estimate is worse than no estimate.
pub struct RegressionProvider {
    reader: Arc<dyn RegressionModelReader>,
    cubic_factor: f64,
    confidence_floor: f64,
}

impl RegressionProvider {
    pub fn new(
        reader: Arc<dyn RegressionModelReader>,
        cubic_factor: f64,
        confidence_floor: f64,
    ) -> Self {
        Self {
            reader,
            cubic_factor,
            confidence_floor,
        }
    }
}

#[async_trait]
impl RateProvider for RegressionProvider {
    async fn rate(&self, shipment: &Shipment) -> Result<Vec<CarrierRate>, RateError> {
        let models = self
            .reader
            .models_for(
                shipment.origin().region_code(),
                shipment.destination().region_code(),
            )
            .await
            .map_err(|e| RateError::unavailable(e.to_string()))?;

        let weight_kg = shipment.chargeable_weight_kg(self.cubic_factor);

        let rates = models
            .into_iter()
            .filter(|model| {
                let confident = model.meets_confidence(self.confidence_floor);
                if !confident {
                    tracing::debug!(
                        carrier = %model.carrier_code,
                        r_squared = model.r_squared,
                        floor = self.confidence_floor,
                        "model below confidence floor, not offered"
                    );
                }
                confident
            })
            .map(|model| CarrierRate {
                freight: model.predict(weight_kg),
                carrier_code: model.carrier_code,
                carrier_name: model.carrier_name,
                service_code: model.service_code,
                service_name: model.service_name,
                transit_days: Some(model.transit_days),
                source: RateSource::Regression,
            })
            .collect();

        Ok(rates)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("regression", RateSource::Regression)
    }
}
