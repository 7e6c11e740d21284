//! Mock rate provider for testing.
//!
//! Configurable to return queued rates, simulate latency, or inject
//! errors, with call tracking for verification.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::pricing::RateSource;
use crate::domain::shipment::Shipment;
use crate::ports::{CarrierRate, ProviderInfo, RateError, RateProvider};

/// One scripted outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Rates(Vec<CarrierRate>),
    Error(RateError),
}

/// Scriptable provider for tests.
///
/// Outcomes are consumed in order; once exhausted the provider returns an
/// empty rate list, which mirrors a source with nothing for the lane.
#[derive(Debug, Clone)]
pub struct MockRateProvider {
    name: String,
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<Shipment>>>,
}

impl MockRateProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_rates(self, rates: Vec<CarrierRate>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Rates(rates));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: RateError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Adds latency to every call, for timeout testing.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shipments this provider has been asked to rate.
    pub fn calls(&self) -> Arc<Mutex<Vec<Shipment>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl RateProvider for MockRateProvider {
    async fn rate(&self, shipment: &Shipment) -> Result<Vec<CarrierRate>, RateError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.calls.lock().unwrap().push(shipment.clone());

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Rates(rates)) => Ok(rates),
            Some(MockOutcome::Error(error)) => Err(error),
            None => Ok(Vec::new()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(self.name.clone(), RateSource::Live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Currency, Money};
    use crate::domain::shipment::{Location, Package, Packaging};

    fn shipment() -> Shipment {
        Shipment::new(
            Location::new("Edmonton", "AB", "CA", "T5J0K7").unwrap(),
            Location::new("Calgary", "AB", "CA", "T2P1J9").unwrap(),
            vec![Package::new(1, 10.0, 10.0, 10.0, 10.0, Packaging::Box).unwrap()],
            vec![],
            false,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn outcomes_are_consumed_in_order() {
        let provider = MockRateProvider::new("mock")
            .with_rates(vec![CarrierRate {
                carrier_code: "X".to_string(),
                carrier_name: "X".to_string(),
                service_code: "LTL".to_string(),
                service_name: "LTL".to_string(),
                freight: Money::from_cents(100, Currency::Cad),
                transit_days: None,
                source: RateSource::Live,
            }])
            .with_error(RateError::unavailable("down"));

        assert_eq!(provider.rate(&shipment()).await.unwrap().len(), 1);
        assert!(provider.rate(&shipment()).await.is_err());
        // Exhausted: nothing offered.
        assert!(provider.rate(&shipment()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn calls_are_tracked() {
        let provider = MockRateProvider::new("mock");
        let calls = provider.calls();
        provider.rate(&shipment()).await.unwrap();
        assert_eq!(calls.lock().unwrap().len(), 1);
    }
}
