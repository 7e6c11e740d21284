//! In-memory reader implementations for tests and single-process
//! development. Production wiring uses the Postgres readers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::pricing::Markup;
use crate::domain::ratesheet::RateSheetLane;
use crate::domain::regression::RegressionModel;
use crate::domain::rules::SurchargeRule;
use crate::domain::shipment::Location;
use crate::ports::{
    FuelSurchargeReader, MarkupReader, RateSheetReader, RegressionModelReader,
    SurchargeRuleReader,
};

/// Lanes matched by origin/destination city and region.
#[derive(Debug, Default)]
pub struct InMemoryRateSheets {
    lanes: Mutex<Vec<RateSheetLane>>,
}

impl InMemoryRateSheets {
    pub fn with_lane(self, lane: RateSheetLane) -> Self {
        self.lanes.lock().unwrap().push(lane);
        self
    }
}

#[async_trait]
impl RateSheetReader for InMemoryRateSheets {
    async fn lanes_for(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<Vec<RateSheetLane>, DomainError> {
        Ok(self
            .lanes
            .lock()
            .unwrap()
            .iter()
            .filter(|lane| {
                lane.origin_city.eq_ignore_ascii_case(origin.city())
                    && lane.origin_region == origin.region_code()
                    && lane.destination_city.eq_ignore_ascii_case(destination.city())
                    && lane.destination_region == destination.region_code()
            })
            .cloned()
            .collect())
    }
}

/// Models matched by region pair.
#[derive(Debug, Default)]
pub struct InMemoryRegressionModels {
    models: Mutex<Vec<RegressionModel>>,
}

impl InMemoryRegressionModels {
    pub fn with_model(self, model: RegressionModel) -> Self {
        self.models.lock().unwrap().push(model);
        self
    }
}

#[async_trait]
impl RegressionModelReader for InMemoryRegressionModels {
    async fn models_for(
        &self,
        origin_region: &str,
        destination_region: &str,
    ) -> Result<Vec<RegressionModel>, DomainError> {
        Ok(self
            .models
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                m.origin_region == origin_region && m.destination_region == destination_region
            })
            .cloned()
            .collect())
    }
}

/// Rules keyed by carrier code.
#[derive(Debug, Default)]
pub struct InMemorySurchargeRules {
    rules: Mutex<Vec<SurchargeRule>>,
}

impl InMemorySurchargeRules {
    pub fn with_rule(self, rule: SurchargeRule) -> Self {
        self.rules.lock().unwrap().push(rule);
        self
    }
}

#[async_trait]
impl SurchargeRuleReader for InMemorySurchargeRules {
    async fn rules_for(&self, carrier_code: &str) -> Result<Vec<SurchargeRule>, DomainError> {
        Ok(self
            .rules
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.carrier_code == carrier_code)
            .cloned()
            .collect())
    }
}

/// Markups keyed by account, with a default for unknown accounts.
#[derive(Debug)]
pub struct InMemoryMarkups {
    default: Markup,
    by_account: Mutex<HashMap<AccountId, Markup>>,
}

impl InMemoryMarkups {
    pub fn with_default(default: Markup) -> Self {
        Self {
            default,
            by_account: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_account(self, account: AccountId, markup: Markup) -> Self {
        self.by_account.lock().unwrap().insert(account, markup);
        self
    }
}

#[async_trait]
impl MarkupReader for InMemoryMarkups {
    async fn markup_for(&self, account: &AccountId) -> Result<Markup, DomainError> {
        Ok(self
            .by_account
            .lock()
            .unwrap()
            .get(account)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }
}

/// Fuel percentages keyed by carrier and service class.
#[derive(Debug, Default)]
pub struct InMemoryFuelSurcharges {
    by_carrier: Mutex<HashMap<(String, bool), f64>>,
}

impl InMemoryFuelSurcharges {
    pub fn with_percentage(
        self,
        carrier_code: impl Into<String>,
        cross_border: bool,
        percentage: f64,
    ) -> Self {
        self.by_carrier
            .lock()
            .unwrap()
            .insert((carrier_code.into(), cross_border), percentage);
        self
    }
}

#[async_trait]
impl FuelSurchargeReader for InMemoryFuelSurcharges {
    async fn fuel_percentage(
        &self,
        carrier_code: &str,
        cross_border: bool,
    ) -> Result<Option<f64>, DomainError> {
        Ok(self
            .by_carrier
            .lock()
            .unwrap()
            .get(&(carrier_code.to_string(), cross_border))
            .copied())
    }
}
