//! Landed-cost pipeline: one carrier rate in, one customer quote out.
//!
//! Order is fixed: surcharge rules, then fuel, then currency normalization,
//! then markup, then sales tax on the marked-up subtotal. Every step
//! quantizes to cents through `Money`.

use std::sync::Arc;

use crate::domain::foundation::{Currency, DomainError, ErrorCode, Money, QuoteId};
use crate::domain::pricing::{tax_rate_for, Markup, Quote, TaxLine};
use crate::domain::rules::{RuleContext, Surcharge};
use crate::domain::shipment::Shipment;
use crate::ports::{CarrierRate, ExchangeRateSource, FuelSurchargeReader, SurchargeRuleReader};

/// Fuel surcharge line code.
const FUEL_CODE: &str = "FUEL";

/// Turns raw carrier rates into landed, marked-up customer quotes.
pub struct LandedCostEngine {
    rule_reader: Arc<dyn SurchargeRuleReader>,
    fuel_reader: Arc<dyn FuelSurchargeReader>,
    exchange: Arc<dyn ExchangeRateSource>,
    cubic_factor: f64,
}

impl LandedCostEngine {
    pub fn new(
        rule_reader: Arc<dyn SurchargeRuleReader>,
        fuel_reader: Arc<dyn FuelSurchargeReader>,
        exchange: Arc<dyn ExchangeRateSource>,
        cubic_factor: f64,
    ) -> Self {
        Self {
            rule_reader,
            fuel_reader,
            exchange,
            cubic_factor,
        }
    }

    /// Prices one carrier rate for a shipment.
    pub async fn price(
        &self,
        shipment: &Shipment,
        rate: &CarrierRate,
        markup: &Markup,
        target: Currency,
    ) -> Result<Quote, DomainError> {
        let native = rate.freight.currency();
        let delivery_region = shipment.destination().region_code();
        let ctx = RuleContext::new(shipment, rate.freight, self.cubic_factor);

        // 1. Surcharge rules: mandatory plus requested options.
        let rules = self.rule_reader.rules_for(&rate.carrier_code).await?;
        let mut surcharges: Vec<Surcharge> = Vec::new();
        for rule in &rules {
            if !rule.applies(delivery_region, shipment.requested_options()) {
                continue;
            }
            if let Some(surcharge) = rule.evaluate(&ctx, native)? {
                surcharges.push(surcharge);
            }
        }

        // 2. Fuel surcharge as a percentage of base freight.
        let fuel = self
            .fuel_reader
            .fuel_percentage(&rate.carrier_code, shipment.is_cross_border())
            .await?
            .map(|percentage| Surcharge {
                code: FUEL_CODE.to_string(),
                name: "Fuel surcharge".to_string(),
                amount: rate.freight.percentage(percentage),
            })
            .filter(|s| !s.amount.is_zero_or_negative());

        // 3. Currency normalization to the requested quote currency.
        let fx = if native == target {
            1.0
        } else {
            self.exchange.rate(native, target).await.map_err(|e| {
                DomainError::new(ErrorCode::ExchangeRateError, e.to_string())
                    .with_detail("from", native.code())
                    .with_detail("to", target.code())
            })?
        };

        // 4. Markup on every line, so the lines still sum to the subtotal.
        let percentage = markup.percentage_for(&rate.carrier_code);
        let freight = rate.freight.convert(fx, target).with_markup(percentage);
        let surcharges: Vec<Surcharge> = surcharges
            .into_iter()
            .map(|s| Surcharge {
                amount: s.amount.convert(fx, target).with_markup(percentage),
                ..s
            })
            .collect();
        let fuel = fuel.map(|s| Surcharge {
            amount: s.amount.convert(fx, target).with_markup(percentage),
            ..s
        });

        let mut subtotal = freight;
        for surcharge in &surcharges {
            subtotal = subtotal.add(surcharge.amount)?;
        }
        if let Some(fuel) = &fuel {
            subtotal = subtotal.add(fuel.amount)?;
        }

        // 5. Sales tax on the marked-up subtotal.
        let tax_rate = tax_rate_for(
            shipment.destination().country_code(),
            delivery_region,
        );
        let tax_amount = subtotal.percentage(tax_rate.percentage);
        let total = subtotal.add(tax_amount)?;

        Ok(Quote {
            quote_id: QuoteId::new(),
            carrier_code: rate.carrier_code.clone(),
            carrier_name: rate.carrier_name.clone(),
            service_code: rate.service_code.clone(),
            service_name: rate.service_name.clone(),
            freight,
            surcharges,
            fuel,
            tax: TaxLine {
                code: tax_rate.code.to_string(),
                percentage: tax_rate.percentage,
                amount: tax_amount,
            },
            subtotal,
            total,
            currency: target,
            transit_days: rate.transit_days,
            source: rate.source,
        })
    }

    /// The cubing factor this engine rates with.
    pub fn cubic_factor(&self) -> f64 {
        self.cubic_factor
    }
}
