//! HTTP DTOs for the rating endpoint.
//!
//! These types define the JSON request/response structure and are the
//! boundary between HTTP and the application layer. Money is rendered
//! as major units with the currency code alongside.

use serde::{Deserialize, Serialize};

use crate::application::{ProviderFailure, RateRequest, RatedResponse};
use crate::domain::foundation::{AccountId, Currency, Money, ValidationError};
use crate::domain::pricing::{Quote, RateSource};
use crate::domain::rules::Surcharge;
use crate::domain::shipment::{Location, Package, Packaging, Shipment};

// ════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════

/// Request to rate a shipment.
#[derive(Debug, Clone, Deserialize)]
pub struct RateRequestDto {
    pub account_id: String,
    /// Currency to quote in; defaults to the service's configured base.
    #[serde(default)]
    pub currency: Option<String>,
    pub origin: LocationDto,
    pub destination: LocationDto,
    pub packages: Vec<PackageDto>,
    /// Requested option codes (e.g. "TAILGATE").
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub dangerous_goods: bool,
}

/// A location in a rating request.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationDto {
    pub city: String,
    pub region: String,
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
}

/// A package line in a rating request.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDto {
    pub quantity: u32,
    pub weight_kg: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub packaging: Packaging,
}

impl LocationDto {
    fn try_into_domain(self) -> Result<Location, ValidationError> {
        Location::new(self.city, self.region, self.country, self.postal_code)
    }
}

impl PackageDto {
    fn try_into_domain(self) -> Result<Package, ValidationError> {
        Package::new(
            self.quantity,
            self.weight_kg,
            self.length_cm,
            self.width_cm,
            self.height_cm,
            self.packaging,
        )
    }
}

impl RateRequestDto {
    /// Validates and converts into the application request.
    pub fn try_into_domain(
        self,
        default_currency: Currency,
    ) -> Result<RateRequest, ValidationError> {
        let account = AccountId::new(self.account_id)?;
        let currency = match self.currency {
            Some(code) => Currency::parse(&code)?,
            None => default_currency,
        };
        let origin = self.origin.try_into_domain()?;
        let destination = self.destination.try_into_domain()?;
        let packages = self
            .packages
            .into_iter()
            .map(PackageDto::try_into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        let shipment =
            Shipment::new(origin, destination, packages, self.options, self.dangerous_goods)?;

        Ok(RateRequest {
            account,
            shipment,
            currency,
        })
    }
}

// ════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════

/// A money amount rendered for the API.
#[derive(Debug, Clone, Serialize)]
pub struct MoneyDto {
    pub amount: f64,
    pub currency: String,
}

impl MoneyDto {
    fn from_domain(money: Money) -> Self {
        Self {
            amount: money.as_major(),
            currency: money.currency().code().to_string(),
        }
    }
}

/// A surcharge line on a quote.
#[derive(Debug, Clone, Serialize)]
pub struct SurchargeDto {
    pub code: String,
    pub name: String,
    pub amount: MoneyDto,
}

impl SurchargeDto {
    fn from_domain(surcharge: &Surcharge) -> Self {
        Self {
            code: surcharge.code.clone(),
            name: surcharge.name.clone(),
            amount: MoneyDto::from_domain(surcharge.amount),
        }
    }
}

/// The tax line on a quote.
#[derive(Debug, Clone, Serialize)]
pub struct TaxDto {
    pub code: String,
    pub percentage: f64,
    pub amount: MoneyDto,
}

/// One ranked quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDto {
    pub quote_id: String,
    pub carrier_code: String,
    pub carrier_name: String,
    pub service_code: String,
    pub service_name: String,
    pub freight: MoneyDto,
    pub surcharges: Vec<SurchargeDto>,
    pub fuel: Option<SurchargeDto>,
    pub tax: TaxDto,
    pub subtotal: MoneyDto,
    pub total: MoneyDto,
    pub transit_days: Option<u32>,
    pub source: RateSource,
}

impl QuoteDto {
    fn from_domain(quote: &Quote) -> Self {
        Self {
            quote_id: quote.quote_id.to_string(),
            carrier_code: quote.carrier_code.clone(),
            carrier_name: quote.carrier_name.clone(),
            service_code: quote.service_code.clone(),
            service_name: quote.service_name.clone(),
            freight: MoneyDto::from_domain(quote.freight),
            surcharges: quote.surcharges.iter().map(SurchargeDto::from_domain).collect(),
            fuel: quote.fuel.as_ref().map(SurchargeDto::from_domain),
            tax: TaxDto {
                code: quote.tax.code.clone(),
                percentage: quote.tax.percentage,
                amount: MoneyDto::from_domain(quote.tax.amount),
            },
            subtotal: MoneyDto::from_domain(quote.subtotal),
            total: MoneyDto::from_domain(quote.total),
            transit_days: quote.transit_days,
            source: quote.source,
        }
    }
}

/// Response for a rating request.
#[derive(Debug, Clone, Serialize)]
pub struct RateResponseDto {
    pub request_id: String,
    pub rated_at: String,
    pub currency: String,
    pub quotes: Vec<QuoteDto>,
    pub failures: Vec<ProviderFailure>,
    pub from_cache: bool,
}

impl RateResponseDto {
    pub fn from_domain(response: &RatedResponse) -> Self {
        Self {
            request_id: response.request_id.to_string(),
            rated_at: response.rated_at.to_string(),
            currency: response.currency.code().to_string(),
            quotes: response.quotes.iter().map(QuoteDto::from_domain).collect(),
            failures: response.failures.clone(),
            from_cache: response.from_cache,
        }
    }
}

/// Error body returned on failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
