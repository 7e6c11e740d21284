//! Currency and exchange-rate source configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const SUPPORTED_CURRENCIES: &[&str] = &["CAD", "USD", "EUR", "GBP", "MXN"];

/// Currency configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Currency quotes default to when the request names none
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    /// Exchange-rate API base URL
    #[serde(default = "default_rates_api_url")]
    pub rates_api_url: String,

    /// Exchange-rate API key
    pub rates_api_key: Option<Secret<String>>,
}

impl CurrencyConfig {
    /// Validate currency configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let code = self.base_currency.to_uppercase();
        if !SUPPORTED_CURRENCIES.contains(&code.as_str()) {
            return Err(ValidationError::InvalidBaseCurrency);
        }
        if *environment == Environment::Production {
            if self.rates_api_key.is_none() {
                return Err(ValidationError::MissingRequired("CURRENCY__RATES_API_KEY"));
            }
            if !self.rates_api_url.starts_with("https://") {
                return Err(ValidationError::RatesApiMustBeHttps);
            }
        }
        Ok(())
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            rates_api_url: default_rates_api_url(),
            rates_api_key: None,
        }
    }
}

fn default_base_currency() -> String {
    "CAD".to_string()
}

fn default_rates_api_url() -> String {
    "https://openexchangerates.org/api".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate_in_development() {
        let config = CurrencyConfig::default();
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_unknown_base_currency_rejected() {
        let config = CurrencyConfig {
            base_currency: "JPY".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_production_requires_api_key() {
        let config = CurrencyConfig::default();
        assert!(config.validate(&Environment::Production).is_err());

        let config = CurrencyConfig {
            rates_api_key: Some(Secret::new("key".to_string())),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_production_requires_https_api_url() {
        let config = CurrencyConfig {
            rates_api_url: "http://rates.internal".to_string(),
            rates_api_key: Some(Secret::new("key".to_string())),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_err());
    }
}
