//! Surcharge rules and their evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, DomainError, ErrorCode, Money};

use super::{Expr, RuleContext};

/// Whether a rule always applies or only when its option was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "option_code")]
pub enum RuleKind {
    /// Always evaluated for the carrier (carbon tax, long-haul levies, ...).
    Mandatory,
    /// Evaluated only when the shipment requested this option code.
    Option(String),
}

/// How a rule's amount is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSpec {
    /// A fixed amount in cents of the carrier's currency.
    Flat { cents: i64 },
    /// A percentage of the base freight.
    PercentOfFreight { percentage: f64 },
    /// An arithmetic expression over shipment attributes, in major units.
    Expression { formula: String },
}

/// A per-carrier accessorial charge rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeRule {
    pub code: String,
    pub name: String,
    pub carrier_code: String,
    pub kind: RuleKind,
    pub amount: AmountSpec,
    /// Lower clamp on the evaluated amount, in cents.
    pub min_cents: Option<i64>,
    /// Upper clamp on the evaluated amount, in cents.
    pub max_cents: Option<i64>,
    /// Delivery regions the rule applies to. Empty means all regions.
    pub regions: Vec<String>,
}

/// An evaluated accessorial charge on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surcharge {
    pub code: String,
    pub name: String,
    pub amount: Money,
}

impl SurchargeRule {
    /// True when this rule should be evaluated for the given delivery
    /// region and requested option codes.
    pub fn applies(&self, delivery_region: &str, requested_options: &[String]) -> bool {
        let region_matches = self.regions.is_empty()
            || self.regions.iter().any(|r| r == delivery_region);
        if !region_matches {
            return false;
        }
        match &self.kind {
            RuleKind::Mandatory => true,
            RuleKind::Option(code) => requested_options.iter().any(|o| o == code),
        }
    }

    /// Evaluates the rule against the context, in the given currency.
    ///
    /// Returns `None` when the evaluated amount is zero or negative; a rule
    /// that yields nothing contributes no charge line.
    pub fn evaluate(
        &self,
        ctx: &RuleContext,
        currency: Currency,
    ) -> Result<Option<Surcharge>, DomainError> {
        let amount = match &self.amount {
            AmountSpec::Flat { cents } => Money::from_cents(*cents, currency),
            AmountSpec::PercentOfFreight { percentage } => {
                Money::from_major(ctx.freight, currency).percentage(*percentage)
            }
            AmountSpec::Expression { formula } => {
                let expr = Expr::parse(formula).map_err(|e| {
                    DomainError::new(
                        ErrorCode::ExpressionError,
                        format!("Rule '{}' has invalid formula: {}", self.code, e),
                    )
                })?;
                let value = expr.eval(ctx).map_err(|e| {
                    DomainError::new(
                        ErrorCode::ExpressionError,
                        format!("Rule '{}' failed to evaluate: {}", self.code, e),
                    )
                })?;
                Money::from_major(value, currency)
            }
        };

        let amount = amount.clamp_cents(self.min_cents, self.max_cents);
        if amount.is_zero_or_negative() {
            return Ok(None);
        }

        Ok(Some(Surcharge {
            code: self.code.clone(),
            name: self.name.clone(),
            amount,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RuleContext {
        RuleContext {
            weight_kg: 1000.0,
            quantity: 2.0,
            volume_m3: 4.0,
            freight: 500.0,
        }
    }

    fn tailgate_rule() -> SurchargeRule {
        SurchargeRule {
            code: "TAILGATE".to_string(),
            name: "Tailgate service".to_string(),
            carrier_code: "DAYROSS".to_string(),
            kind: RuleKind::Option("TAILGATE".to_string()),
            amount: AmountSpec::Expression {
                formula: "quantity * 25".to_string(),
            },
            min_cents: Some(4500),
            max_cents: None,
            regions: vec![],
        }
    }

    #[test]
    fn mandatory_rule_always_applies() {
        let rule = SurchargeRule {
            code: "CARBON".to_string(),
            name: "Carbon tax".to_string(),
            carrier_code: "DAYROSS".to_string(),
            kind: RuleKind::Mandatory,
            amount: AmountSpec::PercentOfFreight { percentage: 3.5 },
            min_cents: None,
            max_cents: None,
            regions: vec!["AB".to_string(), "BC".to_string()],
        };
        assert!(rule.applies("AB", &[]));
        assert!(!rule.applies("ON", &[]));
    }

    #[test]
    fn option_rule_needs_request() {
        let rule = tailgate_rule();
        assert!(!rule.applies("AB", &[]));
        assert!(rule.applies("AB", &["TAILGATE".to_string()]));
    }

    #[test]
    fn empty_region_list_matches_everywhere() {
        let rule = tailgate_rule();
        assert!(rule.applies("TX", &["TAILGATE".to_string()]));
    }

    #[test]
    fn flat_amount_evaluates_directly() {
        let rule = SurchargeRule {
            code: "APPT".to_string(),
            name: "Appointment delivery".to_string(),
            carrier_code: "DAYROSS".to_string(),
            kind: RuleKind::Option("APPT".to_string()),
            amount: AmountSpec::Flat { cents: 3500 },
            min_cents: None,
            max_cents: None,
            regions: vec![],
        };
        let charge = rule.evaluate(&ctx(), Currency::Cad).unwrap().unwrap();
        assert_eq!(charge.amount.cents(), 3500);
    }

    #[test]
    fn percent_of_freight_quantizes() {
        let rule = SurchargeRule {
            code: "CARBON".to_string(),
            name: "Carbon tax".to_string(),
            carrier_code: "DAYROSS".to_string(),
            kind: RuleKind::Mandatory,
            amount: AmountSpec::PercentOfFreight { percentage: 3.575 },
            min_cents: None,
            max_cents: None,
            regions: vec![],
        };
        // 3.575% of $500.00 = $17.875 -> $17.88
        let charge = rule.evaluate(&ctx(), Currency::Cad).unwrap().unwrap();
        assert_eq!(charge.amount.cents(), 1788);
    }

    #[test]
    fn expression_amount_is_clamped_to_min() {
        // quantity * 25 = $50.00 but the minimum is $45.00, so no clamp;
        // with one piece the raw $25.00 clamps up to $45.00.
        let rule = tailgate_rule();
        let charge = rule.evaluate(&ctx(), Currency::Cad).unwrap().unwrap();
        assert_eq!(charge.amount.cents(), 5000);

        let one_piece = RuleContext { quantity: 1.0, ..ctx() };
        let charge = rule.evaluate(&one_piece, Currency::Cad).unwrap().unwrap();
        assert_eq!(charge.amount.cents(), 4500);
    }

    #[test]
    fn max_clamp_caps_amount() {
        let rule = SurchargeRule {
            max_cents: Some(4600),
            ..tailgate_rule()
        };
        let charge = rule.evaluate(&ctx(), Currency::Cad).unwrap().unwrap();
        assert_eq!(charge.amount.cents(), 4600);
    }

    #[test]
    fn zero_amount_yields_no_charge() {
        let rule = SurchargeRule {
            amount: AmountSpec::Flat { cents: 0 },
            min_cents: None,
            ..tailgate_rule()
        };
        assert!(rule.evaluate(&ctx(), Currency::Cad).unwrap().is_none());
    }

    #[test]
    fn invalid_formula_is_a_typed_error() {
        let rule = SurchargeRule {
            amount: AmountSpec::Expression {
                formula: "distance * 2".to_string(),
            },
            ..tailgate_rule()
        };
        let err = rule.evaluate(&ctx(), Currency::Cad).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExpressionError);
    }
}
