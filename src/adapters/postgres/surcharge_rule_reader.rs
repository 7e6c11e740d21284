//! PostgreSQL implementation of SurchargeRuleReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::rules::{AmountSpec, RuleKind, SurchargeRule};
use crate::ports::SurchargeRuleReader;

use super::db_error;

/// Reads per-carrier accessorial rules.
pub struct PostgresSurchargeRuleReader {
    pool: PgPool,
}

impl PostgresSurchargeRuleReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RuleRow {
    code: String,
    name: String,
    carrier_code: String,
    kind: String,
    option_code: Option<String>,
    amount_kind: String,
    flat_cents: Option<i64>,
    percentage: Option<f64>,
    formula: Option<String>,
    min_cents: Option<i64>,
    max_cents: Option<i64>,
    regions: Vec<String>,
}

fn parse_kind(row: &RuleRow) -> Result<RuleKind, DomainError> {
    match row.kind.as_str() {
        "mandatory" => Ok(RuleKind::Mandatory),
        "option" => {
            let code = row.option_code.clone().ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Option rule '{}' missing option_code", row.code),
                )
            })?;
            Ok(RuleKind::Option(code))
        }
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid rule kind: {}", other),
        )),
    }
}

fn parse_amount(row: &RuleRow) -> Result<AmountSpec, DomainError> {
    match row.amount_kind.as_str() {
        "flat" => row
            .flat_cents
            .map(|cents| AmountSpec::Flat { cents })
            .ok_or_else(|| missing_amount(row, "flat_cents")),
        "percent_of_freight" => row
            .percentage
            .map(|percentage| AmountSpec::PercentOfFreight { percentage })
            .ok_or_else(|| missing_amount(row, "percentage")),
        "expression" => row
            .formula
            .clone()
            .map(|formula| AmountSpec::Expression { formula })
            .ok_or_else(|| missing_amount(row, "formula")),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid amount kind: {}", other),
        )),
    }
}

fn missing_amount(row: &RuleRow, column: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Rule '{}' missing {}", row.code, column),
    )
}

#[async_trait]
impl SurchargeRuleReader for PostgresSurchargeRuleReader {
    async fn rules_for(&self, carrier_code: &str) -> Result<Vec<SurchargeRule>, DomainError> {
        let rows: Vec<RuleRow> = sqlx::query_as(
            r#"
            SELECT code, name, carrier_code, kind, option_code,
                   amount_kind, flat_cents, percentage, formula,
                   min_cents, max_cents, regions
            FROM surcharge_rules
            WHERE carrier_code = $1
            "#,
        )
        .bind(carrier_code)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter()
            .map(|row| {
                Ok(SurchargeRule {
                    kind: parse_kind(&row)?,
                    amount: parse_amount(&row)?,
                    code: row.code,
                    name: row.name,
                    carrier_code: row.carrier_code,
                    min_cents: row.min_cents,
                    max_cents: row.max_cents,
                    regions: row.regions,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RuleRow {
        RuleRow {
            code: "CARBON".to_string(),
            name: "Carbon tax".to_string(),
            carrier_code: "DAYROSS".to_string(),
            kind: "mandatory".to_string(),
            option_code: None,
            amount_kind: "percent_of_freight".to_string(),
            flat_cents: None,
            percentage: Some(3.5),
            formula: None,
            min_cents: None,
            max_cents: None,
            regions: vec![],
        }
    }

    #[test]
    fn parses_mandatory_percentage_rule() {
        let r = row();
        assert_eq!(parse_kind(&r).unwrap(), RuleKind::Mandatory);
        assert_eq!(
            parse_amount(&r).unwrap(),
            AmountSpec::PercentOfFreight { percentage: 3.5 }
        );
    }

    #[test]
    fn option_rule_requires_option_code() {
        let r = RuleRow {
            kind: "option".to_string(),
            ..row()
        };
        assert!(parse_kind(&r).is_err());

        let r = RuleRow {
            kind: "option".to_string(),
            option_code: Some("TAILGATE".to_string()),
            ..row()
        };
        assert_eq!(parse_kind(&r).unwrap(), RuleKind::Option("TAILGATE".to_string()));
    }

    #[test]
    fn amount_columns_must_match_kind() {
        let r = RuleRow {
            amount_kind: "flat".to_string(),
            flat_cents: None,
            ..row()
        };
        assert!(parse_amount(&r).is_err());

        let r = RuleRow {
            amount_kind: "expression".to_string(),
            formula: Some("quantity * 5".to_string()),
            ..row()
        };
        assert_eq!(
            parse_amount(&r).unwrap(),
            AmountSpec::Expression { formula: "quantity * 5".to_string() }
        );
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        let r = RuleRow { kind: "sometimes".to_string(), ..row() };
        assert!(parse_kind(&r).is_err());

        let r = RuleRow { amount_kind: "vibes".to_string(), ..row() };
        assert!(parse_amount(&r).is_err());
    }
}
