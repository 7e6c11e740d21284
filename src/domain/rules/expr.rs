//! Arithmetic expressions over shipment attributes.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (("+" | "-") term)*
//! term   := factor (("*" | "/") factor)*
//! factor := "-" factor | number | variable | "(" expr ")"
//! ```
//!
//! Variables are the fixed attribute set `weight` (chargeable kg),
//! `quantity` (pieces), `volume` (m3), and `freight` (base freight in major
//! units). Unknown identifiers fail at parse time, not at evaluation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Money;
use crate::domain::shipment::Shipment;

/// Errors from parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("Empty expression")]
    Empty,

    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("Division by zero")]
    DivideByZero,
}

/// Shipment attributes an expression may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Var {
    Weight,
    Quantity,
    Volume,
    Freight,
}

impl Var {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "weight" => Some(Var::Weight),
            "quantity" => Some(Var::Quantity),
            "volume" => Some(Var::Volume),
            "freight" => Some(Var::Freight),
            _ => None,
        }
    }
}

/// Values an expression is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleContext {
    /// Chargeable weight in kilograms.
    pub weight_kg: f64,
    /// Total piece count.
    pub quantity: f64,
    /// Total volume in cubic metres.
    pub volume_m3: f64,
    /// Base freight in major units.
    pub freight: f64,
}

impl RuleContext {
    /// Builds a context from a shipment and its base freight.
    pub fn new(shipment: &Shipment, freight: Money, cubic_factor: f64) -> Self {
        Self {
            weight_kg: shipment.chargeable_weight_kg(cubic_factor),
            quantity: f64::from(shipment.total_quantity()),
            volume_m3: shipment.total_volume_m3(),
            freight: freight.as_major(),
        }
    }

    fn value_of(&self, var: Var) -> f64 {
        match var {
            Var::Weight => self.weight_kg,
            Var::Quantity => self.quantity,
            Var::Volume => self.volume_m3,
            Var::Freight => self.freight,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Num(f64),
    Var(Var),
    Neg(Box<Node>),
    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
}

/// A parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Expr {
    source: String,
    #[serde(skip)]
    root: Option<Node>,
}

impl TryFrom<String> for Expr {
    type Error = ExprError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Expr::parse(&source)
    }
}

impl From<Expr> for String {
    fn from(expr: Expr) -> String {
        expr.source
    }
}

impl Expr {
    /// Parses an expression, rejecting unknown variables and malformed input.
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let tokens = tokenize(source)?;
        if tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let root = parser.parse_expr()?;
        if parser.pos < parser.tokens.len() {
            let (position, _) = parser.tokens[parser.pos];
            return Err(ExprError::Parse {
                position,
                message: "unexpected trailing input".to_string(),
            });
        }
        Ok(Self {
            source: source.to_string(),
            root: Some(root),
        })
    }

    /// The original expression text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates against the given context.
    pub fn eval(&self, ctx: &RuleContext) -> Result<f64, ExprError> {
        // `root` is None only after serde round-trips that skipped it; the
        // TryFrom path re-parses, so a plain re-parse here covers both.
        match &self.root {
            Some(root) => eval_node(root, ctx),
            None => {
                let parsed = Expr::parse(&self.source)?;
                parsed.eval(ctx)
            }
        }
    }
}

fn eval_node(node: &Node, ctx: &RuleContext) -> Result<f64, ExprError> {
    Ok(match node {
        Node::Num(n) => *n,
        Node::Var(v) => ctx.value_of(*v),
        Node::Neg(inner) => -eval_node(inner, ctx)?,
        Node::Add(a, b) => eval_node(a, ctx)? + eval_node(b, ctx)?,
        Node::Sub(a, b) => eval_node(a, ctx)? - eval_node(b, ctx)?,
        Node::Mul(a, b) => eval_node(a, ctx)? * eval_node(b, ctx)?,
        Node::Div(a, b) => {
            let denominator = eval_node(b, ctx)?;
            if denominator == 0.0 {
                return Err(ExprError::DivideByZero);
            }
            eval_node(a, ctx)? / denominator
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Var(Var),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(source: &str) -> Result<Vec<(usize, Token)>, ExprError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => {
                tokens.push((i, Token::Plus));
                i += 1;
            }
            '-' => {
                tokens.push((i, Token::Minus));
                i += 1;
            }
            '*' => {
                tokens.push((i, Token::Star));
                i += 1;
            }
            '/' => {
                tokens.push((i, Token::Slash));
                i += 1;
            }
            '(' => {
                tokens.push((i, Token::LParen));
                i += 1;
            }
            ')' => {
                tokens.push((i, Token::RParen));
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| ExprError::Parse {
                    position: start,
                    message: format!("invalid number '{}'", text),
                })?;
                tokens.push((start, Token::Num(value)));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                let var = Var::parse(&name.to_lowercase())
                    .ok_or_else(|| ExprError::UnknownVariable(name.clone()))?;
                tokens.push((start, Token::Var(var)));
            }
            other => {
                return Err(ExprError::Parse {
                    position: i,
                    message: format!("unexpected character '{}'", other),
                })
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn advance(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse_expr(&mut self) -> Result<Node, ExprError> {
        let mut node = self.parse_term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.advance();
                    node = Node::Add(Box::new(node), Box::new(self.parse_term()?));
                }
                Token::Minus => {
                    self.advance();
                    node = Node::Sub(Box::new(node), Box::new(self.parse_term()?));
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn parse_term(&mut self) -> Result<Node, ExprError> {
        let mut node = self.parse_factor()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.advance();
                    node = Node::Mul(Box::new(node), Box::new(self.parse_factor()?));
                }
                Token::Slash => {
                    self.advance();
                    node = Node::Div(Box::new(node), Box::new(self.parse_factor()?));
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn parse_factor(&mut self) -> Result<Node, ExprError> {
        match self.advance() {
            Some((_, Token::Minus)) => Ok(Node::Neg(Box::new(self.parse_factor()?))),
            Some((_, Token::Num(n))) => Ok(Node::Num(n)),
            Some((_, Token::Var(v))) => Ok(Node::Var(v)),
            Some((position, Token::LParen)) => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Some((_, Token::RParen)) => Ok(inner),
                    _ => Err(ExprError::Parse {
                        position,
                        message: "unclosed parenthesis".to_string(),
                    }),
                }
            }
            Some((position, token)) => Err(ExprError::Parse {
                position,
                message: format!("unexpected token {:?}", token),
            }),
            None => Err(ExprError::Parse {
                position: self.tokens.last().map(|(p, _)| *p).unwrap_or(0),
                message: "unexpected end of expression".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RuleContext {
        RuleContext {
            weight_kg: 250.0,
            quantity: 3.0,
            volume_m3: 1.5,
            freight: 400.0,
        }
    }

    #[test]
    fn evaluates_literals_and_precedence() {
        let expr = Expr::parse("2 + 3 * 4").unwrap();
        assert_eq!(expr.eval(&ctx()).unwrap(), 14.0);
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = Expr::parse("(2 + 3) * 4").unwrap();
        assert_eq!(expr.eval(&ctx()).unwrap(), 20.0);
    }

    #[test]
    fn unary_minus_works() {
        let expr = Expr::parse("-5 + quantity").unwrap();
        assert_eq!(expr.eval(&ctx()).unwrap(), -2.0);
    }

    #[test]
    fn variables_resolve_from_context() {
        let expr = Expr::parse("weight * 0.05 + quantity * 5").unwrap();
        assert_eq!(expr.eval(&ctx()).unwrap(), 27.5);
    }

    #[test]
    fn freight_percentage_expression() {
        let expr = Expr::parse("freight * 0.035").unwrap();
        assert!((expr.eval(&ctx()).unwrap() - 14.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_variable_fails_at_parse() {
        let err = Expr::parse("distance * 2").unwrap_err();
        assert_eq!(err, ExprError::UnknownVariable("distance".to_string()));
    }

    #[test]
    fn division_by_zero_fails_at_eval() {
        let expr = Expr::parse("10 / (quantity - 3)").unwrap();
        assert_eq!(expr.eval(&ctx()).unwrap_err(), ExprError::DivideByZero);
    }

    #[test]
    fn empty_expression_is_rejected() {
        assert_eq!(Expr::parse("   ").unwrap_err(), ExprError::Empty);
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(Expr::parse("1 + 2 )").is_err());
        assert!(Expr::parse("1 2").is_err());
    }

    #[test]
    fn unclosed_parenthesis_is_rejected() {
        assert!(Expr::parse("(1 + 2").is_err());
    }

    #[test]
    fn serde_round_trip_reparses() {
        let expr = Expr::parse("weight * 0.1").unwrap();
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(json, "\"weight * 0.1\"");
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back.eval(&ctx()).unwrap(), 25.0);
    }
}
