//! Surcharge rule engine.
//!
//! Carrier accessorial charges (carbon tax, tailgate, appointment fees, ...)
//! are stored as rules whose amounts are flat, a percentage of freight, or an
//! arithmetic expression over shipment attributes. Rules are evaluated
//! against a [`RuleContext`] built from the shipment and its base freight.

mod expr;
mod rule;

pub use expr::{Expr, ExprError, RuleContext};
pub use rule::{AmountSpec, RuleKind, Surcharge, SurchargeRule};
