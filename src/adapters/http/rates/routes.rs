//! HTTP routes for the rating endpoint.

use axum::{routing::post, Router};

use super::handlers::{rate_shipment, RatesAppState};

/// Creates the rates router.
pub fn rates_router() -> Router<RatesAppState> {
    Router::new().route("/api/v1/rates", post(rate_shipment))
}
