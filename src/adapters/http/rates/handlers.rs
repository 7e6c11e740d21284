//! HTTP handlers for the rating endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::RateAggregator;
use crate::domain::foundation::{Currency, DomainError};

use super::dto::{ErrorResponse, RateRequestDto, RateResponseDto};

// ════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RatesAppState {
    pub aggregator: Arc<RateAggregator>,
    /// Currency applied when a request names none.
    pub default_currency: Currency,
}

impl RatesAppState {
    pub fn new(aggregator: Arc<RateAggregator>, default_currency: Currency) -> Self {
        Self {
            aggregator,
            default_currency,
        }
    }
}

// ════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════

/// POST /api/v1/rates - Rate a shipment across all pricing sources
pub async fn rate_shipment(
    State(state): State<RatesAppState>,
    Json(req): Json<RateRequestDto>,
) -> Response {
    let request = match req.try_into_domain(state.default_currency) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
            )
                .into_response()
        }
    };

    match state.aggregator.rate(request).await {
        Ok(response) => {
            (StatusCode::OK, Json(RateResponseDto::from_domain(&response))).into_response()
        }
        Err(e) => handle_rating_error(e),
    }
}

fn handle_rating_error(error: DomainError) -> Response {
    tracing::error!(code = ?error.code, error = %error, "rating request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(error.code.to_string(), error.message)),
    )
        .into_response()
}
