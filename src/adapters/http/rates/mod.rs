//! Rating endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, LocationDto, PackageDto, QuoteDto, RateRequestDto, RateResponseDto,
    SurchargeDto, TaxDto,
};
pub use handlers::{rate_shipment, RatesAppState};
pub use routes::rates_router;
