//! Rate Sheet Reader Port - lane lookup for static pricing tables.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::ratesheet::RateSheetLane;
use crate::domain::shipment::Location;

/// Port for looking up rate-sheet lanes for an origin/destination pair.
#[async_trait]
pub trait RateSheetReader: Send + Sync {
    /// All lanes serving the pair. Empty when no sheet covers the lane.
    async fn lanes_for(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<Vec<RateSheetLane>, DomainError>;
}
