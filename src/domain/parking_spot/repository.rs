//! Parking spot repository interface

use async_trait::async_trait;

use super::model::{ParkingSpot, ParkingType};
use crate::domain::DomainResult;

#[async_trait]
pub trait ParkingSpotRepository: Send + Sync {
    /// Lowest free parking number for the category, `None` when full
    async fn find_next_available(&self, parking_type: ParkingType) -> DomainResult<Option<i32>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSpot>>;
    /// Persist the availability flag. `false` when no spot matched.
    async fn update_availability(&self, spot: &ParkingSpot) -> DomainResult<bool>;
    async fn count_available(&self, parking_type: ParkingType) -> DomainResult<u64>;
}
