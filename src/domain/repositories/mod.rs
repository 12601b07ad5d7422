//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` - unified access to the per-aggregate repositories
//! - `DomainResult` - standard result type for domain operations

use super::parking_spot::ParkingSpotRepository;
use super::ticket::TicketRepository;
use crate::support::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let spot = repos.parking_spots().find_next_available(ParkingType::Car).await?;
///     let ticket = repos.tickets().find_open_by_vehicle("ABCDEF").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn parking_spots(&self) -> &dyn ParkingSpotRepository;
    fn tickets(&self) -> &dyn TicketRepository;
}
