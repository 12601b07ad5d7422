//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{DomainResult, ParkingSpot, ParkingSpotRepository, RepositoryProvider, TicketRepository};

use super::parking_spot_repository::SeaOrmParkingSpotRepository;
use super::ticket_repository::SeaOrmTicketRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let spot = repos.parking_spots().find_next_available(ParkingType::Car).await?;
/// let ticket = repos.tickets().find_open_by_vehicle("ABCDEF").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    parking_spots: SeaOrmParkingSpotRepository,
    tickets: SeaOrmTicketRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            parking_spots: SeaOrmParkingSpotRepository::new(db.clone()),
            tickets: SeaOrmTicketRepository::new(db),
        }
    }

    /// Seed the parking table on first start
    pub async fn provision_spots(&self, spots: &[ParkingSpot]) -> DomainResult<usize> {
        self.parking_spots.provision(spots).await
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn parking_spots(&self) -> &dyn ParkingSpotRepository {
        &self.parking_spots
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }
}
