//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    DomainResult, ParkingSpot, ParkingSpotRepository, ParkingType, RepositoryProvider, Ticket,
    TicketRepository,
};

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    parking_spots: InMemoryParkingSpotRepository,
    tickets: InMemoryTicketRepository,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            parking_spots: InMemoryParkingSpotRepository {
                spots: DashMap::new(),
            },
            tickets: InMemoryTicketRepository {
                tickets: DashMap::new(),
                ticket_counter: AtomicI32::new(1),
            },
        }
    }

    /// Storage pre-filled with the given spots
    pub fn with_spots(spots: impl IntoIterator<Item = ParkingSpot>) -> Self {
        let storage = Self::new();
        for spot in spots {
            storage.parking_spots.spots.insert(spot.id, spot);
        }
        storage
    }

    /// Storage with `car_spots` CAR spots numbered from 1, followed by
    /// `bike_spots` BIKE spots, all free
    pub fn provisioned(car_spots: u32, bike_spots: u32) -> Self {
        Self::with_spots(super::spot_layout(car_spots, bike_spots))
    }

    /// Current state of a spot
    pub fn spot(&self, id: i32) -> Option<ParkingSpot> {
        self.parking_spots.spots.get(&id).map(|s| s.value().clone())
    }

    pub fn ticket_count(&self) -> usize {
        self.tickets.tickets.len()
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn parking_spots(&self) -> &dyn ParkingSpotRepository {
        &self.parking_spots
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }
}

struct InMemoryParkingSpotRepository {
    spots: DashMap<i32, ParkingSpot>,
}

#[async_trait]
impl ParkingSpotRepository for InMemoryParkingSpotRepository {
    async fn find_next_available(&self, parking_type: ParkingType) -> DomainResult<Option<i32>> {
        Ok(self
            .spots
            .iter()
            .filter(|s| s.available && s.parking_type == parking_type)
            .map(|s| *s.key())
            .min())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSpot>> {
        Ok(self.spots.get(&id).map(|s| s.value().clone()))
    }

    async fn update_availability(&self, spot: &ParkingSpot) -> DomainResult<bool> {
        match self.spots.get_mut(&spot.id) {
            Some(mut stored) => {
                stored.available = spot.available;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_available(&self, parking_type: ParkingType) -> DomainResult<u64> {
        Ok(self
            .spots
            .iter()
            .filter(|s| s.available && s.parking_type == parking_type)
            .count() as u64)
    }
}

struct InMemoryTicketRepository {
    tickets: DashMap<i32, Ticket>,
    ticket_counter: AtomicI32,
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn save(&self, mut ticket: Ticket) -> DomainResult<Ticket> {
        ticket.id = self.ticket_counter.fetch_add(1, Ordering::SeqCst);
        self.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn find_open_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Option<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number && t.is_open())
            .max_by_key(|t| (t.in_time, t.id))
            .map(|t| t.value().clone()))
    }

    async fn update(&self, ticket: &Ticket) -> DomainResult<bool> {
        match self.tickets.get_mut(&ticket.id) {
            Some(mut stored) if stored.is_open() => {
                stored.price = ticket.price;
                stored.out_time = ticket.out_time;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_all_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .map(|t| t.value().clone())
            .collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn next_available_is_lowest_free_spot_of_type() {
        let storage = InMemoryStorage::provisioned(3, 2);
        let spots = storage.parking_spots();

        assert_eq!(spots.find_next_available(ParkingType::Car).await.unwrap(), Some(1));
        assert_eq!(spots.find_next_available(ParkingType::Bike).await.unwrap(), Some(4));

        let mut first = spots.find_by_id(1).await.unwrap().unwrap();
        first.occupy();
        assert!(spots.update_availability(&first).await.unwrap());

        assert_eq!(spots.find_next_available(ParkingType::Car).await.unwrap(), Some(2));
        assert_eq!(spots.count_available(ParkingType::Car).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn full_lot_has_no_available_spot() {
        let storage = InMemoryStorage::with_spots([ParkingSpot::new(1, ParkingType::Car, false)]);
        assert_eq!(
            storage.parking_spots().find_next_available(ParkingType::Car).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn update_of_unknown_spot_reports_false() {
        let storage = InMemoryStorage::new();
        let spot = ParkingSpot::new(9, ParkingType::Car, false);
        assert!(!storage.parking_spots().update_availability(&spot).await.unwrap());
    }

    #[tokio::test]
    async fn closed_ticket_cannot_be_updated_twice() {
        let storage = InMemoryStorage::new();
        let tickets = storage.tickets();
        let mut ticket = tickets
            .save(Ticket::open_at(
                ParkingSpot::new(1, ParkingType::Car, false),
                "ABCDEF",
                Utc::now() - Duration::minutes(60),
            ))
            .await
            .unwrap();
        assert_eq!(ticket.id, 1);

        ticket.close(Utc::now(), Decimal::new(15, 1));
        assert!(tickets.update(&ticket).await.unwrap());
        assert!(!tickets.update(&ticket).await.unwrap());
        assert!(tickets.find_open_by_vehicle("ABCDEF").await.unwrap().is_none());
    }
}
