//! Customer history lookups

use std::sync::Arc;

use tracing::warn;

use crate::domain::RepositoryProvider;

/// Answers questions about a vehicle's past visits
pub struct UserSurveyService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserSurveyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Whether the vehicle has completed at least one visit.
    ///
    /// A ticket still open does not count. A history that cannot be read is
    /// treated as empty.
    pub async fn is_recurring_user(&self, vehicle_reg_number: &str) -> bool {
        match self.repos.tickets().find_all_by_vehicle(vehicle_reg_number).await {
            Ok(tickets) => tickets.iter().any(|t| t.out_time.is_some()),
            Err(e) => {
                warn!(
                    "Could not read ticket history of {}: {}",
                    vehicle_reg_number, e
                );
                false
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use crate::domain::{
        DomainError, DomainResult, ParkingSpot, ParkingSpotRepository, ParkingType, Ticket,
        TicketRepository,
    };
    use crate::infrastructure::storage::InMemoryStorage;

    fn open_ticket() -> Ticket {
        Ticket::open_at(
            ParkingSpot::new(1, ParkingType::Car, false),
            "ABCDEF",
            Utc::now() - Duration::minutes(60),
        )
    }

    fn closed_ticket() -> Ticket {
        let in_time = Utc::now() - Duration::weeks(1) - Duration::minutes(60);
        let mut ticket = Ticket::open_at(ParkingSpot::new(1, ParkingType::Car, false), "ABCDEF", in_time);
        ticket.close(in_time + Duration::minutes(60), Decimal::new(15, 1));
        ticket
    }

    #[tokio::test]
    async fn no_tickets_is_not_recurring() {
        let storage = Arc::new(InMemoryStorage::new());
        let service = UserSurveyService::new(storage);
        assert!(!service.is_recurring_user("ABCDEF").await);
    }

    #[tokio::test]
    async fn only_currently_parked_is_not_recurring() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.tickets().save(open_ticket()).await.unwrap();
        let service = UserSurveyService::new(storage);
        assert!(!service.is_recurring_user("ABCDEF").await);
    }

    #[tokio::test]
    async fn previous_exit_makes_recurring() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.tickets().save(open_ticket()).await.unwrap();
        storage.tickets().save(closed_ticket()).await.unwrap();
        let service = UserSurveyService::new(storage);
        assert!(service.is_recurring_user("ABCDEF").await);
    }

    #[tokio::test]
    async fn other_vehicles_history_does_not_count() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.tickets().save(closed_ticket()).await.unwrap();
        let service = UserSurveyService::new(storage);
        assert!(!service.is_recurring_user("GHIJKL").await);
    }

    struct UnreachableRepos;

    #[async_trait]
    impl TicketRepository for UnreachableRepos {
        async fn save(&self, _ticket: Ticket) -> DomainResult<Ticket> {
            Err(DomainError::Storage("unreachable".into()))
        }
        async fn find_open_by_vehicle(&self, _reg: &str) -> DomainResult<Option<Ticket>> {
            Err(DomainError::Storage("unreachable".into()))
        }
        async fn update(&self, _ticket: &Ticket) -> DomainResult<bool> {
            Err(DomainError::Storage("unreachable".into()))
        }
        async fn find_all_by_vehicle(&self, _reg: &str) -> DomainResult<Vec<Ticket>> {
            Err(DomainError::Storage("unreachable".into()))
        }
    }

    #[async_trait]
    impl ParkingSpotRepository for UnreachableRepos {
        async fn find_next_available(&self, _t: ParkingType) -> DomainResult<Option<i32>> {
            Err(DomainError::Storage("unreachable".into()))
        }
        async fn find_by_id(&self, _id: i32) -> DomainResult<Option<ParkingSpot>> {
            Err(DomainError::Storage("unreachable".into()))
        }
        async fn update_availability(&self, _spot: &ParkingSpot) -> DomainResult<bool> {
            Err(DomainError::Storage("unreachable".into()))
        }
        async fn count_available(&self, _t: ParkingType) -> DomainResult<u64> {
            Err(DomainError::Storage("unreachable".into()))
        }
    }

    impl RepositoryProvider for UnreachableRepos {
        fn parking_spots(&self) -> &dyn ParkingSpotRepository {
            self
        }
        fn tickets(&self) -> &dyn TicketRepository {
            self
        }
    }

    #[tokio::test]
    async fn unreadable_history_is_not_recurring() {
        let service = UserSurveyService::new(Arc::new(UnreachableRepos));
        assert!(!service.is_recurring_user("ABCDEF").await);
    }
}
