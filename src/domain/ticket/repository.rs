//! Ticket repository interface

use async_trait::async_trait;

use super::model::Ticket;
use crate::domain::DomainResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a new ticket and return it with its assigned id
    async fn save(&self, ticket: Ticket) -> DomainResult<Ticket>;
    /// Latest ticket of the vehicle that has no out time yet
    async fn find_open_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Option<Ticket>>;
    /// Write price and out time of an open ticket. `false` when no open
    /// ticket with that id exists.
    async fn update(&self, ticket: &Ticket) -> DomainResult<bool>;
    async fn find_all_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Vec<Ticket>>;
}
