//! Ticket domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::ParkingSpot;

/// One parking visit, from entry to (eventual) exit
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Assigned by the store, 0 until saved
    pub id: i32,
    /// Spot at the time of entry
    pub parking_spot: ParkingSpot,
    pub vehicle_reg_number: String,
    /// Amount owed, 2 decimal places
    pub price: Decimal,
    pub in_time: DateTime<Utc>,
    /// `None` while the vehicle is parked
    pub out_time: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Open a ticket for a vehicle entering now
    pub fn open(parking_spot: ParkingSpot, vehicle_reg_number: impl Into<String>) -> Self {
        Self::open_at(parking_spot, vehicle_reg_number, Utc::now())
    }

    pub fn open_at(
        parking_spot: ParkingSpot,
        vehicle_reg_number: impl Into<String>,
        in_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            parking_spot,
            vehicle_reg_number: vehicle_reg_number.into(),
            price: Decimal::ZERO,
            in_time,
            out_time: None,
        }
    }

    pub fn close(&mut self, out_time: DateTime<Utc>, price: Decimal) {
        self.out_time = Some(out_time);
        self.price = price;
    }

    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParkingType;
    use chrono::Duration;

    fn spot() -> ParkingSpot {
        ParkingSpot::new(1, ParkingType::Car, false)
    }

    #[test]
    fn new_ticket_is_open_and_free() {
        let ticket = Ticket::open(spot(), "ABCDEF");
        assert!(ticket.is_open());
        assert_eq!(ticket.id, 0);
        assert_eq!(ticket.price, Decimal::ZERO);
        assert_eq!(ticket.vehicle_reg_number, "ABCDEF");
        assert_eq!(ticket.parking_spot, spot());
    }

    #[test]
    fn close_sets_out_time_and_price() {
        let in_time = Utc::now() - Duration::minutes(60);
        let mut ticket = Ticket::open_at(spot(), "ABCDEF", in_time);
        let out_time = Utc::now();

        ticket.close(out_time, Decimal::new(15, 1));

        assert!(!ticket.is_open());
        assert_eq!(ticket.out_time, Some(out_time));
        assert_eq!(ticket.price, Decimal::new(15, 1));
        assert_eq!(ticket.in_time, in_time);
    }
}
