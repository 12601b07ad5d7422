//! Fare calculation for parking tickets

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{DomainError, DomainResult, FareRates, ParkingType, Ticket};

const MINUTES_PER_HOUR: i64 = 60;

/// Computes what a vehicle owes for a stay
#[derive(Debug, Clone, Default)]
pub struct FareCalculatorService {
    rates: FareRates,
}

impl FareCalculatorService {
    pub fn new(rates: FareRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &FareRates {
        &self.rates
    }

    /// Price of a stay, rounded half-up to 2 decimals.
    ///
    /// Stays shorter than the free period cost nothing. Recurring users get
    /// the configured discount on the base price.
    pub fn calculate_fare(
        &self,
        in_time: Option<DateTime<Utc>>,
        out_time: Option<DateTime<Utc>>,
        parking_type: ParkingType,
        is_recurring: bool,
    ) -> DomainResult<Decimal> {
        let minutes = duration_minutes(in_time, out_time)?;
        if minutes < self.rates.free_minutes {
            return Ok(Decimal::ZERO);
        }

        let mut price = Decimal::from(minutes) * self.rates.rate_per_hour(parking_type)
            / Decimal::from(MINUTES_PER_HOUR);

        if is_recurring {
            price -= price * self.rates.recurring_discount_percent / Decimal::ONE_HUNDRED;
        }

        Ok(price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .max(Decimal::ZERO))
    }

    /// Fare of a ticket whose out time has been set
    pub fn calculate_ticket_fare(&self, ticket: &Ticket, is_recurring: bool) -> DomainResult<Decimal> {
        self.calculate_fare(
            Some(ticket.in_time),
            ticket.out_time,
            ticket.parking_spot.parking_type,
            is_recurring,
        )
    }

    /// Hours between in time and out time, at minute resolution
    pub fn calculate_duration(
        &self,
        in_time: Option<DateTime<Utc>>,
        out_time: Option<DateTime<Utc>>,
    ) -> DomainResult<Decimal> {
        let minutes = duration_minutes(in_time, out_time)?;
        Ok(Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR))
    }
}

/// Whole minutes between the two instants; seconds are dropped.
fn duration_minutes(
    in_time: Option<DateTime<Utc>>,
    out_time: Option<DateTime<Utc>>,
) -> DomainResult<i64> {
    let Some(in_time) = in_time else {
        return Err(DomainError::Validation(
            "In time provided is incorrect:null".to_string(),
        ));
    };
    let out_time = match out_time {
        Some(out) if out >= in_time => out,
        Some(out) => {
            return Err(DomainError::Validation(format!(
                "Out time provided is incorrect:{}",
                out
            )))
        }
        None => {
            return Err(DomainError::Validation(
                "Out time provided is incorrect:null".to_string(),
            ))
        }
    };

    Ok((out_time - in_time).num_minutes())
}

// ── Tests ──────────────────────────────────────────────────────
