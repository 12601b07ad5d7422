//! Fare rates

use rust_decimal::Decimal;

use crate::domain::ParkingType;

/// Hourly rates and discount rules applied when a ticket is closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareRates {
    pub car_rate_per_hour: Decimal,
    pub bike_rate_per_hour: Decimal,
    /// Stays shorter than this are free
    pub free_minutes: i64,
    /// Discount for vehicles with a completed previous visit
    pub recurring_discount_percent: Decimal,
}

impl FareRates {
    pub const CAR_RATE_PER_HOUR: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
    pub const BIKE_RATE_PER_HOUR: Decimal = Decimal::ONE;
    pub const FREE_MINUTES: i64 = 30;
    pub const RECURRING_DISCOUNT_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    pub fn rate_per_hour(&self, parking_type: ParkingType) -> Decimal {
        match parking_type {
            ParkingType::Car => self.car_rate_per_hour,
            ParkingType::Bike => self.bike_rate_per_hour,
        }
    }
}

impl Default for FareRates {
    fn default() -> Self {
        Self {
            car_rate_per_hour: Self::CAR_RATE_PER_HOUR,
            bike_rate_per_hour: Self::BIKE_RATE_PER_HOUR,
            free_minutes: Self::FREE_MINUTES,
            recurring_discount_percent: Self::RECURRING_DISCOUNT_PERCENT,
        }
    }
}
