//! Storage implementations

mod memory;

pub use memory::InMemoryStorage;

use crate::domain::{ParkingSpot, ParkingType};

/// Default numbering of a freshly provisioned lot: CAR spots first
pub fn spot_layout(car_spots: u32, bike_spots: u32) -> Vec<ParkingSpot> {
    let cars = (1..=car_spots).map(|_| ParkingType::Car);
    let bikes = (1..=bike_spots).map(|_| ParkingType::Bike);
    cars.chain(bikes)
        .zip(1..)
        .map(|(parking_type, id)| ParkingSpot::new(id, parking_type, true))
        .collect()
}
