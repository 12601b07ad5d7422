//! Parking spot aggregate

pub mod model;
pub mod repository;

pub use model::{ParkingSpot, ParkingType};
pub use repository::ParkingSpotRepository;
