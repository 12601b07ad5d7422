use thiserror::Error;

use crate::domain::ParkingType;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Entered input is invalid: {0}")]
    InvalidVehicleType(String),

    #[error("Unknown parking type: {0}")]
    UnsupportedParkingType(String),

    #[error("Invalid vehicle registration number: {0}")]
    InvalidRegistration(String),

    #[error("No {0} parking spot available, parking slots might be full")]
    ParkingFull(ParkingType),

    #[error("No open ticket found for vehicle {0}")]
    TicketNotFound(String),

    #[error("Vehicle {0} is already parked in spot {1}")]
    VehicleAlreadyParked(String, i32),

    #[error("Unable to update availability of parking spot {0}")]
    SpotUpdateFailed(i32),

    #[error("Unable to update ticket {0}")]
    TicketUpdateFailed(i32),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Expected outcomes of a transition, as opposed to failures.
    pub fn is_business_outcome(&self) -> bool {
        matches!(
            self,
            Self::ParkingFull(_) | Self::TicketNotFound(_) | Self::VehicleAlreadyParked(..)
        )
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}
