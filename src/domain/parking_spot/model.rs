//! Parking spot domain entity

use std::str::FromStr;

use crate::domain::DomainError;

/// Vehicle category a spot is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParkingType {
    Car,
    Bike,
}

impl ParkingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "CAR",
            Self::Bike => "BIKE",
        }
    }

    /// Map a menu entry (`1 CAR`, `2 BIKE`) to a category
    pub fn from_selection(selection: u32) -> Result<Self, DomainError> {
        match selection {
            1 => Ok(Self::Car),
            2 => Ok(Self::Bike),
            other => Err(DomainError::InvalidVehicleType(format!(
                "menu selection {}",
                other
            ))),
        }
    }
}

impl FromStr for ParkingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAR" => Ok(Self::Car),
            "BIKE" => Ok(Self::Bike),
            other => Err(DomainError::UnsupportedParkingType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ParkingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical parking location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSpot {
    /// Parking number, positive
    pub id: i32,
    pub parking_type: ParkingType,
    pub available: bool,
}

impl ParkingSpot {
    pub fn new(id: i32, parking_type: ParkingType, available: bool) -> Self {
        Self {
            id,
            parking_type,
            available,
        }
    }

    pub fn occupy(&mut self) {
        self.available = false;
    }

    pub fn release(&mut self) {
        self.available = true;
    }
}

// ── Tests ──────────────────────────────────────────────────────
