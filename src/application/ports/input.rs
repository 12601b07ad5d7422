//! Inbound port for operator input
//!
//! The parking service owns one [`InputReader`] and pulls the vehicle type
//! selection and registration number from it during each transition.

use crate::domain::DomainResult;

pub trait InputReader {
    /// Menu option typed by the operator.
    ///
    /// Fails with `DomainError::InvalidVehicleType` when the line is not a
    /// number.
    fn read_selection(&mut self) -> DomainResult<u32>;

    /// Vehicle registration number, trimmed.
    ///
    /// Fails with `DomainError::InvalidRegistration` when the line is blank
    /// or cannot be read.
    fn read_vehicle_registration_number(&mut self) -> DomainResult<String>;
}
