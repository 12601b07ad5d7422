//! Application services

mod fare_calculator;
mod parking;
mod user_survey;

pub use fare_calculator::FareCalculatorService;
pub use parking::{EntryReceipt, ExitReceipt, ParkingService};
pub use user_survey::UserSurveyService;
