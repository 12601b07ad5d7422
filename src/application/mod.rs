pub mod ports;
pub mod services;

// Re-export key types for convenience
pub use ports::InputReader;
pub use services::{
    EntryReceipt, ExitReceipt, FareCalculatorService, ParkingService, UserSurveyService,
};
