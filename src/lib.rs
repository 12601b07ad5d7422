//! # Parking Service
//!
//! Parking lot management for cars and bikes: spot allocation on entry,
//! fare calculation on exit, ticket history in SQLite.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Parking, fare and user survey services plus input ports
//! - **infrastructure**: External concerns (database, in-memory storage, console)
//! - **interfaces**: Interactive shell
//! - **support**: Error types shared by all layers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use application::{FareCalculatorService, ParkingService, UserSurveyService};
pub use support::errors::{AppError, DomainError, InfraError};
