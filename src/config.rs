//! Configuration module
//!
//! Settings are read from a TOML file (`~/.config/parking-service/config.toml`
//! by default). Every section and key is optional.
//!
//! ```toml
//! [database]
//! url = "sqlite://./parking.db?mode=rwc"
//!
//! [fare]
//! car_rate_per_hour = "1.5"
//! bike_rate_per_hour = "1.0"
//! free_minutes = 30
//! recurring_discount_percent = "5"
//!
//! [parking]
//! car_spots = 3
//! bike_spots = 2
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{DomainError, FareRates};
use crate::infrastructure::DatabaseConfig;
use crate::support::errors::InfraError;

/// Application configuration, one field per TOML section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub fare: FareSettings,
    pub parking: ParkingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FareSettings {
    pub car_rate_per_hour: Decimal,
    pub bike_rate_per_hour: Decimal,
    pub free_minutes: i64,
    pub recurring_discount_percent: Decimal,
}

impl Default for FareSettings {
    fn default() -> Self {
        let rates = FareRates::default();
        Self {
            car_rate_per_hour: rates.car_rate_per_hour,
            bike_rate_per_hour: rates.bike_rate_per_hour,
            free_minutes: rates.free_minutes,
            recurring_discount_percent: rates.recurring_discount_percent,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParkingSettings {
    pub car_spots: u32,
    pub bike_spots: u32,
}

impl Default for ParkingSettings {
    fn default() -> Self {
        Self {
            car_spots: 3,
            bike_spots: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, InfraError> {
        Ok(toml::from_str(content)?)
    }

    /// Reject settings the services cannot work with
    pub fn validate(&self) -> Result<(), DomainError> {
        let fare = &self.fare;
        if fare.car_rate_per_hour.is_sign_negative() || fare.bike_rate_per_hour.is_sign_negative() {
            return Err(DomainError::Validation(
                "fare rates must not be negative".to_string(),
            ));
        }
        if fare.free_minutes < 0 {
            return Err(DomainError::Validation(
                "fare.free_minutes must not be negative".to_string(),
            ));
        }
        if fare.recurring_discount_percent.is_sign_negative()
            || fare.recurring_discount_percent > Decimal::ONE_HUNDRED
        {
            return Err(DomainError::Validation(
                "fare.recurring_discount_percent must be between 0 and 100".to_string(),
            ));
        }
        if self.parking.car_spots == 0 && self.parking.bike_spots == 0 {
            return Err(DomainError::Validation(
                "parking lot needs at least one spot".to_string(),
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(DomainError::Validation("database.url is empty".to_string()));
        }
        Ok(())
    }

    pub fn fare_rates(&self) -> FareRates {
        FareRates {
            car_rate_per_hour: self.fare.car_rate_per_hour,
            bike_rate_per_hour: self.fare.bike_rate_per_hour,
            free_minutes: self.fare.free_minutes,
            recurring_discount_percent: self.fare.recurring_discount_percent,
        }
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.connection_url(),
            max_connections: self.database.max_connections,
        }
    }
}

/// `~/.config/parking-service/config.toml`, falling back to the working
/// directory when the platform has no config dir
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parking-service")
        .join("config.toml")
}
