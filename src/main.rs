//! Parking Service - interactive shell
//!
//! Allocates parking spots to entering vehicles and charges them on exit.
//!
//! ```sh
//! # Run with default config (~/.config/parking-service/config.toml)
//! parking-service
//!
//! # Custom config path and database
//! parking-service --config /etc/parking-service/config.toml \
//!     --database-url "sqlite:///var/lib/parking/parking.db?mode=rwc"
//!
//! # Try it out without touching a database
//! parking-service --in-memory
//!
//! # Validate config without starting
//! parking-service --check
//! ```

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use parkit::application::{FareCalculatorService, ParkingService};
use parkit::config::{default_config_path, AppConfig};
use parkit::domain::RepositoryProvider;
use parkit::infrastructure::database::migrator::Migrator;
use parkit::infrastructure::{
    init_database, spot_layout, ConsoleInputReader, InMemoryStorage, SeaOrmRepositoryProvider,
};
use parkit::interfaces::{PromptingInput, Shell};
use parkit::support::errors::InfraError;

/// Parking lot management shell.
#[derive(Parser, Debug)]
#[command(
    name = "parking-service",
    version,
    about = "Interactive parking lot management system",
    long_about = "Allocates parking spots to cars and bikes, keeps tickets \
                  in SQLite and charges the parking fare on exit.\n\n\
                  Default config: ~/.config/parking-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the database connection URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Keep spots and tickets in memory only.
    #[arg(long)]
    in_memory: bool,

    /// Validate the configuration file and exit without starting the shell.
    #[arg(long)]
    check: bool,
}

/// Log to stderr so the shell dialogue on stdout stays readable
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let (mut app_cfg, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(level) = cli.log_level {
        app_cfg.logging.level = level;
    }
    if let Some(url) = cli.database_url {
        app_cfg.database.url = url;
    }

    init_tracing(&app_cfg.logging.level);
    match &load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!(
            "Failed to load config {}: {}. Using defaults.",
            config_path.display(),
            e
        ),
    }

    if let Err(e) = app_cfg.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }
    if cli.check {
        if let Some(e) = load_error {
            return Err(e.into());
        }
        println!("Configuration OK: {}", config_path.display());
        return Ok(());
    }

    info!("Starting Parking Service...");
    let layout = spot_layout(app_cfg.parking.car_spots, app_cfg.parking.bike_spots);

    // ── Storage ────────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = if cli.in_memory {
        info!("Using in-memory storage, nothing will be persisted");
        Arc::new(InMemoryStorage::with_spots(layout))
    } else {
        let db_config = app_cfg.database_config();
        info!("Database: {}", db_config.url);

        let db = match init_database(&db_config).await {
            Ok(db) => db,
            Err(e) => {
                error!("Failed to connect to database: {}", e);
                return Err(InfraError::from(e).into());
            }
        };

        info!("Running database migrations...");
        if let Err(e) = Migrator::up(&db, None).await {
            error!("Failed to run migrations: {}", e);
            return Err(InfraError::from(e).into());
        }
        info!("Migrations completed");

        let provider = SeaOrmRepositoryProvider::new(db);
        let provisioned = provider.provision_spots(&layout).await?;
        if provisioned == 0 {
            info!("Parking spots already provisioned");
        }
        Arc::new(provider)
    };

    // ── Shell ──────────────────────────────────────────────────
    let input = ConsoleInputReader::stdin();
    let service = ParkingService::new(
        Box::new(PromptingInput::new(input.clone(), io::stdout())),
        FareCalculatorService::new(app_cfg.fare_rates()),
        repos,
    );

    let mut shell = Shell::new(input, io::stdout(), service);
    shell.run().await?;

    info!("Parking Service stopped");
    Ok(())
}
