//! Infrastructure layer - external concerns

pub mod console;
pub mod database;
pub mod storage;

pub use console::ConsoleInputReader;
pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use storage::{spot_layout, InMemoryStorage};
