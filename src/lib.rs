pub mod app;
pub mod catalog;
pub mod config;
pub mod daily;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod migration;
pub mod models;
pub mod points;
pub mod schema;
pub mod state;
pub mod stats;
pub mod storage;
pub mod wallet;

pub use app::router;
pub use config::Config;
pub use errors::{AppError, StorageError};
pub use ledger::Ledger;
pub use state::AppState;
pub use storage::{JsonFileStore, MemoryStore, Persistence};
