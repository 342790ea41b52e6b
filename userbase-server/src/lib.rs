//! userbase-server: users page and REST API over SQLite
//!
//! Each request gets its own lazily opened connection; the schema is
//! created once at startup when the store file is new.

pub mod db;
pub mod error;
pub mod extractors;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;
pub mod users;

pub use db::{Database, RequestDb, DEFAULT_SCHEMA};
pub use error::{ServerError, ServerResult};
pub use server::{create_router, prepare_database, run_server, ServerArgs};
pub use state::AppState;
