//! Application state shared across handlers

use std::time::Instant;

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            start_time: Instant::now(),
        }
    }
}
