//! Route handlers for userbase-server
//!
//! - index: server-rendered users page
//! - users: REST API for the users collection
//! - health: Health check endpoint

pub mod health;
pub mod index;
pub mod users;

pub use health::*;
pub use index::*;
pub use users::*;
