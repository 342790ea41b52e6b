//! HTTP server command
//!
//! Bootstraps the store if needed, then serves until shutdown.

use anyhow::{Context, Result};

use userbase_server::{run_server, ServerArgs};

/// Run the HTTP server
pub async fn run_serve(args: ServerArgs) -> Result<()> {
    tracing::info!("Starting userbase server on {}", args.socket_addr());

    // Run server (blocks until shutdown)
    run_server(args).await.context("Server error")?;

    Ok(())
}
