//! userbase CLI - users page and REST API over SQLite
//!
//! - `serve`: bootstrap the store if needed and run the HTTP server
//! - `init-db`: create the schema only

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "userbase",
    author,
    version,
    about = "Users page and REST API backed by a SQLite file"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (page at /, API under /api/users)
    Serve(userbase_server::ServerArgs),
    /// Create the database schema if the file does not exist
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::InitDb(args) => commands::init_db::run_init_db(args),
    }
}

/// Load .env from the working directory, then ~/.userbase/.env.
///
/// Earlier files win; variables already set in the environment are kept.
fn load_dotenv() {
    let _ = dotenvy::dotenv();

    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".userbase").join(".env"));
    }
}
