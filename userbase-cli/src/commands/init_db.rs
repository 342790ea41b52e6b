//! Create the database schema without starting the server

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use userbase_server::{prepare_database, ServerArgs};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database file path (default: ~/.userbase/data.db)
    #[arg(long, env = "USERBASE_DB")]
    pub db_path: Option<PathBuf>,

    /// SQL script used to create the schema
    #[arg(long, env = "USERBASE_SCHEMA")]
    pub schema: Option<PathBuf>,
}

pub fn run_init_db(args: InitDbArgs) -> Result<()> {
    let server_args = ServerArgs {
        db_path: args.db_path,
        schema: args.schema,
        ..ServerArgs::default()
    };

    let (db, created) =
        prepare_database(&server_args).context("Failed to initialize database")?;

    if created {
        println!("✅ Created database at: {}", db.path().display());
    } else {
        println!("Database already exists at: {}", db.path().display());
        println!("Schema left untouched");
    }

    Ok(())
}
