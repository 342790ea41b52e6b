//! Main server module - Axum setup and router configuration
//!
//! Bootstraps the store, then serves the users page and REST API until
//! Ctrl+C or SIGTERM.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::db::{Database, DEFAULT_SCHEMA};
use crate::error::ServerResult;
use crate::routes;
use crate::state::AppState;

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, env = "USERBASE_PORT", default_value = "5000")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, env = "USERBASE_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Database file path (default: ~/.userbase/data.db)
    #[arg(long, env = "USERBASE_DB")]
    pub db_path: Option<PathBuf>,

    /// SQL script used to create the schema on first run
    #[arg(long, env = "USERBASE_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: 5000,
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            db_path: None,
            schema: None,
            cors_permissive: false,
        }
    }
}

impl ServerArgs {
    /// Database path from args, falling back to ~/.userbase/data.db
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".userbase")
                .join("data.db")
        })
    }

    /// Setup script contents: the `--schema` file, or the bundled one
    pub fn load_schema(&self) -> ServerResult<String> {
        match &self.schema {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => Ok(DEFAULT_SCHEMA.to_string()),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Open the store, creating the schema if the file is new.
pub fn prepare_database(args: &ServerArgs) -> ServerResult<(Database, bool)> {
    let db = Database::new(args.resolve_db_path());
    let schema = args.load_schema()?;
    let created = db.bootstrap(&schema)?;
    Ok((db, created))
}

/// Run the server with the given arguments
pub async fn run_server(args: ServerArgs) -> ServerResult<()> {
    // Schema must exist before the first request is accepted
    let (db, _) = prepare_database(&args)?;
    info!("Database: {}", db.path().display());

    let app = create_router(AppState::new(db), &args);

    let addr = args.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Starting userbase-server on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the Axum router with all routes
pub fn create_router(state: AppState, args: &ServerArgs) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(args));

    Router::new()
        // Page
        .route("/", get(routes::index))
        // Health
        .route("/health", get(routes::health_check))
        // Users API
        .route(
            "/api/users",
            get(routes::list_users).post(routes::create_user),
        )
        .route("/api/users/{user_id}", get(routes::get_user))
        .layer(middleware)
        .with_state(state)
}

fn cors_layer(args: &ServerArgs) -> CorsLayer {
    if args.cors_permissive {
        warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::permissive();
    }

    // Localhost only
    let origins: Vec<HeaderValue> = ["localhost", "127.0.0.1"]
        .iter()
        .filter_map(|host| format!("http://{}:{}", host, args.port).parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
