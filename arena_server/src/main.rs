//! Tournament and news content-management server.
//!
//! Serves the JSON API over a swappable resource store (in-memory or
//! flat JSON files) with JWT-backed authentication.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use pico_args::Arguments;
use tracing::info;

use arena::auth::AuthManager;
use arena::store::Stores;
use arena_server::api;
use arena_server::config::{ServerConfig, StoreBackend};
use arena_server::{logging, seed};

const HELP: &str = "\
Run the arena tournament/news content-management server

USAGE:
  arena_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:3000]
  --store      BACKEND     Store backend: memory|json  [default: env STORE_BACKEND or memory]
  --data-dir   PATH        Data directory for the json backend  [default: env DATA_DIR or ./data]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:3000)
  STORE_BACKEND            Store backend (memory or json)
  DATA_DIR                 Data directory for the json backend
  SEED_DEMO_DATA           Seed fresh stores with demo data (default true)
  JWT_SECRET               JWT signing secret (required)
  PASSWORD_PEPPER          Password hashing pepper (required)
  (See .env file for all configuration options)
";

struct Args {
    bind: Option<SocketAddr>,
    store: Option<String>,
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        store: pargs.opt_value_from_str("--store")?,
        data_dir: pargs.opt_value_from_str("--data-dir")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.store, args.data_dir)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    config.validate()?;

    info!("Starting arena server at {}", config.bind);

    // Build the store backend
    let stores = match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store (seed: {})", config.store.seed_demo_data);
            Stores::memory(config.store.seed_demo_data)
        }
        StoreBackend::Json => {
            info!(
                "Using JSON store at {} (seed: {})",
                config.store.data_dir.display(),
                config.store.seed_demo_data
            );
            Stores::json(&config.store.data_dir, config.store.seed_demo_data)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to open JSON store: {}", e))?
        }
    };

    let auth = Arc::new(AuthManager::new(
        stores.users.clone(),
        config.security.password_pepper.clone(),
        config.security.jwt_secret.clone(),
    ));

    if config.store.seed_demo_data {
        let created = seed::register_demo_users(&auth)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed demo users: {}", e))?;
        if created > 0 {
            info!("Seeded {} demo user account(s)", created);
        }
    }

    // Create API state and router
    let state = api::AppState::new(stores, auth, config.store.backend.label());
    let app = api::create_router(state);

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
