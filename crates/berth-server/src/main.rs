//! Berth server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), seeds the club
//! fleet into an in-memory store, and serves the booking API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use berth_core::{catalog::Catalog, lifecycle::Lifecycle};
use berth_server::{
  AppState, ServerConfig,
  auth::{Directory, RolePolicy},
};
use berth_store_memory::MemoryStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Berth yacht-club booking server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("BERTH"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Build application state around the in-memory store.
  let catalog = Catalog::club_fleet();
  tracing::info!("seeded catalog with {} yachts", catalog.len());

  let state = AppState {
    lifecycle: Arc::new(Lifecycle::new(MemoryStore::new(), catalog)),
    directory: Arc::new(Directory::new(RolePolicy {
      admins: server_cfg.admins.clone(),
      crew:   server_cfg.crew.clone(),
    })),
  };

  let app = berth_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
