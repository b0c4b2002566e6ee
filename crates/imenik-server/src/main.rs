//! imenik server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the contacts API over HTTP.
//!
//! # Issuing tokens
//!
//! ```text
//! imenik add-principal --name ana
//! ```
//!
//! prints a fresh API token once; only its digest is stored.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use imenik_api::{AppState, api_router, auth::issue_token};
use imenik_core::store::PrincipalStore;
use imenik_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "imenik contacts server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the API (default).
  Serve,
  /// Register a principal and print its API token.
  AddPrincipal {
    #[arg(long)]
    name: String,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(cfg, store).await,
    Command::AddPrincipal { name } => add_principal(&store, name).await,
  }
}

async fn serve(cfg: ServerConfig, store: SqliteStore) -> anyhow::Result<()> {
  let address = cfg.address();
  let state = AppState {
    store:    Arc::new(store),
    messages: Arc::new(cfg.messages),
  };
  let app = api_router(state).layer(TraceLayer::new_for_http());

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn add_principal(store: &SqliteStore, name: String) -> anyhow::Result<()> {
  let issued = issue_token();
  let principal = store
    .add_principal(name, issued.hash)
    .await
    .context("failed to add principal")?;
  tracing::info!(principal_id = %principal.principal_id, "principal added");
  println!("{}", issued.token);
  Ok(())
}
