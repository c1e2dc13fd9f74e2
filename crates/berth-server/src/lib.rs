//! HTTP boundary for the Berth booking service.
//!
//! Owns everything the core engine treats as an external collaborator: the
//! member directory, the opaque session-token registry, cookie handling,
//! and the router that mounts the JSON API behind the auth middleware.

pub mod auth;
pub mod error;
pub mod session;


pub use error::Error;

use std::sync::Arc;

use axum::{Router, middleware, routing::post};
use berth_core::{lifecycle::Lifecycle, store::BookingStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::Directory;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` plus the
/// `BERTH_`-prefixed environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:   String,
  #[serde(default = "default_port")]
  pub port:   u16,
  /// Usernames granted the `admin` role at registration.
  #[serde(default)]
  pub admins: Vec<String>,
  /// Usernames granted the `crew` role at registration.
  #[serde(default)]
  pub crew:   Vec<String>,
}

fn default_host() -> String {
  "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
  3000
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: BookingStore> {
  pub lifecycle: Arc<Lifecycle<S>>,
  pub directory: Arc<Directory>,
}

impl<S: BookingStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      lifecycle: Arc::clone(&self.lifecycle),
      directory: Arc::clone(&self.directory),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: session endpoints plus the JSON API
/// nested behind the session middleware, all under `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: BookingStore + 'static,
{
  let api = berth_api::api_router(Arc::clone(&state.lifecycle)).layer(
    middleware::from_fn_with_state(state.clone(), auth::require_session::<S>),
  );

  let sessions = Router::new()
    .route("/users/register", post(session::register::<S>))
    .route(
      "/session",
      post(session::login::<S>)
        .get(session::whoami::<S>)
        .delete(session::logout::<S>),
    )
    .with_state(state);

  Router::new()
    .nest("/api", sessions.merge(api))
    .layer(TraceLayer::new_for_http())
}
