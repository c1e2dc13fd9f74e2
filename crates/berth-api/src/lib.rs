//! JSON REST API for the Berth booking engine.
//!
//! Exposes an axum [`Router`] backed by any
//! [`BookingStore`](berth_core::store::BookingStore). Session and transport
//! concerns are the caller's responsibility: every handler reads the
//! caller's [`Identity`](berth_core::identity::Identity) from a request
//! extension, which the server's auth middleware inserts after resolving
//! the session cookie.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", berth_api::api_router(lifecycle.clone()))
//! ```

pub mod bookings;
pub mod error;
pub mod yachts;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use berth_core::{lifecycle::Lifecycle, store::BookingStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `lifecycle`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(lifecycle: Arc<Lifecycle<S>>) -> Router<()>
where
  S: BookingStore + 'static,
{
  Router::new()
    .route("/yachts", get(yachts::list::<S>))
    .route(
      "/bookings",
      get(bookings::list::<S>).post(bookings::create::<S>),
    )
    .route(
      "/bookings/{id}",
      put(bookings::update::<S>).delete(bookings::cancel::<S>),
    )
    .route("/admin/bookings", get(bookings::list_all::<S>))
    .with_state(lifecycle)
}
