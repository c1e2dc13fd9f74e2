//! Handler for `/yachts` — the club fleet.

use std::sync::Arc;

use axum::{Json, extract::State};
use berth_core::{catalog::Yacht, lifecycle::Lifecycle, store::BookingStore};

/// `GET /yachts` — every yacht in the catalog.
pub async fn list<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
) -> Json<Vec<Yacht>>
where
  S: BookingStore,
{
  Json(lifecycle.catalog().iter().cloned().collect())
}
