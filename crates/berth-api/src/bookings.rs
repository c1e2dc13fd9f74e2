//! Handlers for `/bookings` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/bookings` | Caller's bookings; optional `?status=` filter |
//! | `POST`   | `/bookings` | Body: [`BookingRequest`]; 201 + the booking |
//! | `PUT`    | `/bookings/{id}` | Body: [`BookingPatch`] |
//! | `DELETE` | `/bookings/{id}` | Cancel; owner only |
//! | `GET`    | `/admin/bookings` | Every booking; admin only |

use std::sync::Arc;

use axum::{
  Extension, Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use berth_core::{
  booking::{Booking, BookingId, BookingPatch, BookingRequest, BookingStatus},
  identity::Identity,
  lifecycle::Lifecycle,
  store::BookingStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// If set, only bookings in this status are returned.
  pub status: Option<BookingStatus>,
}

/// `GET /bookings[?status=<status>]` — the caller's bookings.
pub async fn list<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
  Extension(identity): Extension<Identity>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Booking>>, ApiError>
where
  S: BookingStore,
{
  let mut bookings = lifecycle.list_for_owner(&identity).await?;
  if let Some(status) = params.status {
    bookings.retain(|b| b.status == status);
  }
  Ok(Json(bookings))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /bookings` — create a booking owned by the caller.
pub async fn create<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
  Extension(identity): Extension<Identity>,
  Json(body): Json<BookingRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookingStore,
{
  let booking = lifecycle.create(&identity, body).await?;
  Ok((StatusCode::CREATED, Json(booking)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /bookings/{id}` — patch requests (owner) or status (staff).
pub async fn update<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
  Extension(identity): Extension<Identity>,
  Path(id): Path<BookingId>,
  Json(patch): Json<BookingPatch>,
) -> Result<Json<Booking>, ApiError>
where
  S: BookingStore,
{
  let booking = lifecycle.update(&identity, id, patch).await?;
  Ok(Json(booking))
}

// ─── Cancel ───────────────────────────────────────────────────────────────────

/// `DELETE /bookings/{id}` — cancel a pending booking; owner only.
pub async fn cancel<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
  Extension(identity): Extension<Identity>,
  Path(id): Path<BookingId>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: BookingStore,
{
  lifecycle.cancel(&identity, id).await?;
  Ok(Json(json!({ "message": "Booking cancelled" })))
}

// ─── List all ─────────────────────────────────────────────────────────────────

/// `GET /admin/bookings` — every booking regardless of owner; admin only.
pub async fn list_all<S>(
  State(lifecycle): State<Arc<Lifecycle<S>>>,
  Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Booking>>, ApiError>
where
  S: BookingStore,
{
  let bookings = lifecycle.list_all(&identity).await?;
  Ok(Json(bookings))
}
