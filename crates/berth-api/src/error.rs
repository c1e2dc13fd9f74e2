//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The core taxonomy maps onto statuses as: `NotFound` → 404, `Forbidden`
//! → 403, `SchedulingConflict` → 409, everything else → 400.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Wrapper rendering a core [`Error`](berth_core::Error) as a JSON response
/// with the appropriate status code.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub berth_core::Error);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    use berth_core::Error as E;

    let status = match &self.0 {
      E::NotFound(_) => StatusCode::NOT_FOUND,
      E::Forbidden => StatusCode::FORBIDDEN,
      E::SchedulingConflict => StatusCode::CONFLICT,
      E::UnknownYacht(_)
      | E::InvalidDate(_)
      | E::PastDate(_)
      | E::InvalidTimeSlot(_)
      | E::InvalidPartySize
      | E::CapacityExceeded { .. }
      | E::InvalidTransition { .. }
      | E::NoValidUpdate => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": self.0.to_string() }))).into_response()
  }
}
