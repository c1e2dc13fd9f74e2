//! Boundary error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("not authenticated")]
  Unauthenticated,

  #[error("{0}")]
  InvalidUsername(String),

  #[error("username already exists")]
  DuplicateUsername,

  #[error("user not found; register first")]
  UnknownMember,
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::Unauthenticated | Error::UnknownMember => StatusCode::UNAUTHORIZED,
      Error::InvalidUsername(_) => StatusCode::BAD_REQUEST,
      Error::DuplicateUsername => StatusCode::CONFLICT,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
