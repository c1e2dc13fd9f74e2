//! Registration and session endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/users/register` | Body: `{"username":"..."}`; 201 |
//! | `POST`   | `/session` | Login; sets the `sid` cookie |
//! | `GET`    | `/session` | Introspection; 401 without a live session |
//! | `DELETE` | `/session` | Logout; clears the cookie |

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use berth_core::{identity::Identity, store::BookingStore};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  auth::{self, SESSION_COOKIE},
  error::Error,
};

#[derive(Debug, Deserialize)]
pub struct Credentials {
  #[serde(default)]
  pub username: String,
}

/// `POST /users/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<Credentials>,
) -> Result<impl IntoResponse, Error>
where
  S: BookingStore,
{
  let member = state.directory.register(&body.username).await?;
  tracing::info!(
    "registered {} as {}",
    member.identity.username,
    member.identity.role
  );
  Ok((
    StatusCode::CREATED,
    Json(json!({ "message": "Registration successful" })),
  ))
}

/// `POST /session` — issue a session cookie for a registered member.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<Credentials>,
) -> Result<impl IntoResponse, Error>
where
  S: BookingStore,
{
  let (token, identity) = state.directory.login(&body.username).await?;
  tracing::info!("session opened for {}", identity.username);

  let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly");
  Ok(([(header::SET_COOKIE, cookie)], Json(identity)))
}

/// `DELETE /session` — drop the session and clear the cookie.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> impl IntoResponse
where
  S: BookingStore,
{
  if let Some(token) = auth::session_token(&headers) {
    state.directory.logout(&token).await;
  }

  let cleared = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
  (
    [(header::SET_COOKIE, cleared)],
    Json(json!({ "message": "Logged out successfully" })),
  )
}

/// `GET /session` — the caller's identity, resolved from the cookie.
pub async fn whoami<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Result<Json<Identity>, Error>
where
  S: BookingStore,
{
  let token = auth::session_token(&headers);
  state
    .directory
    .resolve(token.as_deref())
    .await
    .map(Json)
    .ok_or(Error::Unauthenticated)
}
