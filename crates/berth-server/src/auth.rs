//! Member directory, opaque session registry, and the session middleware.
//!
//! The core engine consumes a resolved
//! [`Identity`](berth_core::identity::Identity); everything token-shaped
//! lives here. Tokens are uuid-v4 strings carried in an HttpOnly `sid`
//! cookie.

use std::collections::HashMap;

use axum::{
  extract::{Request, State},
  http::{HeaderMap, header},
  middleware::Next,
  response::Response,
};
use berth_core::{
  identity::{Identity, Role},
  store::BookingStore,
};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{AppState, error::Error};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sid";

// ─── Members ──────────────────────────────────────────────────────────────────

/// A registered club member.
#[derive(Debug, Clone)]
pub struct Member {
  pub identity:     Identity,
  pub member_since: DateTime<Utc>,
}

/// Role assignment decided at registration time from config allowlists —
/// the stand-in for out-of-band administrative role management.
#[derive(Debug, Clone, Default)]
pub struct RolePolicy {
  pub admins: Vec<String>,
  pub crew:   Vec<String>,
}

impl RolePolicy {
  pub fn role_for(&self, username: &str) -> Role {
    if self.admins.iter().any(|name| name == username) {
      Role::Admin
    } else if self.crew.iter().any(|name| name == username) {
      Role::Crew
    } else {
      Role::Member
    }
  }
}

// ─── Directory ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Inner {
  members:  HashMap<String, Member>,
  /// Session token → username.
  sessions: HashMap<String, String>,
}

/// Username → member plus the opaque session-token mapping.
#[derive(Debug, Default)]
pub struct Directory {
  policy: RolePolicy,
  inner:  Mutex<Inner>,
}

impl Directory {
  pub fn new(policy: RolePolicy) -> Self {
    Self {
      policy,
      inner: Mutex::new(Inner::default()),
    }
  }

  /// Validate and register `username`. `DuplicateUsername` if taken.
  pub async fn register(&self, raw: &str) -> Result<Member, Error> {
    let username = validate_username(raw)?;
    let mut inner = self.inner.lock().await;
    if inner.members.contains_key(&username) {
      return Err(Error::DuplicateUsername);
    }

    let member = Member {
      identity:     Identity::new(
        username.clone(),
        self.policy.role_for(&username),
      ),
      member_since: Utc::now(),
    };
    inner.members.insert(username, member.clone());
    Ok(member)
  }

  /// Issue a fresh session token for a registered member.
  pub async fn login(&self, raw: &str) -> Result<(String, Identity), Error> {
    let username = validate_username(raw)?;
    let mut inner = self.inner.lock().await;
    let member = inner.members.get(&username).ok_or(Error::UnknownMember)?;
    let identity = member.identity.clone();

    let token = Uuid::new_v4().to_string();
    inner.sessions.insert(token.clone(), username);
    Ok((token, identity))
  }

  /// Drop a session token. Unknown tokens are ignored.
  pub async fn logout(&self, token: &str) {
    self.inner.lock().await.sessions.remove(token);
  }

  /// Resolve a session token to the member's identity.
  pub async fn resolve(&self, token: Option<&str>) -> Option<Identity> {
    let token = token?;
    let inner = self.inner.lock().await;
    let username = inner.sessions.get(token)?;
    inner
      .members
      .get(username)
      .map(|member| member.identity.clone())
  }
}

/// Usernames are non-empty after trimming and limited to `[A-Za-z0-9_-]`.
pub fn validate_username(raw: &str) -> Result<String, Error> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(Error::InvalidUsername("username cannot be empty".into()));
  }
  if !trimmed
    .chars()
    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
  {
    return Err(Error::InvalidUsername(
      "username can only contain letters, numbers, hyphens, and underscores"
        .into(),
    ));
  }
  Ok(trimmed.to_owned())
}

// ─── Cookie & middleware ──────────────────────────────────────────────────────

/// Extract the session token from the `Cookie` header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
  let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
  cookies.split(';').find_map(|pair| {
    let (name, value) = pair.trim().split_once('=')?;
    (name == SESSION_COOKIE).then(|| value.to_owned())
  })
}

/// Resolve the session cookie and insert the caller's [`Identity`] as a
/// request extension; 401 when there is no live session.
pub async fn require_session<S>(
  State(state): State<AppState<S>>,
  mut request: Request,
  next: Next,
) -> Result<Response, Error>
where
  S: BookingStore + 'static,
{
  let token = session_token(request.headers());
  let identity = state
    .directory
    .resolve(token.as_deref())
    .await
    .ok_or(Error::Unauthenticated)?;

  request.extensions_mut().insert(identity);
  Ok(next.run(request).await)
}
