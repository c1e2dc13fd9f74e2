//! Identity — an authenticated actor with a club role.
//!
//! Session mechanics live at the server boundary; the core consumes the
//! resolved identity and checks capabilities against it.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Club role. A closed enumeration, so a typo in a role name is a compile
/// error rather than a silently-failing string comparison.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Member,
  Crew,
  Admin,
}

/// Actions gated on role rather than ownership. Ownership-based rules
/// (editing requests, cancellation) live in the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
  /// Move a booking through its status state machine.
  ManageStatus,
  /// See every member's bookings.
  ViewAllBookings,
}

impl Role {
  pub fn has(self, capability: Capability) -> bool {
    match capability {
      Capability::ManageStatus => matches!(self, Role::Crew | Role::Admin),
      Capability::ViewAllBookings => matches!(self, Role::Admin),
    }
  }
}

/// An authenticated actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
  pub username: String,
  pub role:     Role,
}

impl Identity {
  pub fn new(username: impl Into<String>, role: Role) -> Self {
    Self {
      username: username.into(),
      role,
    }
  }

  pub fn has_capability(&self, capability: Capability) -> bool {
    self.role.has(capability)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_management_is_staff_only() {
    assert!(!Role::Member.has(Capability::ManageStatus));
    assert!(Role::Crew.has(Capability::ManageStatus));
    assert!(Role::Admin.has(Capability::ManageStatus));
  }

  #[test]
  fn listing_everything_is_admin_only() {
    assert!(!Role::Member.has(Capability::ViewAllBookings));
    assert!(!Role::Crew.has(Capability::ViewAllBookings));
    assert!(Role::Admin.has(Capability::ViewAllBookings));
  }

  #[test]
  fn roles_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    assert_eq!(Role::Crew.to_string(), "crew");
  }
}
