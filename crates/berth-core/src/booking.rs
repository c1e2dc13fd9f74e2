//! Booking types and the status state machine.
//!
//! A booking reserves one yacht for one date and time slot. The
//! `(yacht_id, date, slot)` tuple is the natural dedup key: at most one
//! non-cancelled booking may hold it at any time (see [`crate::conflict`]).

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Id ──────────────────────────────────────────────────────────────────────

/// Store-assigned booking key. Allocation is monotonic, so ascending id
/// order is insertion order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Booking window within a day.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TimeSlot {
  Morning,
  Afternoon,
  Evening,
  FullDay,
}

/// Lifecycle status of a booking.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
  Pending,
  Confirmed,
  Cancelled,
  Completed,
}

impl BookingStatus {
  /// `cancelled` and `completed` are terminal.
  pub fn is_terminal(self) -> bool {
    matches!(self, Self::Cancelled | Self::Completed)
  }

  /// Whether the state machine allows moving from `self` to `to`.
  ///
  /// `pending → {confirmed, cancelled}`, `confirmed → {cancelled, completed}`.
  pub fn allows(self, to: BookingStatus) -> bool {
    match self {
      Self::Pending => matches!(to, Self::Confirmed | Self::Cancelled),
      Self::Confirmed => matches!(to, Self::Cancelled | Self::Completed),
      Self::Cancelled | Self::Completed => false,
    }
  }
}

// ─── Booking ─────────────────────────────────────────────────────────────────

/// A reservation of a yacht for a date and time slot by a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
  pub id:               BookingId,
  pub yacht_id:         String,
  /// Username of the member who created the booking; immutable thereafter.
  pub owner:            String,
  pub date:             NaiveDate,
  pub slot:             TimeSlot,
  pub party_size:       u32,
  /// Sanitized free-text requests, keyed by topic (e.g. `"catering"`).
  pub special_requests: BTreeMap<String, String>,
  pub status:           BookingStatus,
  /// Store-assigned; never client-supplied.
  pub created_at:       DateTime<Utc>,
  pub updated_at:       Option<DateTime<Utc>>,
  pub cancelled_at:     Option<DateTime<Utc>>,
}

impl Booking {
  /// Whether this booking still holds its `(yacht, date, slot)` key.
  pub fn is_active(&self) -> bool {
    self.status != BookingStatus::Cancelled
  }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// A raw booking request as received from the boundary layer. Nothing here
/// is trusted; [`crate::validate`] normalizes it field by field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
  #[serde(default)]
  pub yacht_id:         String,
  #[serde(default)]
  pub date:             String,
  #[serde(default)]
  pub time_slot:        String,
  #[serde(default)]
  pub party_size:       i64,
  #[serde(default)]
  pub special_requests: Option<serde_json::Value>,
}

/// The validated, normalized form of a [`BookingRequest`]. Input to
/// [`crate::store::BookingStore::create`], which assigns id, owner,
/// status, and timestamps.
#[derive(Debug, Clone)]
pub struct NewBooking {
  pub yacht_id:         String,
  pub date:             NaiveDate,
  pub slot:             TimeSlot,
  pub party_size:       u32,
  pub special_requests: BTreeMap<String, String>,
}

// ─── Patch & merge ───────────────────────────────────────────────────────────

/// Fields a caller may ask to change on an existing booking. Which of them
/// actually apply is decided per caller by the lifecycle; date, slot, and
/// yacht are immutable after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPatch {
  #[serde(default)]
  pub status:           Option<BookingStatus>,
  #[serde(default)]
  pub special_requests: Option<serde_json::Value>,
}

/// The authorized change set applied by the store. Absent fields keep
/// their prior value.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
  pub status:           Option<BookingStatus>,
  /// Shallow per-key merge: new values override, unmentioned keys are
  /// retained.
  pub special_requests: Option<BTreeMap<String, String>>,
  pub cancelled_at:     Option<DateTime<Utc>>,
}

impl BookingChanges {
  pub fn is_empty(&self) -> bool {
    self.status.is_none()
      && self.special_requests.is_none()
      && self.cancelled_at.is_none()
  }
}

impl Booking {
  /// Apply `changes` as one whole-record mutation, stamping `updated_at`.
  pub fn apply(&mut self, changes: &BookingChanges, now: DateTime<Utc>) {
    if let Some(status) = changes.status {
      self.status = status;
    }
    if let Some(requests) = &changes.special_requests {
      for (key, value) in requests {
        self.special_requests.insert(key.clone(), value.clone());
      }
    }
    if let Some(at) = changes.cancelled_at {
      self.cancelled_at = Some(at);
    }
    self.updated_at = Some(now);
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn state_machine_from_pending() {
    assert!(BookingStatus::Pending.allows(BookingStatus::Confirmed));
    assert!(BookingStatus::Pending.allows(BookingStatus::Cancelled));
    assert!(!BookingStatus::Pending.allows(BookingStatus::Completed));
  }

  #[test]
  fn state_machine_from_confirmed() {
    assert!(BookingStatus::Confirmed.allows(BookingStatus::Cancelled));
    assert!(BookingStatus::Confirmed.allows(BookingStatus::Completed));
    assert!(!BookingStatus::Confirmed.allows(BookingStatus::Pending));
  }

  #[test]
  fn terminal_states_allow_nothing() {
    for terminal in [BookingStatus::Cancelled, BookingStatus::Completed] {
      assert!(terminal.is_terminal());
      for to in [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
      ] {
        assert!(!terminal.allows(to));
      }
    }
  }

  #[test]
  fn time_slot_parses_kebab_case() {
    assert_eq!(TimeSlot::from_str("full-day").unwrap(), TimeSlot::FullDay);
    assert_eq!(TimeSlot::from_str("morning").unwrap(), TimeSlot::Morning);
    assert!(TimeSlot::from_str("midnight").is_err());
  }

  #[test]
  fn merge_overrides_per_key_and_retains_the_rest() {
    let mut booking = Booking {
      id:               BookingId(1),
      yacht_id:         "yacht-1".into(),
      owner:            "alice".into(),
      date:             NaiveDate::from_ymd_opt(2031, 6, 1).unwrap(),
      slot:             TimeSlot::Morning,
      party_size:       4,
      special_requests: BTreeMap::from([
        ("catering".to_owned(), "cheese board".to_owned()),
        ("music".to_owned(), "jazz".to_owned()),
      ]),
      status:           BookingStatus::Pending,
      created_at:       Utc::now(),
      updated_at:       None,
      cancelled_at:     None,
    };

    let changes = BookingChanges {
      special_requests: Some(BTreeMap::from([(
        "music".to_owned(),
        "sea shanties".to_owned(),
      )])),
      ..BookingChanges::default()
    };
    let now = Utc::now();
    booking.apply(&changes, now);

    assert_eq!(booking.special_requests["music"], "sea shanties");
    assert_eq!(booking.special_requests["catering"], "cheese board");
    assert_eq!(booking.updated_at, Some(now));
    assert_eq!(booking.status, BookingStatus::Pending);
  }
}
