//! Error types for `berth-core`.
//!
//! Every failure is a value returned to the caller; nothing here is fatal
//! to the process, and the lifecycle never retries. The boundary layer maps
//! these onto transport status codes.

use chrono::NaiveDate;
use thiserror::Error;

use crate::booking::{BookingId, BookingStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("unknown yacht: {0:?}")]
  UnknownYacht(String),

  #[error("invalid date: {0:?}")]
  InvalidDate(String),

  #[error("date {0} is in the past")]
  PastDate(NaiveDate),

  #[error("invalid time slot: {0:?}")]
  InvalidTimeSlot(String),

  #[error("party size must be at least 1")]
  InvalidPartySize,

  #[error("party size {requested} exceeds yacht capacity of {capacity}")]
  CapacityExceeded { requested: u64, capacity: u32 },

  #[error("yacht is not available for the selected date and time")]
  SchedulingConflict,

  #[error("booking not found: {0}")]
  NotFound(BookingId),

  #[error("not authorized")]
  Forbidden,

  #[error("cannot change a {from} booking")]
  InvalidTransition { from: BookingStatus },

  #[error("no valid updates provided")]
  NoValidUpdate,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
