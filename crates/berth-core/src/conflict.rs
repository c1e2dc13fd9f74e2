//! Double-booking detection.
//!
//! Two bookings conflict when they share `(yacht_id, date, slot)` and the
//! existing one is not cancelled. The store evaluates this inside the same
//! critical section as the insert, so two concurrent creates for the same
//! key cannot both pass.

use chrono::NaiveDate;

use crate::booking::{Booking, TimeSlot};

/// True iff `existing` blocks a new booking for `(yacht_id, date, slot)`.
pub fn blocks(
  existing: &Booking,
  yacht_id: &str,
  date: NaiveDate,
  slot: TimeSlot,
) -> bool {
  existing.is_active()
    && existing.yacht_id == yacht_id
    && existing.date == date
    && existing.slot == slot
}

/// Linear scan over `existing`; adequate at club scale. If the fleet ever
/// grows, index by `(yacht_id, date, slot)` instead.
pub fn has_conflict<'a, I>(
  yacht_id: &str,
  date: NaiveDate,
  slot: TimeSlot,
  existing: I,
) -> bool
where
  I: IntoIterator<Item = &'a Booking>,
{
  existing
    .into_iter()
    .any(|booking| blocks(booking, yacht_id, date, slot))
}
