//! Pure validation and normalization of raw booking requests.
//!
//! Each field has its own validator; [`booking`] runs all of them and
//! collects every failure. Booking creation fails fast on the first
//! rejection in field order, so the lifecycle calls the field validators
//! directly with `?`.

use std::{collections::BTreeMap, str::FromStr};

use chrono::NaiveDate;

use crate::{
  booking::{BookingRequest, NewBooking, TimeSlot},
  error::Error,
};

/// Date format accepted from clients (the HTML date-input format).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate and normalize `raw` against a yacht of `capacity`.
///
/// Every check runs; on failure the collected errors are returned in field
/// order (date, time slot, party size) and are never empty.
pub fn booking(
  raw: &BookingRequest,
  capacity: u32,
  today: NaiveDate,
) -> Result<NewBooking, Vec<Error>> {
  let date = booking_date(&raw.date, today);
  let slot = time_slot(&raw.time_slot);
  let size = party_size(raw.party_size, capacity);
  let special_requests = special_requests(raw.special_requests.as_ref());

  match (date, slot, size) {
    (Ok(date), Ok(slot), Ok(party_size)) => Ok(NewBooking {
      yacht_id: raw.yacht_id.clone(),
      date,
      slot,
      party_size,
      special_requests,
    }),
    (date, slot, size) => Err(
      [date.err(), slot.err(), size.err()]
        .into_iter()
        .flatten()
        .collect(),
    ),
  }
}

/// `InvalidDate` if unparseable, `PastDate` if strictly before `today`
/// (date-only comparison; time of day is ignored).
pub fn booking_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, Error> {
  let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
    .map_err(|_| Error::InvalidDate(raw.to_owned()))?;
  if date < today {
    return Err(Error::PastDate(date));
  }
  Ok(date)
}

pub fn time_slot(raw: &str) -> Result<TimeSlot, Error> {
  TimeSlot::from_str(raw.trim())
    .map_err(|_| Error::InvalidTimeSlot(raw.to_owned()))
}

pub fn party_size(raw: i64, capacity: u32) -> Result<u32, Error> {
  if raw < 1 {
    return Err(Error::InvalidPartySize);
  }
  if raw > i64::from(capacity) {
    return Err(Error::CapacityExceeded {
      requested: raw as u64,
      capacity,
    });
  }
  Ok(raw as u32)
}

/// Lenient normalization of the special-requests field — it never rejects.
///
/// Non-object input (or no input) normalizes to an empty map; non-string
/// values and entries that are empty after sanitization are dropped.
pub fn special_requests(
  raw: Option<&serde_json::Value>,
) -> BTreeMap<String, String> {
  let Some(serde_json::Value::Object(entries)) = raw else {
    return BTreeMap::new();
  };

  let mut sanitized = BTreeMap::new();
  for (key, value) in entries {
    if let serde_json::Value::String(text) = value {
      let cleaned = strip_tags(text.trim());
      let cleaned = cleaned.trim();
      if !cleaned.is_empty() {
        sanitized.insert(key.clone(), cleaned.to_owned());
      }
    }
  }
  sanitized
}

/// Remove complete `<...>` spans. A `<` with no closing `>` is kept
/// verbatim.
fn strip_tags(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut rest = text;
  while let Some(start) = rest.find('<') {
    out.push_str(&rest[..start]);
    match rest[start..].find('>') {
      Some(end) => rest = &rest[start + end + 1..],
      None => {
        out.push_str(&rest[start..]);
        return out;
      }
    }
  }
  out.push_str(rest);
  out
}
