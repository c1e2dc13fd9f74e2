//! [`MemoryStore`] — a task-safe map plus a monotonic id counter.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::Mutex;

use berth_core::{
  booking::{Booking, BookingChanges, BookingId, BookingStatus, NewBooking},
  conflict,
  error::Error,
  store::BookingStore,
};

/// Bookings keyed by id. Ids are allocated monotonically, so ascending key
/// order is insertion order.
#[derive(Debug, Default)]
struct Inner {
  bookings: BTreeMap<BookingId, Booking>,
  next_id:  u64,
}

/// The in-memory booking store.
///
/// One mutex guards the whole map, making every mutation a single critical
/// section — in particular the conflict check and insert of
/// [`BookingStore::create`] are one atomic unit. Contention is expected to
/// be negligible at club scale.
#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl BookingStore for MemoryStore {
  async fn create(&self, owner: &str, new: NewBooking) -> Result<Booking, Error> {
    let mut inner = self.inner.lock().await;

    if conflict::has_conflict(
      &new.yacht_id,
      new.date,
      new.slot,
      inner.bookings.values(),
    ) {
      return Err(Error::SchedulingConflict);
    }

    inner.next_id += 1;
    let id = BookingId(inner.next_id);
    let booking = Booking {
      id,
      yacht_id: new.yacht_id,
      owner: owner.to_owned(),
      date: new.date,
      slot: new.slot,
      party_size: new.party_size,
      special_requests: new.special_requests,
      status: BookingStatus::Pending,
      created_at: Utc::now(),
      updated_at: None,
      cancelled_at: None,
    };
    inner.bookings.insert(id, booking.clone());
    Ok(booking)
  }

  async fn get(&self, id: BookingId) -> Result<Option<Booking>, Error> {
    Ok(self.inner.lock().await.bookings.get(&id).cloned())
  }

  async fn update(
    &self,
    id: BookingId,
    changes: BookingChanges,
  ) -> Result<Booking, Error> {
    let mut inner = self.inner.lock().await;
    let booking = inner.bookings.get_mut(&id).ok_or(Error::NotFound(id))?;
    booking.apply(&changes, Utc::now());
    Ok(booking.clone())
  }

  async fn list_for_owner(&self, owner: &str) -> Result<Vec<Booking>, Error> {
    let inner = self.inner.lock().await;
    Ok(
      inner
        .bookings
        .values()
        .filter(|b| b.owner == owner)
        .cloned()
        .collect(),
    )
  }

  async fn list_all(&self) -> Result<Vec<Booking>, Error> {
    Ok(self.inner.lock().await.bookings.values().cloned().collect())
  }
}
