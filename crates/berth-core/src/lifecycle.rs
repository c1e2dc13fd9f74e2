//! The booking lifecycle — create, update, cancel, and the authorization
//! rules around them.
//!
//! Status changes are role-based (crew and admins), while cancellation is
//! strictly owner-based regardless of role. The asymmetry is deliberate:
//! staff move bookings through the state machine, but only the member who
//! made a reservation may call it off.

use chrono::Utc;

use crate::{
  booking::{
    Booking, BookingChanges, BookingId, BookingPatch, BookingRequest,
    BookingStatus, NewBooking,
  },
  catalog::Catalog,
  error::{Error, Result},
  identity::{Capability, Identity},
  store::BookingStore,
  validate,
};

/// The booking engine: validation, conflict-checked creation, authorized
/// mutation, and listing over an injected [`BookingStore`].
#[derive(Debug)]
pub struct Lifecycle<S> {
  store:   S,
  catalog: Catalog,
}

impl<S: BookingStore> Lifecycle<S> {
  pub fn new(store: S, catalog: Catalog) -> Self {
    Self { store, catalog }
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  /// Create a booking owned by `identity`.
  ///
  /// Fails fast on the first rejected field, in order: yacht, date, time
  /// slot, party size. The conflict check runs atomically with the insert
  /// inside the store, so concurrent creates cannot double-book a slot.
  pub async fn create(
    &self,
    identity: &Identity,
    raw: BookingRequest,
  ) -> Result<Booking> {
    let capacity = self
      .catalog
      .capacity(&raw.yacht_id)
      .ok_or_else(|| Error::UnknownYacht(raw.yacht_id.clone()))?;

    let today = Utc::now().date_naive();
    let new = NewBooking {
      yacht_id:         raw.yacht_id.clone(),
      date:             validate::booking_date(&raw.date, today)?,
      slot:             validate::time_slot(&raw.time_slot)?,
      party_size:       validate::party_size(raw.party_size, capacity)?,
      special_requests: validate::special_requests(
        raw.special_requests.as_ref(),
      ),
    };

    self.store.create(&identity.username, new).await
  }

  /// Patch an existing booking.
  ///
  /// The owner may change `special_requests` (shallow per-key merge); crew
  /// and admins may change `status`, but only along a legal transition of
  /// the state machine. A caller who is neither owner nor staff is
  /// `Forbidden`; a patch containing no field the caller may change is
  /// `NoValidUpdate`. Conflict detection is not re-run — date, slot, and
  /// yacht are immutable after creation.
  pub async fn update(
    &self,
    identity: &Identity,
    id: BookingId,
    patch: BookingPatch,
  ) -> Result<Booking> {
    let booking = self.store.get(id).await?.ok_or(Error::NotFound(id))?;

    let is_owner = booking.owner == identity.username;
    let manages_status = identity.has_capability(Capability::ManageStatus);
    if !is_owner && !manages_status {
      return Err(Error::Forbidden);
    }

    let mut changes = BookingChanges::default();

    if let Some(requests) = patch.special_requests.as_ref()
      && is_owner
    {
      changes.special_requests =
        Some(validate::special_requests(Some(requests)));
    }

    if let Some(status) = patch.status
      && manages_status
    {
      if !booking.status.allows(status) {
        return Err(Error::InvalidTransition {
          from: booking.status,
        });
      }
      changes.status = Some(status);
    }

    if changes.is_empty() {
      return Err(Error::NoValidUpdate);
    }

    self.store.update(id, changes).await
  }

  /// Cancel a pending booking. Strictly owner-only, whatever the caller's
  /// role — there is deliberately no staff override.
  pub async fn cancel(
    &self,
    identity: &Identity,
    id: BookingId,
  ) -> Result<Booking> {
    let booking = self.store.get(id).await?.ok_or(Error::NotFound(id))?;

    if booking.owner != identity.username {
      return Err(Error::Forbidden);
    }
    if booking.status != BookingStatus::Pending {
      return Err(Error::InvalidTransition {
        from: booking.status,
      });
    }

    let changes = BookingChanges {
      status: Some(BookingStatus::Cancelled),
      cancelled_at: Some(Utc::now()),
      ..BookingChanges::default()
    };
    self.store.update(id, changes).await
  }

  /// The caller's bookings, in insertion order. Callers filter by status
  /// if they need to.
  pub async fn list_for_owner(
    &self,
    identity: &Identity,
  ) -> Result<Vec<Booking>> {
    self.store.list_for_owner(&identity.username).await
  }

  /// Every booking regardless of owner. Admin only.
  pub async fn list_all(&self, identity: &Identity) -> Result<Vec<Booking>> {
    if !identity.has_capability(Capability::ViewAllBookings) {
      return Err(Error::Forbidden);
    }
    self.store.list_all().await
  }
}
