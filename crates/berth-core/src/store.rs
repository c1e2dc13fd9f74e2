//! The `BookingStore` trait.
//!
//! The trait is implemented by storage bindings (e.g. `berth-store-memory`).
//! The lifecycle depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  booking::{Booking, BookingChanges, BookingId, NewBooking},
  error::Error,
};

/// Abstraction over a booking store backend.
///
/// Mutations are atomic: [`create`](Self::create) performs its conflict
/// check and insert in one critical section, and [`update`](Self::update)
/// applies its change set as a whole-record replace. Readers never observe
/// a half-applied mutation.
///
/// Methods return the core [`Error`] so the lifecycle's taxonomy flows
/// through unchanged, and all futures are `Send` so the trait can be used
/// from multi-threaded async runtimes (tokio with axum).
pub trait BookingStore: Send + Sync {
  /// Allocate the next id and insert a `pending` booking for `owner` —
  /// unless an active booking already holds `(yacht, date, slot)`, in
  /// which case `Error::SchedulingConflict` and the store is unchanged.
  fn create<'a>(
    &'a self,
    owner: &'a str,
    new: NewBooking,
  ) -> impl Future<Output = Result<Booking, Error>> + Send + 'a;

  /// Retrieve a booking by id. `None` if unknown.
  fn get(
    &self,
    id: BookingId,
  ) -> impl Future<Output = Result<Option<Booking>, Error>> + Send + '_;

  /// Apply `changes` to an existing booking, stamping `updated_at`.
  /// `Error::NotFound` if the id is unknown.
  fn update(
    &self,
    id: BookingId,
    changes: BookingChanges,
  ) -> impl Future<Output = Result<Booking, Error>> + Send + '_;

  /// All bookings owned by `owner`, in insertion order.
  fn list_for_owner<'a>(
    &'a self,
    owner: &'a str,
  ) -> impl Future<Output = Result<Vec<Booking>, Error>> + Send + 'a;

  /// Every booking regardless of owner, in insertion order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Booking>, Error>> + Send + '_;
}
