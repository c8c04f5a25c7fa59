//! `gw-reserve` — typed reservations of limited sub-resources.
//!
//! A holder (say, a vehicle) exposes a limited set of sub-resources (seats);
//! the job scheduler must not send two actors after the same one.  Each job
//! kind gets its own reservation type, generic over the sub-resource it
//! hands out; the manager tracks at most one active reservation per
//! claimant system-wide and reclaims abandoned claims on a periodic sweep.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`reservation`] | `Reservation` trait, `TypedReservation<T>`            |
//! | [`manager`]     | `ReservationManager`, `ReservationFactory`            |
//! | [`error`]       | `ReserveError`, `ReserveResult<T>`                    |
//!
//! # Failure semantics
//!
//! `reserve` answers the scheduler with a plain `bool`: every failure —
//! unregistered job kind, factory error, capacity exhausted, target-type
//! mismatch — is logged and reported as `false` so the scheduler retries a
//! different target instead of unwinding mid-turn.  The `ReserveResult`
//! plumbing underneath exists for the typed layer and for factories.

pub mod error;
pub mod manager;
pub mod reservation;

#[cfg(test)]
mod tests;

pub use error::{ReserveError, ReserveResult};
pub use manager::{ReservationFactory, ReservationManager};
pub use reservation::{Reservation, SubResource, TypedReservation};
