//! Unit tests for gw-reserve.

use gw_core::{AgentId, Cadence, JobKind, Tick};

use crate::{ReservationFactory, ReservationManager, ReserveError, TypedReservation};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A seat handler on a vehicle — the canonical sub-resource.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
struct Seat(u8);

/// A different sub-resource type, for type-mismatch coverage.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
struct Slot(u8);

const BOARD: JobKind = JobKind(0);
const GUN: JobKind = JobKind(1);

const VEHICLE: AgentId = AgentId(100);
const P: AgentId = AgentId(1);
const Q: AgentId = AgentId(2);

fn seat_factory(capacity: u32) -> ReservationFactory {
    Box::new(move |_holder, kind| Ok(Box::new(TypedReservation::<Seat>::new(kind, capacity))))
}

fn manager(capacity: u32) -> ReservationManager {
    let mut mgr = ReservationManager::new();
    mgr.register_factory(BOARD, seat_factory(capacity));
    mgr
}

// ── TypedReservation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod typed_reservation {
    use super::*;
    use crate::Reservation;

    #[test]
    fn capacity_is_per_target() {
        let mut res = TypedReservation::<Seat>::new(BOARD, 1);
        res.add_claimant(P, Seat(0)).unwrap();

        // Seat 0 full; seat 1 still free.
        assert!(!res.can_reserve(Q, Seat(0)));
        assert!(res.can_reserve(Q, Seat(1)));
        assert!(matches!(
            res.add_claimant(Q, Seat(0)),
            Err(ReserveError::CapacityExhausted { .. })
        ));
        res.add_claimant(Q, Seat(1)).unwrap();
        assert_eq!(res.claimant_count(), 2);
    }

    #[test]
    fn one_claim_per_claimant() {
        let mut res = TypedReservation::<Seat>::new(BOARD, 4);
        res.add_claimant(P, Seat(0)).unwrap();
        assert!(!res.can_reserve(P, Seat(1)));
        assert!(matches!(
            res.add_claimant(P, Seat(1)),
            Err(ReserveError::AlreadyClaimed { .. })
        ));
        assert_eq!(res.target_of(P), Some(Seat(0)));
    }

    #[test]
    fn release_frees_the_target() {
        let mut res = TypedReservation::<Seat>::new(BOARD, 1);
        res.add_claimant(P, Seat(0)).unwrap();
        assert!(res.release(P));
        assert!(!res.release(P));
        assert!(res.is_empty());
        assert!(res.can_reserve(Q, Seat(0)));
    }

    #[test]
    fn retain_valid_releases_mismatched_jobs() {
        let mut res = TypedReservation::<Seat>::new(BOARD, 4);
        res.add_claimant(P, Seat(0)).unwrap();
        res.add_claimant(Q, Seat(1)).unwrap();

        // P still boarding; Q's job was cancelled.
        let released = res.retain_valid(&|claimant| (claimant == P).then_some(BOARD));
        assert_eq!(released, vec![Q]);
        assert!(res.holds(P));
        assert!(!res.holds(Q));
    }
}

// ── Reserve / release through the manager ─────────────────────────────────────

#[cfg(test)]
mod reserve {
    use super::*;

    #[test]
    fn reserve_and_read_back() {
        let mut mgr = manager(2);
        assert!(mgr.reserve(VEHICLE, P, BOARD, Seat(3)));

        assert_eq!(mgr.reserved_target::<Seat>(VEHICLE, BOARD, P), Some(Seat(3)));
        assert_eq!(mgr.active_reservation(P), Some((VEHICLE, BOARD)));
        assert_eq!(mgr.claimant_count(VEHICLE, BOARD), 1);
    }

    #[test]
    fn capacity_one_contention_until_release() {
        // Scenario C: P holds the only slot on the handler; Q must wait.
        let mut mgr = manager(1);
        assert!(mgr.reserve(VEHICLE, P, BOARD, Seat(0)));
        assert!(!mgr.reserve(VEHICLE, Q, BOARD, Seat(0)));
        assert!(mgr.active_reservation(Q).is_none());

        assert!(mgr.release_claimant(P));
        assert!(mgr.reserve(VEHICLE, Q, BOARD, Seat(0)));
        assert_eq!(mgr.reserved_target::<Seat>(VEHICLE, BOARD, Q), Some(Seat(0)));
    }

    #[test]
    fn reserving_elsewhere_transparently_releases_the_old_claim() {
        let other_vehicle = AgentId(200);
        let mut mgr = manager(1);
        assert!(mgr.reserve(VEHICLE, P, BOARD, Seat(0)));
        assert!(mgr.reserve(other_vehicle, P, BOARD, Seat(0)));

        assert_eq!(mgr.active_reservation(P), Some((other_vehicle, BOARD)));
        // The vacated handler is free again, and its empty reservation gone.
        assert_eq!(mgr.claimant_count(VEHICLE, BOARD), 0);
        assert!(mgr.reserve(VEHICLE, Q, BOARD, Seat(0)));
    }

    #[test]
    fn switching_job_kind_on_one_holder_releases_too() {
        let mut mgr = manager(1);
        mgr.register_factory(GUN, seat_factory(1));

        assert!(mgr.reserve(VEHICLE, P, BOARD, Seat(0)));
        assert!(mgr.reserve(VEHICLE, P, GUN, Seat(0)));

        assert_eq!(mgr.active_reservation(P), Some((VEHICLE, GUN)));
        assert_eq!(mgr.claimant_count(VEHICLE, BOARD), 0);
        assert_eq!(mgr.reservation_count(), 1);
    }

    #[test]
    fn unregistered_kind_fails_cleanly() {
        let mut mgr = ReservationManager::new();
        assert!(!mgr.reserve(VEHICLE, P, BOARD, Seat(0)));
        assert!(mgr.active_reservation(P).is_none());
        assert_eq!(mgr.reservation_count(), 0);
    }

    #[test]
    fn factory_error_fails_cleanly() {
        let mut mgr = ReservationManager::new();
        mgr.register_factory(
            BOARD,
            Box::new(|_, _| Err(ReserveError::Construction("no seats on this hull".into()))),
        );
        assert!(!mgr.reserve(VEHICLE, P, BOARD, Seat(0)));
        assert_eq!(mgr.reservation_count(), 0);
    }

    #[test]
    fn target_type_mismatch_fails_cleanly() {
        let mut mgr = manager(2);
        // Wrong type against a fresh construction.
        assert!(!mgr.reserve(VEHICLE, P, BOARD, Slot(0)));
        assert_eq!(mgr.reservation_count(), 0);

        // Wrong type against an existing reservation.
        assert!(mgr.reserve(VEHICLE, P, BOARD, Seat(0)));
        assert!(!mgr.reserve(VEHICLE, Q, BOARD, Slot(0)));
        assert_eq!(mgr.claimant_count(VEHICLE, BOARD), 1);
    }

    #[test]
    fn release_claimant_prunes_empties() {
        let mut mgr = manager(2);
        mgr.reserve(VEHICLE, P, BOARD, Seat(0));
        mgr.reserve(VEHICLE, Q, BOARD, Seat(1));

        assert!(mgr.release_claimant(P));
        assert_eq!(mgr.reservation_count(), 1);
        assert!(mgr.release_claimant(Q));
        assert_eq!(mgr.reservation_count(), 0);
        assert!(!mgr.release_claimant(Q));
    }
}

// ── Advisory pre-check ────────────────────────────────────────────────────────

#[cfg(test)]
mod can_reserve {
    use super::*;

    #[test]
    fn mirrors_commit_policy() {
        let mut mgr = manager(1);
        assert!(mgr.can_reserve(VEHICLE, P, BOARD, Seat(0)));

        mgr.reserve(VEHICLE, P, BOARD, Seat(0));
        // Target full for Q; a different target is fine.
        assert!(!mgr.can_reserve(VEHICLE, Q, BOARD, Seat(0)));
        assert!(mgr.can_reserve(VEHICLE, Q, BOARD, Seat(1)));
        // P already holds a reservation on this holder.
        assert!(!mgr.can_reserve(VEHICLE, P, BOARD, Seat(1)));
        // A claim on another holder does not veto — reserve would release it.
        assert!(mgr.can_reserve(AgentId(200), P, BOARD, Seat(0)));
    }

    #[test]
    fn is_side_effect_free() {
        let mut mgr = manager(1);
        for _ in 0..3 {
            assert!(mgr.can_reserve(VEHICLE, P, BOARD, Seat(0)));
        }
        assert_eq!(mgr.reservation_count(), 0);
        assert!(mgr.reserve(VEHICLE, P, BOARD, Seat(0)));
    }

    #[test]
    fn false_for_unregistered_kind() {
        let mgr = ReservationManager::new();
        assert!(!mgr.can_reserve(VEHICLE, P, BOARD, Seat(0)));
    }
}

// ── Validation sweep ──────────────────────────────────────────────────────────

#[cfg(test)]
mod validate {
    use super::*;

    const SWEEP: Cadence = Cadence { interval_ticks: 90 };

    #[test]
    fn releases_claimants_whose_job_moved_on() {
        let mut mgr = manager(4);
        mgr.reserve(VEHICLE, P, BOARD, Seat(0));
        mgr.reserve(VEHICLE, Q, BOARD, Seat(1));

        // P is still boarding; Q died (no current job).
        let released = mgr.validate(Tick(90), SWEEP, &|c| (c == P).then_some(BOARD));
        assert_eq!(released, 1);
        assert_eq!(mgr.active_reservation(P), Some((VEHICLE, BOARD)));
        assert!(mgr.active_reservation(Q).is_none());
        assert_eq!(mgr.claimant_count(VEHICLE, BOARD), 1);
    }

    #[test]
    fn wrong_job_kind_counts_as_stale() {
        let mut mgr = manager(4);
        mgr.reserve(VEHICLE, P, BOARD, Seat(0));

        // P switched to manning the gun without releasing.
        let released = mgr.validate(Tick(90), SWEEP, &|_| Some(GUN));
        assert_eq!(released, 1);
        assert_eq!(mgr.reservation_count(), 0);
    }

    #[test]
    fn emptied_reservations_and_holders_are_pruned() {
        let mut mgr = manager(4);
        mgr.reserve(VEHICLE, P, BOARD, Seat(0));

        mgr.validate(Tick(90), SWEEP, &|_| None);
        assert_eq!(mgr.reservation_count(), 0);
        // The handler is immediately reusable.
        assert!(mgr.reserve(VEHICLE, Q, BOARD, Seat(0)));
    }

    #[test]
    fn not_due_ticks_do_nothing() {
        let mut mgr = manager(4);
        mgr.reserve(VEHICLE, P, BOARD, Seat(0));

        assert_eq!(mgr.validate(Tick(89), SWEEP, &|_| None), 0);
        assert_eq!(mgr.active_reservation(P), Some((VEHICLE, BOARD)));
    }

    #[test]
    fn sweep_leaves_only_matching_claimants() {
        let mut mgr = manager(4);
        mgr.register_factory(GUN, seat_factory(4));
        mgr.reserve(VEHICLE, P, BOARD, Seat(0));
        mgr.reserve(VEHICLE, Q, GUN, Seat(0));

        let job_of = |c: AgentId| if c == P { Some(BOARD) } else { Some(GUN) };
        assert_eq!(mgr.validate(Tick(180), SWEEP, &job_of), 0);

        // Postcondition: every surviving claimant's job matches its kind.
        for claimant in [P, Q] {
            let (_, kind) = mgr.active_reservation(claimant).unwrap();
            assert_eq!(job_of(claimant), Some(kind));
        }
    }
}
