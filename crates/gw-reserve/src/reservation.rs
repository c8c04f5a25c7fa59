//! The `Reservation` trait and its one concrete shape.
//!
//! Per job kind there is exactly one reservation per holder, generic over
//! the sub-resource type it allocates.  The manager stores them as trait
//! objects keyed by job kind and recovers the concrete type at the typed
//! call sites; [`TypedReservation<T>`] is the only implementation the crate
//! ships, but the trait is public so applications can supply subtypes with
//! bespoke `can_reserve` policies.

use std::any::Any;
use std::hash::Hash;

use gw_core::{AgentId, JobKind};
use rustc_hash::FxHashMap;

use crate::{ReserveError, ReserveResult};

/// Marker for types that can serve as a reservable sub-resource handle
/// (a seat index, a turret slot, …).  Blanket-implemented; never implement
/// by hand.
pub trait SubResource: Copy + Eq + Hash + std::fmt::Debug + Send + 'static {}

impl<T: Copy + Eq + Hash + std::fmt::Debug + Send + 'static> SubResource for T {}

/// Object-safe surface of one reservation — everything the manager needs
/// without knowing the sub-resource type.
pub trait Reservation: Send {
    /// The job kind this reservation serves.  A claimant whose current job
    /// stops matching it is released by the validation sweep.
    fn job_kind(&self) -> JobKind;

    /// Maximum claimants per sub-resource target.
    fn capacity(&self) -> u32;

    fn claimant_count(&self) -> usize;

    fn holds(&self, claimant: AgentId) -> bool;

    /// Drop `claimant`'s claim; `true` if it held one.
    fn release(&mut self, claimant: AgentId) -> bool;

    fn is_empty(&self) -> bool {
        self.claimant_count() == 0
    }

    /// Release every claimant whose current job kind (per `current_job`)
    /// no longer matches [`job_kind`][Self::job_kind] — a cancelled, died,
    /// or despawned actor reports `None` and is swept the same way.
    /// Returns the released claimants so the caller can repair its indexes.
    fn retain_valid(&mut self, current_job: &dyn Fn(AgentId) -> Option<JobKind>) -> Vec<AgentId>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A reservation handing out sub-resources of type `T`, with a shared
/// per-target capacity and one target per claimant.
pub struct TypedReservation<T: SubResource> {
    kind:     JobKind,
    capacity: u32,
    claims:   FxHashMap<AgentId, T>,
}

impl<T: SubResource> TypedReservation<T> {
    pub fn new(kind: JobKind, capacity: u32) -> Self {
        Self { kind, capacity, claims: FxHashMap::default() }
    }

    /// Claimants currently holding `target`.
    pub fn claimants_on(&self, target: T) -> usize {
        self.claims.values().filter(|&&t| t == target).count()
    }

    /// Advisory pre-check: `true` iff `claimant` could claim `target` right
    /// now.  Side-effect-free by contract — the scheduler calls this while
    /// scoring candidate jobs.
    ///
    /// Default policy: room left on the target, and the claimant holds
    /// nothing on this reservation yet.
    pub fn can_reserve(&self, claimant: AgentId, target: T) -> bool {
        !self.claims.contains_key(&claimant) && (self.claimants_on(target) as u32) < self.capacity
    }

    /// Commit a claim.  Enforces exactly the [`can_reserve`][Self::can_reserve]
    /// policy.
    pub fn add_claimant(&mut self, claimant: AgentId, target: T) -> ReserveResult<()> {
        if self.claims.contains_key(&claimant) {
            return Err(ReserveError::AlreadyClaimed { claimant });
        }
        if self.claimants_on(target) as u32 >= self.capacity {
            return Err(ReserveError::CapacityExhausted { kind: self.kind, capacity: self.capacity });
        }
        self.claims.insert(claimant, target);
        Ok(())
    }

    /// The target `claimant` holds, if any.
    pub fn target_of(&self, claimant: AgentId) -> Option<T> {
        self.claims.get(&claimant).copied()
    }
}

impl<T: SubResource> Reservation for TypedReservation<T> {
    fn job_kind(&self) -> JobKind {
        self.kind
    }

    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn claimant_count(&self) -> usize {
        self.claims.len()
    }

    fn holds(&self, claimant: AgentId) -> bool {
        self.claims.contains_key(&claimant)
    }

    fn release(&mut self, claimant: AgentId) -> bool {
        self.claims.remove(&claimant).is_some()
    }

    fn retain_valid(&mut self, current_job: &dyn Fn(AgentId) -> Option<JobKind>) -> Vec<AgentId> {
        let kind = self.kind;
        let mut released = Vec::new();
        self.claims.retain(|&claimant, _| {
            let valid = current_job(claimant) == Some(kind);
            if !valid {
                released.push(claimant);
            }
            valid
        });
        released
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
