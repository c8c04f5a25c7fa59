//! `ReservationManager` — the job scheduler's claiming boundary.

use gw_core::{AgentId, Cadence, JobKind, Tick};
use rustc_hash::FxHashMap;

use crate::reservation::{Reservation, SubResource, TypedReservation};
use crate::{ReserveError, ReserveResult};

/// Builds the reservation for one (holder, job-kind) pair on first demand.
/// Capacity derivation from holder + job lives inside the closure.
///
/// Registered once per job kind at startup; an unregistered kind can never
/// construct anything, which replaces the dynamic-subtype construction
/// failures of old with a single well-defined miss.
pub type ReservationFactory =
    Box<dyn Fn(AgentId, JobKind) -> ReserveResult<Box<dyn Reservation>> + Send + Sync>;

/// Per-holder reservation collections plus the system-wide claimant index.
///
/// Mutated only from the turn thread (by convention, like the rest of the
/// substrate).  Invariants after every public call:
/// - a claimant appears in at most one reservation anywhere, and
///   `claimant_index` names exactly that one;
/// - claimants per sub-resource target never exceed the reservation's
///   capacity;
/// - no empty reservation outlives the call that emptied it.
#[derive(Default)]
pub struct ReservationManager {
    factories: FxHashMap<JobKind, ReservationFactory>,

    /// Lazily created: a holder has an entry only while at least one
    /// reservation on it has claimants.
    holders: FxHashMap<AgentId, Vec<Box<dyn Reservation>>>,

    /// `claimant → (holder, job kind)` for O(1) release-from-anywhere.
    claimant_index: FxHashMap<AgentId, (AgentId, JobKind)>,
}

impl ReservationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor for `kind`.  Later registrations replace
    /// earlier ones (useful in tests; applications register each kind once
    /// at startup).
    pub fn register_factory(&mut self, kind: JobKind, factory: ReservationFactory) {
        self.factories.insert(kind, factory);
    }

    // ── Reserve / release ─────────────────────────────────────────────────

    /// Reserve `target` on `holder` for `claimant` under job `kind`.
    ///
    /// Any reservation `claimant` already holds — on this holder or any
    /// other — is released first: one active reservation per claimant,
    /// system-wide.  Every failure (unregistered kind, factory error,
    /// capacity, type mismatch) is logged and answered with `false`; the
    /// collections are never left partially updated, so the scheduler can
    /// simply try its next candidate target.
    pub fn reserve<T: SubResource>(
        &mut self,
        holder:   AgentId,
        claimant: AgentId,
        kind:     JobKind,
        target:   T,
    ) -> bool {
        self.release_claimant(claimant);

        match self.reserve_inner(holder, claimant, kind, target) {
            Ok(()) => {
                self.claimant_index.insert(claimant, (holder, kind));
                true
            }
            Err(err) => {
                log::warn!("reserve({kind}) on {holder} for {claimant} failed: {err}");
                false
            }
        }
    }

    fn reserve_inner<T: SubResource>(
        &mut self,
        holder:   AgentId,
        claimant: AgentId,
        kind:     JobKind,
        target:   T,
    ) -> ReserveResult<()> {
        // Delegate to the existing reservation of this kind if there is one.
        if let Some(set) = self.holders.get_mut(&holder)
            && let Some(existing) = set.iter_mut().find(|r| r.job_kind() == kind)
        {
            let typed = existing
                .as_any_mut()
                .downcast_mut::<TypedReservation<T>>()
                .ok_or(ReserveError::TargetTypeMismatch(kind))?;
            return typed.add_claimant(claimant, target);
        }

        // Construct a fresh one.  The claimant is added *before* the
        // reservation enters the collection, so a capacity/type failure
        // leaves nothing half-built behind.
        let factory = self.factories.get(&kind).ok_or(ReserveError::NoFactory(kind))?;
        let mut fresh = factory(holder, kind)?;
        {
            let typed = fresh
                .as_any_mut()
                .downcast_mut::<TypedReservation<T>>()
                .ok_or(ReserveError::TargetTypeMismatch(kind))?;
            typed.add_claimant(claimant, target)?;
        }

        self.holders.entry(holder).or_default().push(fresh);
        Ok(())
    }

    /// Advisory pre-check mirroring [`reserve`][Self::reserve]'s commit
    /// policy: room on `target`, and `claimant` holds nothing on `holder`
    /// yet.  (A reservation on a *different* holder does not veto — reserve
    /// would release it transparently.)  Side-effect-free.
    pub fn can_reserve<T: SubResource>(
        &self,
        holder:   AgentId,
        claimant: AgentId,
        kind:     JobKind,
        target:   T,
    ) -> bool {
        if matches!(self.claimant_index.get(&claimant), Some(&(h, _)) if h == holder) {
            return false;
        }
        match self.find(holder, kind) {
            Some(res) => match res.as_any().downcast_ref::<TypedReservation<T>>() {
                Some(typed) => typed.can_reserve(claimant, target),
                None => false,
            },
            // Nothing exists yet; reserve would construct one, which can
            // only fail for reasons the sweep-free pre-check cannot see.
            None => self.factories.contains_key(&kind),
        }
    }

    /// Release `claimant`'s single active reservation, wherever it is.
    /// Returns `false` if it held none.  Empty reservations (and empty
    /// holder entries) are pruned immediately.
    pub fn release_claimant(&mut self, claimant: AgentId) -> bool {
        let Some((holder, kind)) = self.claimant_index.remove(&claimant) else {
            return false;
        };
        let Some(set) = self.holders.get_mut(&holder) else {
            log::error!("claimant index pointed at unknown holder {holder} for {claimant}");
            return false;
        };
        let mut released = false;
        if let Some(res) = set.iter_mut().find(|r| r.job_kind() == kind) {
            released = res.release(claimant);
        }
        if !released {
            log::error!("claimant index out of sync: {claimant} not in {kind} on {holder}");
        }
        self.prune(holder);
        released
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The (holder, job kind) of `claimant`'s active reservation, if any.
    pub fn active_reservation(&self, claimant: AgentId) -> Option<(AgentId, JobKind)> {
        self.claimant_index.get(&claimant).copied()
    }

    /// The sub-resource `claimant` holds on `holder` under `kind`.
    pub fn reserved_target<T: SubResource>(
        &self,
        holder:   AgentId,
        kind:     JobKind,
        claimant: AgentId,
    ) -> Option<T> {
        self.find(holder, kind)?
            .as_any()
            .downcast_ref::<TypedReservation<T>>()?
            .target_of(claimant)
    }

    /// Claimants currently in the `kind` reservation on `holder`.
    pub fn claimant_count(&self, holder: AgentId, kind: JobKind) -> usize {
        self.find(holder, kind).map_or(0, |r| r.claimant_count())
    }

    /// Total live reservations across all holders.
    pub fn reservation_count(&self) -> usize {
        self.holders.values().map(Vec::len).sum()
    }

    // ── Validation sweep ──────────────────────────────────────────────────

    /// Periodic reclamation: when `cadence` is due at `now`, release every
    /// claimant whose current job (per `current_job`) no longer matches its
    /// reservation's kind, then prune emptied reservations and holders.
    ///
    /// This is the only path that reclaims abandoned claims — a claimant
    /// that died or had its job cancelled never calls release itself.
    /// Returns the number of claimants released (0 when not due).
    pub fn validate(
        &mut self,
        now:         Tick,
        cadence:     Cadence,
        current_job: &dyn Fn(AgentId) -> Option<JobKind>,
    ) -> usize {
        if !cadence.due(now) {
            return 0;
        }

        let mut total_released = 0;
        for set in self.holders.values_mut() {
            for res in set.iter_mut() {
                for claimant in res.retain_valid(current_job) {
                    self.claimant_index.remove(&claimant);
                    total_released += 1;
                }
            }
            set.retain(|r| !r.is_empty());
        }
        self.holders.retain(|_, set| !set.is_empty());

        if total_released > 0 {
            log::debug!("reservation sweep at {now}: released {total_released} stale claimants");
        }
        total_released
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn find(&self, holder: AgentId, kind: JobKind) -> Option<&dyn Reservation> {
        self.holders
            .get(&holder)?
            .iter()
            .find(|r| r.job_kind() == kind)
            .map(|r| r.as_ref())
    }

    /// Drop empty reservations on `holder`, and the holder entry itself
    /// once no reservations remain.
    fn prune(&mut self, holder: AgentId) {
        if let Some(set) = self.holders.get_mut(&holder) {
            set.retain(|r| !r.is_empty());
            if set.is_empty() {
                self.holders.remove(&holder);
            }
        }
    }
}
