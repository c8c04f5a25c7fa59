//! `OwnerList` — the equivalence partition and owner↔piggy mapping.
//!
//! # Concurrency
//!
//! The mapping array stores one owner id per class in an `AtomicU16` slot.
//! Readers (`owner_of`, `is_owner`, `piggies_of`) do plain atomic loads and
//! never take a lock, so path resolution off the turn thread never contends
//! with a transfer; a concurrent reader observes either the pre- or the
//! post-transfer owner, never a torn value.  The owners *list* is guarded by
//! a per-instance mutex held only inside `transfer_ownership` — the
//! position-lookup + slot-swap pair is not atomic on its own and must be
//! serialized.  Transfers on independent `OwnerList` instances (map vs.
//! world layer) share no state and never block each other.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::mpsc::Receiver;

use gw_core::ClassId;
use rustc_hash::FxHashMap;

use crate::events::{OwnershipBus, OwnershipChanged};
use crate::{EquivalenceConfig, OwnerDomain, OwnerError, OwnerResult};

/// Maps N agent classes onto K ≤ N owners with identical navigation
/// semantics.  Build once at load (and on roster change); query from
/// anywhere; transfer from the turn thread.
pub struct OwnerList {
    /// Per-class config snapshot, indexed by `ClassId`.  Immutable between
    /// rebuilds; piggies compare equal to their owner by construction.
    configs: Vec<EquivalenceConfig>,

    /// `class → current owner` (raw `ClassId` payload).  Always stores the
    /// final owner, so resolution is a single array read — never a chain.
    mapping: Vec<AtomicU16>,

    /// The classes currently owning a grid.  Exactly the fixed points of
    /// `mapping`; the two are only ever published together.
    owners: Mutex<Vec<ClassId>>,

    bus: OwnershipBus,
}

impl OwnerList {
    // ── Construction ──────────────────────────────────────────────────────

    /// Build the partition from the domain's class roster.
    ///
    /// Grouping is a pure function of the config list: classes with equal
    /// [`EquivalenceConfig`]s form one group, and the lowest `ClassId` in
    /// each group becomes its owner.  Shuffling the roster (or the order the
    /// domain happens to enumerate rules in) cannot change the result.
    pub fn build(domain: &dyn OwnerDomain) -> Self {
        let count = domain.class_count();
        let configs: Vec<EquivalenceConfig> = (0..count)
            .map(|i| domain.config_for(ClassId(i as u16)))
            .collect();

        let (mapping, owners) = partition(&configs);
        Self {
            configs,
            mapping: mapping.into_iter().map(|o| AtomicU16::new(o.0)).collect(),
            owners: Mutex::new(owners),
            bus: OwnershipBus::default(),
        }
    }

    /// Full non-incremental rebuild after a roster or rule change.
    ///
    /// Subscriptions survive; any ownership accumulated through transfers is
    /// discarded in favor of the fresh partition.
    pub fn rebuild(&mut self, domain: &dyn OwnerDomain) {
        let fresh = Self::build(domain);
        self.configs = fresh.configs;
        self.mapping = fresh.mapping;
        *self.lock_owners() = fresh
            .owners
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Number of classes on the roster.
    #[inline]
    pub fn class_count(&self) -> usize {
        self.mapping.len()
    }

    /// The class owning `class`'s navigation grid.
    ///
    /// An unregistered class is an internal-consistency fault, not a normal
    /// miss: it is logged at error level and answered with
    /// `ClassId::INVALID`.  Callers must treat the sentinel as "navigation
    /// unavailable for this class", never index with it.
    pub fn owner_of(&self, class: ClassId) -> ClassId {
        match self.mapping.get(class.index()) {
            Some(slot) => ClassId(slot.load(Ordering::Acquire)),
            None => {
                log::error!("owner_of({class}): class not on roster (roster size {})", self.mapping.len());
                ClassId::INVALID
            }
        }
    }

    /// `true` if `class` holds its own grid (i.e. resolves to itself).
    #[inline]
    pub fn is_owner(&self, class: ClassId) -> bool {
        self.mapping
            .get(class.index())
            .is_some_and(|slot| slot.load(Ordering::Acquire) == class.0)
    }

    /// All classes delegating to `owner`, excluding `owner` itself.
    /// Empty when `owner` is not an owner.
    pub fn piggies_of(&self, owner: ClassId) -> Vec<ClassId> {
        self.mapping
            .iter()
            .enumerate()
            .filter(|(i, slot)| slot.load(Ordering::Acquire) == owner.0 && *i != owner.index())
            .map(|(i, _)| ClassId(i as u16))
            .collect()
    }

    /// Snapshot of the current owners list.
    pub fn owners(&self) -> Vec<ClassId> {
        self.lock_owners().clone()
    }

    /// The config `class` was registered with.
    pub fn config_of(&self, class: ClassId) -> Option<&EquivalenceConfig> {
        self.configs.get(class.index())
    }

    /// Subscribe to [`OwnershipChanged`] events.  Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> Receiver<OwnershipChanged> {
        self.bus.subscribe()
    }

    // ── Transfer ──────────────────────────────────────────────────────────

    /// Reassign grid ownership to `new_owner`.
    ///
    /// No-op (`Ok(None)`) when `new_owner` already owns its class.
    /// Otherwise every class currently resolving to the old owner — the old
    /// owner included — is repointed at `new_owner` with single-slot atomic
    /// stores, the owners list is updated in place, and an
    /// [`OwnershipChanged`] event is published.
    ///
    /// # Errors
    ///
    /// `UnknownClass` if `new_owner` is off the roster.
    /// `IneligibleTransfer` if the domain hook rejects the target — callers
    /// are contractually required to pre-check eligibility, so this variant
    /// signals a logic error upstream rather than a retryable condition.
    pub fn transfer_ownership(
        &self,
        new_owner: ClassId,
        domain:    &dyn OwnerDomain,
    ) -> OwnerResult<Option<OwnershipChanged>> {
        if new_owner.index() >= self.mapping.len() {
            return Err(OwnerError::UnknownClass(new_owner));
        }
        if !domain.can_transfer_to(new_owner) {
            return Err(OwnerError::IneligibleTransfer(new_owner));
        }

        let mut owners = self.lock_owners();

        // Resolve the old owner under the lock so two racing transfers
        // targeting the same group serialize cleanly.
        let old = ClassId(self.mapping[new_owner.index()].load(Ordering::Acquire));
        if old == new_owner {
            return Ok(None);
        }

        for slot in &self.mapping {
            if slot.load(Ordering::Acquire) == old.0 {
                slot.store(new_owner.0, Ordering::Release);
            }
        }

        match owners.iter().position(|&o| o == old) {
            Some(i) => owners[i] = new_owner,
            None => {
                // Mapping said `old` was an owner but the list disagrees —
                // the two are only ever written together, so this cannot
                // happen short of memory corruption.  Repair and scream.
                log::error!("owners list missing {old} during transfer to {new_owner}");
                owners.push(new_owner);
            }
        }
        drop(owners);

        let event = OwnershipChanged { from: old, to: new_owner };
        log::debug!("grid ownership transferred: {} -> {}", event.from, event.to);
        self.bus.publish(event);
        Ok(Some(event))
    }

    fn lock_owners(&self) -> std::sync::MutexGuard<'_, Vec<ClassId>> {
        self.owners.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// ── Partition ─────────────────────────────────────────────────────────────────

/// Pure partition of the config list into equivalence groups.
///
/// Returns `(owner per class, owners ascending)`.  The representative of
/// each group is its lowest `ClassId`; since grouping keys on the config
/// *value*, the result is independent of roster enumeration order.
fn partition(configs: &[EquivalenceConfig]) -> (Vec<ClassId>, Vec<ClassId>) {
    let mut group_owner: FxHashMap<&EquivalenceConfig, ClassId> = FxHashMap::default();
    let mut mapping = Vec::with_capacity(configs.len());
    let mut owners = Vec::new();

    // Ascending ClassId scan, so the first class presenting a config is the
    // lowest id with that config — the deterministic representative.
    for (i, config) in configs.iter().enumerate() {
        let class = ClassId(i as u16);
        let owner = *group_owner.entry(config).or_insert_with(|| {
            owners.push(class);
            class
        });
        mapping.push(owner);
    }

    (mapping, owners)
}
