//! `OwnerGridStore<G>` — one grid/region instance per owner class.
//!
//! The store is deliberately opaque to what a "grid" is: the map layer puts
//! cost grids here, the world layer puts world-tile grids.  What it enforces
//! is the sharing contract — exactly one `G` per owner, piggies resolve
//! through their owner, and a transfer rekeys the entry instead of
//! recomputing it.

use gw_core::ClassId;
use rustc_hash::FxHashMap;

use crate::{OwnerList, OwnershipChanged};

pub struct OwnerGridStore<G> {
    grids: FxHashMap<ClassId, G>,
}

impl<G> Default for OwnerGridStore<G> {
    fn default() -> Self {
        Self { grids: FxHashMap::default() }
    }
}

impl<G> OwnerGridStore<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all grids and build one per current owner via `factory`.
    ///
    /// Called after [`OwnerList::build`]/`rebuild`; grid construction itself
    /// may run on a background task — the factory only needs to produce the
    /// handle stored here.
    pub fn rebuild(&mut self, list: &OwnerList, mut factory: impl FnMut(ClassId) -> G) {
        self.grids.clear();
        for owner in list.owners() {
            self.grids.insert(owner, factory(owner));
        }
    }

    /// The grid for `class`, resolved through its owner.
    ///
    /// `None` when the class is off the roster (`owner_of` already logged
    /// the fault) or its owner has no grid yet.
    pub fn get(&self, class: ClassId, list: &OwnerList) -> Option<&G> {
        let owner = list.owner_of(class);
        if owner == ClassId::INVALID {
            return None;
        }
        self.grids.get(&owner)
    }

    /// Mutable access, same resolution as [`get`][Self::get].
    pub fn get_mut(&mut self, class: ClassId, list: &OwnerList) -> Option<&mut G> {
        let owner = list.owner_of(class);
        if owner == ClassId::INVALID {
            return None;
        }
        self.grids.get_mut(&owner)
    }

    /// Rekey the grid entry for a completed ownership transfer.
    ///
    /// The grid data itself is untouched — the whole point of a transfer is
    /// that the new owner inherits the computed grid.
    pub fn apply_transfer(&mut self, event: &OwnershipChanged) {
        match self.grids.remove(&event.from) {
            Some(grid) => {
                self.grids.insert(event.to, grid);
            }
            None => {
                log::error!("no grid registered for outgoing owner {} (transfer to {})", event.from, event.to);
            }
        }
    }

    /// Number of grids held — equals the owner count once rebuilt.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
