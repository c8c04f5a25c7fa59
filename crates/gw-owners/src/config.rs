//! `EquivalenceConfig` — the derived, comparison-only passability snapshot.
//!
//! Two classes navigate identically exactly when their configs are equal, so
//! the config doubles as the partition key: `BTreeSet` members give a
//! canonical element order, making equal rule sets compare — and hash —
//! equal regardless of how the domain assembled them.

use std::collections::BTreeSet;

use gw_core::{Size, TerrainId, ThingId};

/// Immutable passability descriptor for one agent class.
///
/// Derived from game rules by an [`OwnerDomain`][crate::OwnerDomain] hook;
/// carries no class identity on purpose — grouping must depend only on the
/// derived values.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquivalenceConfig {
    /// Footprint extents (unrotated).
    pub footprint: Size,

    /// Thing kinds this class can never path through.
    pub impassable_things: BTreeSet<ThingId>,

    /// Terrain kinds this class can never stand on.
    pub impassable_terrain: BTreeSet<TerrainId>,

    /// If `true`, anything not explicitly allowed is impassable (the sets
    /// above become allow-list complements rather than deny lists).
    pub default_impassable: bool,

    /// Whether this class participates in region decomposition.  Classes
    /// that differ on this flag never share a grid even if their passability
    /// sets match, so it is part of the equality key like everything else.
    pub uses_regions: bool,
}

impl EquivalenceConfig {
    /// A permissive single-cell config — the common pedestrian baseline.
    pub fn unit_walker() -> Self {
        Self {
            footprint:          Size::unit(),
            impassable_things:  BTreeSet::new(),
            impassable_terrain: BTreeSet::new(),
            default_impassable: false,
            uses_regions:       true,
        }
    }

    /// `true` if `other` would produce byte-for-byte identical grid and
    /// region data, i.e. the two classes belong in one equivalence class.
    #[inline]
    pub fn equivalent_to(&self, other: &EquivalenceConfig) -> bool {
        self == other
    }
}
