//! The `OwnerDomain` trait — the extension point for domain specializations.
//!
//! The map-level and world-level navigation layers each hold their own
//! [`OwnerList`][crate::OwnerList] and supply their own domain: map
//! passability and world passability derive configs from different rules,
//! and their transfer-eligibility criteria differ (a world grid can only be
//! handed to a class whose world grid is enabled, etc.).  The `OwnerList`
//! itself never inspects game data — everything it knows arrives through
//! this trait.

use gw_core::ClassId;

use crate::EquivalenceConfig;

/// Config-generation and transfer-eligibility hooks for one navigation layer.
pub trait OwnerDomain {
    /// Number of agent classes on the roster.  Classes are identified by
    /// `ClassId(0)..ClassId(class_count - 1)`.
    fn class_count(&self) -> usize;

    /// Derive the passability snapshot for `class`.
    ///
    /// Called once per class during [`OwnerList::build`][crate::OwnerList::build];
    /// must be pure — equal rules must yield equal configs.
    fn config_for(&self, class: ClassId) -> EquivalenceConfig;

    /// `true` if `class` may become an owner via
    /// [`transfer_ownership`][crate::OwnerList::transfer_ownership].
    ///
    /// Default: every class is eligible.
    fn can_transfer_to(&self, _class: ClassId) -> bool {
        true
    }
}

/// A domain backed by a pre-computed config table.
///
/// Applications that already materialize per-class configs (and tests) use
/// this instead of writing a bespoke `OwnerDomain` impl.
pub struct TableDomain {
    configs: Vec<EquivalenceConfig>,
    /// `None` means "all classes transfer-eligible".
    transferable: Option<Vec<bool>>,
}

impl TableDomain {
    pub fn new(configs: Vec<EquivalenceConfig>) -> Self {
        Self { configs, transferable: None }
    }

    /// Restrict transfer eligibility to the classes flagged `true`.
    ///
    /// `flags` must be the same length as the config table.
    pub fn with_transferable(mut self, flags: Vec<bool>) -> Self {
        debug_assert_eq!(flags.len(), self.configs.len());
        self.transferable = Some(flags);
        self
    }
}

impl OwnerDomain for TableDomain {
    fn class_count(&self) -> usize {
        self.configs.len()
    }

    fn config_for(&self, class: ClassId) -> EquivalenceConfig {
        self.configs[class.index()].clone()
    }

    fn can_transfer_to(&self, class: ClassId) -> bool {
        match &self.transferable {
            None => true,
            Some(flags) => flags.get(class.index()).copied().unwrap_or(false),
        }
    }
}
