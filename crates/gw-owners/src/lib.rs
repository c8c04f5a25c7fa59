//! `gw-owners` — navigation-grid equivalence classes and ownership.
//!
//! Many agent classes share identical passability rules.  Computing one
//! movement-cost grid and region decomposition per class would duplicate that
//! work N times; this crate detects the equivalence classes and elects one
//! *owner* per class, with every other member (*piggy*) delegating to the
//! owner's grid.  Ownership can be reassigned later (e.g. when an owner's
//! grid is disabled) without rebuilding the partition.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`config`] | `EquivalenceConfig` — the comparison-only passability key  |
//! | [`domain`] | `OwnerDomain` hook trait, `TableDomain`                    |
//! | [`owners`] | `OwnerList` — partition, queries, `transfer_ownership`     |
//! | [`events`] | `OwnershipChanged`, per-subscriber event channels          |
//! | [`store`]  | `OwnerGridStore<G>` — one grid instance per owner          |
//! | [`error`]  | `OwnerError`, `OwnerResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod owners;
pub mod store;


pub use config::EquivalenceConfig;
pub use domain::{OwnerDomain, TableDomain};
pub use error::{OwnerError, OwnerResult};
pub use events::OwnershipChanged;
pub use owners::OwnerList;
pub use store::OwnerGridStore;
