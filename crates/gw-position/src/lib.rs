//! `gw-position` — exclusive multi-cell occupancy tracking.
//!
//! Placed agents claim the rectangle of cells their footprint covers; the
//! pathing layer reads claimed cells (other than the querying agent's own)
//! as blocked, and placement logic refuses to drop two agents on one cell.
//! Both directions of the relation are indexed: cell → claimant for O(1)
//! point queries, agent → rect for release and re-claim.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`manager`] | `PositionManager` — claim/release/point-query             |
//! | [`follow`]  | `FollowHooks`, the claim-then-notify worklist             |
//! | [`error`]   | `PositionError`, `PositionResult<T>`                      |
//!
//! # Concurrency
//!
//! The two maps are updated as a non-atomic pair.  All mutation must come
//! from the single turn-owning thread; the structure does not detect
//! violations (spec'd single-writer discipline, by convention).

pub mod error;
pub mod follow;
pub mod manager;


pub use error::{PositionError, PositionResult};
pub use follow::FollowHooks;
pub use manager::PositionManager;
