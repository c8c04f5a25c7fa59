//! `gw-core` — foundational types for the `gridworks` navigation substrate.
//!
//! This crate is a dependency of every other `gw-*` crate.  It intentionally
//! has no `gw-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `ClassId`, `AgentId`, `JobKind`, `TerrainId`, `ThingId`   |
//! | [`grid`]    | `Cell`, `Size`, `Rot`, `CellRect`                         |
//! | [`time`]    | `Tick`, `Cadence`                                         |
//! | [`error`]   | `GwError`, `GwResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.     |

pub mod error;
pub mod grid;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GwError, GwResult};
pub use grid::{Cell, CellRect, Rot, Size};
pub use ids::{AgentId, ClassId, JobKind, TerrainId, ThingId};
pub use time::{Cadence, Tick};
