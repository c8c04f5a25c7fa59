//! Substrate error type.
//!
//! Sub-crates may define their own error enums and convert them into `GwError`
//! via `From` impls, or keep them separate and wrap `GwError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{AgentId, ClassId};

/// The top-level error type for `gw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum GwError {
    #[error("agent class {0} not registered")]
    UnknownClass(ClassId),

    #[error("agent {0} not found")]
    UnknownAgent(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `gw-*` crates.
pub type GwResult<T> = Result<T, GwError>;
