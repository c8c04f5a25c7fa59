use gw_core::{AgentId, JobKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReserveError {
    #[error("no reservation factory registered for {0}")]
    NoFactory(JobKind),

    #[error("reservation for {kind} at capacity ({capacity} claimants per target)")]
    CapacityExhausted { kind: JobKind, capacity: u32 },

    #[error("{claimant} already holds a claim on this reservation")]
    AlreadyClaimed { claimant: AgentId },

    /// The reservation registered under this job kind hands out a different
    /// sub-resource type than the caller asked for.  Job kind → target type
    /// is fixed at factory registration, so two call sites disagreeing on
    /// the type is a wiring bug; it is still reported, not panicked, so the
    /// scheduler can move on.
    #[error("target type mismatch for {0}")]
    TargetTypeMismatch(JobKind),

    #[error("reservation construction failed: {0}")]
    Construction(String),
}

pub type ReserveResult<T> = Result<T, ReserveError>;
