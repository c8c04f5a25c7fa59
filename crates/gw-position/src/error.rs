use gw_core::{AgentId, Cell};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PositionError {
    /// The requested rect collides with another live agent's claim.  The
    /// incumbent keeps its cells; the caller picks a different position (or
    /// re-claims its old rect, which was released before the check).
    #[error("cell {cell} already claimed by {occupant}")]
    Overlap { cell: Cell, occupant: AgentId },
}

pub type PositionResult<T> = Result<T, PositionError>;
