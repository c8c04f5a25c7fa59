//! `PositionManager` — the two synchronized occupancy maps.

use gw_core::{AgentId, Cell, CellRect};
use rustc_hash::FxHashMap;

use crate::{PositionError, PositionResult};

/// Tracks which agent occupies which cells within one grid generation.
///
/// Invariant (holds after every public call): the two maps agree exactly —
/// every cell of every rect in `agent_to_rect` maps back to that agent in
/// `cell_to_agent`, and no other cells are present.  Claimed rects of
/// distinct agents never overlap; an overlapping claim is rejected rather
/// than overwritten, so a point query can never contradict a rect query.
#[derive(Default)]
pub struct PositionManager {
    cell_to_agent: FxHashMap<Cell, AgentId>,
    agent_to_rect: FxHashMap<AgentId, CellRect>,
}

impl PositionManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Claims ────────────────────────────────────────────────────────────

    /// Claim `rect` for `agent`, releasing the agent's own prior claim
    /// first so repositioning is a single call.
    ///
    /// # Errors
    ///
    /// [`PositionError::Overlap`] if any cell of `rect` is held by another
    /// agent; the incumbent's claim is untouched and nothing of `rect` is
    /// written.  Note the agent's *prior* claim has already been released
    /// at that point — a failed move leaves the agent unclaimed, and the
    /// caller decides whether to re-claim the old rect or despawn.
    pub fn claim(&mut self, agent: AgentId, rect: CellRect) -> PositionResult<()> {
        self.release(agent);

        for cell in rect.iter() {
            if let Some(&occupant) = self.cell_to_agent.get(&cell) {
                log::warn!("claim rejected for {agent}: {cell} held by {occupant}");
                return Err(PositionError::Overlap { cell, occupant });
            }
        }

        for cell in rect.iter() {
            self.cell_to_agent.insert(cell, agent);
        }
        self.agent_to_rect.insert(agent, rect);
        Ok(())
    }

    /// Remove `agent`'s claim from both maps.  No-op if it holds none.
    pub fn release(&mut self, agent: AgentId) {
        if let Some(rect) = self.agent_to_rect.remove(&agent) {
            for cell in rect.iter() {
                self.cell_to_agent.remove(&cell);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if any agent holds `cell`.
    #[inline]
    pub fn is_claimed(&self, cell: Cell) -> bool {
        self.cell_to_agent.contains_key(&cell)
    }

    /// The agent holding `cell`, if any.  O(1).
    #[inline]
    pub fn claimant_of(&self, cell: Cell) -> Option<AgentId> {
        self.cell_to_agent.get(&cell).copied()
    }

    /// `true` if `cell` blocks pathing for `agent` — claimed by someone
    /// else.  An agent's own cells never block it.
    #[inline]
    pub fn blocks(&self, cell: Cell, agent: AgentId) -> bool {
        self.claimant_of(cell).is_some_and(|occupant| occupant != agent)
    }

    /// The rect `agent` currently claims, if placed.
    #[inline]
    pub fn rect_of(&self, agent: AgentId) -> Option<CellRect> {
        self.agent_to_rect.get(&agent).copied()
    }

    /// Number of agents holding a claim.
    pub fn claimed_agents(&self) -> usize {
        self.agent_to_rect.len()
    }

    /// Number of claimed cells across all agents.
    pub fn claimed_cells(&self) -> usize {
        self.cell_to_agent.len()
    }
}
