//! Follower notification after a successful claim.
//!
//! Agents queueing behind a leader park on a "follow cell" derived from the
//! leader's position.  When the leader claims a new rect, its trailing
//! neighbor must recompute that cell; if the recomputed cell lands on yet
//! another agent's claim, the blocker recomputes too.  The chain is driven
//! by an explicit worklist with a visited set, so a cyclic follow graph
//! (two agents queued behind each other) terminates instead of recursing.

use rustc_hash::FxHashSet;

use gw_core::{AgentId, Cell, CellRect};

use crate::{PositionManager, PositionResult};

/// Caller-supplied view of the follow graph.
///
/// `recompute_follow_cell` may move game-side state (it is `&mut self`);
/// it returns the cell the agent now intends to park on, or `None` when the
/// agent stops following.
pub trait FollowHooks {
    /// The agent trailing directly behind `agent`, if any.
    fn follower_of(&self, agent: AgentId) -> Option<AgentId>;

    /// Recompute and store `agent`'s follow-target cell; return it.
    fn recompute_follow_cell(&mut self, agent: AgentId) -> Option<Cell>;
}

impl PositionManager {
    /// [`claim`][Self::claim], then walk the follow chain behind `agent`.
    ///
    /// Each visited agent recomputes its follow cell once; if the new cell
    /// is claimed by a different, not-yet-visited agent, that blocker is
    /// queued.  Returns the agents whose follow cells were recomputed.
    pub fn claim_and_notify<H: FollowHooks>(
        &mut self,
        agent: AgentId,
        rect:  CellRect,
        hooks: &mut H,
    ) -> PositionResult<Vec<AgentId>> {
        self.claim(agent, rect)?;

        let mut visited: FxHashSet<AgentId> = FxHashSet::default();
        visited.insert(agent);

        let mut worklist: Vec<AgentId> = Vec::new();
        if let Some(follower) = hooks.follower_of(agent) {
            worklist.push(follower);
        }

        let mut recomputed = Vec::new();
        while let Some(current) = worklist.pop() {
            if !visited.insert(current) {
                continue;
            }
            recomputed.push(current);

            let Some(target) = hooks.recompute_follow_cell(current) else {
                continue;
            };
            // The recomputed cell may sit on someone else's claim; give the
            // blocker one chance to move its own follow cell out of the way.
            if let Some(blocker) = self.claimant_of(target)
                && blocker != current
                && !visited.contains(&blocker)
            {
                worklist.push(blocker);
            }
        }
        Ok(recomputed)
    }
}
