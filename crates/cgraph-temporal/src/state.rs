//! State types for the expanded (location, phase) graph.
//!
//! ```text
//! TemporalState = (node, phase)
//!
//! (u, t) --wait--------------------> (u, flip(t))
//! (u, t) --travel(ann) if ann⊨t----> (v, flip(t))
//! ```
//!
//! Every transition flips the phase, so at most `2 * |V|` states are reachable.

use serde::{Deserialize, Serialize};

use cgraph_core::{Annotation, NodeId, Phase};

/// A location paired with the phase in effect there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporalState {
    pub node: NodeId,
    pub phase: Phase,
}

impl TemporalState {
    pub fn new(node: NodeId, phase: Phase) -> Self {
        Self { node, phase }
    }

    /// Stay in place for one phase.
    pub fn wait(self) -> Self {
        Self::new(self.node, self.phase.flip())
    }

    /// Arrive at `node` after one phase.
    pub fn travel_to(self, node: NodeId) -> Self {
        Self::new(node, self.phase.flip())
    }
}

/// Label of a transition in the expanded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Stayed at the same node.
    Wait,
    /// Crossed an edge carrying this annotation.
    Travel(Annotation),
}

/// A shortest legal route, as the sequence of states it passes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalRoute {
    states: Vec<TemporalState>,
}

impl TemporalRoute {
    pub(crate) fn new(states: Vec<TemporalState>) -> Self {
        debug_assert!(!states.is_empty(), "a route contains at least its start state");
        debug_assert!(
            states.windows(2).all(|w| w[1].phase == w[0].phase.flip()),
            "phase must flip on every transition"
        );
        Self { states }
    }

    pub fn states(&self) -> &[TemporalState] {
        &self.states
    }

    /// Location at every elapsed phase, start included.
    ///
    /// Each state contributes exactly one entry. A wait repeats the node once
    /// and the departure adds no further copy: waiting at 0 before crossing
    /// to 1 and 2 yields `[0, 0, 1, 2]`, never `[0, 0, 0, 1, 2]`. The length is always `transitions() + 1`.
    pub fn locations(&self) -> Vec<NodeId> {
        self.states.iter().map(|s| s.node).collect()
    }

    /// Number of phase flips from start to end.
    pub fn transitions(&self) -> usize {
        self.states.len() - 1
    }

    /// Number of transitions spent waiting.
    pub fn waits(&self) -> usize {
        self.states.windows(2).filter(|w| w[0].node == w[1].node).count()
    }

    /// Phase on arrival at the final node.
    pub fn arrival_phase(&self) -> Phase {
        self.states[self.states.len() - 1].phase
    }
}
