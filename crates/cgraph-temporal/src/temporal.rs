//! Shortest legal paths under alternating day/night edge restrictions.
//!
//! The search runs breadth-first over the expanded graph of
//! [`TemporalState`]s rather than over the base graph: whether an edge can be
//! crossed depends on the phase at departure, and the traveller may wait a
//! phase in place. The initial phase is always [`Phase::Day`].

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use cgraph_core::{breadth_first, Adjacency, GraphError, GraphResult, NodeId, Phase};

use crate::state::{Step, TemporalRoute, TemporalState};

/// Breadth-first path finder over the (node, phase) state space of one graph.
#[derive(Debug, Clone, Copy)]
pub struct TemporalPathFinder<'a> {
    adjacency: &'a Adjacency,
}

impl<'a> TemporalPathFinder<'a> {
    /// Phase in effect when every search starts.
    pub const INITIAL_PHASE: Phase = Phase::Day;

    pub fn new(adjacency: &'a Adjacency) -> Self {
        Self { adjacency }
    }

    /// Transitions out of `state`: waiting first, then every legal move in
    /// neighbor-list order.
    pub fn successors(&self, state: TemporalState) -> impl Iterator<Item = (Step, TemporalState)> + 'a {
        let adjacency: &'a Adjacency = self.adjacency;
        std::iter::once((Step::Wait, state.wait())).chain(
            adjacency
                .neighbors(state.node)
                .iter()
                .filter(move |n| n.annotation.permits(state.phase))
                .map(move |n| (Step::Travel(n.annotation), state.travel_to(n.node))),
        )
    }

    /// Find a route with the fewest transitions from `start` to `end`.
    ///
    /// Returns `Ok(None)` when `end` cannot be reached in any phase.
    pub fn route(&self, start: NodeId, end: NodeId) -> GraphResult<Option<TemporalRoute>> {
        self.require_node(start)?;
        self.require_node(end)?;

        let root = TemporalState::new(start, Self::INITIAL_PHASE);
        let outcome = breadth_first(
            root,
            |state| state.node == end,
            |state| self.successors(*state).map(|(_, next)| next),
        );

        debug!(
            start = %start,
            end = %end,
            expanded = outcome.expanded,
            discovered = outcome.discovered,
            found = outcome.path.is_some(),
            "Temporal search finished"
        );

        Ok(outcome.path.map(TemporalRoute::new))
    }

    /// Location sequence of the shortest legal route, empty if `end` is
    /// unreachable.
    pub fn find_path(&self, start: NodeId, end: NodeId) -> GraphResult<Vec<NodeId>> {
        Ok(self
            .route(start, end)?
            .map(|route| route.locations())
            .unwrap_or_default())
    }

    /// Check a location sequence against the phase rules, starting in the
    /// initial phase. Consecutive equal locations are waits.
    pub fn is_legal(&self, path: &[NodeId]) -> bool {
        let mut phase = Self::INITIAL_PHASE;
        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if from != to {
                let crossable = self
                    .adjacency
                    .neighbors(from)
                    .iter()
                    .any(|n| n.node == to && n.annotation.permits(phase));
                if !crossable {
                    return false;
                }
            }
            phase = phase.flip();
        }
        true
    }

    /// Materialize every state reachable from `start` as a petgraph graph.
    /// Returns the graph and a mapping from state to NodeIndex.
    pub fn expanded_graph(
        &self,
        start: NodeId,
    ) -> GraphResult<(DiGraph<TemporalState, Step>, HashMap<TemporalState, NodeIndex>)> {
        self.require_node(start)?;

        let mut graph = DiGraph::new();
        let mut index: HashMap<TemporalState, NodeIndex> = HashMap::new();
        let root = TemporalState::new(start, Self::INITIAL_PHASE);
        index.insert(root, graph.add_node(root));
        let mut queue = VecDeque::from([root]);

        while let Some(state) = queue.pop_front() {
            let from = index[&state];
            for (step, next) in self.successors(state) {
                let to = *index.entry(next).or_insert_with(|| {
                    queue.push_back(next);
                    graph.add_node(next)
                });
                graph.add_edge(from, to, step);
            }
        }

        debug_assert!(graph.node_count() <= 2 * self.adjacency.node_count());
        Ok((graph, index))
    }

    fn require_node(&self, node: NodeId) -> GraphResult<()> {
        if self.adjacency.contains(node) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode { node })
        }
    }
}

/// Shortest legal location sequence from `start` to `end`; empty if unreachable.
pub fn find_path(adjacency: &Adjacency, start: NodeId, end: NodeId) -> GraphResult<Vec<NodeId>> {
    TemporalPathFinder::new(adjacency).find_path(start, end)
}

/// [`find_path`] over wire triples `(u, v, annotation_code)`.
pub fn find_path_wire(triples: &[(u64, u64, i64)], start: u64, end: u64) -> GraphResult<Vec<NodeId>> {
    let adjacency = Adjacency::from_wire(triples)?;
    find_path(&adjacency, NodeId(start), NodeId(end))
}
