//! Breadth-first state search with predecessor-map reconstruction.
//!
//! Both engines search over state spaces derived from a base graph. The search
//! records, for every discovered state, the state it was discovered from; the
//! result path is rebuilt by walking that relation back to the root and
//! reversing it.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace};

/// Parent relation recorded during a search. The root maps to `None`.
#[derive(Debug, Clone)]
pub struct PredecessorMap<S> {
    parents: HashMap<S, Option<S>>,
}

impl<S: Copy + Eq + Hash> PredecessorMap<S> {
    /// Create a map containing only `root`.
    pub fn with_root(root: S) -> Self {
        let mut parents = HashMap::new();
        parents.insert(root, None);
        Self { parents }
    }

    /// Record that `state` was first discovered from `parent`.
    ///
    /// Returns `false` (and leaves the map untouched) if `state` was already
    /// discovered.
    pub fn record(&mut self, state: S, parent: S) -> bool {
        match self.parents.entry(state) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Some(parent));
                true
            }
        }
    }

    pub fn contains(&self, state: &S) -> bool {
        self.parents.contains_key(state)
    }

    /// Number of discovered states, root included.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Chronological path from the root to `terminal`, or `None` if
    /// `terminal` was never discovered.
    pub fn trace_back(&self, terminal: S) -> Option<Vec<S>> {
        let mut path = Vec::new();
        let mut cursor = Some(terminal);
        while let Some(state) = cursor {
            cursor = *self.parents.get(&state)?;
            path.push(state);
            debug_assert!(path.len() <= self.parents.len(), "predecessor cycle");
        }
        path.reverse();
        Some(path)
    }
}

/// Result of a breadth-first search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsOutcome<S> {
    /// States from the root to the first goal state dequeued, if any.
    pub path: Option<Vec<S>>,
    /// Number of states dequeued and expanded (goal included).
    pub expanded: usize,
    /// Number of distinct states discovered.
    pub discovered: usize,
}

/// Breadth-first search over an implicit state graph.
///
/// Each state is discovered at most once, successors are enqueued in the
/// order `successors` yields them, and the goal test runs when a state is
/// dequeued. With unit-cost transitions the first goal dequeued is reached
/// by a shortest path, and ties resolve in successor order.
pub fn breadth_first<S, G, N, I>(root: S, mut is_goal: G, mut successors: N) -> BfsOutcome<S>
where
    S: Copy + Eq + Hash + Debug,
    G: FnMut(&S) -> bool,
    N: FnMut(&S) -> I,
    I: IntoIterator<Item = S>,
{
    let mut queue = VecDeque::from([root]);
    let mut parents = PredecessorMap::with_root(root);
    let mut expanded = 0usize;

    while let Some(state) = queue.pop_front() {
        expanded += 1;
        if is_goal(&state) {
            debug!(expanded, discovered = parents.len(), goal = ?state, "Goal state reached");
            return BfsOutcome {
                path: parents.trace_back(state),
                expanded,
                discovered: parents.len(),
            };
        }

        for next in successors(&state) {
            if parents.record(next, state) {
                trace!(from = ?state, to = ?next, "Discovered state");
                queue.push_back(next);
            }
        }
    }

    debug!(expanded, discovered = parents.len(), "Frontier exhausted");
    BfsOutcome {
        path: None,
        expanded,
        discovered: parents.len(),
    }
}
