//! Exact search for a clique of a requested size.
//!
//! Backtracking over `(current, candidates)` where `candidates` is always the
//! common neighborhood of `current`, restricted to nodes not yet tried at the
//! current level. A branch is abandoned as soon as
//! `|current| + |candidates| < k`.
//!
//! The search keeps an explicit frame stack instead of recursing, so depth is
//! bounded by `k` frames on the heap. Each frame owns its candidate set;
//! children get a fresh intersection, and exploring a candidate removes it
//! from its own frame only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use cgraph_core::{Adjacency, GraphError, GraphResult, NodeId};

use crate::bitset::NodeSet;

/// Undirected simple graph over dense indices with a label per index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliqueGraph {
    neighbors: Vec<NodeSet>,
    labels: Vec<NodeId>,
}

impl CliqueGraph {
    /// Graph on nodes `0..node_count`. Endpoints outside that range are an
    /// error; self-loops and duplicates are ignored.
    pub fn from_edges(node_count: usize, edges: &[(u64, u64)]) -> GraphResult<Self> {
        let mut graph = Self::with_labels((0..node_count as u64).map(NodeId).collect());
        for &(u, v) in edges {
            let u = Self::dense_index(u, node_count)?;
            let v = Self::dense_index(v, node_count)?;
            graph.connect(u, v);
        }
        Ok(graph)
    }

    /// Graph over the nodes of `adjacency`, relabelled to dense indices in
    /// ascending ID order. Edge direction is ignored.
    pub fn from_adjacency(adjacency: &Adjacency) -> Self {
        let mut graph = Self::with_labels(adjacency.nodes().collect());
        let index: HashMap<NodeId, usize> = graph
            .labels
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        for edge in adjacency.edges() {
            graph.connect(index[&edge.from], index[&edge.to]);
        }
        graph
    }

    fn with_labels(labels: Vec<NodeId>) -> Self {
        let n = labels.len();
        Self {
            neighbors: vec![NodeSet::empty(n); n],
            labels,
        }
    }

    fn dense_index(raw: u64, node_count: usize) -> GraphResult<usize> {
        usize::try_from(raw)
            .ok()
            .filter(|&v| v < node_count)
            .ok_or(GraphError::NodeOutOfRange {
                node: NodeId(raw),
                node_count,
            })
    }

    fn connect(&mut self, u: usize, v: usize) {
        if u != v {
            self.neighbors[u].insert(v);
            self.neighbors[v].insert(u);
        }
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Node IDs in index order.
    pub fn labels(&self) -> &[NodeId] {
        &self.labels
    }

    /// Whether the labelled nodes `u` and `v` are adjacent.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        match (self.index_of(u), self.index_of(v)) {
            (Some(u), Some(v)) => self.neighbors[u].contains(v),
            _ => false,
        }
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.index_of(node).map_or(0, |i| self.neighbors[i].len())
    }

    /// Whether `members` are distinct known nodes that are pairwise adjacent.
    pub fn is_clique(&self, members: &[NodeId]) -> bool {
        let Some(indices) = members
            .iter()
            .map(|&m| self.index_of(m))
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };
        indices.iter().enumerate().all(|(i, &u)| {
            indices[i + 1..]
                .iter()
                .all(|&v| self.neighbors[u].contains(v))
        })
    }

    fn index_of(&self, node: NodeId) -> Option<usize> {
        // Labels are ascending in both constructors.
        self.labels.binary_search(&node).ok()
    }
}

/// Tuning for the clique search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueSearchConfig {
    /// Abandon branches that cannot reach the target size. Disabling this
    /// only changes how much is explored, never the result.
    #[serde(default = "default_prune")]
    pub prune: bool,
}

fn default_prune() -> bool {
    true
}

impl Default for CliqueSearchConfig {
    fn default() -> Self {
        Self {
            prune: default_prune(),
        }
    }
}

/// A clique, members sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clique {
    members: Vec<NodeId>,
}

impl Clique {
    fn new(mut members: Vec<NodeId>) -> Self {
        members.sort_unstable();
        Self { members }
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True only for the size-0 clique.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_members(self) -> Vec<NodeId> {
        self.members
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueStats {
    /// Frames opened, the root included.
    pub branches_explored: usize,
    /// Frames abandoned by the size bound.
    pub branches_pruned: usize,
}

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliqueReport {
    /// `None` when no clique of the requested size exists.
    pub clique: Option<Clique>,
    pub stats: CliqueStats,
}

/// Backtracking clique search over a [`CliqueGraph`].
#[derive(Debug, Clone, Copy)]
pub struct CliqueFinder<'a> {
    graph: &'a CliqueGraph,
    config: CliqueSearchConfig,
}

impl<'a> CliqueFinder<'a> {
    pub fn new(graph: &'a CliqueGraph) -> Self {
        Self {
            graph,
            config: CliqueSearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CliqueSearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Search for a clique of exactly `k` nodes.
    ///
    /// Candidates are tried in ascending index order, depth first, and the
    /// first clique completed is returned. `k == 0` yields the empty clique.
    pub fn search(&self, k: usize) -> GraphResult<CliqueReport> {
        let n = self.graph.node_count();
        if k > n {
            return Err(GraphError::InvalidCliqueSize {
                size: k,
                node_count: n,
            });
        }

        let mut stats = CliqueStats::default();
        let found = if k == 0 {
            Some(Vec::new())
        } else {
            self.backtrack(k, &mut stats)
        };

        debug!(
            k,
            nodes = n,
            prune = self.config.prune,
            explored = stats.branches_explored,
            pruned = stats.branches_pruned,
            found = found.is_some(),
            "Clique search finished"
        );

        Ok(CliqueReport {
            clique: found.map(|indices| {
                Clique::new(indices.into_iter().map(|i| self.graph.labels[i]).collect())
            }),
            stats,
        })
    }

    fn backtrack(&self, k: usize, stats: &mut CliqueStats) -> Option<Vec<usize>> {
        let n = self.graph.node_count();
        let mut current: Vec<usize> = Vec::with_capacity(k);
        let mut frames: Vec<NodeSet> = Vec::with_capacity(k);
        frames.push(NodeSet::full(n));
        stats.branches_explored += 1;

        while let Some(candidates) = frames.last_mut() {
            if self.config.prune && current.len() + candidates.len() < k {
                stats.branches_pruned += 1;
                frames.pop();
                current.pop();
                continue;
            }

            let Some(v) = candidates.first() else {
                frames.pop();
                current.pop();
                continue;
            };

            candidates.remove(v);
            let next = candidates.intersection(&self.graph.neighbors[v]);
            current.push(v);

            if current.len() == k {
                debug_assert!(self.is_dense_clique(&current));
                return Some(current);
            }

            stats.branches_explored += 1;
            frames.push(next);
            // `current` holds exactly one node per frame below the top.
            debug_assert_eq!(current.len() + 1, frames.len());
        }

        None
    }

    fn is_dense_clique(&self, members: &[usize]) -> bool {
        members.iter().enumerate().all(|(i, &u)| {
            members[i + 1..]
                .iter()
                .all(|&v| self.graph.neighbors[u].contains(v))
        })
    }
}

/// Find a clique of exactly `k` nodes among `0..n`, sorted ascending.
pub fn find_clique(n: usize, edges: &[(u64, u64)], k: usize) -> GraphResult<Option<Clique>> {
    let graph = CliqueGraph::from_edges(n, edges)?;
    Ok(CliqueFinder::new(&graph).search(k)?.clique)
}

/// Whether a clique of exactly `k` nodes exists among `0..n`.
pub fn has_clique(n: usize, edges: &[(u64, u64)], k: usize) -> GraphResult<bool> {
    Ok(find_clique(n, edges, k)?.is_some())
}

/// Find a clique of exactly `k` nodes in a graph with arbitrary node IDs.
pub fn find_clique_in(adjacency: &Adjacency, k: usize) -> GraphResult<Option<Clique>> {
    let graph = CliqueGraph::from_adjacency(adjacency);
    Ok(CliqueFinder::new(&graph).search(k)?.clique)
}
