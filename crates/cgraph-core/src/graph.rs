//! Graph data model and the adjacency builder.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GraphError, GraphResult};

/// Identifier for nodes. IDs need not be contiguous or start at zero.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        NodeId(value)
    }
}

/// One of the two alternating temporal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Day,
    Night,
}

impl Phase {
    /// The phase that follows this one.
    pub fn flip(self) -> Self {
        match self {
            Phase::Day => Phase::Night,
            Phase::Night => Phase::Day,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Day => write!(f, "day"),
            Phase::Night => write!(f, "night"),
        }
    }
}

/// Per-edge legality tag restricting which phase permits traversal.
///
/// On the wire an annotation is an integer: `-1` night only, `0`
/// unrestricted, `1` day only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Annotation {
    #[default]
    Unrestricted,
    DayOnly,
    NightOnly,
}

impl Annotation {
    /// Whether an edge with this annotation may be crossed during `phase`.
    pub fn permits(self, phase: Phase) -> bool {
        match self {
            Annotation::Unrestricted => true,
            Annotation::DayOnly => phase == Phase::Day,
            Annotation::NightOnly => phase == Phase::Night,
        }
    }

    /// Wire code of this annotation.
    pub fn code(self) -> i64 {
        match self {
            Annotation::NightOnly => -1,
            Annotation::Unrestricted => 0,
            Annotation::DayOnly => 1,
        }
    }
}

impl TryFrom<i64> for Annotation {
    type Error = GraphError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Annotation::NightOnly),
            0 => Ok(Annotation::Unrestricted),
            1 => Ok(Annotation::DayOnly),
            _ => Err(GraphError::InvalidAnnotation { code }),
        }
    }
}

impl From<Annotation> for i64 {
    fn from(annotation: Annotation) -> Self {
        annotation.code()
    }
}

/// An input edge. Deserializes from `[from, to]`, `[from, to, annotation]`
/// or a map with the same field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub annotation: Annotation,
}

impl Edge {
    /// Create an unannotated edge.
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self::annotated(from, to, Annotation::Unrestricted)
    }

    /// Create an edge carrying `annotation`.
    pub fn annotated(from: impl Into<NodeId>, to: impl Into<NodeId>, annotation: Annotation) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            annotation,
        }
    }

    /// Decode a wire triple `(u, v, annotation_code)`.
    pub fn from_wire((from, to, code): (u64, u64, i64)) -> GraphResult<Self> {
        Ok(Self::annotated(from, to, Annotation::try_from(code)?))
    }
}

/// An entry in a node's neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neighbor {
    pub node: NodeId,
    pub annotation: Annotation,
}

/// Mapping from node to its ordered neighbor list.
///
/// Undirected graphs store every input edge once per endpoint, so a node's
/// list preserves the order in which its edges were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: BTreeMap<NodeId, Vec<Neighbor>>,
    edges: Vec<Edge>,
    directed: bool,
}

impl Adjacency {
    /// Build an undirected adjacency from `edges`.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut builder = AdjacencyBuilder::new();
        builder.extend(edges.iter().copied());
        builder.build()
    }

    /// Build an undirected adjacency from wire triples.
    pub fn from_wire(triples: &[(u64, u64, i64)]) -> GraphResult<Self> {
        let mut builder = AdjacencyBuilder::new();
        for &triple in triples {
            builder.push(Edge::from_wire(triple)?);
        }
        Ok(builder.build())
    }

    /// Whether `node` appears in any edge.
    pub fn contains(&self, node: NodeId) -> bool {
        self.neighbors.contains_key(&node)
    }

    /// Neighbor list of `node`, empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> &[Neighbor] {
        self.neighbors.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All nodes in ascending ID order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors.keys().copied()
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of input edges (not adjacency entries).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The input edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Convert to petgraph `StableDiGraph` for analysis with petgraph algorithms.
    /// Undirected edges become a pair of opposite arcs.
    /// Returns the graph and a mapping from NodeId to NodeIndex.
    pub fn to_petgraph(&self) -> (StableDiGraph<NodeId, Annotation>, HashMap<NodeId, NodeIndex>) {
        let mut graph = StableDiGraph::new();
        let mut id_to_index = HashMap::new();

        for node in self.nodes() {
            let idx = graph.add_node(node);
            id_to_index.insert(node, idx);
        }

        for edge in &self.edges {
            let from_idx = id_to_index[&edge.from];
            let to_idx = id_to_index[&edge.to];
            graph.add_edge(from_idx, to_idx, edge.annotation);
            if !self.directed {
                graph.add_edge(to_idx, from_idx, edge.annotation);
            }
        }

        (graph, id_to_index)
    }
}

/// Builder for constructing an `Adjacency` from an edge list.
///
/// Self-loops and duplicate edges are accepted as given; duplicates produce
/// duplicate neighbor entries.
#[derive(Debug, Default)]
pub struct AdjacencyBuilder {
    neighbors: BTreeMap<NodeId, Vec<Neighbor>>,
    edges: Vec<Edge>,
    directed: bool,
}

impl AdjacencyBuilder {
    /// Create a builder for an undirected graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat edges as one-way arcs `from -> to`.
    pub fn directed(mut self, directed: bool) -> Self {
        debug_assert!(self.edges.is_empty(), "direction must be chosen before adding edges");
        self.directed = directed;
        self
    }

    /// Add an unannotated edge.
    pub fn add_edge(&mut self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> &mut Self {
        self.push(Edge::new(from, to))
    }

    /// Add an edge restricted by `annotation`.
    pub fn add_annotated_edge(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        annotation: Annotation,
    ) -> &mut Self {
        self.push(Edge::annotated(from, to, annotation))
    }

    /// Add a prepared edge.
    pub fn push(&mut self, edge: Edge) -> &mut Self {
        self.neighbors.entry(edge.from).or_default().push(Neighbor {
            node: edge.to,
            annotation: edge.annotation,
        });
        let reverse = self.neighbors.entry(edge.to).or_default();
        if !self.directed {
            reverse.push(Neighbor {
                node: edge.from,
                annotation: edge.annotation,
            });
        }
        self.edges.push(edge);
        self
    }

    /// Add every edge yielded by `edges`.
    pub fn extend(&mut self, edges: impl IntoIterator<Item = Edge>) -> &mut Self {
        for edge in edges {
            self.push(edge);
        }
        self
    }

    /// Get the current edge count.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build the final `Adjacency`.
    pub fn build(self) -> Adjacency {
        debug!(
            nodes = self.neighbors.len(),
            edges = self.edges.len(),
            directed = self.directed,
            "Built adjacency"
        );
        Adjacency {
            neighbors: self.neighbors,
            edges: self.edges,
            directed: self.directed,
        }
    }
}
