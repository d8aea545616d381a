//! Core graph types shared by the constrained graph analysis engines.
//!
//! - [`graph`]: node identifiers, phases, edge annotations and the adjacency builder.
//! - [`search`]: breadth-first search over implicit state graphs with
//!   predecessor-map path reconstruction.
//! - [`error`]: the error type for malformed input.
//!
//! Every structure is built per call; nothing here is shared between searches.

pub mod error;
pub mod graph;
pub mod search;

pub use error::{GraphError, GraphResult};
pub use graph::{Adjacency, AdjacencyBuilder, Annotation, Edge, Neighbor, NodeId, Phase};
pub use search::{breadth_first, BfsOutcome, PredecessorMap};
