//! Exact search for a clique of a given size.
//!
//! Nodes are relabelled to dense indices and neighborhoods are stored as
//! bitsets, so extending a partial clique is one word-wise intersection.
//! Candidates are tried in ascending order and the first clique completed is
//! returned, which makes the answer deterministic for a given graph.
//!
//! ```
//! use cgraph_core::NodeId;
//! use cgraph_clique::find_clique;
//!
//! let edges = [(0, 1), (0, 4), (2, 1), (3, 1), (4, 2), (2, 3), (1, 4), (4, 3)];
//! let clique = find_clique(5, &edges, 4).unwrap().unwrap();
//! assert_eq!(clique.members(), &[NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
//! ```

mod bitset;
mod finder;

pub use bitset::NodeSet;
pub use finder::{
    find_clique, find_clique_in, has_clique, Clique, CliqueFinder, CliqueGraph, CliqueReport,
    CliqueSearchConfig, CliqueStats,
};
