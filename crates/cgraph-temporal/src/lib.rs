//! Shortest legal paths over graphs with time-dependent edge legality.
//!
//! Edges carry an [`Annotation`](cgraph_core::Annotation) that allows
//! traversal at any time, only by day, or only by night. The phase flips on
//! every transition, and the traveller may wait one phase in place. The
//! search therefore runs over the expanded state graph:
//!
//! ```text
//! TemporalState = (node, phase)          // at most 2 * |V| states
//! initial       = (start, Day)
//! goal          = any state whose node is `end`
//! ```
//!
//! Breadth-first order makes the first goal reached a route with the fewest
//! transitions. Waiting is generated before moving, so ties resolve toward
//! waiting early.
//!
//! ```
//! use cgraph_core::NodeId;
//! use cgraph_temporal::find_path_wire;
//!
//! // 0 -(night only)- 1 -(any time)- 2
//! let path = find_path_wire(&[(0, 1, -1), (1, 2, 0)], 0, 2).unwrap();
//! assert_eq!(path, vec![NodeId(0), NodeId(0), NodeId(1), NodeId(2)]);
//! ```
//!
//! The [`grid`] module applies the same search to grid levels whose walls
//! alternate with the parity of the clock.

pub mod grid;
mod state;
mod temporal;

pub use grid::{solve_level, Cell, GridLevel, Position};
pub use state::{Step, TemporalRoute, TemporalState};
pub use temporal::{find_path, find_path_wire, TemporalPathFinder};
