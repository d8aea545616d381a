//! Path command implementation.
//!
//! Shortest legal route under day/night edge restrictions.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use cgraph_core::{AdjacencyBuilder, Edge, NodeId, Phase};
use cgraph_temporal::TemporalPathFinder;

use crate::config::OutputFormat;

use super::{join, print_json, read_json};

#[derive(Debug, Serialize)]
struct PathReport {
    start: NodeId,
    end: NodeId,
    /// One location per elapsed phase; empty when unreachable.
    path: Vec<NodeId>,
    transitions: Option<usize>,
    waits: Option<usize>,
    arrival_phase: Option<Phase>,
}

/// Execute the path command.
pub fn execute(
    edges_file: &Path,
    start: u64,
    end: u64,
    directed: bool,
    format: OutputFormat,
) -> Result<()> {
    let edges: Vec<Edge> = read_json(edges_file, "edge list")?;

    let mut builder = AdjacencyBuilder::new().directed(directed);
    builder.extend(edges);
    let adjacency = builder.build();

    let (start, end) = (NodeId(start), NodeId(end));
    let route = TemporalPathFinder::new(&adjacency).route(start, end)?;

    info!(
        nodes = adjacency.node_count(),
        edges = adjacency.edge_count(),
        found = route.is_some(),
        "Temporal path search"
    );

    let report = PathReport {
        start,
        end,
        path: route.as_ref().map(|r| r.locations()).unwrap_or_default(),
        transitions: route.as_ref().map(|r| r.transitions()),
        waits: route.as_ref().map(|r| r.waits()),
        arrival_phase: route.as_ref().map(|r| r.arrival_phase()),
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => println!("{}", join(&report.path)),
    }

    Ok(())
}
