//! Clique command implementation.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use cgraph_clique::{CliqueFinder, CliqueGraph, CliqueSearchConfig, CliqueStats};
use cgraph_core::{AdjacencyBuilder, NodeId};

use crate::config::OutputFormat;

use super::{join, print_json, read_json};

#[derive(Debug, Serialize)]
struct CliqueOutput {
    size: usize,
    /// `null` when no clique of the requested size exists.
    clique: Option<Vec<NodeId>>,
    stats: CliqueStats,
}

/// Execute the clique command.
///
/// With `node_count`, nodes must be `0..node_count`. Without it, any IDs are
/// accepted and the graph covers exactly the nodes named by the edges.
pub fn execute(
    edges_file: &Path,
    size: usize,
    node_count: Option<usize>,
    prune: bool,
    format: OutputFormat,
) -> Result<()> {
    let edges: Vec<(u64, u64)> = read_json(edges_file, "edge list")?;

    let graph = match node_count {
        Some(n) => CliqueGraph::from_edges(n, &edges)?,
        None => {
            let mut builder = AdjacencyBuilder::new();
            for &(u, v) in &edges {
                builder.add_edge(u, v);
            }
            CliqueGraph::from_adjacency(&builder.build())
        }
    };

    let report = CliqueFinder::new(&graph)
        .with_config(CliqueSearchConfig { prune })
        .search(size)?;

    info!(
        nodes = graph.node_count(),
        size,
        explored = report.stats.branches_explored,
        pruned = report.stats.branches_pruned,
        "Clique search"
    );

    let output = CliqueOutput {
        size,
        clique: report.clique.map(|c| c.into_members()),
        stats: report.stats,
    };

    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Text => println!("{}", join(output.clique.as_deref().unwrap_or_default())),
    }

    Ok(())
}
