//! Grid command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use cgraph_temporal::{GridLevel, Position};

use crate::config::OutputFormat;

use super::{print_json, read_json};

#[derive(Debug, Serialize)]
struct GridOutput {
    /// Position at every time step; empty when unreachable.
    path: Vec<Position>,
    steps: Option<usize>,
}

/// Parse a position written as `ROW,COL`.
pub fn parse_position(s: &str) -> Result<Position> {
    let (row, col) = s
        .split_once(',')
        .with_context(|| format!("Expected ROW,COL, got '{}'", s))?;
    let row = row
        .trim()
        .parse()
        .with_context(|| format!("Invalid row in '{}'", s))?;
    let col = col
        .trim()
        .parse()
        .with_context(|| format!("Invalid column in '{}'", s))?;
    Ok((row, col))
}

/// Execute the grid command.
pub fn execute(level_file: &Path, start: Position, dest: Position, format: OutputFormat) -> Result<()> {
    let rows: Vec<Vec<String>> = read_json(level_file, "level")?;
    let level = GridLevel::parse(&rows)?;
    let path = level.solve(start, dest)?;

    info!(
        rows = level.rows(),
        cols = level.cols(),
        steps = ?path.len().checked_sub(1),
        "Grid level solved"
    );

    let output = GridOutput {
        steps: path.len().checked_sub(1),
        path,
    };

    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Text => {
            let cells: Vec<String> = output
                .path
                .iter()
                .map(|(r, c)| format!("{},{}", r, c))
                .collect();
            println!("{}", cells.join(" "));
        }
    }

    Ok(())
}
