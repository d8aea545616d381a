//! cgraph CLI - constrained graph analysis from the command line.
//!
//! Finds shortest legal routes on graphs whose edges open by day or by night,
//! solves timed grid levels, and searches for cliques of a fixed size.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;

use commands::config as config_cmd;
use config::{Config, OutputFormat};

/// cgraph CLI - Temporal paths and cliques over small graphs.
#[derive(Parser, Debug)]
#[command(
    name = "cg",
    author,
    version,
    about = "cgraph: constrained graph analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format: text or json (defaults to the configured format).
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Shortest legal route under day/night edge restrictions.
    ///
    /// The edge file is a JSON array of `[u, v, annotation]` triples, where
    /// the annotation is -1 (night only), 0 (any time) or 1 (day only).
    Path {
        /// JSON edge list.
        #[arg(short, long)]
        edges: PathBuf,

        /// Start node.
        #[arg(short, long)]
        start: u64,

        /// Destination node.
        #[arg(short = 't', long)]
        end: u64,

        /// Treat edges as one-way arcs.
        #[arg(long)]
        directed: bool,
    },

    /// Find a clique of exactly K nodes.
    ///
    /// The edge file is a JSON array of `[u, v]` pairs.
    Clique {
        /// JSON edge list.
        #[arg(short, long)]
        edges: PathBuf,

        /// Clique size K.
        #[arg(short = 'k', long)]
        size: usize,

        /// Number of nodes; requires node IDs 0..N. Without it, any IDs work.
        #[arg(short, long)]
        nodes: Option<usize>,

        /// Explore every branch instead of pruning by size.
        #[arg(long)]
        no_prune: bool,
    },

    /// Solve a grid level with walls that open and close over time.
    ///
    /// The level file is a JSON array of rows of cell codes: "" open,
    /// "w" wall, "e" wall at even times, "o" wall at odd times.
    Grid {
        /// JSON level file.
        #[arg(short, long)]
        level: PathBuf,

        /// Start position as ROW,COL.
        #[arg(short, long, value_parser = commands::grid::parse_position)]
        start: (usize, usize),

        /// Destination position as ROW,COL.
        #[arg(short, long, value_parser = commands::grid::parse_position)]
        dest: (usize, usize),
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Path {
            edges,
            start,
            end,
            directed,
        } => {
            commands::path::execute(&edges, start, end, directed, format)?;
        }

        Commands::Clique {
            edges,
            size,
            nodes,
            no_prune,
        } => {
            let prune = config.clique_pruning && !no_prune;
            commands::clique::execute(&edges, size, nodes, prune, format)?;
        }

        Commands::Grid { level, start, dest } => {
            commands::grid::execute(&level, start, dest, format)?;
        }

        Commands::Config(config_cmd_inner) => {
            match config_cmd_inner {
                ConfigCommands::Show => {
                    config_cmd::show(&config)?;
                }
                ConfigCommands::Set { key, value } => {
                    let mut stored = Config::load_file()?;
                    config_cmd::set(&mut stored, &key, &value)?;
                }
                ConfigCommands::Get { key } => {
                    config_cmd::get(&config, &key)?;
                }
                ConfigCommands::Reset => {
                    config_cmd::reset()?;
                }
                ConfigCommands::Path => {
                    if let Some(path) = Config::config_file_path() {
                        println!("{}", path.display());
                    } else {
                        println!("(no config file path available)");
                    }
                }
            }
        }
    }

    Ok(())
}
