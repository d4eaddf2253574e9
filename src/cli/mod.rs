// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for pipetopo.

pub mod advance;
pub mod graph;
pub mod init;
pub mod status;
pub mod tree;
pub mod watch;

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::{Path, PathBuf};

use crate::backend::{CommandBackend, DryRunBackend, RunBackend};
use crate::config::Config;
use crate::errors::TopoError;
use crate::grouping::{load_snapshot, StepRun};
use crate::topology::{MovePosition, NodeKey};
use crate::utils::{create_spinner, hidden_spinner};

/// Pipeline topology and run-state tool
///
/// Group job runs into stages, decide what may be advanced, and edit the
/// stage/step tree of a pipeline.
#[derive(Parser, Debug)]
#[clap(
    name = "pipetopo",
    version,
    about = "Pipeline topology and run-state aggregation",
    long_about = None,
    after_help = "Examples:\n\
        pipetopo status runs.json          Show the status bar of a job\n\
        pipetopo advance runs.json         Start the next step that may run\n\
        pipetopo graph runs.json -f dot    Export the run graph\n\
        pipetopo move tree.json step-4 inside stage-5 --write\n\n\
        See 'pipetopo <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: .pipetopo.yaml, then the user config)
    #[clap(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .pipetopo.yaml
    Init {
        /// Overwrite an existing file
        #[clap(long)]
        force: bool,
    },

    /// Show the execution groups of a run snapshot
    Group {
        /// Snapshot file (default: backend.fetch_command)
        snapshot: Option<PathBuf>,

        /// Output format
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the status bar of a run snapshot
    Status {
        /// Snapshot file (default: backend.fetch_command)
        snapshot: Option<PathBuf>,

        /// Output format
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List advance controls
    Gates {
        /// Snapshot file (default: backend.fetch_command)
        snapshot: Option<PathBuf>,

        /// Only list controls that can be used now
        #[clap(long)]
        ready: bool,

        /// Output format
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the run graph
    Graph {
        /// Snapshot file (default: backend.fetch_command)
        snapshot: Option<PathBuf>,

        /// Output format
        #[clap(short, long, default_value = "text")]
        format: GraphFormat,
    },

    /// Summarize the overall status of a run snapshot
    Summary {
        /// Snapshot file (default: backend.fetch_command)
        snapshot: Option<PathBuf>,

        /// Output format
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Start the next run that may be advanced
    Advance {
        /// Snapshot file (default: backend.fetch_command)
        snapshot: Option<PathBuf>,

        /// Run instance to start (default: the first ready one)
        #[clap(short, long, value_name = "RUN_ID")]
        run: Option<u64>,

        /// Print the request instead of sending it
        #[clap(long)]
        dry_run: bool,
    },

    /// Cancel a run instance
    Cancel {
        /// Run instance to cancel
        run_id: u64,

        /// Print the request instead of sending it
        #[clap(long)]
        dry_run: bool,
    },

    /// Poll run snapshots and re-render the status bar
    Watch {
        /// Snapshot file (default: backend.fetch_command)
        snapshot: Option<PathBuf>,

        /// Seconds between polls (default: poll_interval_secs)
        #[clap(short, long)]
        interval: Option<u64>,

        /// Stop after this many polls
        #[clap(long)]
        count: Option<u64>,
    },

    /// Show a pipeline tree
    Tree {
        /// Tree file
        file: PathBuf,

        /// Output format
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve a tree node to the view it opens
    Select {
        /// Tree file
        file: PathBuf,

        /// Node key (new_pipeline, pipeline-<id>, stage-<id>, step-<id>)
        key: NodeKey,

        /// Output format
        #[clap(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Move a node of a pipeline tree
    Move {
        /// Tree file
        file: PathBuf,

        /// Node to move
        source: NodeKey,

        /// inside, before or after
        position: MovePosition,

        /// Drop target
        target: NodeKey,

        /// Write the moved tree back to the file
        #[clap(short, long)]
        write: bool,

        /// Persist the new order through the backend
        #[clap(long)]
        persist: bool,

        /// Print the persist request instead of sending it
        #[clap(long)]
        dry_run: bool,
    },

    /// Print the persistable order of a pipeline tree
    Flatten {
        /// Tree file
        file: PathBuf,

        /// Print the persist request body instead of flat records
        #[clap(long)]
        request: bool,

        /// Persist the order through the backend
        #[clap(long)]
        persist: bool,

        /// Print the persist request instead of sending it
        #[clap(long)]
        dry_run: bool,
    },
}

/// Output format for reporting commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}

impl std::str::FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "dot" => Ok(Self::Dot),
            "mermaid" => Ok(Self::Mermaid),
            _ => Err(format!("Unknown graph format: {}", s)),
        }
    }
}

/// State shared by the command handlers
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub working_dir: PathBuf,
    pub verbose: bool,
}

impl AppContext {
    /// Resolve configuration for the current directory
    pub fn load(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let working_dir = std::env::current_dir()
            .map_err(|e| miette::miette!("Failed to get working directory: {}", e))?;
        let config = Config::resolve(config_path, &working_dir)?;

        Ok(Self {
            config,
            working_dir,
            verbose,
        })
    }

    /// Backend used to relay requests
    pub fn backend(&self, dry_run: bool) -> Box<dyn RunBackend> {
        if dry_run {
            Box::new(DryRunBackend::new())
        } else {
            Box::new(
                CommandBackend::new(self.config.backend.clone(), &self.config.context)
                    .with_working_dir(&self.working_dir),
            )
        }
    }

    /// Backend for relaying a request, checked to be usable
    pub async fn ready_backend(&self, dry_run: bool) -> Result<Box<dyn RunBackend>> {
        let backend = self.backend(dry_run);
        backend.check_available().await?;
        tracing::debug!(backend = backend.name(), "relaying through backend");
        Ok(backend)
    }

    /// Read a run snapshot from a file, or fetch one through the backend
    pub async fn load_runs(&self, snapshot: Option<&Path>, quiet: bool) -> Result<Vec<StepRun>> {
        if let Some(path) = snapshot {
            return Ok(load_snapshot(path)?);
        }

        if self.config.backend.fetch_command.is_none() {
            return Err(miette::miette!(
                help = "Pass a snapshot file or set backend.fetch_command in .pipetopo.yaml",
                "No run snapshot given"
            ));
        }

        let spinner = if quiet {
            hidden_spinner()
        } else {
            create_spinner("Fetching runs...")
        };
        let result = self.backend(false).fetch_runs().await;
        spinner.finish_and_clear();

        Ok(result?)
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(TopoError::from)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_move_arguments() {
        let cli = Cli::parse_from([
            "pipetopo", "move", "tree.json", "step-4", "inside", "stage-5", "--write",
        ]);

        match cli.command {
            Commands::Move {
                source,
                position,
                target,
                write,
                ..
            } => {
                assert_eq!(source, NodeKey::Step(4));
                assert_eq!(position, MovePosition::Inside);
                assert_eq!(target, NodeKey::Stage(5));
                assert!(write);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_key() {
        assert!(Cli::try_parse_from(["pipetopo", "select", "tree.json", "job-1"]).is_err());
    }
}
