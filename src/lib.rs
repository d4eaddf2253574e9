// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! # pipetopo - Pipeline topology and run-state aggregation
//!
//! `pipetopo` rebuilds the serial/parallel execution topology of a CI job from
//! its flat run records, decides which step may be advanced next, and edits the
//! stage/step tree of a pipeline under drag-and-drop moves.
//!
//! ## Features
//!
//! - **Grouping** - Contiguous same-stage runs become serial or parallel groups
//! - **Gating** - Advance controls enabled only behind finished predecessors
//! - **Run graph** - Text, DOT and Mermaid export of the advance transitions
//! - **Topology editing** - Cycle-safe moves and flattening into persistable order
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the status bar of a job
//! pipetopo status runs.json
//!
//! # Start the next step that may run
//! pipetopo advance runs.json
//!
//! # Move a step into a stage and save the tree
//! pipetopo move tree.json step-4 inside stage-5 --write
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod grouping;
pub mod status;
pub mod topology;
pub mod utils;

// Re-export commonly used types
pub use errors::{TopoError, TopoResult};
pub use grouping::{group, ExecutionGroup, StepRun};
pub use status::RunStatus;
pub use topology::{FlatOrderRecord, MoveOutcome, MovePosition, NavTarget, NodeKey, TopologyEditor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
