// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Run-state aggregation
//!
//! Converts a flat job snapshot into execution groups and decides which
//! advance controls are currently usable. Everything here is a pure function
//! of the snapshot; callers regroup on every poll.

mod engine;
mod gate;
mod graph;
mod run;
mod summary;

pub use engine::{group, members, ExecutionGroup};
pub use gate::{advanceable, can_advance, can_advance_step, gates, Gate, GatePosition};
pub use graph::{RunGraph, Transition};
pub use run::{load_snapshot, parse_snapshot, SnapshotFormat, StepRun};
pub use summary::{summarize, RunSummary};
