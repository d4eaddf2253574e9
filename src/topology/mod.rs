// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Pipeline topology editing
//!
//! A pipeline is a rooted tree: stages and ungrouped steps below the root,
//! steps below stages. The editor moves nodes around and flattens the result
//! into the order records the backend persists.

mod editor;
mod flatten;
mod key;
mod shape;
mod tree;

pub use editor::{MoveOutcome, MovePosition, MoveRejection, NavTarget, TopologyEditor, NEW_PIPELINE_TITLE};
pub use flatten::{flatten, FlatOrderRecord, SortOrderRequest, StageOrder, StepOrder};
pub use key::{NodeKey, NodeKind, NEW_PIPELINE_KEY};
pub use shape::{load_tree, parse_tree, save_tree, NodeShape, PipelineShape};
pub use tree::{NodeId, TopologyNode, TopologyTree};
