// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Execution backend boundary
//!
//! The engines never talk to the backend themselves. Host surfaces relay the
//! one-way "start", "cancel" and "persist order" requests through a
//! [`RunBackend`], and may use it as a snapshot source.

mod command;
mod dry_run;

pub use command::CommandBackend;
pub use dry_run::{BackendRequest, DryRunBackend};

use async_trait::async_trait;

use crate::errors::TopoResult;
use crate::grouping::StepRun;
use crate::topology::SortOrderRequest;

/// Requests the host can relay to the execution backend.
///
/// Requests are fire-and-forget: nothing is retried or deduplicated, and
/// callers observe the effect by polling again.
#[async_trait]
pub trait RunBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Start the run instance `run_id`
    async fn start_run(&self, run_id: u64) -> TopoResult<()>;

    /// Cancel the run instance `run_id`
    async fn cancel_run(&self, run_id: u64) -> TopoResult<()>;

    /// Persist the full order of a pipeline's stages and steps
    async fn persist_order(&self, pipeline_id: Option<u64>, order: &SortOrderRequest) -> TopoResult<()>;

    /// Fetch the current run snapshot
    async fn fetch_runs(&self) -> TopoResult<Vec<StepRun>>;

    /// Fail when the backend cannot be used
    async fn check_available(&self) -> TopoResult<()>;
}
