// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! In-memory backend that records requests instead of sending them

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Mutex;

use super::RunBackend;
use crate::errors::TopoResult;
use crate::grouping::StepRun;
use crate::topology::SortOrderRequest;

/// A request relayed to a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum BackendRequest {
    Start {
        run_id: u64,
    },
    Cancel {
        run_id: u64,
    },
    PersistOrder {
        pipeline_id: Option<u64>,
        order: SortOrderRequest,
    },
    Fetch,
}

/// Backend that only records what it was asked to do
#[derive(Debug, Default)]
pub struct DryRunBackend {
    requests: Mutex<Vec<BackendRequest>>,
    snapshot: Vec<StepRun>,
}

impl DryRunBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `runs` from [`RunBackend::fetch_runs`]
    pub fn with_snapshot(runs: Vec<StepRun>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            snapshot: runs,
        }
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn record(&self, request: BackendRequest) {
        tracing::info!(?request, "dry run: request not sent");
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }
    }
}

#[async_trait]
impl RunBackend for DryRunBackend {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn start_run(&self, run_id: u64) -> TopoResult<()> {
        self.record(BackendRequest::Start { run_id });
        Ok(())
    }

    async fn cancel_run(&self, run_id: u64) -> TopoResult<()> {
        self.record(BackendRequest::Cancel { run_id });
        Ok(())
    }

    async fn persist_order(&self, pipeline_id: Option<u64>, order: &SortOrderRequest) -> TopoResult<()> {
        self.record(BackendRequest::PersistOrder {
            pipeline_id,
            order: order.clone(),
        });
        Ok(())
    }

    async fn fetch_runs(&self) -> TopoResult<Vec<StepRun>> {
        self.record(BackendRequest::Fetch);
        Ok(self.snapshot.clone())
    }

    async fn check_available(&self) -> TopoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::RunStatus;

    #[tokio::test]
    async fn test_records_requests_in_order() {
        let backend = DryRunBackend::new();
        backend.start_run(3).await.unwrap();
        backend.start_run(3).await.unwrap();
        backend.cancel_run(4).await.unwrap();

        assert_eq!(
            backend.requests(),
            vec![
                BackendRequest::Start { run_id: 3 },
                BackendRequest::Start { run_id: 3 },
                BackendRequest::Cancel { run_id: 4 },
            ]
        );
    }

    #[tokio::test]
    async fn test_serves_configured_snapshot() {
        let runs = vec![StepRun::new(1, "build", RunStatus::Running)];
        let backend = DryRunBackend::with_snapshot(runs.clone());

        assert_eq!(backend.fetch_runs().await.unwrap(), runs);
        assert_eq!(backend.requests(), vec![BackendRequest::Fetch]);
    }
}
