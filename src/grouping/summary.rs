// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Aggregate status of a job snapshot

use serde::Serialize;

use super::run::StepRun;
use crate::status::RunStatus;

/// Counts and overall status for one poll snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub status: RunStatus,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub canceled: usize,
    pub active: usize,
    pub not_started: usize,
    pub unknown: usize,
}

/// Derive the overall job status.
///
/// Precedence: anything active makes the job `running`; otherwise all
/// successes is `success`; any failure is `failed`; any cancellation is
/// `canceled`; some successes with the rest untouched is `partial_success`.
pub fn summarize(steps: &[StepRun]) -> RunSummary {
    let mut summary = RunSummary {
        status: RunStatus::Pending,
        total: steps.len(),
        succeeded: 0,
        failed: 0,
        canceled: 0,
        active: 0,
        not_started: 0,
        unknown: 0,
    };

    for step in steps {
        match &step.last_status {
            RunStatus::Success => summary.succeeded += 1,
            RunStatus::Failed => summary.failed += 1,
            RunStatus::Canceled => summary.canceled += 1,
            s if s.is_active() => summary.active += 1,
            s if s.is_not_started() => summary.not_started += 1,
            _ => summary.unknown += 1,
        }
    }

    summary.status = if summary.total == 0 {
        RunStatus::Pending
    } else if summary.active > 0 {
        RunStatus::Running
    } else if summary.succeeded == summary.total {
        RunStatus::Success
    } else if summary.failed > 0 {
        RunStatus::Failed
    } else if summary.canceled > 0 {
        RunStatus::Canceled
    } else if summary.succeeded > 0 {
        RunStatus::PartialSuccess
    } else if summary.unknown > 0 {
        RunStatus::default()
    } else {
        RunStatus::Pending
    };

    summary
}
