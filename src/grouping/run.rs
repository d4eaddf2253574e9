// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Run records and snapshot loading
//!
//! A snapshot is what one poll of the execution backend returns: the latest
//! run of every step of a pipeline job, in step order.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::errors::{TopoError, TopoResult};
use crate::status::RunStatus;

/// One step's most recent execution record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRun {
    /// Record identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    /// Step this run belongs to
    #[serde(default, deserialize_with = "null_as_default")]
    pub step_id: u64,

    /// Stage grouping; absent or `<= 0` means "not grouped"
    #[serde(default)]
    pub stage_id: Option<i64>,

    /// Whether the stage runs its steps in parallel
    #[serde(default, deserialize_with = "null_as_default")]
    pub parallel: bool,

    /// Step name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Status of the latest run instance
    #[serde(default)]
    pub last_status: RunStatus,

    /// Run instance the backend expects for start/cancel requests
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_runner_id: u64,

    /// Position among siblings
    #[serde(default, alias = "step_sort", deserialize_with = "null_as_default")]
    pub sort: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl StepRun {
    /// Create an ungrouped run record
    pub fn new(id: u64, name: impl Into<String>, last_status: RunStatus) -> Self {
        Self {
            id,
            step_id: id,
            stage_id: None,
            parallel: false,
            name: name.into(),
            last_status,
            last_runner_id: 0,
            sort: 0,
        }
    }

    /// Place the record in a stage
    pub fn in_stage(mut self, stage_id: i64, parallel: bool) -> Self {
        self.stage_id = Some(stage_id);
        self.parallel = parallel;
        self
    }

    /// The stage this record groups under, if any
    pub fn grouping_stage(&self) -> Option<i64> {
        self.stage_id.filter(|id| *id > 0)
    }

    /// Run instance id used for start/cancel requests
    pub fn run_id(&self) -> u64 {
        if self.last_runner_id != 0 {
            self.last_runner_id
        } else {
            self.id
        }
    }
}

/// Snapshot document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load a run snapshot from a file
pub fn load_snapshot(path: &Path) -> TopoResult<Vec<StepRun>> {
    if !path.exists() {
        return Err(TopoError::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| TopoError::FileReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_snapshot(&content, SnapshotFormat::from_path(path))
}

/// Parse a run snapshot.
///
/// Accepts a bare list of records or a job object holding them under
/// `job_runners`. Records that do not decode are skipped with a warning so
/// one bad entry never hides the rest of the pipeline.
pub fn parse_snapshot(content: &str, format: SnapshotFormat) -> TopoResult<Vec<StepRun>> {
    let document: serde_json::Value = match format {
        SnapshotFormat::Json => serde_json::from_str(content)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
    };

    let records = match document {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut job) => match job.remove("job_runners") {
            Some(serde_json::Value::Array(items)) => items,
            Some(serde_json::Value::Null) => Vec::new(),
            Some(_) => {
                return Err(TopoError::InvalidSnapshot {
                    reason: "'job_runners' is not a list".into(),
                })
            }
            None => {
                return Err(TopoError::InvalidSnapshot {
                    reason: "object has no 'job_runners' field".into(),
                })
            }
        },
        serde_json::Value::Null => Vec::new(),
        other => {
            return Err(TopoError::InvalidSnapshot {
                reason: format!("unexpected top-level value: {}", other),
            })
        }
    };

    let mut runs = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<StepRun>(record) {
            Ok(run) => runs.push(run),
            Err(e) => tracing::warn!(index = idx, error = %e, "skipping malformed run record"),
        }
    }

    Ok(runs)
}
