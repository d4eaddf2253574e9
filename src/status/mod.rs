// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Run status vocabulary
//!
//! The execution backend reports each run instance's `last_status` as a
//! plain string. This module maps those strings onto [`RunStatus`] and holds
//! the two predicates gating is built from: "has not started yet" and
//! "reached a final result".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status of a step's most recent run instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Created but not started
    Pending,
    /// Legacy synonym of `Pending` used by older backends
    Assigning,
    /// Waiting for a runner
    Queueing,
    /// Executing on a runner
    Running,
    /// Finished successfully
    Success,
    /// Finished with an error
    Failed,
    /// Some assigned runners are still executing
    PartialRunning,
    /// Some assigned runners succeeded, others have not finished
    PartialSuccess,
    /// Cancelled by a user
    Canceled,
    /// Empty status string; the run was never touched
    Unset,
    /// Anything else, including a missing field
    Unknown(String),
}

impl RunStatus {
    /// Parse a backend status string. Never fails.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" => Self::Unset,
            "pending" => Self::Pending,
            "assigning" => Self::Assigning,
            "queueing" => Self::Queueing,
            "running" => Self::Running,
            "success" => Self::Success,
            "failed" => Self::Failed,
            "partial_running" => Self::PartialRunning,
            "partial_success" => Self::PartialSuccess,
            "canceled" => Self::Canceled,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Wire form of the status
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Assigning => "assigning",
            Self::Queueing => "queueing",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::PartialRunning => "partial_running",
            Self::PartialSuccess => "partial_success",
            Self::Canceled => "canceled",
            Self::Unset => "",
            Self::Unknown(s) => s,
        }
    }

    /// True when the run has not been started: `pending`, `assigning` or `""`
    pub fn is_not_started(&self) -> bool {
        matches!(self, Self::Pending | Self::Assigning | Self::Unset)
    }

    /// True when the run reached `success` or `failed`
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// True while a runner is working on (or waiting for) the run
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Queueing | Self::Running | Self::PartialRunning | Self::PartialSuccess
        )
    }

    /// Single-glyph badge shown in the status bar
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Pending | Self::Assigning | Self::Unset => "○",
            Self::Queueing => "◔",
            Self::Running => "▶",
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::PartialRunning => "…▶",
            Self::PartialSuccess => "…✓",
            Self::Canceled => "⊘",
            Self::Unknown(_) => "?",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending | Self::Assigning | Self::Unset => "pending",
            Self::Queueing => "queueing",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::PartialRunning => "partially running",
            Self::PartialSuccess => "partially succeeded",
            Self::Canceled => "canceled",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl Default for RunStatus {
    /// A record without `last_status` is neither startable nor finished.
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "\"\""),
            Self::Unknown(s) if s.is_empty() => write!(f, "unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // null is treated like a missing field
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::parse(&s)).unwrap_or_default())
    }
}
