// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Node keys and kinds

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::TopoError;

/// Placeholder key of a pipeline that does not exist yet
pub const NEW_PIPELINE_KEY: &str = "new_pipeline";

/// Identity of a tree node.
///
/// Stage and step ids come from different backend tables, so the kind is
/// part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKey {
    Placeholder,
    Pipeline(u64),
    Stage(u64),
    Step(u64),
}

impl NodeKey {
    /// Backend id behind the key
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Placeholder => None,
            Self::Pipeline(id) | Self::Stage(id) | Self::Step(id) => Some(*id),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(f, "{}", NEW_PIPELINE_KEY),
            Self::Pipeline(id) => write!(f, "pipeline-{}", id),
            Self::Stage(id) => write!(f, "stage-{}", id),
            Self::Step(id) => write!(f, "step-{}", id),
        }
    }
}

impl FromStr for NodeKey {
    type Err = TopoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == NEW_PIPELINE_KEY {
            return Ok(Self::Placeholder);
        }

        let unknown = || TopoError::UnknownKey { key: s.to_string() };
        let (prefix, id) = s.split_once('-').ok_or_else(unknown)?;
        let id: u64 = id.parse().map_err(|_| unknown())?;

        match prefix {
            "pipeline" => Ok(Self::Pipeline(id)),
            "stage" => Ok(Self::Stage(id)),
            "step" => Ok(Self::Step(id)),
            _ => Err(unknown()),
        }
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Kind of a persisted node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Stage,
    Step,
}

impl NodeKind {
    /// Parse the backend's `type` field
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stage" => Some(Self::Stage),
            "step" => Some(Self::Step),
            _ => None,
        }
    }

    /// Key of a node of this kind
    pub fn key(self, id: u64) -> NodeKey {
        match self {
            Self::Stage => NodeKey::Stage(id),
            Self::Step => NodeKey::Step(id),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stage => write!(f, "stage"),
            Self::Step => write!(f, "step"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip_through_strings() {
        for key in [
            NodeKey::Placeholder,
            NodeKey::Pipeline(3),
            NodeKey::Stage(5),
            NodeKey::Step(12),
        ] {
            assert_eq!(key.to_string().parse::<NodeKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_rejects_malformed_keys() {
        for raw in ["", "stage", "stage-", "stage-x", "job-4", "5"] {
            assert!(raw.parse::<NodeKey>().is_err(), "{raw:?}");
        }
    }
}
