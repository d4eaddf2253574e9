// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Nested tree representation exchanged with the backend

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::key::NodeKind;
use crate::errors::{TopoError, TopoResult};
use crate::grouping::SnapshotFormat;

/// A stage or step as returned by the pipeline detail endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeShape {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default)]
    pub sort: i64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeShape>,
}

impl NodeShape {
    pub fn stage(id: u64, name: impl Into<String>, children: Vec<NodeShape>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Stage,
            sort: 0,
            children,
        }
    }

    pub fn step(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Step,
            sort: 0,
            children: Vec::new(),
        }
    }
}

/// A pipeline with its ordered stages and ungrouped steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineShape {
    /// Absent for a pipeline that has not been created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub stages_and_steps: Vec<NodeShape>,
}

#[derive(Deserialize)]
struct RawNode {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    sort: Option<i64>,
    #[serde(default)]
    children: Option<Vec<serde_json::Value>>,
}

/// Load a pipeline tree from a file
pub fn load_tree(path: &Path) -> TopoResult<PipelineShape> {
    if !path.exists() {
        return Err(TopoError::TreeNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| TopoError::FileReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_tree(&content, SnapshotFormat::from_path(path))
}

/// Write a pipeline tree, as YAML or JSON depending on the extension
pub fn save_tree(path: &Path, shape: &PipelineShape) -> TopoResult<()> {
    let content = match SnapshotFormat::from_path(path) {
        SnapshotFormat::Json => serde_json::to_string_pretty(shape)? + "\n",
        SnapshotFormat::Yaml => serde_yaml::to_string(shape)?,
    };

    std::fs::write(path, content).map_err(|e| TopoError::FileWriteError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Parse a pipeline tree document.
///
/// Accepts a pipeline object (`id`, `name`, `stages_and_steps`) or a bare
/// list of nodes. Nodes without an id or with an unknown `type` are skipped.
pub fn parse_tree(content: &str, format: SnapshotFormat) -> TopoResult<PipelineShape> {
    let document: serde_json::Value = match format {
        SnapshotFormat::Json => serde_json::from_str(content)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
    };

    match document {
        serde_json::Value::Array(items) => Ok(PipelineShape {
            id: None,
            name: String::new(),
            stages_and_steps: decode_nodes(items),
        }),
        serde_json::Value::Object(mut map) => {
            let id = map.get("id").and_then(|v| v.as_u64());
            let name = map
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let items = match map.remove("stages_and_steps") {
                Some(serde_json::Value::Array(items)) => items,
                Some(serde_json::Value::Null) | None => Vec::new(),
                Some(_) => {
                    return Err(TopoError::InvalidTree {
                        reason: "'stages_and_steps' is not a list".into(),
                    })
                }
            };

            Ok(PipelineShape {
                id,
                name,
                stages_and_steps: decode_nodes(items),
            })
        }
        other => Err(TopoError::InvalidTree {
            reason: format!("unexpected top-level value: {}", other),
        }),
    }
}

fn decode_nodes(items: Vec<serde_json::Value>) -> Vec<NodeShape> {
    items.into_iter().filter_map(decode_node).collect()
}

fn decode_node(value: serde_json::Value) -> Option<NodeShape> {
    let raw: RawNode = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed tree node");
            return None;
        }
    };

    let type_name = raw.kind.unwrap_or_default();
    let Some(kind) = NodeKind::parse(&type_name) else {
        tracing::warn!(id = raw.id, node_type = %type_name, "skipping tree node of unknown type");
        return None;
    };

    Some(NodeShape {
        id: raw.id,
        name: raw.name.unwrap_or_default(),
        kind,
        sort: raw.sort.unwrap_or_default(),
        children: decode_nodes(raw.children.unwrap_or_default()),
    })
}
