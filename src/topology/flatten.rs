// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Flattening a tree into persistable order records

use serde::{Deserialize, Serialize};

use super::key::NodeKind;
use super::tree::{NodeId, TopologyTree};

/// One persisted position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatOrderRecord {
    pub id: u64,
    pub kind: NodeKind,
    /// Stage holding the step; `None` at the top level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    /// Zero-based position within the record's scope
    pub sort: usize,
}

/// Flatten the tree in document order.
///
/// Children of the pipeline root share one `sort` sequence regardless of
/// kind; the steps of each stage get their own sequence starting at 0.
/// Nodes that do not fit the two-level shape are skipped.
pub fn flatten(tree: &TopologyTree) -> Vec<FlatOrderRecord> {
    let mut records = Vec::new();
    let mut top_sort = 0;

    for root in tree.roots() {
        for child in tree.children(*root) {
            let Some(record) = top_level_record(tree, *child, top_sort) else {
                continue;
            };
            top_sort += 1;
            records.push(record);

            if record.kind == NodeKind::Stage {
                flatten_stage(tree, *child, record.id, &mut records);
            }
        }
    }

    records
}

fn top_level_record(tree: &TopologyTree, id: NodeId, sort: usize) -> Option<FlatOrderRecord> {
    let node = tree.node(id);
    let Some(node_id) = node.key.id() else {
        tracing::warn!(key = %node.key, "skipping top-level node without an id");
        return None;
    };

    Some(FlatOrderRecord {
        id: node_id,
        kind: if node.is_leaf {
            NodeKind::Step
        } else {
            NodeKind::Stage
        },
        parent_id: None,
        sort,
    })
}

fn flatten_stage(tree: &TopologyTree, stage: NodeId, stage_id: u64, out: &mut Vec<FlatOrderRecord>) {
    let mut sort = 0;

    for child in tree.children(stage) {
        let node = tree.node(*child);
        let step_id = match node.key.id() {
            Some(id) if node.is_leaf => id,
            _ => {
                tracing::warn!(key = %node.key, stage = stage_id, "skipping nested non-step node");
                continue;
            }
        };

        out.push(FlatOrderRecord {
            id: step_id,
            kind: NodeKind::Step,
            parent_id: Some(stage_id),
            sort,
        });
        sort += 1;
    }
}

/// Stage position in a sort request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOrder {
    pub id: u64,
    pub sort: usize,
}

/// Step position in a sort request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOrder {
    pub id: u64,
    pub sort: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<u64>,
}

/// Body of the persist-order request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderRequest {
    pub stages: Vec<StageOrder>,
    pub steps: Vec<StepOrder>,
}

impl SortOrderRequest {
    /// Split flat records into stage and step orderings
    pub fn from_records(records: &[FlatOrderRecord]) -> Self {
        let mut request = Self::default();

        for record in records {
            match record.kind {
                NodeKind::Stage => request.stages.push(StageOrder {
                    id: record.id,
                    sort: record.sort,
                }),
                NodeKind::Step => request.steps.push(StepOrder {
                    id: record.id,
                    sort: record.sort,
                    stage_id: record.parent_id,
                }),
            }
        }

        request
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty() && self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, kind: NodeKind, parent_id: Option<u64>, sort: usize) -> FlatOrderRecord {
        FlatOrderRecord {
            id,
            kind,
            parent_id,
            sort,
        }
    }

    #[test]
    fn test_sort_request_split() {
        let records = vec![
            record(1, NodeKind::Step, None, 0),
            record(5, NodeKind::Stage, None, 1),
            record(2, NodeKind::Step, Some(5), 0),
            record(3, NodeKind::Step, Some(5), 1),
        ];

        let request = SortOrderRequest::from_records(&records);
        assert_eq!(request.stages, vec![StageOrder { id: 5, sort: 1 }]);
        assert_eq!(request.steps.len(), 3);
        assert_eq!(request.steps[0].stage_id, None);
        assert_eq!(request.steps[2].stage_id, Some(5));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "stages": [{"id": 5, "sort": 1}],
                "steps": [
                    {"id": 1, "sort": 0},
                    {"id": 2, "sort": 0, "stage_id": 5},
                    {"id": 3, "sort": 1, "stage_id": 5}
                ]
            })
        );
    }
}
