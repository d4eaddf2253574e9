// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Topology editor
//!
//! Owns one pipeline tree and applies drag-and-drop moves to it. The tree is
//! always two levels deep below the root: the root holds stages and
//! ungrouped steps, stages hold steps.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::flatten::{flatten, FlatOrderRecord, SortOrderRequest};
use super::key::{NodeKey, NodeKind};
use super::shape::{NodeShape, PipelineShape};
use super::tree::{NodeId, TopologyNode, TopologyTree};
use crate::errors::TopoError;

/// Title of the placeholder root
pub const NEW_PIPELINE_TITLE: &str = "New Pipeline";

/// Where a dragged node lands relative to the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePosition {
    /// First child of the target
    Inside,
    /// Sibling right before the target
    Before,
    /// Sibling right after the target
    After,
}

impl FromStr for MovePosition {
    type Err = TopoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inside" => Ok(Self::Inside),
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            _ => Err(TopoError::UnknownPosition {
                position: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MovePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inside => write!(f, "inside"),
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// Why a move left the tree untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveRejection {
    UnknownSource,
    UnknownTarget,
    SameNode,
    /// The target lies inside the dragged subtree
    WouldCycle,
    /// The pipeline root itself cannot be dragged
    MovesRoot,
    /// Steps cannot hold children
    TargetIsLeaf,
    /// Dropping next to the root would create a second root
    WouldCreateRoot,
    /// Stages may only sit directly under the root
    NestedStage,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnknownSource => "source node not found",
            Self::UnknownTarget => "target node not found",
            Self::SameNode => "source and target are the same node",
            Self::WouldCycle => "target is inside the dragged subtree",
            Self::MovesRoot => "the pipeline root cannot be moved",
            Self::TargetIsLeaf => "steps cannot contain other nodes",
            Self::WouldCreateRoot => "nodes cannot be placed beside the pipeline root",
            Self::NestedStage => "stages can only be placed at the top level",
        };
        write!(f, "{}", text)
    }
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved,
    Rejected(MoveRejection),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved)
    }
}

/// View a selected node navigates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum NavTarget {
    CreatePipeline {
        pipeline_id: Option<u64>,
    },
    EditStage {
        pipeline_id: Option<u64>,
        stage_id: u64,
    },
    EditStep {
        pipeline_id: Option<u64>,
        step_id: u64,
    },
}

impl NavTarget {
    /// Dashboard route of the view
    pub fn route(&self) -> String {
        let (path, pipeline_id, extra) = match self {
            Self::CreatePipeline { pipeline_id } => ("pipeline", pipeline_id, None),
            Self::EditStage {
                pipeline_id,
                stage_id,
            } => ("stage", pipeline_id, Some(("stage_id", *stage_id))),
            Self::EditStep {
                pipeline_id,
                step_id,
            } => ("step", pipeline_id, Some(("step_id", *step_id))),
        };

        let mut query = Vec::new();
        if let Some(id) = pipeline_id {
            query.push(format!("id={}", id));
        }
        if let Some((name, value)) = extra {
            query.push(format!("{}={}", name, value));
        }

        if query.is_empty() {
            format!("/new_pipeline/{}", path)
        } else {
            format!("/new_pipeline/{}?{}", path, query.join("&"))
        }
    }
}

/// Editable pipeline tree
#[derive(Debug, Clone, Default)]
pub struct TopologyEditor {
    tree: TopologyTree,
}

impl TopologyEditor {
    /// An editor without any nodes
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tree for a pipeline that has not been created yet
    pub fn new_pipeline() -> Self {
        let mut tree = TopologyTree::new();
        tree.push(
            None,
            TopologyNode {
                key: NodeKey::Placeholder,
                title: NEW_PIPELINE_TITLE.to_string(),
                is_leaf: false,
            },
        );
        Self { tree }
    }

    /// Build the tree from the backend's nested representation.
    ///
    /// Inconsistent entries are dropped: children of steps, stages nested in
    /// stages and duplicate keys.
    pub fn load(shape: &PipelineShape) -> Self {
        let (key, fallback) = match shape.id {
            Some(id) => (NodeKey::Pipeline(id), format!("pipeline {}", id)),
            None => (NodeKey::Placeholder, NEW_PIPELINE_TITLE.to_string()),
        };
        let title = if shape.name.is_empty() {
            fallback
        } else {
            shape.name.clone()
        };

        let mut tree = TopologyTree::new();
        tree.push(
            None,
            TopologyNode {
                key,
                title,
                is_leaf: false,
            },
        );

        let mut editor = Self { tree };
        editor.load_children(shape);
        editor
    }

    fn load_children(&mut self, shape: &PipelineShape) {
        let Some(root) = self.tree.roots().first().copied() else {
            return;
        };

        for entry in &shape.stages_and_steps {
            let Some(id) = self.push_shape(root, entry) else {
                continue;
            };

            if entry.kind != NodeKind::Stage {
                if !entry.children.is_empty() {
                    tracing::warn!(step = entry.id, "dropping children of a step node");
                }
                continue;
            }

            for child in &entry.children {
                if child.kind == NodeKind::Stage {
                    tracing::warn!(stage = child.id, parent = entry.id, "skipping nested stage");
                    continue;
                }
                if !child.children.is_empty() {
                    tracing::warn!(step = child.id, "dropping children of a step node");
                }
                self.push_shape(id, child);
            }
        }

        tracing::debug!(nodes = self.tree.len(), "loaded pipeline tree");
    }

    fn push_shape(&mut self, parent: NodeId, shape: &NodeShape) -> Option<NodeId> {
        let node = TopologyNode {
            key: shape.kind.key(shape.id),
            title: shape.name.clone(),
            is_leaf: shape.kind == NodeKind::Step,
        };
        let key = node.key;
        let pushed = self.tree.push(Some(parent), node);
        if pushed.is_none() {
            tracing::warn!(%key, "skipping duplicate tree node");
        }
        pushed
    }

    /// Underlying tree
    pub fn tree(&self) -> &TopologyTree {
        &self.tree
    }

    /// Key of the root node
    pub fn root_key(&self) -> Option<NodeKey> {
        self.tree.roots().first().map(|r| self.tree.node(*r).key)
    }

    /// Backend id of the pipeline, if it exists
    pub fn pipeline_id(&self) -> Option<u64> {
        match self.root_key()? {
            NodeKey::Pipeline(id) => Some(id),
            _ => None,
        }
    }

    /// Look up a node by key
    pub fn node(&self, key: &NodeKey) -> Option<&TopologyNode> {
        self.tree.find(key).map(|id| self.tree.node(id))
    }

    /// Keys of a node's children, in order
    pub fn children_of(&self, key: &NodeKey) -> Vec<NodeKey> {
        self.tree
            .find(key)
            .map(|id| {
                self.tree
                    .children(id)
                    .iter()
                    .map(|c| self.tree.node(*c).key)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Key of a node's parent
    pub fn parent_of(&self, key: &NodeKey) -> Option<NodeKey> {
        let id = self.tree.find(key)?;
        self.tree.parent(id).map(|p| self.tree.node(p).key)
    }

    /// Resolve a clicked node to the view it opens
    pub fn select(&self, key: &NodeKey) -> Option<NavTarget> {
        let id = self.tree.find(key)?;
        let node = self.tree.node(id);
        let pipeline_id = self.pipeline_id();

        let target = if node.key == NodeKey::Placeholder || self.tree.parent(id).is_none() {
            NavTarget::CreatePipeline { pipeline_id }
        } else if !node.is_leaf {
            NavTarget::EditStage {
                pipeline_id,
                stage_id: node.key.id().unwrap_or_default(),
            }
        } else {
            NavTarget::EditStep {
                pipeline_id,
                step_id: node.key.id().unwrap_or_default(),
            }
        };

        Some(target)
    }

    fn check_move(
        &self,
        source: &NodeKey,
        target: &NodeKey,
        position: MovePosition,
    ) -> Result<(NodeId, NodeId), MoveRejection> {
        let src = self.tree.find(source).ok_or(MoveRejection::UnknownSource)?;
        let tgt = self.tree.find(target).ok_or(MoveRejection::UnknownTarget)?;

        if src == tgt {
            return Err(MoveRejection::SameNode);
        }
        if self.tree.is_ancestor(src, tgt) {
            return Err(MoveRejection::WouldCycle);
        }
        if self.tree.parent(src).is_none() {
            return Err(MoveRejection::MovesRoot);
        }

        let new_parent = match position {
            MovePosition::Inside => {
                if self.tree.node(tgt).is_leaf {
                    return Err(MoveRejection::TargetIsLeaf);
                }
                tgt
            }
            MovePosition::Before | MovePosition::After => self
                .tree
                .parent(tgt)
                .ok_or(MoveRejection::WouldCreateRoot)?,
        };

        if !self.tree.node(src).is_leaf && self.tree.parent(new_parent).is_some() {
            return Err(MoveRejection::NestedStage);
        }

        Ok((src, tgt))
    }

    /// Move the subtree at `source` relative to `target`.
    ///
    /// Invalid moves are no-ops. The node is detached and reinserted within
    /// this call, so no caller can observe it in two places or in none.
    pub fn move_node(
        &mut self,
        source: &NodeKey,
        target: &NodeKey,
        position: MovePosition,
    ) -> MoveOutcome {
        let (src, tgt) = match self.check_move(source, target, position) {
            Ok(ids) => ids,
            Err(reason) => {
                tracing::debug!(%source, %target, %position, %reason, "move rejected");
                return MoveOutcome::Rejected(reason);
            }
        };

        self.tree.relocate(src, |tree| match position {
            MovePosition::Inside => (Some(tgt), 0),
            MovePosition::Before => (tree.parent(tgt), tree.index_in_parent(tgt)),
            MovePosition::After => (tree.parent(tgt), tree.index_in_parent(tgt) + 1),
        });

        tracing::debug!(%source, %target, %position, "moved node");
        MoveOutcome::Moved
    }

    /// Flat, persistable ordering of the tree
    pub fn flatten(&self) -> Vec<FlatOrderRecord> {
        flatten(&self.tree)
    }

    /// Persist-order request for the current tree
    pub fn sort_request(&self) -> SortOrderRequest {
        SortOrderRequest::from_records(&self.flatten())
    }

    /// Convert back into the nested representation, with current positions
    pub fn to_shape(&self) -> PipelineShape {
        let Some(root) = self.tree.roots().first().copied() else {
            return PipelineShape::default();
        };
        let root_node = self.tree.node(root);

        let stages_and_steps = self
            .tree
            .children(root)
            .iter()
            .enumerate()
            .filter_map(|(sort, id)| self.node_shape(*id, sort))
            .collect();

        PipelineShape {
            id: self.pipeline_id(),
            name: root_node.title.clone(),
            stages_and_steps,
        }
    }

    fn node_shape(&self, id: NodeId, sort: usize) -> Option<NodeShape> {
        let node = self.tree.node(id);
        let node_id = node.key.id()?;
        let children = self
            .tree
            .children(id)
            .iter()
            .enumerate()
            .filter_map(|(i, c)| self.node_shape(*c, i))
            .collect();

        Some(NodeShape {
            id: node_id,
            name: node.title.clone(),
            kind: if node.is_leaf {
                NodeKind::Step
            } else {
                NodeKind::Stage
            },
            sort: sort as i64,
            children,
        })
    }

    /// Indented outline of the tree
    pub fn render(&self) -> String {
        let mut out = String::new();
        for root in self.tree.roots() {
            let node = self.tree.node(*root);
            out.push_str(&format!("{} ({})\n", node.title, node.key));
            self.render_children(*root, "", &mut out);
        }
        out
    }

    fn render_children(&self, id: NodeId, prefix: &str, out: &mut String) {
        let children = self.tree.children(id);
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let node = self.tree.node(*child);
            out.push_str(&format!(
                "{}{} {} ({})\n",
                prefix,
                if last { "└──" } else { "├──" },
                node.title,
                node.key
            ));
            let next_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            self.render_children(*child, &next_prefix, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shape() -> PipelineShape {
        PipelineShape {
            id: Some(9),
            name: "release".into(),
            stages_and_steps: vec![
                NodeShape::step(1, "checkout"),
                NodeShape::stage(
                    5,
                    "build",
                    vec![NodeShape::step(2, "compile"), NodeShape::step(3, "test")],
                ),
                NodeShape::step(4, "deploy"),
                NodeShape::stage(6, "notify", vec![]),
            ],
        }
    }

    fn sample() -> TopologyEditor {
        TopologyEditor::load(&sample_shape())
    }

    fn rec(id: u64, kind: NodeKind, parent_id: Option<u64>, sort: usize) -> FlatOrderRecord {
        FlatOrderRecord {
            id,
            kind,
            parent_id,
            sort,
        }
    }

    #[test]
    fn test_flatten_loaded_tree() {
        let records = sample().flatten();
        assert_eq!(
            records,
            vec![
                rec(1, NodeKind::Step, None, 0),
                rec(5, NodeKind::Stage, None, 1),
                rec(2, NodeKind::Step, Some(5), 0),
                rec(3, NodeKind::Step, Some(5), 1),
                rec(4, NodeKind::Step, None, 2),
                rec(6, NodeKind::Stage, None, 3),
            ]
        );
    }

    #[test]
    fn test_move_step_inside_stage_becomes_first_child() {
        let mut editor = sample();
        let outcome = editor.move_node(&NodeKey::Step(4), &NodeKey::Stage(5), MovePosition::Inside);
        assert_eq!(outcome, MoveOutcome::Moved);

        let records = editor.flatten();
        assert!(records.contains(&rec(4, NodeKind::Step, Some(5), 0)));
        assert!(records.contains(&rec(2, NodeKind::Step, Some(5), 1)));
        assert!(records.contains(&rec(3, NodeKind::Step, Some(5), 2)));
        // the stage after the removed step moves up
        assert!(records.contains(&rec(6, NodeKind::Stage, None, 2)));
    }

    #[test]
    fn test_move_before_and_after() {
        let mut editor = sample();

        assert!(editor
            .move_node(&NodeKey::Step(4), &NodeKey::Step(1), MovePosition::Before)
            .is_moved());
        assert_eq!(
            editor.children_of(&NodeKey::Pipeline(9)),
            vec![NodeKey::Step(4), NodeKey::Step(1), NodeKey::Stage(5), NodeKey::Stage(6)]
        );

        assert!(editor
            .move_node(&NodeKey::Step(2), &NodeKey::Step(3), MovePosition::After)
            .is_moved());
        assert_eq!(
            editor.children_of(&NodeKey::Stage(5)),
            vec![NodeKey::Step(3), NodeKey::Step(2)]
        );

        // out of a stage to the top level
        assert!(editor
            .move_node(&NodeKey::Step(3), &NodeKey::Stage(6), MovePosition::After)
            .is_moved());
        assert_eq!(editor.parent_of(&NodeKey::Step(3)), Some(NodeKey::Pipeline(9)));
        assert_eq!(
            editor.children_of(&NodeKey::Pipeline(9)).last(),
            Some(&NodeKey::Step(3))
        );
    }

    #[test]
    fn test_move_within_same_parent_after_later_sibling() {
        let mut editor = sample();
        editor.move_node(&NodeKey::Step(1), &NodeKey::Step(4), MovePosition::After);
        assert_eq!(
            editor.children_of(&NodeKey::Pipeline(9)),
            vec![NodeKey::Stage(5), NodeKey::Step(4), NodeKey::Step(1), NodeKey::Stage(6)]
        );
    }

    #[test]
    fn test_cycle_guard_leaves_tree_unchanged() {
        let mut editor = sample();
        let before = editor.flatten();

        let outcome = editor.move_node(&NodeKey::Stage(5), &NodeKey::Step(2), MovePosition::Inside);
        assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::WouldCycle));

        let outcome = editor.move_node(&NodeKey::Pipeline(9), &NodeKey::Stage(5), MovePosition::Inside);
        assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::WouldCycle));

        assert_eq!(editor.flatten(), before);
    }

    #[test]
    fn test_invalid_moves_are_no_ops() {
        let mut editor = sample();
        let before = editor.flatten();

        let cases = [
            (NodeKey::Step(99), NodeKey::Stage(5), MovePosition::Inside, MoveRejection::UnknownSource),
            (NodeKey::Step(1), NodeKey::Stage(99), MovePosition::Inside, MoveRejection::UnknownTarget),
            (NodeKey::Step(1), NodeKey::Step(1), MovePosition::After, MoveRejection::SameNode),
            (NodeKey::Step(1), NodeKey::Step(4), MovePosition::Inside, MoveRejection::TargetIsLeaf),
            (NodeKey::Step(1), NodeKey::Pipeline(9), MovePosition::Before, MoveRejection::WouldCreateRoot),
            (NodeKey::Stage(6), NodeKey::Stage(5), MovePosition::Inside, MoveRejection::NestedStage),
            (NodeKey::Stage(6), NodeKey::Step(2), MovePosition::Before, MoveRejection::NestedStage),
        ];

        for (source, target, position, reason) in cases {
            assert_eq!(
                editor.move_node(&source, &target, position),
                MoveOutcome::Rejected(reason),
                "{source} {position} {target}"
            );
        }

        assert_eq!(editor.flatten(), before);
    }

    #[test]
    fn test_stage_moves_with_its_steps() {
        let mut editor = sample();
        assert!(editor
            .move_node(&NodeKey::Stage(5), &NodeKey::Stage(6), MovePosition::After)
            .is_moved());

        assert_eq!(
            editor.children_of(&NodeKey::Pipeline(9)),
            vec![NodeKey::Step(1), NodeKey::Step(4), NodeKey::Stage(6), NodeKey::Stage(5)]
        );
        assert_eq!(
            editor.children_of(&NodeKey::Stage(5)),
            vec![NodeKey::Step(2), NodeKey::Step(3)]
        );
    }

    #[test]
    fn test_move_into_empty_stage_and_root() {
        let mut editor = sample();
        assert!(editor
            .move_node(&NodeKey::Step(2), &NodeKey::Stage(6), MovePosition::Inside)
            .is_moved());
        assert!(editor
            .move_node(&NodeKey::Step(3), &NodeKey::Pipeline(9), MovePosition::Inside)
            .is_moved());

        let records = editor.flatten();
        assert_eq!(records[0], rec(3, NodeKind::Step, None, 0));
        assert!(records.contains(&rec(2, NodeKind::Step, Some(6), 0)));
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let mut editor = sample();
        editor.move_node(&NodeKey::Step(1), &NodeKey::Stage(6), MovePosition::Inside);
        assert_eq!(editor.flatten(), editor.flatten());
    }

    #[test]
    fn test_select_views() {
        let editor = sample();

        assert_eq!(
            editor.select(&NodeKey::Pipeline(9)),
            Some(NavTarget::CreatePipeline { pipeline_id: Some(9) })
        );
        assert_eq!(
            editor.select(&NodeKey::Stage(6)),
            Some(NavTarget::EditStage {
                pipeline_id: Some(9),
                stage_id: 6
            })
        );
        assert_eq!(
            editor.select(&NodeKey::Step(3)).map(|t| t.route()),
            Some("/new_pipeline/step?id=9&step_id=3".to_string())
        );
        assert_eq!(editor.select(&NodeKey::Step(42)), None);
    }

    #[test]
    fn test_new_pipeline_placeholder() {
        let editor = TopologyEditor::new_pipeline();

        assert_eq!(editor.root_key(), Some(NodeKey::Placeholder));
        assert_eq!(editor.pipeline_id(), None);
        let target = editor.select(&NodeKey::Placeholder).unwrap();
        assert_eq!(target.route(), "/new_pipeline/pipeline");
        assert!(editor.flatten().is_empty());
    }

    #[test]
    fn test_unsaved_pipeline_keeps_its_name() {
        let shape = PipelineShape {
            id: None,
            name: "nightly".into(),
            stages_and_steps: vec![NodeShape::step(1, "build"), NodeShape::step(2, "ship")],
        };

        let mut editor = TopologyEditor::load(&shape);
        assert_eq!(editor.root_key(), Some(NodeKey::Placeholder));
        assert!(editor
            .move_node(&NodeKey::Step(2), &NodeKey::Step(1), MovePosition::Before)
            .is_moved());

        let saved = editor.to_shape();
        assert_eq!(saved.id, None);
        assert_eq!(saved.name, "nightly");

        let unnamed = TopologyEditor::load(&PipelineShape::default());
        assert_eq!(unnamed.to_shape().name, NEW_PIPELINE_TITLE);
    }

    #[test]
    fn test_empty_editor() {
        let mut editor = TopologyEditor::empty();
        assert!(editor.flatten().is_empty());
        assert!(editor.sort_request().is_empty());
        assert_eq!(
            editor.move_node(&NodeKey::Step(1), &NodeKey::Step(2), MovePosition::After),
            MoveOutcome::Rejected(MoveRejection::UnknownSource)
        );
        assert_eq!(editor.render(), "");
    }

    #[test]
    fn test_load_skips_inconsistent_shapes() {
        let mut bad_step = NodeShape::step(7, "lint");
        bad_step.children.push(NodeShape::step(8, "ghost"));
        let shape = PipelineShape {
            id: Some(1),
            name: "p".into(),
            stages_and_steps: vec![
                bad_step,
                NodeShape::stage(2, "outer", vec![NodeShape::stage(3, "inner", vec![])]),
                NodeShape::step(7, "duplicate"),
            ],
        };

        let editor = TopologyEditor::load(&shape);
        assert!(editor.node(&NodeKey::Step(8)).is_none());
        assert!(editor.node(&NodeKey::Stage(3)).is_none());
        assert_eq!(editor.node(&NodeKey::Step(7)).unwrap().title, "lint");
        assert_eq!(editor.tree().len(), 3);
    }

    #[test]
    fn test_to_shape_reflects_moves() {
        let mut editor = sample();
        editor.move_node(&NodeKey::Step(4), &NodeKey::Stage(5), MovePosition::Inside);

        let shape = editor.to_shape();
        assert_eq!(shape.id, Some(9));
        assert_eq!(shape.stages_and_steps.len(), 3);
        let build = &shape.stages_and_steps[1];
        assert_eq!(build.children[0].id, 4);
        assert_eq!(build.children[2].sort, 2);

        let reloaded = TopologyEditor::load(&shape);
        assert_eq!(reloaded.flatten(), editor.flatten());
    }

    #[test]
    fn test_render_outline() {
        let text = sample().render();
        assert!(text.starts_with("release (pipeline-9)\n"));
        assert!(text.contains("├── build (stage-5)\n│   ├── compile (step-2)\n│   └── test (step-3)\n"));
        assert!(text.ends_with("└── notify (stage-6)\n"));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!("Inside".parse::<MovePosition>().unwrap(), MovePosition::Inside);
        assert!("over".parse::<MovePosition>().is_err());
    }
}
