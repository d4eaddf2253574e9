// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Arena-backed ordered tree
//!
//! Nodes live in a flat vector and refer to each other by index. Each slot
//! knows its parent, so ancestry checks walk upwards instead of searching
//! the whole tree. Slots are never freed: the editor only relocates nodes.

use std::collections::HashMap;

use super::key::NodeKey;

/// Index of a node inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Payload of a tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyNode {
    pub key: NodeKey,
    pub title: String,
    /// Steps are leaves; stages and pipeline roots are not
    pub is_leaf: bool,
}

#[derive(Debug, Clone)]
struct Slot {
    node: TopologyNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Ordered forest of [`TopologyNode`]s with unique keys
#[derive(Debug, Clone, Default)]
pub struct TopologyTree {
    slots: Vec<Slot>,
    roots: Vec<NodeId>,
    by_key: HashMap<NodeKey, NodeId>,
}

impl TopologyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node as the last child of `parent` (or as a root).
    ///
    /// Returns `None` when the key is already taken or `parent` is a leaf.
    pub fn push(&mut self, parent: Option<NodeId>, node: TopologyNode) -> Option<NodeId> {
        if self.by_key.contains_key(&node.key) {
            return None;
        }
        if let Some(p) = parent {
            if self.slots[p.0].node.is_leaf {
                return None;
            }
        }

        let id = NodeId(self.slots.len());
        self.by_key.insert(node.key, id);
        self.slots.push(Slot {
            node,
            parent,
            children: Vec::new(),
        });

        match parent {
            Some(p) => self.slots[p.0].children.push(id),
            None => self.roots.push(id),
        }

        Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn find(&self, key: &NodeKey) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    pub fn node(&self, id: NodeId) -> &TopologyNode {
        &self.slots[id.0].node
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.0].children
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of edges between `id` and its root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent(id);
        while let Some(p) = cursor {
            depth += 1;
            cursor = self.parent(p);
        }
        depth
    }

    /// True when `ancestor` lies on the path from `node` to its root
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.parent(p);
        }
        false
    }

    /// Position of `id` among its siblings
    pub fn index_in_parent(&self, id: NodeId) -> usize {
        self.siblings(self.parent(id))
            .iter()
            .position(|n| *n == id)
            .unwrap_or(0)
    }

    fn siblings(&self, parent: Option<NodeId>) -> &Vec<NodeId> {
        match parent {
            Some(p) => &self.slots[p.0].children,
            None => &self.roots,
        }
    }

    fn siblings_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(p) => &mut self.slots[p.0].children,
            None => &mut self.roots,
        }
    }

    /// Relocate `id` (with its subtree) to `index` among the children of
    /// `parent`. The index is interpreted after `id` has been detached.
    ///
    /// Callers must rule out cycles first; see [`Self::is_ancestor`].
    pub(crate) fn relocate<F>(&mut self, id: NodeId, place: F)
    where
        F: FnOnce(&Self) -> (Option<NodeId>, usize),
    {
        let old_parent = self.parent(id);
        self.siblings_mut(old_parent).retain(|n| *n != id);

        let (parent, index) = place(&*self);
        let siblings = self.siblings_mut(parent);
        let index = index.min(siblings.len());
        siblings.insert(index, id);
        self.slots[id.0].parent = parent;
    }

    /// Visit nodes depth-first in document order
    pub fn walk(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.slots.len());
        let mut stack: Vec<(NodeId, usize)> =
            self.roots.iter().rev().map(|r| (*r, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for child in self.children(id).iter().rev() {
                stack.push((*child, depth + 1));
            }
        }

        out
    }
}
