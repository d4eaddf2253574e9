// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Run graph of a job snapshot
//!
//! Turns execution groups into a DAG of steps whose edges are the advance
//! transitions, for rendering as text, DOT or Mermaid.

use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use super::engine::ExecutionGroup;
use super::gate::can_advance_step;
use super::run::StepRun;

/// Edge weight: whether the transition may be taken right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub enabled: bool,
}

#[derive(Debug, Clone)]
struct GroupInfo {
    stage_id: Option<i64>,
    parallel: bool,
    staged: bool,
    nodes: Vec<NodeIndex>,
}

/// Step DAG built from execution groups
pub struct RunGraph {
    graph: DiGraph<StepRun, Transition>,
    groups: Vec<GroupInfo>,
    run_to_index: HashMap<u64, NodeIndex>,
}

impl RunGraph {
    /// Build the graph from grouped runs
    pub fn build(groups: &[ExecutionGroup]) -> Self {
        let mut graph = DiGraph::new();
        let mut infos = Vec::with_capacity(groups.len());
        let mut run_to_index = HashMap::new();

        for group in groups {
            let nodes: Vec<NodeIndex> = group
                .steps
                .iter()
                .map(|step| {
                    let node = graph.add_node(step.clone());
                    run_to_index.entry(step.run_id()).or_insert(node);
                    node
                })
                .collect();

            if !group.parallel {
                for (pair, runs) in nodes.windows(2).zip(group.steps.windows(2)) {
                    let enabled = can_advance_step(&runs[0], &runs[1]);
                    graph.add_edge(pair[0], pair[1], Transition { enabled });
                }
            }

            infos.push(GroupInfo {
                stage_id: group.stage_id,
                parallel: group.parallel,
                staged: group.is_staged(),
                nodes,
            });
        }

        for i in 1..groups.len() {
            let Some(terminal) = groups[i - 1].last() else {
                continue;
            };
            let prev = &infos[i - 1];
            let next = &infos[i];

            let sources: Vec<NodeIndex> = if prev.parallel {
                prev.nodes.clone()
            } else {
                prev.nodes.last().copied().into_iter().collect()
            };
            let fan_out = if next.parallel { next.nodes.len() } else { 1 };

            // each member of a parallel group is unlocked by the terminal step
            for (to, step) in next.nodes.iter().zip(&groups[i].steps).take(fan_out) {
                let enabled = can_advance_step(terminal, step);
                for from in &sources {
                    graph.add_edge(*from, *to, Transition { enabled });
                }
            }
        }

        Self {
            graph,
            groups: infos,
            run_to_index,
        }
    }

    /// Number of steps in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of transitions in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Runs in a valid execution order
    pub fn execution_order(&self) -> Vec<&StepRun> {
        // Construction only adds forward edges, so toposort cannot fail
        let order = toposort(&self.graph, None)
            .unwrap_or_else(|_| self.graph.node_indices().collect());
        order.into_iter().map(|n| &self.graph[n]).collect()
    }

    /// Runs that must finish before `run_id` can be advanced
    pub fn predecessors(&self, run_id: u64) -> Option<Vec<u64>> {
        let node = self.run_to_index.get(&run_id)?;
        Some(
            self.graph
                .neighbors_directed(*node, Direction::Incoming)
                .map(|n| self.graph[n].run_id())
                .collect(),
        )
    }

    /// Check whether run `a` is upstream (directly or transitively) of run `b`
    pub fn precedes(&self, a: u64, b: u64) -> bool {
        let (Some(node_a), Some(node_b)) = (self.run_to_index.get(&a), self.run_to_index.get(&b))
        else {
            return false;
        };
        node_a != node_b && has_path_connecting(&self.graph, *node_a, *node_b, None)
    }

    fn node_label(&self, node: NodeIndex) -> String {
        let step = &self.graph[node];
        format!("{} {}", step.name, step.last_status.glyph())
    }

    fn group_title(info: &GroupInfo) -> String {
        let id = info.stage_id.unwrap_or_default();
        if info.parallel {
            format!("stage {} (parallel)", id)
        } else {
            format!("stage {}", id)
        }
    }

    /// Generate text representation of execution order
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let mut position = 1;

        for (gi, info) in self.groups.iter().enumerate() {
            if info.staged {
                out.push_str(&format!("[{}]\n", Self::group_title(info)));
            }
            let indent = if info.staged { "  " } else { "" };

            for node in &info.nodes {
                let step = &self.graph[*node];
                out.push_str(&format!(
                    "{}{}. {} ({})",
                    indent,
                    position,
                    step.name,
                    step.last_status.label()
                ));

                let gate = self
                    .graph
                    .edges_directed(*node, Direction::Incoming)
                    .next()
                    .map(|e| e.weight().enabled);
                match gate {
                    Some(true) => out.push_str(" [ready]"),
                    Some(false) if step.last_status.is_not_started() => out.push_str(" [blocked]"),
                    _ => {}
                }

                out.push('\n');
                position += 1;
            }

            if gi + 1 < self.groups.len() && info.staged {
                out.push('\n');
            }
        }

        out
    }

    /// Generate DOT diagram of the run graph
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph run {\n");
        out.push_str("    rankdir=LR;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for (gi, info) in self.groups.iter().enumerate() {
            if info.staged {
                out.push_str(&format!("    subgraph cluster_{} {{\n", gi));
                out.push_str(&format!("        label=\"{}\";\n", Self::group_title(info)));
                out.push_str("        style=dashed;\n");
                for node in &info.nodes {
                    out.push_str(&format!(
                        "        n{} [label=\"{}\"];\n",
                        node.index(),
                        escape_dot(&self.node_label(*node))
                    ));
                }
                out.push_str("    }\n");
            } else {
                for node in &info.nodes {
                    out.push_str(&format!(
                        "    n{} [label=\"{}\"];\n",
                        node.index(),
                        escape_dot(&self.node_label(*node))
                    ));
                }
            }
        }

        out.push('\n');
        for edge in self.graph.edge_references() {
            let style = if edge.weight().enabled { "" } else { " [style=dashed]" };
            out.push_str(&format!(
                "    n{} -> n{}{};\n",
                edge.source().index(),
                edge.target().index(),
                style
            ));
        }

        out.push_str("}\n");
        out
    }

    /// Generate Mermaid diagram of the run graph
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph LR\n");

        for (gi, info) in self.groups.iter().enumerate() {
            if info.staged {
                out.push_str(&format!(
                    "    subgraph g{}[\"{}\"]\n",
                    gi,
                    Self::group_title(info)
                ));
            }
            for node in &info.nodes {
                let indent = if info.staged { "        " } else { "    " };
                out.push_str(&format!(
                    "{}n{}[\"{}\"]\n",
                    indent,
                    node.index(),
                    self.node_label(*node).replace('"', "'")
                ));
            }
            if info.staged {
                out.push_str("    end\n");
            }
        }

        for edge in self.graph.edge_references() {
            let arrow = if edge.weight().enabled { "-->" } else { "-.->" };
            out.push_str(&format!(
                "    n{} {} n{}\n",
                edge.source().index(),
                arrow,
                edge.target().index()
            ));
        }

        out
    }
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group;
    use crate::status::RunStatus;

    fn run(id: u64, stage: i64, parallel: bool, status: &str) -> StepRun {
        StepRun::new(id, format!("step{id}"), RunStatus::parse(status)).in_stage(stage, parallel)
    }

    fn scenario() -> Vec<StepRun> {
        vec![
            run(1, 0, false, "success"),
            run(2, 5, true, "pending"),
            run(3, 5, true, "pending"),
            run(4, 0, false, ""),
        ]
    }

    #[test]
    fn test_parallel_fan_out_and_in() {
        let graph = RunGraph::build(&group(&scenario()));

        assert_eq!(graph.node_count(), 4);
        // 1 -> 2, 1 -> 3, 2 -> 4, 3 -> 4
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.predecessors(4).map(|mut p| { p.sort(); p }), Some(vec![2, 3]));
        assert!(graph.precedes(1, 4));
        assert!(!graph.precedes(2, 3));
        assert!(!graph.precedes(4, 1));
    }

    #[test]
    fn test_serial_stage_chain() {
        let steps = vec![run(1, 2, false, "success"), run(2, 2, false, ""), run(3, 2, false, "")];
        let graph = RunGraph::build(&group(&steps));

        assert_eq!(graph.edge_count(), 2);
        let order: Vec<u64> = graph.execution_order().iter().map(|s| s.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_text_output_marks_gates() {
        let text = RunGraph::build(&group(&scenario())).to_text();

        assert!(text.contains("1. step1 (success)"));
        assert!(text.contains("[stage 5 (parallel)]"));
        assert!(text.contains("  2. step2 (pending) [ready]"));
        assert!(text.contains("4. step4 (pending) [blocked]"));
    }

    #[test]
    fn test_ready_markers_match_gates() {
        let steps = vec![
            run(1, 0, false, "success"),
            run(2, 5, true, "running"),
            run(3, 5, true, "pending"),
        ];
        let groups = group(&steps);
        let text = RunGraph::build(&groups).to_text();

        assert!(text.contains("  2. step2 (running)\n"));
        assert!(text.contains("  3. step3 (pending) [ready]"));

        let ready: Vec<u64> = crate::grouping::advanceable(&groups)
            .iter()
            .map(|g| g.target_run)
            .collect();
        assert_eq!(ready, vec![3]);
    }

    #[test]
    fn test_dot_and_mermaid_output() {
        let graph = RunGraph::build(&group(&scenario()));

        let dot = graph.to_dot();
        assert!(dot.contains("subgraph cluster_1"));
        assert!(dot.contains("n0 -> n1;"));
        assert!(dot.contains("n1 -> n3 [style=dashed];"));

        let mermaid = graph.to_mermaid();
        assert!(mermaid.starts_with("graph LR"));
        assert!(mermaid.contains("n0 --> n1"));
        assert!(mermaid.contains("n2 -.-> n3"));
    }
}
