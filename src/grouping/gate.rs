// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Advance gating
//!
//! A successor may be started by hand only when it has not started yet and
//! its predecessor reached `success` or `failed`. Between groups the
//! predecessor is the previous group's terminal member; inside a serial group
//! it is the previous member. Every member of a parallel group is unlocked by
//! the previous group's terminal member, so each gets its own gate. A parallel
//! group that opens the job has no predecessor and no gates.

use serde::Serialize;

use super::engine::ExecutionGroup;
use super::run::StepRun;

/// Whether `next` may be started now that `prev` has reported its status
pub fn can_advance_step(prev: &StepRun, next: &StepRun) -> bool {
    next.last_status.is_not_started() && prev.last_status.is_finished()
}

/// Whether the first member of `next` may be started after `current`
pub fn can_advance(current: &ExecutionGroup, next: &ExecutionGroup) -> bool {
    match (current.last(), next.first()) {
        (Some(prev), Some(succ)) => can_advance_step(prev, succ),
        _ => false,
    }
}

/// Where an advance control sits in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "at", rename_all = "snake_case")]
pub enum GatePosition {
    /// In front of group `group`, after the previous group
    Boundary { group: usize },
    /// Inside group `group`, in front of member `member`
    Within { group: usize, member: usize },
}

/// An advance control for a successor that has not started
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gate {
    pub position: GatePosition,

    /// Run instance of the predecessor
    pub from_run: u64,

    /// Run instance to start when the gate is used
    pub target_run: u64,

    /// Name of the step that would start
    pub target_name: String,

    /// Predecessor has finished, so the gate may be used
    pub enabled: bool,
}

impl Gate {
    fn new(position: GatePosition, prev: &StepRun, next: &StepRun) -> Self {
        Self {
            position,
            from_run: prev.run_id(),
            target_run: next.run_id(),
            target_name: next.name.clone(),
            enabled: can_advance_step(prev, next),
        }
    }
}

/// Enumerate advance controls in render order.
///
/// A gate only exists while its successor has not started; once a step is
/// queued or running there is nothing left to advance.
pub fn gates(groups: &[ExecutionGroup]) -> Vec<Gate> {
    let mut out = Vec::new();

    for (gi, group) in groups.iter().enumerate() {
        if gi > 0 {
            if let (Some(prev), Some(next)) = (groups[gi - 1].last(), group.first()) {
                if next.last_status.is_not_started() {
                    out.push(Gate::new(GatePosition::Boundary { group: gi }, prev, next));
                }
            }
        }

        if group.parallel {
            if let Some(prev) = gi.checked_sub(1).and_then(|p| groups[p].last()) {
                for (member, next) in group.steps.iter().enumerate().skip(1) {
                    if next.last_status.is_not_started() {
                        let position = GatePosition::Within { group: gi, member };
                        out.push(Gate::new(position, prev, next));
                    }
                }
            }
            continue;
        }

        for (k, pair) in group.steps.windows(2).enumerate() {
            if pair[1].last_status.is_not_started() {
                let position = GatePosition::Within {
                    group: gi,
                    member: k + 1,
                };
                out.push(Gate::new(position, &pair[0], &pair[1]));
            }
        }
    }

    out
}

/// Gates that can be used right now
pub fn advanceable(groups: &[ExecutionGroup]) -> Vec<Gate> {
    gates(groups).into_iter().filter(|g| g.enabled).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group;
    use crate::status::RunStatus;

    fn run(id: u64, stage: i64, parallel: bool, status: &str) -> StepRun {
        StepRun::new(id, format!("step-{id}"), RunStatus::parse(status)).in_stage(stage, parallel)
    }

    const ALL: [&str; 11] = [
        "pending",
        "assigning",
        "",
        "queueing",
        "running",
        "success",
        "failed",
        "partial_running",
        "partial_success",
        "canceled",
        "bogus",
    ];

    #[test]
    fn test_gating_truth_table() {
        for prev in ALL {
            for next in ALL {
                let a = run(1, 0, false, prev);
                let b = run(2, 0, false, next);
                let expected = matches!(prev, "success" | "failed")
                    && matches!(next, "pending" | "assigning" | "");
                assert_eq!(
                    can_advance_step(&a, &b),
                    expected,
                    "prev={prev:?} next={next:?}"
                );
            }
        }
    }

    #[test]
    fn test_group_boundary_uses_terminal_member() {
        let steps = vec![
            run(1, 0, false, "success"),
            run(2, 5, true, "success"),
            run(3, 5, true, "running"),
            run(4, 0, false, ""),
        ];
        let groups = group(&steps);

        assert!(!can_advance(&groups[0], &groups[1])); // 2 already ran
        assert!(!can_advance(&groups[1], &groups[2]));

        let mut finished = steps.clone();
        finished[2].last_status = RunStatus::Failed;
        let groups = group(&finished);
        assert!(can_advance(&groups[1], &groups[2]));
    }

    #[test]
    fn test_scenario_gates() {
        let steps = vec![
            run(1, 0, false, "success"),
            run(2, 5, true, "pending"),
            run(3, 5, true, "pending"),
            run(4, 0, false, ""),
        ];
        let groups = group(&steps);

        assert!(can_advance(&groups[0], &groups[1]));
        assert!(!can_advance(&groups[1], &groups[2]));

        let listed = gates(&groups);
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].position, GatePosition::Boundary { group: 1 });
        assert_eq!(listed[0].target_run, 2);
        assert!(listed[0].enabled);
        assert_eq!(listed[1].position, GatePosition::Within { group: 1, member: 1 });
        assert_eq!(listed[1].from_run, 1);
        assert_eq!(listed[1].target_run, 3);
        assert!(listed[1].enabled);
        assert_eq!(listed[2].position, GatePosition::Boundary { group: 2 });
        assert_eq!(listed[2].from_run, 3);
        assert!(!listed[2].enabled);

        let ready: Vec<u64> = advanceable(&groups).iter().map(|g| g.target_run).collect();
        assert_eq!(ready, vec![2, 3]);
    }

    #[test]
    fn test_parallel_members_advance_independently() {
        let steps = vec![
            run(1, 0, false, "success"),
            run(2, 5, true, "running"),
            run(3, 5, true, "pending"),
            run(4, 5, true, ""),
        ];
        let groups = group(&steps);

        // 2 already started, 3 and 4 remain startable on their own
        let ready: Vec<u64> = advanceable(&groups).iter().map(|g| g.target_run).collect();
        assert_eq!(ready, vec![3, 4]);
        assert!(gates(&groups).iter().all(|g| g.from_run == 1));

        let mut blocked = steps.clone();
        blocked[0].last_status = RunStatus::Running;
        let groups = group(&blocked);
        assert!(advanceable(&groups).is_empty());
        assert_eq!(gates(&groups).len(), 2);
    }

    #[test]
    fn test_leading_parallel_group_has_no_gates() {
        let steps = vec![run(1, 5, true, "pending"), run(2, 5, true, "pending")];
        assert!(gates(&group(&steps)).is_empty());
    }

    #[test]
    fn test_serial_group_internal_gates() {
        let steps = vec![
            run(1, 7, false, "success"),
            run(2, 7, false, "failed"),
            run(3, 7, false, "pending"),
            run(4, 7, false, "pending"),
        ];
        let groups = group(&steps);
        assert_eq!(groups.len(), 1);

        let listed = gates(&groups);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].position, GatePosition::Within { group: 0, member: 2 });
        assert!(listed[0].enabled);
        assert_eq!(listed[1].position, GatePosition::Within { group: 0, member: 3 });
        assert!(!listed[1].enabled);
    }

    #[test]
    fn test_started_successor_hides_gate() {
        let steps = vec![run(1, 0, false, "success"), run(2, 0, false, "running")];
        assert!(gates(&group(&steps)).is_empty());
    }

    #[test]
    fn test_gate_targets_last_runner_id() {
        let mut a = run(1, 0, false, "success");
        a.last_runner_id = 101;
        let mut b = run(2, 0, false, "pending");
        b.last_runner_id = 102;

        let listed = gates(&group(&[a, b]));
        assert_eq!(listed[0].from_run, 101);
        assert_eq!(listed[0].target_run, 102);
    }
}
