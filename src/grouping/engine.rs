// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Execution group reconstruction
//!
//! Rebuilds the serial/parallel topology of a job from its flat, ordered run
//! records. Only *contiguous* runs of the same stage merge; an ungrouped step
//! always stands alone and breaks any stage run it interrupts.

use serde::Serialize;

use super::run::StepRun;

/// A maximal run of consecutive same-stage records, or one ungrouped record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionGroup {
    /// Stage of the group (for singletons, whatever the record carried)
    pub stage_id: Option<i64>,

    /// Members start together once the group is unlocked
    pub parallel: bool,

    /// Members in input order
    pub steps: Vec<StepRun>,
}

impl ExecutionGroup {
    fn singleton(step: StepRun) -> Self {
        Self {
            stage_id: step.stage_id,
            parallel: false,
            steps: vec![step],
        }
    }

    fn staged(stage_id: i64, step: StepRun) -> Self {
        Self {
            stage_id: Some(stage_id),
            parallel: step.parallel,
            steps: vec![step],
        }
    }

    /// True for groups built from a stage (`stage_id > 0`)
    pub fn is_staged(&self) -> bool {
        self.stage_id.is_some_and(|id| id > 0)
    }

    /// First member in sequence
    pub fn first(&self) -> Option<&StepRun> {
        self.steps.first()
    }

    /// Terminal member in sequence
    pub fn last(&self) -> Option<&StepRun> {
        self.steps.last()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Partition an ordered run snapshot into execution groups
pub fn group(steps: &[StepRun]) -> Vec<ExecutionGroup> {
    let mut groups: Vec<ExecutionGroup> = Vec::new();
    // Index of the staged group later records may merge into
    let mut current: Option<usize> = None;

    for step in steps {
        let Some(stage_id) = step.grouping_stage() else {
            groups.push(ExecutionGroup::singleton(step.clone()));
            current = None;
            continue;
        };

        match current {
            Some(idx) if groups[idx].stage_id == Some(stage_id) => {
                groups[idx].steps.push(step.clone());
            }
            _ => {
                groups.push(ExecutionGroup::staged(stage_id, step.clone()));
                current = Some(groups.len() - 1);
            }
        }
    }

    tracing::debug!(
        steps = steps.len(),
        groups = groups.len(),
        "regrouped run snapshot"
    );

    groups
}

/// Iterate over every member of every group, in order
pub fn members(groups: &[ExecutionGroup]) -> impl Iterator<Item = &StepRun> {
    groups.iter().flat_map(|g| g.steps.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::RunStatus;

    fn run(id: u64, stage: i64, parallel: bool, status: &str) -> StepRun {
        StepRun::new(id, format!("step-{id}"), RunStatus::parse(status)).in_stage(stage, parallel)
    }

    fn ids(groups: &[ExecutionGroup]) -> Vec<Vec<u64>> {
        groups
            .iter()
            .map(|g| g.steps.iter().map(|s| s.id).collect())
            .collect()
    }

    #[test]
    fn test_mixed_pipeline_groups() {
        let steps = vec![
            run(1, 0, false, "success"),
            run(2, 5, true, "pending"),
            run(3, 5, true, "pending"),
            run(4, 0, false, ""),
        ];

        let groups = group(&steps);

        assert_eq!(ids(&groups), vec![vec![1], vec![2, 3], vec![4]]);
        assert!(!groups[0].is_staged());
        assert!(groups[1].is_staged());
        assert!(groups[1].parallel);
        assert!(!groups[2].parallel);
    }

    #[test]
    fn test_ungrouped_steps_never_merge() {
        let steps = vec![run(1, 0, false, ""), run(2, 0, false, ""), run(3, -4, true, "")];
        let groups = group(&steps);

        assert_eq!(ids(&groups), vec![vec![1], vec![2], vec![3]]);
        assert!(groups.iter().all(|g| !g.parallel));
    }

    #[test]
    fn test_non_contiguous_stage_splits() {
        let steps = vec![
            run(1, 5, false, ""),
            run(2, 0, false, ""),
            run(3, 5, false, ""),
            run(4, 6, false, ""),
            run(5, 5, false, ""),
        ];

        let groups = group(&steps);

        assert_eq!(ids(&groups), vec![vec![1], vec![2], vec![3], vec![4], vec![5]]);
    }

    #[test]
    fn test_missing_stage_id_is_ungrouped() {
        let mut a = run(1, 3, false, "");
        a.stage_id = None;
        let b = run(2, 3, false, "");
        let c = run(3, 3, true, "");

        let groups = group(&[a, b, c]);

        assert_eq!(ids(&groups), vec![vec![1], vec![2, 3]]);
        // parallel comes from the record that opened the group
        assert!(!groups[1].parallel);
    }

    #[test]
    fn test_partition_reproduces_input() {
        let patterns: Vec<(&str, Box<dyn Fn(u64) -> i64>)> = vec![
            ("mixed", Box::new(|i| [0, 2, 2, 0, 3, 3, 3, 2, 0, 0, 4, 4][(i % 12) as usize])),
            ("all ungrouped", Box::new(|_| 0)),
            ("single stage", Box::new(|_| 7)),
            ("alternating", Box::new(|i| if i % 2 == 0 { 1 } else { 2 })),
            ("negative ids", Box::new(|i| -((i % 3) as i64))),
            ("runs of three", Box::new(|i| (i / 3 % 4) as i64)),
        ];

        for (name, stage_of) in &patterns {
            for len in [0u64, 1, 2, 5, 12, 31] {
                let steps: Vec<StepRun> = (0..len)
                    .map(|i| run(i + 1, stage_of(i), i % 3 == 0, ""))
                    .collect();

                let groups = group(&steps);
                let rebuilt: Vec<StepRun> = members(&groups).cloned().collect();
                assert_eq!(rebuilt, steps, "pattern={name} len={len}");

                // only contiguous steps of one positive stage share a group
                for g in &groups {
                    assert!(!g.steps.is_empty(), "pattern={name} len={len}");
                    if g.steps.len() > 1 {
                        let stage = g.steps[0].stage_id;
                        assert!(stage.unwrap_or(0) > 0, "pattern={name} len={len}");
                        assert!(g.steps.iter().all(|s| s.stage_id == stage));
                    }
                }
                for pair in groups.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    let same_stage = a.is_staged() && a.stage_id == b.stage_id;
                    assert!(!same_stage, "pattern={name} len={len}");
                }
            }
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(group(&[]).is_empty());
    }
}
