// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Advance and cancel commands - relay run requests to the backend

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use super::AppContext;
use crate::grouping::{gates, group, Gate};
use crate::utils::{create_spinner, print_success, print_warning};

/// Pick the gate to use: the requested run, or the first ready one
pub fn choose_gate(all: &[Gate], run: Option<u64>) -> Result<Option<&Gate>> {
    let Some(run_id) = run else {
        return Ok(all.iter().find(|g| g.enabled));
    };

    match all.iter().find(|g| g.target_run == run_id) {
        Some(gate) if gate.enabled => Ok(Some(gate)),
        Some(gate) => Err(miette::miette!(
            help = "Wait for the previous step to finish, then poll again",
            "Run {} ({}) cannot be advanced yet",
            run_id,
            gate.target_name
        )),
        None => Err(miette::miette!(
            help = "Only runs that have not started can be advanced",
            "Run {} has no advance control",
            run_id
        )),
    }
}

/// Run the advance command
pub async fn run_advance(
    ctx: &AppContext,
    snapshot: Option<PathBuf>,
    run: Option<u64>,
    dry_run: bool,
) -> Result<()> {
    let runs = ctx.load_runs(snapshot.as_deref(), false).await?;
    let all = gates(&group(&runs));

    let Some(gate) = choose_gate(&all, run)? else {
        print_warning("Nothing can be advanced right now");
        return Ok(());
    };

    let backend = ctx.ready_backend(dry_run).await?;
    let spinner = create_spinner(&format!("Starting {}...", gate.target_name));
    let result = backend.start_run(gate.target_run).await;
    spinner.finish_and_clear();
    result?;

    let prefix = if dry_run { "Would start" } else { "Requested start of" };
    print_success(&format!(
        "{} {} (run {})",
        prefix,
        gate.target_name.bold(),
        gate.target_run
    ));
    if !dry_run {
        println!("  {}", "Poll again to see the new status".dimmed());
    }

    Ok(())
}

/// Run the cancel command
pub async fn run_cancel(ctx: &AppContext, run_id: u64, dry_run: bool) -> Result<()> {
    let backend = ctx.ready_backend(dry_run).await?;
    let spinner = create_spinner(&format!("Canceling run {}...", run_id));
    let result = backend.cancel_run(run_id).await;
    spinner.finish_and_clear();
    result?;

    let prefix = if dry_run { "Would cancel" } else { "Requested cancel of" };
    print_success(&format!("{} run {}", prefix, run_id));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::StepRun;
    use crate::status::RunStatus;

    fn sample_gates() -> Vec<Gate> {
        let runs = vec![
            StepRun::new(1, "checkout", RunStatus::Success),
            StepRun::new(2, "compile", RunStatus::Running).in_stage(5, false),
            StepRun::new(3, "test", RunStatus::Pending).in_stage(5, false),
            StepRun::new(4, "deploy", RunStatus::Unset),
        ];
        gates(&group(&runs))
    }

    #[test]
    fn test_choose_first_ready_gate() {
        let all = vec![
            StepRun::new(1, "a", RunStatus::Success),
            StepRun::new(2, "b", RunStatus::Pending),
        ];
        let all = gates(&group(&all));
        assert_eq!(choose_gate(&all, None).unwrap().map(|g| g.target_run), Some(2));
    }

    #[test]
    fn test_nothing_ready() {
        let all = sample_gates();
        assert!(choose_gate(&all, None).unwrap().is_none());
    }

    #[test]
    fn test_choose_later_parallel_member() {
        let runs = vec![
            StepRun::new(1, "checkout", RunStatus::Success),
            StepRun::new(2, "compile", RunStatus::Running).in_stage(5, true),
            StepRun::new(3, "lint", RunStatus::Pending).in_stage(5, true),
        ];
        let all = gates(&group(&runs));

        let chosen = choose_gate(&all, Some(3)).unwrap();
        assert_eq!(chosen.map(|g| g.target_name.as_str()), Some("lint"));
        assert_eq!(choose_gate(&all, None).unwrap().map(|g| g.target_run), Some(3));
    }

    #[test]
    fn test_requested_run_must_be_ready() {
        let all = sample_gates();
        assert!(choose_gate(&all, Some(3)).is_err());
        assert!(choose_gate(&all, Some(2)).is_err());
        assert!(choose_gate(&all, Some(99)).is_err());
    }
}
