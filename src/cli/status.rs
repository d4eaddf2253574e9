// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Status commands - groups, status bar, gates and summary of a run snapshot

use colored::Colorize;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use super::{print_json, AppContext, OutputFormat};
use crate::grouping::{
    advanceable, gates, group, summarize, ExecutionGroup, Gate, GatePosition, RunSummary, StepRun,
};
use crate::utils::{dimmed, print_header, status_badge, status_label};

/// Run the group command
pub async fn run_group(ctx: &AppContext, snapshot: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let runs = ctx
        .load_runs(snapshot.as_deref(), format == OutputFormat::Json)
        .await?;
    let groups = group(&runs);

    if format == OutputFormat::Json {
        return print_json(&groups);
    }

    print_header(&format!("{} groups from {} runs", groups.len(), runs.len()));
    for (gi, g) in groups.iter().enumerate() {
        let members: Vec<String> = g.steps.iter().map(|s| s.name.clone()).collect();
        println!("  {}. {} {}", gi + 1, group_title(g), members.join(", "));
    }

    Ok(())
}

/// Machine-readable status bar
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    summary: RunSummary,
    groups: &'a [ExecutionGroup],
    gates: Vec<Gate>,
}

/// Run the status command
pub async fn run_status(ctx: &AppContext, snapshot: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let runs = ctx
        .load_runs(snapshot.as_deref(), format == OutputFormat::Json)
        .await?;
    let groups = group(&runs);

    if format == OutputFormat::Json {
        return print_json(&StatusReport {
            summary: summarize(&runs),
            gates: gates(&groups),
            groups: &groups,
        });
    }

    print_status_bar(&runs);
    Ok(())
}

/// Print the overall status followed by the status bar
pub fn print_status_bar(runs: &[StepRun]) {
    let summary = summarize(runs);
    println!(
        "{} {} ({}/{} succeeded)",
        "Pipeline".bold(),
        status_label(&summary.status),
        summary.succeeded,
        summary.total
    );
    for line in render_status_bar(&group(runs)) {
        println!("{}", line);
    }
}

/// Render the status bar: groups in order with their advance controls
pub fn render_status_bar(groups: &[ExecutionGroup]) -> Vec<String> {
    let all_gates = gates(groups);
    let gate_at = |position: GatePosition| all_gates.iter().find(|g| g.position == position);
    let mut lines = Vec::new();

    for (gi, g) in groups.iter().enumerate() {
        if let Some(gate) = gate_at(GatePosition::Boundary { group: gi }) {
            lines.push(format!("  {}", gate_marker(gate)));
        }

        if !g.is_staged() {
            if let Some(step) = g.first() {
                lines.push(format!("  {} {}", status_badge(&step.last_status), step.name));
            }
            continue;
        }

        lines.push(format!("  {}", group_title(g).bold()));
        for (mi, step) in g.steps.iter().enumerate() {
            if let Some(gate) = gate_at(GatePosition::Within { group: gi, member: mi }) {
                lines.push(format!("  │ {}", gate_marker(gate)));
            }
            lines.push(format!("  │ {} {}", status_badge(&step.last_status), step.name));
        }
    }

    lines
}

fn group_title(g: &ExecutionGroup) -> String {
    match (g.is_staged(), g.parallel) {
        (true, true) => format!("[stage {} parallel]", g.stage_id.unwrap_or_default()),
        (true, false) => format!("[stage {}]", g.stage_id.unwrap_or_default()),
        (false, _) => "[step]".to_string(),
    }
}

fn gate_marker(gate: &Gate) -> String {
    if gate.enabled {
        format!(
            "{} advance to {} (run {})",
            "⇣".green(),
            gate.target_name,
            gate.target_run
        )
    } else {
        format!("{} {}", "⇣".dimmed(), dimmed(&format!("waiting before {}", gate.target_name)))
    }
}

/// Run the gates command
pub async fn run_gates(
    ctx: &AppContext,
    snapshot: Option<PathBuf>,
    ready: bool,
    format: OutputFormat,
) -> Result<()> {
    let runs = ctx
        .load_runs(snapshot.as_deref(), format == OutputFormat::Json)
        .await?;
    let groups = group(&runs);
    let listed = if ready {
        advanceable(&groups)
    } else {
        gates(&groups)
    };

    if format == OutputFormat::Json {
        return print_json(&listed);
    }

    if listed.is_empty() {
        println!("{}", "No advance controls".dimmed());
        return Ok(());
    }

    for gate in &listed {
        let state = if gate.enabled {
            "ready".green()
        } else {
            "blocked".yellow()
        };
        let place = match gate.position {
            GatePosition::Boundary { group } => format!("before group {}", group + 1),
            GatePosition::Within { group, member } => {
                format!("group {} member {}", group + 1, member + 1)
            }
        };
        println!(
            "  {:<7} run {} -> run {} {} ({})",
            state, gate.from_run, gate.target_run, gate.target_name, place
        );
    }

    Ok(())
}

/// Run the summary command
pub async fn run_summary(ctx: &AppContext, snapshot: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let runs = ctx
        .load_runs(snapshot.as_deref(), format == OutputFormat::Json)
        .await?;
    let summary = summarize(&runs);

    if format == OutputFormat::Json {
        return print_json(&summary);
    }

    println!("{} {}", "Status:".bold(), status_label(&summary.status));
    println!("  total        {}", summary.total);
    println!("  succeeded    {}", summary.succeeded);
    println!("  failed       {}", summary.failed);
    println!("  canceled     {}", summary.canceled);
    println!("  active       {}", summary.active);
    println!("  not started  {}", summary.not_started);
    if summary.unknown > 0 {
        println!("  unknown      {}", summary.unknown);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::RunStatus;

    #[test]
    fn test_status_bar_places_gates() {
        let runs = vec![
            StepRun::new(1, "checkout", RunStatus::Success),
            StepRun::new(2, "compile", RunStatus::Pending).in_stage(5, false),
            StepRun::new(3, "test", RunStatus::Pending).in_stage(5, false),
        ];
        let lines = render_status_bar(&group(&runs));

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("checkout"));
        assert!(lines[1].contains("advance to compile (run 2)"));
        assert!(lines[2].contains("[stage 5]"));
        assert!(lines[3].contains("compile"));
        assert!(lines[4].contains("waiting before test"));
        assert!(lines[5].contains("test"));
    }
}
