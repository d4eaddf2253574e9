// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Watch command - poll run snapshots and re-render the status bar

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use std::time::Duration;

use super::status::print_status_bar;
use super::AppContext;
use crate::grouping::StepRun;

/// Run the watch command
pub async fn run(
    ctx: &AppContext,
    snapshot: Option<PathBuf>,
    interval_secs: Option<u64>,
    count: Option<u64>,
) -> Result<()> {
    let secs = interval_secs.unwrap_or(ctx.config.poll_interval_secs).max(1);

    println!("{}", "Starting watch mode...".bold());
    println!("Polling every {}s", secs);
    println!("Press {} to exit.", "Ctrl+C".cyan());
    println!();

    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    let mut last: Option<Vec<StepRun>> = None;
    let mut polls = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("{}", "Stopped watching".dimmed());
                break;
            }
        }

        match ctx.load_runs(snapshot.as_deref(), true).await {
            Ok(runs) if last.as_ref() == Some(&runs) => {
                tracing::debug!(polls, "snapshot unchanged");
            }
            Ok(runs) => {
                render(&runs, last.is_some());
                last = Some(runs);
            }
            // A failed poll keeps the previous rendering; the next tick retries.
            Err(e) => eprintln!("{}: {}", "Poll failed".red(), e),
        }

        polls += 1;
        if count.is_some_and(|max| polls >= max) {
            break;
        }
    }

    Ok(())
}

fn render(runs: &[StepRun], changed: bool) {
    if changed {
        println!("{}", "─".repeat(50).dimmed());
        println!("{}", "Change detected".yellow());
    }
    print_status_bar(runs);
}
