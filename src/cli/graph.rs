// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Graph command - visualize a run snapshot as a graph

use miette::Result;
use std::path::PathBuf;

use super::{AppContext, GraphFormat};
use crate::grouping::{group, RunGraph};

/// Run the graph command
pub async fn run(ctx: &AppContext, snapshot: Option<PathBuf>, format: GraphFormat) -> Result<()> {
    let runs = ctx.load_runs(snapshot.as_deref(), true).await?;
    let graph = RunGraph::build(&group(&runs));

    if ctx.verbose {
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built run graph"
        );
    }

    let output = match format {
        GraphFormat::Text => graph.to_text(),
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Mermaid => graph.to_mermaid(),
    };

    println!("{}", output);

    Ok(())
}
