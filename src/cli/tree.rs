// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Tree commands - show, select, move and flatten a pipeline tree

use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};

use super::{print_json, AppContext, OutputFormat};
use crate::topology::{load_tree, save_tree, MoveOutcome, MovePosition, NodeKey, TopologyEditor};
use crate::utils::{code, create_spinner, print_success, print_warning};

fn open(file: &Path) -> Result<TopologyEditor> {
    let shape = load_tree(file)?;
    Ok(TopologyEditor::load(&shape))
}

/// Run the tree command
pub async fn run_tree(file: PathBuf, format: OutputFormat) -> Result<()> {
    let editor = open(&file)?;

    match format {
        OutputFormat::Json => print_json(&editor.to_shape()),
        OutputFormat::Text => {
            print!("{}", editor.render());
            Ok(())
        }
    }
}

/// Run the select command
pub async fn run_select(file: PathBuf, key: NodeKey, format: OutputFormat) -> Result<()> {
    let editor = open(&file)?;
    let target = editor.select(&key).ok_or_else(|| {
        miette::miette!(
            help = "Run 'pipetopo tree' to list the node keys",
            "No node '{}' in {}",
            key,
            file.display()
        )
    })?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "key": key,
            "target": target,
            "route": target.route(),
        })),
        OutputFormat::Text => {
            println!("{}", target.route());
            Ok(())
        }
    }
}

/// Options of the move command
#[derive(Debug, Clone, Copy)]
pub struct MoveOptions {
    pub write: bool,
    pub persist: bool,
    pub dry_run: bool,
}

/// Run the move command
pub async fn run_move(
    ctx: &AppContext,
    file: PathBuf,
    source: NodeKey,
    position: MovePosition,
    target: NodeKey,
    options: MoveOptions,
) -> Result<()> {
    let mut editor = open(&file)?;

    if let MoveOutcome::Rejected(reason) = editor.move_node(&source, &target, position) {
        print_warning(&format!(
            "Not moved: {} {} {} ({})",
            source, position, target, reason
        ));
        return Ok(());
    }

    print_success(&format!("Moved {} {} {}", source, position, target));
    if ctx.verbose {
        print!("{}", editor.render());
    }

    if options.write {
        save_tree(&file, &editor.to_shape())?;
        print_success(&format!("Wrote {}", file.display()));
    }

    if options.persist {
        persist(ctx, &editor, options.dry_run).await?;
    } else if !options.write {
        println!(
            "  {}",
            format!("Nothing saved; pass {} or {}", code("--write"), code("--persist")).dimmed()
        );
    }

    Ok(())
}

/// Run the flatten command
pub async fn run_flatten(
    ctx: &AppContext,
    file: PathBuf,
    request: bool,
    persist_order: bool,
    dry_run: bool,
) -> Result<()> {
    let editor = open(&file)?;

    if persist_order {
        return persist(ctx, &editor, dry_run).await;
    }

    if request {
        print_json(&editor.sort_request())
    } else {
        print_json(&editor.flatten())
    }
}

async fn persist(ctx: &AppContext, editor: &TopologyEditor, dry_run: bool) -> Result<()> {
    let order = editor.sort_request();
    let backend = ctx.ready_backend(dry_run).await?;

    let spinner = create_spinner("Saving order...");
    let result = backend.persist_order(editor.pipeline_id(), &order).await;
    spinner.finish_and_clear();
    result?;

    let prefix = if dry_run { "Would persist" } else { "Persisted" };
    print_success(&format!(
        "{} order of {} stages and {} steps",
        prefix,
        order.stages.len(),
        order.steps.len()
    ));

    Ok(())
}
