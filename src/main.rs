// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! pipetopo - pipeline topology and run-state tool

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipetopo::cli::tree::MoveOptions;
use pipetopo::cli::{AppContext, Cli, Commands};
use pipetopo::utils::init_colors;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "pipetopo=debug"
    } else {
        "pipetopo=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    if let Commands::Init { force } = cli.command {
        return pipetopo::cli::init::run(force, cli.verbose).await;
    }

    let ctx = AppContext::load(cli.config.as_deref(), cli.verbose)?;
    init_colors(ctx.config.use_color());

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Group { snapshot, format } => {
            pipetopo::cli::status::run_group(&ctx, snapshot, format).await
        }
        Commands::Status { snapshot, format } => {
            pipetopo::cli::status::run_status(&ctx, snapshot, format).await
        }
        Commands::Gates {
            snapshot,
            ready,
            format,
        } => pipetopo::cli::status::run_gates(&ctx, snapshot, ready, format).await,
        Commands::Graph { snapshot, format } => {
            pipetopo::cli::graph::run(&ctx, snapshot, format).await
        }
        Commands::Summary { snapshot, format } => {
            pipetopo::cli::status::run_summary(&ctx, snapshot, format).await
        }
        Commands::Advance {
            snapshot,
            run,
            dry_run,
        } => pipetopo::cli::advance::run_advance(&ctx, snapshot, run, dry_run).await,
        Commands::Cancel { run_id, dry_run } => {
            pipetopo::cli::advance::run_cancel(&ctx, run_id, dry_run).await
        }
        Commands::Watch {
            snapshot,
            interval,
            count,
        } => pipetopo::cli::watch::run(&ctx, snapshot, interval, count).await,
        Commands::Tree { file, format } => pipetopo::cli::tree::run_tree(file, format).await,
        Commands::Select { file, key, format } => {
            pipetopo::cli::tree::run_select(file, key, format).await
        }
        Commands::Move {
            file,
            source,
            position,
            target,
            write,
            persist,
            dry_run,
        } => {
            let options = MoveOptions {
                write,
                persist,
                dry_run,
            };
            pipetopo::cli::tree::run_move(&ctx, file, source, position, target, options).await
        }
        Commands::Flatten {
            file,
            request,
            persist,
            dry_run,
        } => pipetopo::cli::tree::run_flatten(&ctx, file, request, persist, dry_run).await,
    }
}
