// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Init command - write a default configuration file

use colored::Colorize;
use miette::Result;
use std::path::Path;

use crate::config::generate_default_config;

/// Name of the file written by `init`
pub const CONFIG_FILE: &str = ".pipetopo.yaml";

/// Run the init command
pub async fn run(force: bool, verbose: bool) -> Result<()> {
    println!("{}", "Initializing pipetopo configuration...".bold());
    println!();

    if Path::new(CONFIG_FILE).exists() && !force {
        return Err(miette::miette!(
            help = "Pass --force to overwrite it",
            "{} already exists",
            CONFIG_FILE
        ));
    }

    let content = generate_default_config();
    std::fs::write(CONFIG_FILE, &content)
        .map_err(|e| miette::miette!("Failed to write {}: {}", CONFIG_FILE, e))?;

    println!("  {} Created {}", "✓".green(), CONFIG_FILE);
    println!();
    println!("Next steps:");
    println!("  1. Set the backend commands in {}", CONFIG_FILE.cyan());
    println!("  2. Run {} on an exported run snapshot", "pipetopo status runs.json".cyan());
    println!();

    if verbose {
        println!("{}", "Generated configuration:".dimmed());
        println!("{}", "─".repeat(50).dimmed());
        println!("{}", content.dimmed());
    }

    Ok(())
}
