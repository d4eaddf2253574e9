// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Terminal color utilities
//!
//! Consistent styling for status badges and command output.

use colored::{ColoredString, Colorize};

use crate::status::RunStatus;

/// Turn colours on or off for the whole process
pub fn init_colors(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

/// Colour a status by its category
pub fn paint_status(status: &RunStatus, text: &str) -> ColoredString {
    match status {
        RunStatus::Success => text.green(),
        RunStatus::Failed => text.red(),
        RunStatus::Canceled => text.magenta(),
        RunStatus::Running | RunStatus::PartialRunning => text.blue(),
        RunStatus::Queueing | RunStatus::PartialSuccess => text.cyan(),
        RunStatus::Pending | RunStatus::Assigning | RunStatus::Unset => text.dimmed(),
        RunStatus::Unknown(_) => text.yellow(),
    }
}

/// Glyph badge of a status, coloured
pub fn status_badge(status: &RunStatus) -> ColoredString {
    paint_status(status, status.glyph())
}

/// Label of a status, coloured
pub fn status_label(status: &RunStatus) -> ColoredString {
    paint_status(status, status.label())
}

/// Style for dimmed/secondary text
pub fn dimmed(msg: &str) -> ColoredString {
    msg.dimmed()
}

/// Style for code/commands
pub fn code(msg: &str) -> ColoredString {
    msg.cyan()
}

/// Print a styled header
pub fn print_header(title: &str) {
    println!("{}", title.bold());
    println!("{}", "═".repeat(title.chars().count().max(40)));
}

/// Print a success check
pub fn print_success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning
pub fn print_warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges_keep_glyph_text() {
        colored::control::set_override(false);
        assert_eq!(status_badge(&RunStatus::Success).to_string(), "✓");
        assert_eq!(status_label(&RunStatus::Unset).to_string(), "pending");
        colored::control::unset_override();
    }
}
