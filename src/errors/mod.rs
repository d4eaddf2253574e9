// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Error types for the pipetopo host surfaces
//!
//! The grouping and topology engines never fail: invalid moves are no-ops and
//! malformed records are skipped. Everything that *can* fail (reading
//! snapshots, loading configuration, relaying commands to the execution
//! backend) reports through [`TopoError`].

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipetopo operations
pub type TopoResult<T> = Result<T, TopoError>;

/// Main error type for pipetopo
#[derive(Error, Debug, Diagnostic)]
pub enum TopoError {
    // ─────────────────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Snapshot file not found: {path}")]
    #[diagnostic(
        code(pipetopo::snapshot_not_found),
        help("Export the job runners of a pipeline run to JSON or YAML and pass its path")
    )]
    SnapshotNotFound { path: PathBuf },

    #[error("Invalid run snapshot: {reason}")]
    #[diagnostic(
        code(pipetopo::invalid_snapshot),
        help("Expected a list of run records or an object with a 'job_runners' list")
    )]
    InvalidSnapshot { reason: String },

    #[error("Tree file not found: {path}")]
    #[diagnostic(code(pipetopo::tree_not_found))]
    TreeNotFound { path: PathBuf },

    #[error("Invalid pipeline tree: {reason}")]
    #[diagnostic(
        code(pipetopo::invalid_tree),
        help("Expected an object with 'id', 'name' and 'stages_and_steps', or a bare list of nodes")
    )]
    InvalidTree { reason: String },

    #[error("Unknown node key '{key}'")]
    #[diagnostic(
        code(pipetopo::unknown_key),
        help("Keys look like 'new_pipeline', 'pipeline-<id>', 'stage-<id>' or 'step-<id>'")
    )]
    UnknownKey { key: String },

    #[error("Unknown move position '{position}'")]
    #[diagnostic(
        code(pipetopo::unknown_position),
        help("Use one of: inside, before, after")
    )]
    UnknownPosition { position: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Invalid configuration: {reason}")]
    #[diagnostic(code(pipetopo::invalid_config))]
    InvalidConfig {
        reason: String,
        #[help]
        help: Option<String>,
    },

    #[error("No backend command configured for '{action}'")]
    #[diagnostic(
        code(pipetopo::command_not_configured),
        help("Set backend.{action}_command in .pipetopo.yaml, or pass --dry-run")
    )]
    CommandNotConfigured { action: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Backend Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Shell '{shell}' not found")]
    #[diagnostic(
        code(pipetopo::shell_not_found),
        help("Install {shell} or set backend.shell to an available shell")
    )]
    ShellNotFound { shell: String },

    #[error("Backend command for '{action}' failed: {error}")]
    #[diagnostic(code(pipetopo::backend_failed))]
    BackendFailed {
        action: String,
        error: String,
        #[help]
        help: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(pipetopo::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(pipetopo::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(pipetopo::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(pipetopo::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(pipetopo::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(pipetopo::toml_error))]
    Toml { message: String },
}

impl From<std::io::Error> for TopoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for TopoError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for TopoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for TopoError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl TopoError {
    /// Create a backend failure with a hint derived from the command's stderr
    pub fn backend_failed_with_help(action: &str, stderr: &str) -> Self {
        Self::BackendFailed {
            action: action.to_string(),
            error: stderr.trim().to_string(),
            help: Self::help_for_backend_output(stderr),
        }
    }

    fn help_for_backend_output(stderr: &str) -> Option<String> {
        if stderr.contains("401") || stderr.contains("Unauthorized") {
            Some("The backend rejected the credentials. Check context.token_env.".into())
        } else if stderr.contains("Connection refused") || stderr.contains("Could not resolve") {
            Some("The backend is unreachable. Check context.api_base.".into())
        } else if stderr.contains("command not found") {
            Some("A program used by the backend command is missing from PATH.".into())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_help_for_auth_failure() {
        let err = TopoError::backend_failed_with_help("start", "HTTP 401 Unauthorized\n");
        match err {
            TopoError::BackendFailed { error, help, .. } => {
                assert_eq!(error, "HTTP 401 Unauthorized");
                assert!(help.unwrap().contains("token_env"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_backend_help_absent_for_unknown_output() {
        let err = TopoError::backend_failed_with_help("cancel", "boom");
        assert!(matches!(err, TopoError::BackendFailed { help: None, .. }));
    }
}
