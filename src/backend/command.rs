// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Shell command backend
//!
//! Runs the configured command templates through the configured shell.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::RunBackend;
use crate::config::{BackendConfig, ContextConfig};
use crate::errors::{TopoError, TopoResult};
use crate::grouping::{parse_snapshot, SnapshotFormat, StepRun};
use crate::topology::SortOrderRequest;

/// Backend relaying requests through shell commands
#[derive(Debug, Clone)]
pub struct CommandBackend {
    config: BackendConfig,
    env: Vec<(String, String)>,
    working_dir: PathBuf,
}

impl CommandBackend {
    /// Create a backend from configuration
    pub fn new(config: BackendConfig, context: &ContextConfig) -> Self {
        Self {
            config,
            env: context.env(),
            working_dir: PathBuf::from("."),
        }
    }

    /// Run commands from `dir`
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = dir.as_ref().to_path_buf();
        self
    }

    fn template(&self, action: &str) -> TopoResult<&str> {
        let template = match action {
            "start" => &self.config.start_command,
            "cancel" => &self.config.cancel_command,
            "persist" => &self.config.persist_command,
            "fetch" => &self.config.fetch_command,
            _ => &None,
        };

        template
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TopoError::CommandNotConfigured {
                action: action.to_string(),
            })
    }

    async fn run(
        &self,
        action: &str,
        vars: &[(&str, String)],
        stdin: Option<String>,
    ) -> TopoResult<String> {
        let command = render_template(self.template(action)?, vars);
        let start = Instant::now();

        let mut cmd = Command::new(&self.config.shell);
        cmd.arg("-c").arg(&command);
        cmd.current_dir(&self.working_dir);
        cmd.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        cmd.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!(action, command = %command, "running backend command");

        let mut child = cmd.spawn().map_err(|e| TopoError::BackendFailed {
            action: action.to_string(),
            error: e.to_string(),
            help: Some(format!("Shell '{}' may not be available", self.config.shell)),
        })?;

        // Feed stdin while the output is drained so neither side can block
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(tokio::spawn(async move {
                pipe.write_all(input.as_bytes()).await?;
                pipe.shutdown().await
            })),
            _ => None,
        };

        let output = child.wait_with_output().await?;

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!(action, "command exited without reading stdin");
                }
                Ok(Err(e)) => tracing::warn!(action, error = %e, "failed to write command stdin"),
                Err(e) => tracing::warn!(action, error = %e, "stdin writer task failed"),
            }
        }
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        tracing::debug!(
            action,
            exit_code = output.status.code().unwrap_or(-1),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "backend command finished"
        );

        if output.status.success() {
            Ok(stdout)
        } else {
            let detail = if stderr.trim().is_empty() {
                format!("exited with code {}", output.status.code().unwrap_or(-1))
            } else {
                stderr
            };
            Err(TopoError::backend_failed_with_help(action, &detail))
        }
    }
}

/// Substitute `{name}` placeholders
fn render_template(template: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

#[async_trait]
impl RunBackend for CommandBackend {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn start_run(&self, run_id: u64) -> TopoResult<()> {
        self.run("start", &[("run_id", run_id.to_string())], None)
            .await?;
        tracing::info!(run_id, "start requested");
        Ok(())
    }

    async fn cancel_run(&self, run_id: u64) -> TopoResult<()> {
        self.run("cancel", &[("run_id", run_id.to_string())], None)
            .await?;
        tracing::info!(run_id, "cancel requested");
        Ok(())
    }

    async fn persist_order(&self, pipeline_id: Option<u64>, order: &SortOrderRequest) -> TopoResult<()> {
        let body = serde_json::to_string(order)?;
        let pipeline = pipeline_id.map(|id| id.to_string()).unwrap_or_default();

        self.run("persist", &[("pipeline_id", pipeline)], Some(body))
            .await?;
        tracing::info!(
            pipeline_id = ?pipeline_id,
            stages = order.stages.len(),
            steps = order.steps.len(),
            "order persisted"
        );
        Ok(())
    }

    async fn fetch_runs(&self) -> TopoResult<Vec<StepRun>> {
        let stdout = self.run("fetch", &[], None).await?;
        parse_snapshot(&stdout, SnapshotFormat::Json)
    }

    async fn check_available(&self) -> TopoResult<()> {
        which::which(&self.config.shell).map_err(|_| TopoError::ShellNotFound {
            shell: self.config.shell.clone(),
        })?;
        Ok(())
    }
}
