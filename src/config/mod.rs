// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipetopo contributors

//! Configuration loading
//!
//! Settings come from `.pipetopo.yaml` (or `.pipetopo.toml`) in the working
//! directory, then from the user configuration directory, then defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::{TopoError, TopoResult};

/// Config file names looked up in the working directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[".pipetopo.yaml", ".pipetopo.yml", ".pipetopo.toml"];

/// Default poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between snapshot polls in `watch`
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Commands relaying requests to the execution backend
    #[serde(default)]
    pub backend: BackendConfig,

    /// Session context exported to backend commands
    #[serde(default)]
    pub context: ContextConfig,

    /// Output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            backend: BackendConfig::default(),
            context: ContextConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Backend command templates.
///
/// `{run_id}` and `{pipeline_id}` are substituted before the command runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Shell used to run the commands
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Starts the run instance `{run_id}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,

    /// Cancels the run instance `{run_id}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_command: Option<String>,

    /// Persists the order of pipeline `{pipeline_id}`; receives the order JSON on stdin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_command: Option<String>,

    /// Prints a run snapshot as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_command: Option<String>,
}

fn default_shell() -> String {
    "sh".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            start_command: None,
            cancel_command: None,
            persist_command: None,
            fetch_command: None,
        }
    }
}

/// Explicit session context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Base URL of the backend API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// User the requests are made for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Environment variable holding the API token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

impl ContextConfig {
    /// Environment exported to backend commands
    pub fn env(&self) -> Vec<(String, String)> {
        let mut env = Vec::new();

        if let Some(ref base) = self.api_base {
            env.push(("PIPETOPO_API_BASE".to_string(), base.clone()));
        }
        if let Some(ref user) = self.user {
            env.push(("PIPETOPO_USER".to_string(), user.clone()));
        }
        if let Some(ref var) = self.token_env {
            match std::env::var(var) {
                Ok(token) => env.push(("PIPETOPO_TOKEN".to_string(), token)),
                Err(_) => tracing::warn!(variable = %var, "token variable is not set"),
            }
        }

        env
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Colour terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    /// Load from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> TopoResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| TopoError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Find the config file for a working directory
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
            .or_else(|| user_config_path().filter(|p| p.exists()))
    }

    /// Load from an explicit path, or discover one from `dir`
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> TopoResult<Self> {
        match explicit {
            Some(path) if !path.exists() => Err(TopoError::FileReadError {
                path: path.to_path_buf(),
                error: "file does not exist".into(),
            }),
            Some(path) => Self::load(path),
            None => match Self::discover(dir) {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Save as YAML
    pub fn save(&self, path: &Path) -> TopoResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|e| TopoError::FileWriteError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn validate(&self) -> TopoResult<()> {
        if self.poll_interval_secs == 0 {
            return Err(TopoError::InvalidConfig {
                reason: "poll_interval_secs must be greater than zero".into(),
                help: Some(format!("The default is {}", DEFAULT_POLL_INTERVAL_SECS)),
            });
        }
        if self.backend.shell.trim().is_empty() {
            return Err(TopoError::InvalidConfig {
                reason: "backend.shell is empty".into(),
                help: Some("Use a shell such as 'sh' or 'bash'".into()),
            });
        }
        Ok(())
    }

    /// Whether output should be coloured, honouring `NO_COLOR`
    pub fn use_color(&self) -> bool {
        self.display.color && std::env::var_os("NO_COLOR").is_none()
    }
}

/// Per-user config file location
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pipetopo").map(|dirs| dirs.config_dir().join("config.yaml"))
}

/// Generate a commented default `.pipetopo.yaml`
pub fn generate_default_config() -> String {
    format!(
        r#"# pipetopo configuration

# Seconds between snapshot polls in `pipetopo watch`
poll_interval_secs: {}

backend:
  shell: sh
  # Placeholders: {{run_id}}, {{pipeline_id}}
  # start_command: "curl -fsS -X POST $PIPETOPO_API_BASE/api/start_job_step/{{run_id}}"
  # cancel_command: "curl -fsS -X POST $PIPETOPO_API_BASE/api/cancel_job_step/{{run_id}}"
  # The order JSON is written to stdin
  # persist_command: "curl -fsS -X POST -d @- $PIPETOPO_API_BASE/api/pipeline/{{pipeline_id}}/sort"
  # fetch_command: "curl -fsS $PIPETOPO_API_BASE/api/job/1"

context: {{}}
  # api_base: "http://localhost:8080"
  # user: "alice"
  # token_env: "PIPETOPO_API_TOKEN"

display:
  color: true
"#,
        DEFAULT_POLL_INTERVAL_SECS
    )
}
