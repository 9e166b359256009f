//! Process configuration and builder.
//!
//! This module provides the builder pattern for configuring a child process.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use libprocess::config::ProcessConfig;
//!
//! let config = ProcessConfig::builder("make test")
//!     .auto_start(false)
//!     .working_directory("/src/project")
//!     .env("RUST_LOG", "debug")
//!     .read_timeout(Duration::from_millis(250))
//!     .build()?;
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use nix::sys::signal::Signal;

use super::options::{CommandLine, Shell};
use crate::process::{Process, DEFAULT_READ_TIMEOUT, DEFAULT_SIGNAL};
use crate::{Error, Result};

/// Configuration for a child process.
///
/// Use [`ProcessConfig::builder()`] to create a new configuration.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub(crate) command: CommandLine,

    // Lifecycle policy
    pub(crate) auto_start: bool,
    pub(crate) kill_on_drop: bool,
    pub(crate) drop_signal: Signal,

    // Pipe options
    pub(crate) read_timeout: Duration,

    // Spawn options
    pub(crate) shell: Shell,
    pub(crate) working_directory: Option<PathBuf>,
    pub(crate) env_vars: HashMap<String, String>,
    pub(crate) inherit_env: bool,
}

impl ProcessConfig {
    /// Create a new builder for the given command line.
    pub fn builder(command: impl Into<CommandLine>) -> ProcessConfigBuilder {
        ProcessConfigBuilder::new(command)
    }

    /// Get the command line.
    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    /// Whether the process is spawned during construction.
    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    /// Whether a still-running child is signalled when the wrapper drops.
    pub fn kill_on_drop(&self) -> bool {
        self.kill_on_drop
    }

    /// Signal sent by the drop policy.
    pub fn drop_signal(&self) -> Signal {
        self.drop_signal
    }

    /// How long a pipe read waits for the first byte.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Get the shell that interprets the command line.
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Get the working directory if set.
    pub fn working_directory(&self) -> Option<&PathBuf> {
        self.working_directory.as_ref()
    }
}

/// Builder for [`ProcessConfig`].
///
/// Validation happens when [`build()`](ProcessConfigBuilder::build) is called.
#[derive(Debug, Clone)]
pub struct ProcessConfigBuilder {
    command: CommandLine,
    auto_start: bool,
    kill_on_drop: bool,
    drop_signal: Signal,
    read_timeout: Duration,
    shell: Shell,
    working_directory: Option<PathBuf>,
    env_vars: HashMap<String, String>,
    inherit_env: bool,
}

impl ProcessConfigBuilder {
    /// Create a builder with default policy for the given command line.
    pub fn new(command: impl Into<CommandLine>) -> Self {
        Self {
            command: command.into(),
            auto_start: true,
            kill_on_drop: true,
            drop_signal: DEFAULT_SIGNAL,
            read_timeout: DEFAULT_READ_TIMEOUT,
            shell: Shell::default(),
            working_directory: None,
            env_vars: HashMap::new(),
            inherit_env: true, // Default: inherit parent environment
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle policy
    // -------------------------------------------------------------------------

    /// Spawn the process during construction (default: true).
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Signal a still-running child when the wrapper drops (default: true).
    pub fn kill_on_drop(mut self, kill: bool) -> Self {
        self.kill_on_drop = kill;
        self
    }

    /// Signal used by the drop policy (default: SIGTERM).
    pub fn drop_signal(mut self, signal: Signal) -> Self {
        self.drop_signal = signal;
        self
    }

    // -------------------------------------------------------------------------
    // Pipe options
    // -------------------------------------------------------------------------

    /// How long `read_stdout`/`read_stderr` wait for the first byte (default: 1s).
    ///
    /// A zero timeout makes reads purely non-blocking.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    // -------------------------------------------------------------------------
    // Spawn options
    // -------------------------------------------------------------------------

    /// Interpreter for the command line (default: `/bin/sh -c`).
    pub fn shell(mut self, shell: Shell) -> Self {
        self.shell = shell;
        self
    }

    /// Working directory for the child.
    pub fn working_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(path.into());
        self
    }

    /// Add/override environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Don't inherit parent environment (default: inherit).
    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }

    // -------------------------------------------------------------------------
    // Build
    // -------------------------------------------------------------------------

    /// Build the configuration.
    ///
    /// This validates:
    /// - The command line is not blank
    /// - The shell program is not empty
    /// - The working directory exists if set
    pub fn build(self) -> Result<ProcessConfig> {
        if self.command.is_blank() {
            return Err(Error::InvalidConfig("command line must not be empty".into()));
        }

        if self.shell.program.is_empty() {
            return Err(Error::InvalidConfig("shell program must not be empty".into()));
        }

        if let Some(ref dir) = self.working_directory {
            if !dir.is_dir() {
                return Err(Error::InvalidConfig(format!(
                    "working directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(ProcessConfig {
            command: self.command,
            auto_start: self.auto_start,
            kill_on_drop: self.kill_on_drop,
            drop_signal: self.drop_signal,
            read_timeout: self.read_timeout,
            shell: self.shell,
            working_directory: self.working_directory,
            env_vars: self.env_vars,
            inherit_env: self.inherit_env,
        })
    }

    /// Build the configuration and construct a [`Process`] from it.
    ///
    /// The child is spawned immediately unless `auto_start(false)` was set.
    pub fn create(self) -> Result<Process> {
        Process::with_config(self.build()?)
    }
}
