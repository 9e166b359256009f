//! Process spawning and lifecycle management.

use std::process::{ExitStatus, Stdio};

use nix::unistd::Pid;
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};

use super::io::{PipeReader, PipeWriter, StreamKind};
use super::signal::Signal;
use super::status::ProcessStatus;
use super::DEFAULT_SIGNAL;
use crate::config::{CommandLine, ProcessConfig};
use crate::{Error, Result};

/// A child process with piped standard streams.
///
/// The process moves through three states: not started, running, exited.
/// Its exit status is collected from the OS once and cached afterwards.
///
/// All methods that spawn or observe the child must be called from within a
/// Tokio runtime.
///
/// # Cancellation
///
/// Dropping a `Process` sends the configured drop signal (SIGTERM by default)
/// to the child if it is still running and kill-on-drop is enabled. Drop does
/// not wait for the child; use [`close`](Self::close) for that.
///
/// # Example
///
/// ```ignore
/// use libprocess::Process;
///
/// let mut process = Process::new("ls /tmp", true, true)?;
/// let mut listing = Vec::new();
/// while process.is_running() {
///     listing.extend(process.read_stdout().await?);
/// }
/// listing.extend(process.read_stdout().await?);
/// assert_eq!(process.exit_code(), Some(0));
/// ```
#[derive(Debug)]
pub struct Process {
    config: ProcessConfig,
    child: Option<Child>,
    pid: Option<u32>,
    stdin: Option<PipeWriter<ChildStdin>>,
    stdout: Option<PipeReader<ChildStdout>>,
    stderr: Option<PipeReader<ChildStderr>>,
    exit_status: Option<ExitStatus>,
}

impl Process {
    /// Create a process for `command`, spawning it now if `auto_start` is set.
    ///
    /// `kill_on_drop` decides whether a still-running child is terminated
    /// when the wrapper is dropped.
    pub fn new(
        command: impl Into<CommandLine>,
        auto_start: bool,
        kill_on_drop: bool,
    ) -> Result<Self> {
        ProcessConfig::builder(command)
            .auto_start(auto_start)
            .kill_on_drop(kill_on_drop)
            .create()
    }

    /// Create a process from a validated configuration.
    pub fn with_config(config: ProcessConfig) -> Result<Self> {
        let auto_start = config.auto_start;
        let mut process = Self {
            config,
            child: None,
            pid: None,
            stdin: None,
            stdout: None,
            stderr: None,
            exit_status: None,
        };

        if auto_start {
            process.start()?;
        }

        Ok(process)
    }

    /// Create a builder for configuring a new process.
    pub fn builder(command: impl Into<CommandLine>) -> crate::config::ProcessConfigBuilder {
        ProcessConfig::builder(command)
    }

    /// Spawn the child with all three standard streams piped.
    ///
    /// A process can only be started once, even after it has exited.
    pub fn start(&mut self) -> Result<()> {
        if self.child.is_some() {
            return Err(Error::AlreadyStarted);
        }

        let mut cmd = build_command(&self.config);
        let mut child = cmd.spawn().map_err(|source| {
            tracing::debug!(command = %self.config.command, error = %source, "spawn failed");
            Error::Spawn {
                command: self.config.command.to_string(),
                source,
            }
        })?;

        let timeout = self.config.read_timeout;
        self.pid = child.id();
        self.stdin = child.stdin.take().map(PipeWriter::new);
        self.stdout = child
            .stdout
            .take()
            .map(|out| PipeReader::new(out, StreamKind::Stdout, timeout));
        self.stderr = child
            .stderr
            .take()
            .map(|err| PipeReader::new(err, StreamKind::Stderr, timeout));
        self.child = Some(child);

        tracing::debug!(command = %self.config.command, pid = ?self.pid, "process started");
        Ok(())
    }

    /// Send `signal` to the child.
    ///
    /// Fails with [`Error::NotRunning`] if the process was never started or
    /// has already exited. Returns whether the OS accepted the signal.
    pub fn kill(&mut self, signal: Signal) -> Result<bool> {
        if !self.is_running() {
            return Err(Error::NotRunning);
        }
        let pid = self.pid.ok_or(Error::NotRunning)?;

        match nix::sys::signal::kill(Pid::from_raw(pid as i32), signal) {
            Ok(()) => {
                tracing::debug!(pid, ?signal, "signal delivered");
                Ok(true)
            }
            Err(errno) => {
                tracing::warn!(pid, ?signal, %errno, "failed to deliver signal");
                Ok(false)
            }
        }
    }

    /// Send SIGTERM to the child.
    pub fn terminate(&mut self) -> Result<bool> {
        self.kill(DEFAULT_SIGNAL)
    }

    /// Query the child's state without blocking.
    ///
    /// The exit status is cached the first time termination is observed.
    pub fn status(&mut self) -> Result<ProcessStatus> {
        let child = self.child.as_mut().ok_or(Error::NotStarted)?;
        let pid = self.pid.unwrap_or_default();

        if self.exit_status.is_none() {
            if let Some(status) = child.try_wait().map_err(Error::io)? {
                tracing::debug!(pid, %status, "process exited");
                self.exit_status = Some(status);
            }
        }

        Ok(self.snapshot(pid))
    }

    /// Check if the process is still running.
    ///
    /// Any failure to query the child, including never having started it,
    /// reads as not running.
    pub fn is_running(&mut self) -> bool {
        self.status().map(|status| status.running).unwrap_or(false)
    }

    /// Get the exit code once the process has exited.
    ///
    /// Returns `None` while the process is running, if it was never started,
    /// if its status cannot be read, or if it was terminated by a signal.
    pub fn exit_code(&mut self) -> Option<i32> {
        if self.exit_status.is_none() && self.status().is_err() {
            return None;
        }
        self.exit_status.and_then(|status| status.code())
    }

    /// Wait for the child to exit and return its final status.
    ///
    /// Stdin is closed first so a child reading its input sees EOF; later
    /// writes fail with [`Error::BrokenPipe`]. Output is not drained while
    /// waiting; a child that fills its stdout or stderr pipe will block until
    /// the caller reads from it.
    pub async fn wait(&mut self) -> Result<ProcessStatus> {
        let child = self.child.as_mut().ok_or(Error::NotStarted)?;
        let pid = self.pid.unwrap_or_default();

        if self.exit_status.is_none() {
            self.stdin = None;
            let status = child.wait().await.map_err(Error::io)?;
            tracing::debug!(pid, %status, "process exited");
            self.exit_status = Some(status);
        }

        Ok(self.snapshot(pid))
    }

    /// Get the command line executed by the process.
    pub fn command(&self) -> &str {
        self.config.command.as_str()
    }

    /// Get the process ID, once started.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Get a reference to the underlying config.
    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    /// Write bytes to the child's stdin.
    pub async fn write_stdin(&mut self, data: impl AsRef<[u8]>) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or(Error::BrokenPipe {
            stream: StreamKind::Stdin,
        })?;
        stdin.write(data.as_ref()).await
    }

    /// Close the child's stdin so it sees EOF.
    pub async fn close_stdin(&mut self) -> Result<()> {
        let stdin = self.stdin.take().ok_or(Error::BrokenPipe {
            stream: StreamKind::Stdin,
        })?;
        stdin.close().await
    }

    /// Read whatever the child has written to stdout so far.
    ///
    /// Waits up to the configured read timeout for the first byte and returns
    /// an empty buffer if nothing arrives.
    pub async fn read_stdout(&mut self) -> Result<Vec<u8>> {
        let stdout = self.stdout.as_mut().ok_or(Error::BrokenPipe {
            stream: StreamKind::Stdout,
        })?;
        stdout.read_available().await
    }

    /// Read whatever the child has written to stderr so far.
    ///
    /// Waits up to the configured read timeout for the first byte and returns
    /// an empty buffer if nothing arrives.
    pub async fn read_stderr(&mut self) -> Result<Vec<u8>> {
        let stderr = self.stderr.as_mut().ok_or(Error::BrokenPipe {
            stream: StreamKind::Stderr,
        })?;
        stderr.read_available().await
    }

    /// Take the stdin writer from this process.
    ///
    /// Later writes through the process fail with [`Error::BrokenPipe`].
    pub fn take_stdin(&mut self) -> Option<PipeWriter<ChildStdin>> {
        self.stdin.take()
    }

    /// Take the stdout reader from this process.
    pub fn take_stdout(&mut self) -> Option<PipeReader<ChildStdout>> {
        self.stdout.take()
    }

    /// Take the stderr reader from this process.
    pub fn take_stderr(&mut self) -> Option<PipeReader<ChildStderr>> {
        self.stderr.take()
    }

    /// Shut the process down and wait for it.
    ///
    /// Closes all pipes, signals the child if kill-on-drop is enabled and it
    /// is still running, then waits for it to exit. Returns `None` if the
    /// process was never started.
    pub async fn close(mut self) -> Result<Option<ProcessStatus>> {
        self.stdin = None;
        self.stdout = None;
        self.stderr = None;

        if self.child.is_none() {
            return Ok(None);
        }

        if self.config.kill_on_drop {
            // The child may exit on its own before the signal lands
            match self.kill(self.config.drop_signal) {
                Ok(_) | Err(Error::NotRunning) => {}
                Err(e) => return Err(e),
            }
        }

        self.wait().await.map(Some)
    }

    fn snapshot(&self, pid: u32) -> ProcessStatus {
        let command = self.config.command.as_str();
        match self.exit_status {
            Some(status) => ProcessStatus::exited(command, pid, status),
            None => ProcessStatus::running(command, pid),
        }
    }
}

impl Drop for Process {
    fn drop(&mut self) {
        if self.config.kill_on_drop && self.is_running() {
            if let Err(e) = self.kill(self.config.drop_signal) {
                tracing::warn!(pid = ?self.pid, error = %e, "failed to kill process on drop");
            }
        }
    }
}

/// Build a tokio Command from the config.
fn build_command(config: &ProcessConfig) -> Command {
    let mut cmd = Command::new(&config.shell.program);
    cmd.arg(&config.shell.flag);
    cmd.arg(config.command.as_str());

    if let Some(ref dir) = config.working_directory {
        cmd.current_dir(dir);
    }

    if !config.inherit_env {
        cmd.env_clear();
    }
    cmd.envs(&config.env_vars);

    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    // Drop policy is ours, with a configurable signal
    cmd.kill_on_drop(false);

    cmd
}
