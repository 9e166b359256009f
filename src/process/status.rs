//! Point-in-time snapshot of a child's state.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use serde::Serialize;

/// State of a child process as last observed.
///
/// Produced by [`Process::status`](super::Process::status) and
/// [`Process::wait`](super::Process::wait).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessStatus {
    /// The command line the process was started with.
    pub command: String,
    /// OS process id.
    pub pid: u32,
    /// Whether the process was still running when observed.
    pub running: bool,
    /// Whether the process was terminated by a signal.
    pub signaled: bool,
    /// Exit code; `None` while running or when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Signal that terminated the process, if any.
    pub term_signal: Option<i32>,
}

impl ProcessStatus {
    /// Status of a process that has not exited yet.
    pub(crate) fn running(command: &str, pid: u32) -> Self {
        Self {
            command: command.to_string(),
            pid,
            running: true,
            signaled: false,
            exit_code: None,
            term_signal: None,
        }
    }

    /// Status of a process that exited with `status`.
    pub(crate) fn exited(command: &str, pid: u32, status: ExitStatus) -> Self {
        Self {
            command: command.to_string(),
            pid,
            running: false,
            signaled: status.signal().is_some(),
            exit_code: status.code(),
            term_signal: status.signal(),
        }
    }

    /// Whether the process exited normally with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
