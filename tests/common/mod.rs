//! Test utilities for libprocess integration tests.

use std::time::{Duration, Instant};

use libprocess::{Process, Result};
use nix::sys::signal;
use nix::unistd::Pid;

/// Upper bound for any single test to wait on a child.
pub const DEADLINE: Duration = Duration::from_secs(10);

/// Poll `is_running()` until the process exits.
///
/// Panics if the process is still running after [`DEADLINE`].
pub async fn wait_until_exited(process: &mut Process) {
    let start = Instant::now();
    while process.is_running() {
        assert!(
            start.elapsed() < DEADLINE,
            "process `{}` did not exit in time",
            process.command()
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Which stream to drain.
#[derive(Debug, Clone, Copy)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Read a stream while the process runs, then pick up the remainder.
pub async fn drain(process: &mut Process, stream: Stream) -> Result<Vec<u8>> {
    let start = Instant::now();
    let mut output = Vec::new();

    loop {
        let running = process.is_running();
        let chunk = match stream {
            Stream::Stdout => process.read_stdout().await?,
            Stream::Stderr => process.read_stderr().await?,
        };
        let empty = chunk.is_empty();
        output.extend(chunk);

        if !running && empty {
            return Ok(output);
        }
        assert!(start.elapsed() < DEADLINE, "drain did not finish in time");
    }
}

/// Whether a pid names a live, non-zombie process.
pub fn pid_alive(pid: u32) -> bool {
    let pid = Pid::from_raw(pid as i32);
    if signal::kill(pid, None).is_err() {
        return false;
    }

    // Zombies still accept signal 0
    match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Ok(stat) => stat
            .rsplit(')')
            .next()
            .map(|rest| !rest.trim_start().starts_with('Z'))
            .unwrap_or(true),
        Err(_) => true,
    }
}

/// Poll until `pid` is gone or [`DEADLINE`] passes; returns whether it died.
pub async fn wait_for_pid_exit(pid: u32) -> bool {
    let start = Instant::now();
    while start.elapsed() < DEADLINE {
        if !pid_alive(pid) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}
