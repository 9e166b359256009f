//! Child process management.
//!
//! This module handles spawning a single child through the shell and talking
//! to it over its three standard streams.
//!
//! # Architecture
//!
//! ```text
//! libprocess                          child
//! ┌─────────────┐                    ┌─────────────┐
//! │ Process     │───stdin (bytes)───▶│             │
//! │             │◀──stdout (bytes)───│  /bin/sh -c │
//! │             │◀──stderr (bytes)───│             │
//! │             │───signal──────────▶│             │
//! └─────────────┘                    └─────────────┘
//! ```
//!
//! # Lifecycle
//!
//! - Not started: created with `auto_start = false`; only `start()` applies
//! - Running: pipes open, `kill()` delivers signals
//! - Exited: status collected once and cached; pipes may still hold output
//!
//! # Reading output
//!
//! Reads never wait for EOF. Each read waits at most the configured timeout
//! for the first byte, then returns everything already buffered. Callers poll
//! [`Process::is_running`] and read until it turns false, followed by one last
//! read to pick up anything written just before exit.

mod io;
mod signal;
mod spawn;
mod status;

use std::time::Duration;

pub use io::{PipeReader, PipeWriter, StreamKind};
pub use signal::{parse_signal, Signal};
pub use spawn::Process;
pub use status::ProcessStatus;

/// Default time a pipe read waits for the first byte.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Signal sent by [`Process::terminate`] and, by default, on drop.
pub const DEFAULT_SIGNAL: Signal = Signal::SIGTERM;
