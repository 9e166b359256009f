//! # libprocess
//!
//! Async Rust wrapper around a single child process.
//!
//! This library provides a typed interface to one child, supporting:
//! - Deferred or immediate start from a shell command line
//! - Non-blocking reads of stdout and stderr
//! - Writing to stdin
//! - Status and exit code queries with the exit status cached once observed
//! - Terminating the child with any signal, optionally on drop
//!
//! ## Quick Start
//!
//! ```ignore
//! use libprocess::{Process, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut process = Process::new("ls -1 /", true, true)?;
//!     let mut output = Vec::new();
//!     while process.is_running() {
//!         output.extend(process.read_stdout().await?);
//!     }
//!     output.extend(process.read_stdout().await?);
//!     print!("{}", String::from_utf8_lossy(&output));
//!     println!("exit code: {:?}", process.exit_code());
//!     Ok(())
//! }
//! ```
//!
//! ## Talking to the child
//!
//! ```ignore
//! let mut process = Process::new("read name; echo hello $name", true, true)?;
//! process.write_stdin("world\n").await?;
//! let status = process.wait().await?;
//! let greeting = process.read_stdout().await?;
//! ```
//!
//! ## Configuration
//!
//! ```ignore
//! use std::time::Duration;
//! use libprocess::{Process, Signal};
//!
//! let process = Process::builder("tail -f /var/log/syslog")
//!     .auto_start(false)
//!     .drop_signal(Signal::SIGKILL)
//!     .read_timeout(Duration::from_millis(100))
//!     .create()?;
//! ```

pub mod config;
mod error;
pub mod process;

pub use error::{Error, Result};

// Re-export commonly used config types at crate root
pub use config::{CommandLine, ProcessConfig, ProcessConfigBuilder, Shell};

// Re-export commonly used process types at crate root
pub use process::{parse_signal, Process, ProcessStatus, Signal, StreamKind};
