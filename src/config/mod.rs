//! Configuration for spawning a child process.
//!
//! This module provides:
//!
//! - [`ProcessConfig`] and [`ProcessConfigBuilder`] for configuring a process
//! - Type-safe options like [`CommandLine`] and [`Shell`]
//!
//! # Example
//!
//! ```ignore
//! use libprocess::config::{ProcessConfig, Shell};
//!
//! let process = ProcessConfig::builder("echo $GREETING")
//!     .shell(Shell::new("/bin/bash", "-c"))
//!     .env("GREETING", "hello")
//!     .kill_on_drop(false)
//!     .create()?;
//! ```

pub mod builder;
pub mod options;

pub use builder::{ProcessConfig, ProcessConfigBuilder};
pub use options::{CommandLine, Shell, DEFAULT_SHELL, DEFAULT_SHELL_FLAG};
