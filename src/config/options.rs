//! Type-safe configuration options for spawning a child process.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default shell used to interpret command lines.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Flag passing the command line to [`DEFAULT_SHELL`].
pub const DEFAULT_SHELL_FLAG: &str = "-c";

/// Newtype for command lines to prevent string mixups.
///
/// A command line is handed to the shell verbatim, so it may contain pipes,
/// redirections and builtins such as `read`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandLine(pub String);

impl CommandLine {
    /// Create a new CommandLine from a string.
    pub fn new(command: impl Into<String>) -> Self {
        CommandLine(command.into())
    }

    /// Get the command line as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the command line contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CommandLine {
    fn from(s: String) -> Self {
        CommandLine(s)
    }
}

impl From<&str> for CommandLine {
    fn from(s: &str) -> Self {
        CommandLine(s.to_string())
    }
}

impl From<&String> for CommandLine {
    fn from(s: &String) -> Self {
        CommandLine(s.clone())
    }
}

impl AsRef<str> for CommandLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Interpreter that runs a [`CommandLine`].
///
/// The child is spawned as `<program> <flag> <command line>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shell {
    /// Path or name of the interpreter.
    pub program: String,
    /// Flag telling the interpreter to run its next argument.
    pub flag: String,
}

impl Shell {
    /// Create a shell invoked as `program flag <command line>`.
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL, DEFAULT_SHELL_FLAG)
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.flag)
    }
}
