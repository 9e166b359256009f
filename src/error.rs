use crate::process::StreamKind;

/// Errors that can occur when managing a child process.
///
/// Errors are organized by category:
/// - Configuration errors: detected at `build()` time
/// - Lifecycle errors: an operation was called in the wrong state
/// - Spawn errors: the OS refused to start the child
/// - Pipe errors: a standard stream is unusable or failed mid-transfer
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors (detected at build() time)
    // -------------------------------------------------------------------------
    /// Invalid configuration provided to builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Signal name or number that does not map to a known signal.
    #[error("unknown signal: {0}")]
    InvalidSignal(String),

    // -------------------------------------------------------------------------
    // Lifecycle errors
    // -------------------------------------------------------------------------
    /// `start()` was called on a process that has already been started.
    #[error("the process has been started already")]
    AlreadyStarted,

    /// The operation needs a process that has been started.
    #[error("the process has not been started")]
    NotStarted,

    /// The operation needs a process that is still running.
    #[error("the process is not running")]
    NotRunning,

    // -------------------------------------------------------------------------
    // Spawn errors
    // -------------------------------------------------------------------------
    /// Failed to spawn the child process.
    #[error("failed to start process `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Pipe errors
    // -------------------------------------------------------------------------
    /// The pipe is closed, was taken, or was never opened.
    #[error("broken pipe: {stream}")]
    BrokenPipe { stream: StreamKind },

    /// IO error while transferring data on an open pipe.
    #[error("IO error on {stream}: {source}")]
    Pipe {
        stream: StreamKind,
        #[source]
        source: std::io::Error,
    },

    /// IO error while querying the child's state.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
}

/// A specialized Result type for libprocess operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io(source)
    }

    /// Create a pipe error, folding `EPIPE` into [`Error::BrokenPipe`].
    pub fn pipe(stream: StreamKind, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::BrokenPipe {
            Self::BrokenPipe { stream }
        } else {
            Self::Pipe { stream, source }
        }
    }

    /// Check if this error comes from calling an operation in the wrong state.
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(
            self,
            Error::AlreadyStarted | Error::NotStarted | Error::NotRunning
        )
    }

    /// Check if this error means a standard stream can no longer be used.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Error::BrokenPipe { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
