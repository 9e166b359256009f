//! I/O primitives for the child's standard streams.

use std::fmt;
use std::time::Duration;

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{Error, Result};

/// Size of a single read from a pipe.
const READ_CHUNK: usize = 8 * 1024;

/// Which standard stream a pipe is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Stdin,
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdin => write!(f, "stdin"),
            StreamKind::Stdout => write!(f, "stdout"),
            StreamKind::Stderr => write!(f, "stderr"),
        }
    }
}

/// Reads whatever the child has written so far on stdout or stderr.
///
/// Each read waits up to the configured timeout for the first byte, then
/// drains everything else that is immediately available without waiting.
/// Once the child closes its end the reader remembers EOF and every later
/// read returns an empty buffer at once.
#[derive(Debug)]
pub struct PipeReader<R> {
    inner: R,
    kind: StreamKind,
    timeout: Duration,
    eof: bool,
}

impl<R: AsyncRead + Unpin> PipeReader<R> {
    /// Create a new reader over one end of a pipe.
    pub fn new(inner: R, kind: StreamKind, timeout: Duration) -> Self {
        Self {
            inner,
            kind,
            timeout,
            eof: false,
        }
    }

    /// Which stream this reader is attached to.
    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// Whether the writing side has been closed.
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Read the bytes currently available.
    ///
    /// Returns an empty buffer if nothing arrived within the timeout or the
    /// stream has reached EOF.
    pub async fn read_available(&mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        if self.eof {
            return Ok(output);
        }

        let mut chunk = [0u8; READ_CHUNK];
        match tokio::time::timeout(self.timeout, self.inner.read(&mut chunk)).await {
            Err(_elapsed) => return Ok(output),
            Ok(Ok(0)) => {
                self.eof = true;
                return Ok(output);
            }
            Ok(Ok(n)) => output.extend_from_slice(&chunk[..n]),
            Ok(Err(e)) => return Err(Error::pipe(self.kind, e)),
        }

        // Drain without waiting
        loop {
            match self.inner.read(&mut chunk).now_or_never() {
                None => break,
                Some(Ok(0)) => {
                    self.eof = true;
                    break;
                }
                Some(Ok(n)) => output.extend_from_slice(&chunk[..n]),
                Some(Err(e)) => return Err(Error::pipe(self.kind, e)),
            }
        }

        Ok(output)
    }

    /// Read until EOF, however long it takes.
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        if self.eof {
            return Ok(output);
        }
        self.inner
            .read_to_end(&mut output)
            .await
            .map_err(|e| Error::pipe(self.kind, e))?;
        self.eof = true;
        Ok(output)
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Writes raw bytes to the child's stdin.
#[derive(Debug)]
pub struct PipeWriter<W> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> PipeWriter<W> {
    /// Create a new writer over the write end of a pipe.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write all bytes and flush them to the child.
    pub async fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner
            .write_all(data)
            .await
            .map_err(|e| Error::pipe(StreamKind::Stdin, e))?;
        self.inner
            .flush()
            .await
            .map_err(|e| Error::pipe(StreamKind::Stdin, e))?;
        Ok(())
    }

    /// Shut down the write side so the child sees EOF.
    pub async fn close(mut self) -> Result<()> {
        self.inner
            .shutdown()
            .await
            .map_err(|e| Error::pipe(StreamKind::Stdin, e))
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_kind_display() {
        assert_eq!(StreamKind::Stdin.to_string(), "stdin");
        assert_eq!(StreamKind::Stdout.to_string(), "stdout");
        assert_eq!(StreamKind::Stderr.to_string(), "stderr");
    }

    #[test]
    fn stream_kind_serde() {
        let json = serde_json::to_string(&StreamKind::Stderr).unwrap();
        assert_eq!(json, "\"stderr\"");
    }

    #[tokio::test]
    async fn read_returns_written_bytes() {
        let (mut tx, rx) = tokio::io::duplex(64);
        let mut reader = PipeReader::new(rx, StreamKind::Stdout, Duration::from_secs(1));

        tx.write_all(b"hello ").await.unwrap();
        tx.write_all(b"world").await.unwrap();

        let bytes = reader.read_available().await.unwrap();
        assert_eq!(bytes, b"hello world");
        assert!(!reader.is_eof());
    }

    #[tokio::test]
    async fn read_times_out_empty() {
        let (_tx, rx) = tokio::io::duplex(64);
        let mut reader = PipeReader::new(rx, StreamKind::Stderr, Duration::from_millis(20));

        let bytes = reader.read_available().await.unwrap();
        assert!(bytes.is_empty());
        assert!(!reader.is_eof());
    }

    #[tokio::test]
    async fn zero_timeout_still_returns_ready_bytes() {
        let (mut tx, rx) = tokio::io::duplex(64);
        let mut reader = PipeReader::new(rx, StreamKind::Stdout, Duration::ZERO);

        tx.write_all(b"ready").await.unwrap();
        let bytes = reader.read_available().await.unwrap();
        assert_eq!(bytes, b"ready");
    }

    #[tokio::test]
    async fn eof_is_sticky() {
        let (mut tx, rx) = tokio::io::duplex(64);
        let mut reader = PipeReader::new(rx, StreamKind::Stdout, Duration::from_secs(1));

        tx.write_all(b"last").await.unwrap();
        drop(tx);

        let bytes = reader.read_available().await.unwrap();
        assert_eq!(bytes, b"last");
        assert!(reader.is_eof());

        assert!(reader.read_available().await.unwrap().is_empty());
        assert!(reader.read_to_end().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_to_end_collects_everything() {
        let (mut tx, rx) = tokio::io::duplex(64);
        let mut reader = PipeReader::new(rx, StreamKind::Stdout, Duration::from_secs(1));

        let writer = tokio::spawn(async move {
            for i in 0..10 {
                tx.write_all(format!("line {}\n", i).as_bytes()).await.unwrap();
            }
        });

        let bytes = reader.read_to_end().await.unwrap();
        writer.await.unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 10);
        assert!(reader.is_eof());
    }

    #[tokio::test]
    async fn writer_delivers_and_closes() {
        let (tx, mut rx) = tokio::io::duplex(64);
        let mut writer = PipeWriter::new(tx);

        writer.write(b"input\n").await.unwrap();
        writer.close().await.unwrap();

        let mut received = Vec::new();
        rx.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, b"input\n");
    }

    #[tokio::test]
    async fn into_inner_returns_underlying_streams() {
        let (tx, rx) = tokio::io::duplex(64);
        let mut writer = PipeWriter::new(tx);
        let mut reader = PipeReader::new(rx, StreamKind::Stdout, Duration::from_secs(1));
        assert_eq!(reader.kind(), StreamKind::Stdout);

        writer.write(b"first").await.unwrap();
        assert_eq!(reader.read_available().await.unwrap(), b"first");

        let mut tx = writer.into_inner();
        let mut rx = reader.into_inner();
        tx.write_all(b"raw").await.unwrap();
        drop(tx);

        let mut rest = Vec::new();
        rx.read_to_end(&mut rest).await.unwrap();
        assert_eq!(rest, b"raw");
    }

    #[test]
    fn pipes_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PipeReader<tokio::process::ChildStdout>>();
        assert_send_sync::<PipeReader<tokio::process::ChildStderr>>();
        assert_send_sync::<PipeWriter<tokio::process::ChildStdin>>();
    }
}
