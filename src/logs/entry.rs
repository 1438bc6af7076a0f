// ABOUTME: Decoded log record and its originating output stream.
// ABOUTME: Serialized as {timestamp, stream, message} in API responses.

use serde::{Deserialize, Serialize};

/// Output stream a log record was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStream {
    Stdout,
    Stderr,
}

impl LogStream {
    /// Map a frame header selector byte to a stream. Only `1` means stderr.
    pub fn from_selector(byte: u8) -> Self {
        if byte == 1 {
            LogStream::Stderr
        } else {
            LogStream::Stdout
        }
    }

    /// Selector byte written into a frame header for this stream.
    pub fn selector(self) -> u8 {
        match self {
            LogStream::Stdout => 0,
            LogStream::Stderr => 1,
        }
    }
}

impl std::fmt::Display for LogStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogStream::Stdout => write!(f, "stdout"),
            LogStream::Stderr => write!(f, "stderr"),
        }
    }
}

/// A single decoded log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub stream: LogStream,
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp: i64, stream: LogStream, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            stream,
            message: message.into(),
        }
    }
}
