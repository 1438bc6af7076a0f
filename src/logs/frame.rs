// ABOUTME: Decoder for the runtime's multiplexed log stream.
// ABOUTME: Splits header-prefixed lines into timestamped stdout/stderr entries.

use super::entry::{LogEntry, LogStream};
use chrono::DateTime;

/// Length of the binary header in front of each log frame.
///
/// Layout: stream selector byte, three reserved bytes, big-endian u32 payload length.
pub const HEADER_LEN: usize = 8;

/// Reasons a single line is dropped by the decoder.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("line of {0} bytes cannot hold a frame header and payload")]
    TooShort(usize),

    #[error("frame payload has no message after the timestamp")]
    MissingMessage,

    #[error("invalid timestamp {token:?}: {source}")]
    InvalidTimestamp {
        token: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Decode a raw multiplexed log body into entries, in encounter order.
///
/// Malformed lines are logged and skipped; they never fail the batch.
pub fn decode(raw: &[u8]) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let mut discarded = 0usize;
    let mut rest = raw;
    let mut idx = 0usize;

    while !rest.is_empty() {
        let (line, tail) = next_line(rest);
        rest = tail;
        idx += 1;

        match decode_line(line) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(e) => {
                discarded += 1;
                tracing::debug!(line = idx, error = %e, "discarding log frame");
            }
        }
    }

    if discarded > 0 {
        tracing::debug!(
            decoded = entries.len(),
            discarded,
            "decoded log stream with malformed lines"
        );
    }

    entries
}

/// Split the next line off `raw`.
///
/// A frame with a usable header is taken by its declared length, so a line
/// feed byte inside the length field never cuts it apart. Anything else runs
/// to the next line feed.
fn next_line(raw: &[u8]) -> (&[u8], &[u8]) {
    if let Some(len) = declared_len(raw) {
        return raw.split_at(HEADER_LEN + len);
    }
    match raw.iter().position(|&b| b == b'\n') {
        Some(end) => (&raw[..end], &raw[end + 1..]),
        None => (raw, &raw[raw.len()..]),
    }
}

/// Payload length of a header with zeroed reserved bytes whose payload fits in `raw`.
fn declared_len(raw: &[u8]) -> Option<usize> {
    let header: [u8; HEADER_LEN] = raw.get(..HEADER_LEN)?.try_into().ok()?;
    if header[1..4] != [0, 0, 0] {
        return None;
    }
    let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
    let len = usize::try_from(len).ok()?;
    (len > 0 && len <= raw.len() - HEADER_LEN).then_some(len)
}

/// Decode one physical line. Blank lines yield `Ok(None)`.
pub fn decode_line(line: &[u8]) -> Result<Option<LogEntry>, FrameError> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(None);
    }
    if line.len() <= HEADER_LEN {
        return Err(FrameError::TooShort(line.len()));
    }

    let (header, payload) = line.split_at(HEADER_LEN);
    let stream = LogStream::from_selector(header[0]);

    let payload = String::from_utf8_lossy(payload);
    let (token, message) = payload
        .trim_start()
        .split_once(' ')
        .ok_or(FrameError::MissingMessage)?;

    let timestamp = DateTime::parse_from_rfc3339(token)
        .map_err(|source| FrameError::InvalidTimestamp {
            token: token.to_string(),
            source,
        })?
        .timestamp();

    Ok(Some(LogEntry::new(timestamp, stream, message)))
}

/// Encode one frame: header followed by `"<timestamp> <message>\n"`.
///
/// The payload length is written into the header as the runtime does.
pub fn encode_frame(stream: LogStream, timestamp: &str, message: &str) -> Vec<u8> {
    let payload = format!("{timestamp} {message}\n");
    let len = u32::try_from(payload.len()).unwrap_or(u32::MAX);

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&[stream.selector(), 0, 0, 0]);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload.as_bytes());
    frame
}
