use crate::error::{StreamError, StreamErrorExt};
use serde_json::Value;
use std::mem;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{trace, warn};

const READ_CHUNK: usize = 8 * 1024;

/// Extracts the text delta carried by one frame, if any.
///
/// The JSON object starts at the first `{` of the line; anything before it (`data:`) is
/// ignored. Lines without an object, with malformed JSON, or without a non-empty
/// `choices[0].delta.content` yield `None`.
#[must_use]
pub fn parse_line(line: &str) -> Option<String> {
    let start = line.find('{')?;
    let payload = &line[start..];

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, line = payload, "Skipping malformed stream frame");
            return None;
        },
    };

    value
        .pointer("/choices/0/delta/content")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

/// Incremental line decoder.
///
/// Bytes are buffered until a `\n` arrives, so frames and multi-byte characters may be
/// split across chunks at any position.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
}

impl StreamDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns the deltas of every line it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let Some(last_newline) = self.buffer.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };

        let rest = self.buffer.split_off(last_newline + 1);
        let complete = mem::replace(&mut self.buffer, rest);
        Self::decode_lines(&complete)
    }

    /// Flushes a trailing line that never got its `\n`.
    pub fn finish(&mut self) -> Vec<String> {
        let rest = mem::take(&mut self.buffer);
        Self::decode_lines(&rest)
    }

    /// Bytes held back waiting for the end of their line.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn decode_lines(bytes: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(bytes)
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(parse_line)
            .collect()
    }
}

/// Reads `reader` to the end, handing every text delta to `on_delta`.
///
/// Returns the number of deltas emitted.
///
/// # Errors
/// [`StreamError::Io`] when reading fails. Malformed frames are skipped, not errors.
pub async fn decode_stream<R, F>(mut reader: R, mut on_delta: F) -> Result<usize, StreamError>
where
    R: AsyncRead + Unpin,
    F: FnMut(String),
{
    let mut decoder = StreamDecoder::new();
    let mut chunk = vec![0u8; READ_CHUNK];
    let mut emitted = 0usize;

    loop {
        let read = reader.read(&mut chunk).await.context("Failed to read stream chunk")?;
        if read == 0 {
            break;
        }
        trace!(bytes = read, "Stream chunk received");
        for delta in decoder.feed(&chunk[..read]) {
            emitted += 1;
            on_delta(delta);
        }
    }

    for delta in decoder.finish() {
        emitted += 1;
        on_delta(delta);
    }

    Ok(emitted)
}
