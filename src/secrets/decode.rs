//! Line decoder
//!
//! Each input line is split on the first `": "` into a key and a base64
//! payload. Malformed lines are reported and skipped; only a failure of
//! one of the streams themselves ends the run early.

use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// The record delimiter. The split happens at its first occurrence, so
/// keys may not contain `": "` but decoded values may.
const DELIMITER: &str = ": ";

#[derive(Debug, Error)]
pub enum DecodeLineError {
    #[error("Invalid input: {0}")]
    MissingDelimiter(String),
    #[error("Error decoding base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A stream-level failure: the input could not be read, or one of the
/// output streams could not be written. Both end the run; the variant
/// tells the caller which stream to blame in its diagnostic.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("Failed to write output: {0}")]
    Write(#[source] io::Error),
}

/// One decoded `key: value` pair. Lives for a single line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    pub key: String,
    pub value: Vec<u8>,
}

impl SecretRecord {
    /// The decoded bytes as text, with invalid UTF-8 replaced.
    pub fn display_value(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }
}

/// Decode a single `key: base64-value` line.
pub fn decode_line(line: &str) -> Result<SecretRecord, DecodeLineError> {
    let (key, encoded) = line
        .split_once(DELIMITER)
        .ok_or_else(|| DecodeLineError::MissingDelimiter(line.to_string()))?;

    let value = STANDARD.decode(encoded)?;
    Ok(SecretRecord {
        key: key.to_string(),
        value,
    })
}

/// Decode every line of `input`, writing successes to `out` and per-line
/// failures to `err`. Per-line failures are non-fatal; an I/O error on
/// either stream stops the loop and is returned for the caller to report.
/// Output already emitted stays emitted.
pub fn decode_stream<R, W, E>(input: R, out: &mut W, err: &mut E) -> Result<(), StreamError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    for line in input.lines() {
        let line = line.map_err(StreamError::Read)?;
        match decode_line(&line) {
            Ok(record) => writeln!(out, "{}{}{}", record.key, DELIMITER, record.display_value())
                .map_err(StreamError::Write)?,
            Err(e) => writeln!(err, "{e}").map_err(StreamError::Write)?,
        }
    }
    Ok(())
}
