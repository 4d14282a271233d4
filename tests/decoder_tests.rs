//! Tests for the secret line decoder
//!
//! These drive `decode_stream` end to end over realistic `kubectl get
//! secret` data blocks and check both output streams.

use std::io::{self, BufReader, Cursor, Read, Write};

use cluster_utils::{decode_line, decode_stream, DecodeLineError, StreamError};

fn run(input: &str) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    decode_stream(Cursor::new(input), &mut out, &mut err).expect("stream should not fail");
    (
        String::from_utf8(out).expect("stdout is utf-8"),
        String::from_utf8(err).expect("stderr is utf-8"),
    )
}

// ============================================================================
// Well-formed input
// ============================================================================

#[test]
fn test_decodes_secret_data_block() {
    // The shape `kubectl get secret -o yaml | yq '.data'` produces
    let input = "password: cGFzc3dvcmQxMjM=\nusername: YWRtaW4=\ntoken: czNjcjN0LXQwa2Vu\n";
    let (out, err) = run(input);

    assert_eq!(out, "password: password123\nusername: admin\ntoken: s3cr3t-t0ken\n");
    assert!(err.is_empty());
}

#[test]
fn test_each_valid_line_emits_exactly_one_output_line() {
    let (out, _) = run("a: eA==\nb: eQ==\nc: eg==\n");
    assert_eq!(out.lines().count(), 3);
}

#[test]
fn test_missing_trailing_newline_is_fine() {
    let (out, err) = run("password: cGFzc3dvcmQxMjM=");
    assert_eq!(out, "password: password123\n");
    assert!(err.is_empty());
}

#[test]
fn test_decoded_value_may_contain_delimiter() {
    // "k: v" base64-encoded; the delimiter in the payload round-trips
    let (out, err) = run("pair: azogdg==\n");
    assert_eq!(out, "pair: k: v\n");
    assert!(err.is_empty());
}

// ============================================================================
// Malformed input is non-fatal
// ============================================================================

#[test]
fn test_line_without_delimiter_goes_to_stderr_only() {
    let (out, err) = run("badline\n");
    assert!(out.is_empty());
    assert!(err.contains("Invalid input: badline"));
}

#[test]
fn test_invalid_base64_goes_to_stderr_only() {
    let (out, err) = run("key: not-base64!\n");
    assert!(out.is_empty());
    assert!(err.contains("Error decoding base64:"));
}

#[test]
fn test_bad_lines_do_not_stop_the_stream() {
    let input = "first: Zmlyc3Q=\nbroken\nsecond: c2Vjb25k\nthird: !!!\nfourth: Zm91cnRo\n";
    let (out, err) = run(input);

    assert_eq!(out, "first: first\nsecond: second\nfourth: fourth\n");
    assert!(err.contains("Invalid input: broken"));
    assert!(err.contains("Error decoding base64:"));
}

#[test]
fn test_incorrect_padding_is_a_decode_error() {
    let err = decode_line("key: YWJjZA").unwrap_err();
    assert!(matches!(err, DecodeLineError::InvalidBase64(_)));
}

// ============================================================================
// Stream-level failures
// ============================================================================

/// Reader that yields its buffered data, then fails instead of reaching
/// end-of-stream.
struct TornReader {
    data: Cursor<Vec<u8>>,
}

impl TornReader {
    fn new(data: &str) -> Self {
        Self {
            data: Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for TornReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream torn down")),
            n => Ok(n),
        }
    }
}

/// Writer that refuses everything, like a closed pipe.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_read_failure_keeps_output_already_emitted() {
    let input = TornReader::new("first: Zmlyc3Q=\nsecond: c2Vjb25k\n");
    let mut out = Vec::new();
    let mut err = Vec::new();

    let result = decode_stream(BufReader::new(input), &mut out, &mut err);

    // Everything read before the failure was decoded and emitted
    assert_eq!(String::from_utf8(out).unwrap(), "first: first\nsecond: second\n");
    assert!(err.is_empty());

    let stream_err = result.unwrap_err();
    assert!(matches!(stream_err, StreamError::Read(_)));
    assert!(stream_err.to_string().starts_with("Failed to read input:"));
}

#[test]
fn test_write_failure_is_not_blamed_on_the_input() {
    let input = Cursor::new("first: Zmlyc3Q=\n");
    let mut err = Vec::new();

    let result = decode_stream(input, &mut ClosedPipe, &mut err);

    let stream_err = result.unwrap_err();
    assert!(matches!(stream_err, StreamError::Write(_)));
    assert!(stream_err.to_string().starts_with("Failed to write output:"));
}

#[test]
fn test_error_stream_failure_is_a_write_failure() {
    let input = Cursor::new("badline\n");
    let mut out = Vec::new();

    let result = decode_stream(input, &mut out, &mut ClosedPipe);

    assert!(out.is_empty());
    assert!(matches!(result.unwrap_err(), StreamError::Write(_)));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_rerun_yields_identical_output() {
    let input = "password: cGFzc3dvcmQxMjM=\nbadline\nuser: YWRtaW4=\n";
    assert_eq!(run(input), run(input));
}
