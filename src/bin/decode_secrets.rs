//! Decode `key: base64-value` lines from stdin.
//!
//! Usage: `kubectl get secret -n myns mysecret -o yaml | yq '.data' | decode-secrets`
//!
//! Successfully decoded pairs go to stdout as `key: value`; malformed
//! lines are reported to stderr and skipped.

use std::io;
use std::process::ExitCode;

use cluster_utils::{decode_stream, StreamError};

fn main() -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();

    match decode_stream(stdin.lock(), &mut out, &mut err) {
        Ok(()) => ExitCode::SUCCESS,
        Err(StreamError::Read(e)) => {
            eprintln!("Error reading from stdin: {e}");
            ExitCode::FAILURE
        }
        Err(StreamError::Write(e)) => {
            eprintln!("Error writing output: {e}");
            ExitCode::FAILURE
        }
    }
}
