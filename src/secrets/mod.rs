//! Secret decoding module
//!
//! Turns `key: base64-value` lines (the shape of `kubectl get secret -o yaml`
//! data blocks) back into plaintext.

pub mod decode;

pub use decode::{decode_line, decode_stream, DecodeLineError, SecretRecord, StreamError};
