//! RTP/MJPEG depacketization error types.
//!
//! This module defines the error type used throughout the rtpjpeg library.
//! Malformed input is never repaired: the codecs signal immediately and leave
//! frame-drop policy to the caller. The `thiserror` crate is used for
//! ergonomic error definitions.

use thiserror::Error;

/// Errors that can occur while decoding RTP/MJPEG wire structures.
///
/// Both variants are unrecoverable at the point of detection. `TruncatedInput`
/// always reports the exact required vs. available byte counts to aid
/// debugging of captured packet traces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RtpJpegError {
    /// Fewer bytes available than the structure being decoded requires.
    #[error("Truncated input: needed {needed} bytes, got {got} for {context}")]
    TruncatedInput {
        needed: usize,
        got: usize,
        context: String,
    },

    /// A wire value outside the RTP/JPEG subset modeled by this library
    /// (non-default type specifier, restart-marker Type range, or a
    /// quantization table of unexpected size).
    #[error(
        "Unsupported format: {field_name} value {value} is outside the supported RTP/JPEG subset"
    )]
    UnsupportedFormat { field_name: String, value: u32 },
}
