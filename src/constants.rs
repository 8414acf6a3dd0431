//! RTP and RFC 2435 JPEG payload wire-format constants.
//!
//! Defines the fixed header lengths, field thresholds, and JPEG structural
//! parameters shared by the codecs and the JFIF synthesizer. Values come
//! straight from RFC 3550, RFC 2435, and the baseline JPEG standard.

// --- RTP (RFC 3550) ---

/// RTP protocol version carried in the two high bits of the first octet.
pub const RTP_VERSION: u8 = 2;
/// Fixed RTP header length in bytes (no CSRC list, no extension).
pub const RTP_HEADER_LENGTH_BYTES: usize = 12;

// --- RTP/JPEG payload header (RFC 2435, Section 3.1) ---

/// Main JPEG payload header length in bytes.
pub const JPEG_MIN_HEADER_LENGTH_BYTES: usize = 8;
/// The only type-specific value this implementation interprets.
pub const JPEG_DEFAULT_TYPE_SPECIFIER: u8 = 0;
/// First Type value of the restart-marker range (RFC 2435, Section 3.1.3).
pub const JPEG_TYPE_RESTART_MARKER_START: u8 = 64;
/// Last Type value of the restart-marker range.
pub const JPEG_TYPE_RESTART_MARKER_END: u8 = 127;
/// Fixed length in bytes of the quantization table sub-header (MBZ,
/// precision, 16-bit length), excluding the table data itself.
pub const JPEG_QUANTIZATION_HEADER_LENGTH_BYTES: usize = 4;
/// Q values at or above this carry an in-band quantization table in the
/// frame's first packet (RFC 2435, Section 3.1.8).
pub const Q_TABLE_INBAND_MINIMUM: u8 = 128;

// --- JPEG structural parameters ---

/// Entries in one quantization table, one per DCT coefficient.
pub const QUANTIZATION_TABLE_LENGTH_BYTES: usize = 64;
/// Lowest accepted quality factor for default-table scaling.
pub const QUALITY_FACTOR_MIN: u8 = 1;
/// Highest accepted quality factor for default-table scaling.
pub const QUALITY_FACTOR_MAX: u8 = 99;
/// Frame dimensions on the wire are expressed in 8-pixel blocks.
pub const PIXELS_PER_BLOCK: u16 = 8;
/// Sample precision in bits; this implementation is baseline 8-bit only.
pub const JPEG_SAMPLE_PRECISION_BITS: u8 = 8;
