//! Default quantization tables and quality-factor scaling (RFC 2435,
//! Appendix A).
//!
//! Streams with Q in 1..=99 do not carry quantization tables; the receiver
//! scales these baseline tables by the quality factor instead. Both tables
//! are stored in zig-zag order, exactly as they are written into a DQT
//! segment.

use crate::constants::{QUALITY_FACTOR_MAX, QUALITY_FACTOR_MIN};

/// Baseline luminance quantizers, zig-zag order.
pub const DEFAULT_LUMA_QUANTIZERS: [u8; 64] = [
    16, 11, 12, 14, 12, 10, 16, 14, 13, 14, 18, 17, 16, 19, 24, 40, 26, 24, 22, 22, 24, 49, 35,
    37, 29, 40, 58, 51, 61, 60, 57, 51, 56, 55, 64, 72, 92, 78, 64, 68, 87, 69, 55, 56, 80, 109,
    81, 87, 95, 98, 103, 104, 103, 62, 77, 113, 121, 112, 100, 120, 92, 101, 103, 99,
];

/// Baseline chrominance quantizers, zig-zag order.
pub const DEFAULT_CHROMA_QUANTIZERS: [u8; 64] = [
    17, 18, 18, 24, 21, 24, 47, 26, 26, 47, 99, 66, 56, 66, 99, 99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99, 99,
];

fn scale_table(table: &[u8; 64], scale: u32) -> [u8; 64] {
    let mut scaled = [0u8; 64];
    for (out, &base) in scaled.iter_mut().zip(table.iter()) {
        // +50 rounds to nearest before the integer division by 100.
        let value = (u32::from(base) * scale + 50) / 100;
        *out = value.clamp(1, 255) as u8;
    }
    scaled
}

/// Scales the default tables by quality factor `quality`, clamped to 1..=99.
///
/// Scale factor is `5000 / q` below 50, `200 - 2q` at and above, the IJG
/// reference formula. Q=50 reproduces the baseline tables unchanged; every
/// output entry is a valid 8-bit quantizer in 1..=255.
///
/// Returns the scaled (luminance, chrominance) tables in zig-zag order.
pub fn scale_default_tables(quality: u8) -> ([u8; 64], [u8; 64]) {
    let q = u32::from(quality.clamp(QUALITY_FACTOR_MIN, QUALITY_FACTOR_MAX));
    let scale = if q < 50 { 5000 / q } else { 200 - 2 * q };
    (
        scale_table(&DEFAULT_LUMA_QUANTIZERS, scale),
        scale_table(&DEFAULT_CHROMA_QUANTIZERS, scale),
    )
}
