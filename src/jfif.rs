//! JFIF preamble synthesis for reconstructed RTP/MJPEG frames.
//!
//! RFC 2435 strips every structural JPEG segment from the wire; only entropy-
//! coded scan data is transmitted. This module rebuilds the byte-exact
//! preamble (SOI through SOS) a standard decoder expects, from the frame
//! dimensions and quantization tables recovered from the payload header.
//! Appending the concatenated scan data, then [`end_of_image`], yields a
//! standalone JPEG file.

use crate::constants::{
    JPEG_SAMPLE_PRECISION_BITS, PIXELS_PER_BLOCK, Q_TABLE_INBAND_MINIMUM,
    QUANTIZATION_TABLE_LENGTH_BYTES,
};
use crate::cursor::ByteWriter;
use crate::error::RtpJpegError;
use crate::huffman::{HuffmanSpec, STANDARD_SPECS};
use crate::payload::JpegRtpHeader;
use crate::quant::scale_default_tables;

/// JPEG marker codes emitted by the synthesizer (ITU-T T.81, Table B.1).
///
/// The set is closed on purpose: every marker this library writes has a
/// fixed, enumerable payload, and nothing else belongs in a baseline
/// RTP/MJPEG preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum JpegMarker {
    /// Baseline start of frame.
    Sof0 = 0xC0,
    /// Define Huffman tables.
    Dht = 0xC4,
    /// Start of image.
    Soi = 0xD8,
    /// End of image.
    Eoi = 0xD9,
    /// Start of scan.
    Sos = 0xDA,
    /// Define quantization tables.
    Dqt = 0xDB,
    /// Define restart interval.
    Dri = 0xDD,
    /// JFIF application segment.
    App0 = 0xE0,
}

/// The quantization tables of one frame, resolved from either source the
/// wire format allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizationTables {
    /// One table shared by all components (legacy monochrome-quantized
    /// streams).
    Single([u8; QUANTIZATION_TABLE_LENGTH_BYTES]),
    /// Separate luminance and chrominance tables.
    Dual(
        [u8; QUANTIZATION_TABLE_LENGTH_BYTES],
        [u8; QUANTIZATION_TABLE_LENGTH_BYTES],
    ),
}

impl QuantizationTables {
    /// Scales the default tables by quality factor `quality` (clamped to
    /// 1..=99).
    pub fn from_quality(quality: u8) -> Self {
        let (luma, chroma) = scale_default_tables(quality);
        Self::Dual(luma, chroma)
    }

    /// Splits raw in-band table bytes into one or two 64-entry tables.
    ///
    /// # Errors
    /// [`RtpJpegError::UnsupportedFormat`] for any length other than 64 or
    /// 128 bytes (16-bit table entries are not supported).
    pub fn from_inband(data: &[u8]) -> Result<Self, RtpJpegError> {
        match data.len() {
            QUANTIZATION_TABLE_LENGTH_BYTES => {
                let mut table = [0u8; QUANTIZATION_TABLE_LENGTH_BYTES];
                table.copy_from_slice(data);
                Ok(Self::Single(table))
            }
            n if n == 2 * QUANTIZATION_TABLE_LENGTH_BYTES => {
                let mut luma = [0u8; QUANTIZATION_TABLE_LENGTH_BYTES];
                let mut chroma = [0u8; QUANTIZATION_TABLE_LENGTH_BYTES];
                luma.copy_from_slice(&data[..QUANTIZATION_TABLE_LENGTH_BYTES]);
                chroma.copy_from_slice(&data[QUANTIZATION_TABLE_LENGTH_BYTES..]);
                Ok(Self::Dual(luma, chroma))
            }
            n => Err(RtpJpegError::UnsupportedFormat {
                field_name: "quantization table length".to_string(),
                value: n as u32,
            }),
        }
    }

    /// Resolves the tables for a frame from its offset-0 payload header:
    /// the in-band bytes when Q >= 128, the scaled defaults otherwise.
    ///
    /// # Errors
    /// [`RtpJpegError::UnsupportedFormat`] if the in-band table bytes have an
    /// unexpected length, including the empty table of a header that was not
    /// the frame's first packet.
    pub fn for_frame(header: &JpegRtpHeader) -> Result<Self, RtpJpegError> {
        if header.q >= Q_TABLE_INBAND_MINIMUM {
            Self::from_inband(&header.qtable)
        } else {
            Ok(Self::from_quality(header.q))
        }
    }

    fn tables(&self) -> [Option<&[u8; QUANTIZATION_TABLE_LENGTH_BYTES]>; 2] {
        match self {
            Self::Single(table) => [Some(table), None],
            Self::Dual(luma, chroma) => [Some(luma), Some(chroma)],
        }
    }

    fn count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Dual(_, _) => 2,
        }
    }
}

fn put_marker(writer: &mut ByteWriter, marker: JpegMarker) {
    writer.put_u8(0xFF);
    writer.put_u8(marker as u8);
}

/// Writes one DHT sub-table and returns its size in bytes.
fn put_huffman_table(writer: &mut ByteWriter, spec: &HuffmanSpec) -> usize {
    writer.put_u8((spec.class << 4) | spec.id);
    let mut symbol_count = 0usize;
    for length in 1..=16 {
        symbol_count += usize::from(spec.bits[length]);
        writer.put_u8(spec.bits[length]);
    }
    writer.put_slice(&spec.values[..symbol_count]);
    symbol_count + 17
}

/// Synthesizes the JFIF preamble (SOI through SOS) for one frame.
///
/// `width_blocks` and `height_blocks` are the wire-format dimensions in
/// 8-pixel units. A DRI segment is emitted iff `restart_interval` is
/// supplied. The frame is written as baseline 4:2:0: luminance sampling 2x2,
/// chrominance 1x1, with the chrominance quantizer selector pointing at
/// table 1 only when two tables were supplied.
///
/// The returned bytes must be immediately followed by the frame's
/// entropy-coded scan data (fragments concatenated in ascending offset
/// order) to form a decodable image.
pub fn synthesize_jfif_header(
    width_blocks: u8,
    height_blocks: u8,
    tables: &QuantizationTables,
    restart_interval: Option<u16>,
) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(640);

    let width_pixels = u16::from(width_blocks) * PIXELS_PER_BLOCK;
    let height_pixels = u16::from(height_blocks) * PIXELS_PER_BLOCK;
    // Chrominance components reuse table 0 for single-table streams.
    let chroma_table_id = if tables.count() == 2 { 1u8 } else { 0u8 };

    put_marker(&mut writer, JpegMarker::Soi);

    // APP0, 16-byte JFIF segment, no thumbnail.
    put_marker(&mut writer, JpegMarker::App0);
    writer.put_be16(16);
    writer.put_slice(b"JFIF\0");
    writer.put_be16(0x0201); // version
    writer.put_u8(0); // aspect-ratio density units
    writer.put_be16(1); // x density
    writer.put_be16(1); // y density
    writer.put_u8(0); // thumbnail width
    writer.put_u8(0); // thumbnail height

    if let Some(interval) = restart_interval {
        put_marker(&mut writer, JpegMarker::Dri);
        writer.put_be16(4);
        writer.put_be16(interval);
    }

    // DQT, one 65-byte entry per table, coefficients in zig-zag order.
    put_marker(&mut writer, JpegMarker::Dqt);
    writer.put_be16((2 + tables.count() * (1 + QUANTIZATION_TABLE_LENGTH_BYTES)) as u16);
    for (id, table) in tables.tables().into_iter().flatten().enumerate() {
        writer.put_u8(id as u8);
        writer.put_slice(table);
    }

    // DHT, the four fixed tables behind one summed length prefix.
    put_marker(&mut writer, JpegMarker::Dht);
    let dht_length_pos = writer.len();
    writer.put_be16(0);
    let mut dht_size = 2usize;
    for spec in STANDARD_SPECS {
        dht_size += put_huffman_table(&mut writer, spec);
    }
    writer.patch_be16(dht_length_pos, dht_size as u16);

    // SOF0, baseline, three components, 4:2:0 sampling.
    put_marker(&mut writer, JpegMarker::Sof0);
    writer.put_be16(17);
    writer.put_u8(JPEG_SAMPLE_PRECISION_BITS);
    writer.put_be16(height_pixels);
    writer.put_be16(width_pixels);
    writer.put_u8(3);
    writer.put_u8(1); // Y
    writer.put_u8((2 << 4) | 2);
    writer.put_u8(0);
    writer.put_u8(2); // Cb
    writer.put_u8((1 << 4) | 1);
    writer.put_u8(chroma_table_id);
    writer.put_u8(3); // Cr
    writer.put_u8((1 << 4) | 1);
    writer.put_u8(chroma_table_id);

    // SOS, fixed three-component scan header.
    put_marker(&mut writer, JpegMarker::Sos);
    writer.put_be16(12);
    writer.put_u8(3);
    writer.put_u8(1);
    writer.put_u8(0x00); // Y: DC table 0, AC table 0
    writer.put_u8(2);
    writer.put_u8(0x11); // Cb: DC table 1, AC table 1
    writer.put_u8(3);
    writer.put_u8(0x11); // Cr: DC table 1, AC table 1
    writer.put_u8(0); // spectral selection start
    writer.put_u8(63); // spectral selection end
    writer.put_u8(0); // successive approximation

    writer.into_vec()
}

/// The two-byte EOI marker that closes an assembled frame.
pub fn end_of_image() -> [u8; 2] {
    [0xFF, JpegMarker::Eoi as u8]
}
