//! RFC 2435 RTP/JPEG payload header deserialization.
//!
//! The main payload header is 8 bytes:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | Type-specific |              Fragment Offset                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      Type     |       Q       |     Width     |     Height    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The first packet of a frame (fragment offset 0) carries an additional
//! quantization sub-header when Q is 128..=255:
//!
//! ```text
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |      MBZ      |   Precision   |             Length            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Quantization Table Data                    |
//! |                              ...                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Restart-marker mode (Type 64..=127) and non-default type specifiers are
//! rejected, not implemented.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::constants::{
    JPEG_DEFAULT_TYPE_SPECIFIER, JPEG_MIN_HEADER_LENGTH_BYTES,
    JPEG_QUANTIZATION_HEADER_LENGTH_BYTES, JPEG_TYPE_RESTART_MARKER_END,
    JPEG_TYPE_RESTART_MARKER_START, PIXELS_PER_BLOCK, Q_TABLE_INBAND_MINIMUM,
};
use crate::cursor::ByteCursor;
use crate::error::RtpJpegError;

/// Decoded RFC 2435 JPEG payload header, with the optional quantization
/// sub-header folded in.
///
/// The in-band table bytes are copied out of the input buffer, so the header
/// value outlives the packet it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JpegRtpHeader {
    /// Type-specific field. Must be zero for the supported subset.
    pub type_specifier: u8,
    /// Byte offset of this packet's scan data within the frame (24 bits on
    /// the wire).
    pub fragment_offset: u32,
    /// JPEG decoder parameter id. 64..=127 would mean restart markers.
    pub jpeg_type: u8,
    /// Quantization indicator: 1..=99 selects a scaled default table,
    /// 128..=255 an in-band table.
    pub q: u8,
    /// Frame width in 8-pixel blocks.
    pub width: u8,
    /// Frame height in 8-pixel blocks.
    pub height: u8,

    /// Must-be-zero byte from the quantization sub-header.
    pub mbz: u8,
    /// Table precision bits; 0 means 8-bit entries throughout.
    pub precision: u8,
    /// Length in bytes of the in-band quantization table data.
    pub length: u16,
    /// In-band quantization table bytes, empty unless this is a frame's
    /// offset-0 packet with Q >= 128.
    pub qtable: Bytes,
}

impl JpegRtpHeader {
    /// Decodes the payload header from `buf` starting at `offset`.
    ///
    /// Packets at a non-zero fragment offset never repeat the in-band table,
    /// even with Q >= 128; the table established by the frame's offset-0
    /// packet applies and `qtable` stays empty. That is the wire format's
    /// economy, not an error.
    ///
    /// # Errors
    /// - [`RtpJpegError::TruncatedInput`] if the main header, the
    ///   quantization sub-header, or the announced table data is cut short.
    /// - [`RtpJpegError::UnsupportedFormat`] for a non-default type specifier
    ///   or a restart-marker Type.
    pub fn deserialize(buf: &[u8], offset: usize) -> Result<Self, RtpJpegError> {
        let mut cursor = ByteCursor::new(buf, offset);
        cursor.require(JPEG_MIN_HEADER_LENGTH_BYTES, "JPEG payload header")?;

        let type_specifier = cursor.read_u8("JPEG payload header")?;
        let fragment_offset = cursor.read_be24("JPEG payload header")?;
        let jpeg_type = cursor.read_u8("JPEG payload header")?;
        let q = cursor.read_u8("JPEG payload header")?;
        let width = cursor.read_u8("JPEG payload header")?;
        let height = cursor.read_u8("JPEG payload header")?;

        if type_specifier != JPEG_DEFAULT_TYPE_SPECIFIER {
            return Err(RtpJpegError::UnsupportedFormat {
                field_name: "type specifier".to_string(),
                value: u32::from(type_specifier),
            });
        }
        if (JPEG_TYPE_RESTART_MARKER_START..=JPEG_TYPE_RESTART_MARKER_END).contains(&jpeg_type) {
            return Err(RtpJpegError::UnsupportedFormat {
                field_name: "type".to_string(),
                value: u32::from(jpeg_type),
            });
        }

        let mut header = Self {
            type_specifier,
            fragment_offset,
            jpeg_type,
            q,
            width,
            height,
            mbz: 0,
            precision: 0,
            length: 0,
            qtable: Bytes::new(),
        };

        // The in-band table is sent exactly once per frame, in the first
        // packet, to save bandwidth.
        if fragment_offset == 0 && q >= Q_TABLE_INBAND_MINIMUM {
            cursor.require(
                JPEG_QUANTIZATION_HEADER_LENGTH_BYTES,
                "JPEG quantization sub-header",
            )?;
            header.mbz = cursor.read_u8("JPEG quantization sub-header")?;
            header.precision = cursor.read_u8("JPEG quantization sub-header")?;
            header.length = cursor.read_be16("JPEG quantization sub-header")?;

            if header.length > 0 {
                let table = cursor.read_slice(
                    usize::from(header.length),
                    "JPEG quantization table data",
                )?;
                header.qtable = Bytes::copy_from_slice(table);
            }
        }

        Ok(header)
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width_pixels(&self) -> u16 {
        u16::from(self.width) * PIXELS_PER_BLOCK
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height_pixels(&self) -> u16 {
        u16::from(self.height) * PIXELS_PER_BLOCK
    }

    /// Returns `true` if this packet carried an in-band quantization table.
    #[inline]
    pub fn has_inband_qtable(&self) -> bool {
        self.fragment_offset == 0 && self.q >= Q_TABLE_INBAND_MINIMUM
    }

    /// Offset of the entropy-coded scan data relative to the start of the
    /// payload header.
    pub fn scan_data_offset(&self) -> usize {
        if self.has_inband_qtable() {
            JPEG_MIN_HEADER_LENGTH_BYTES
                + JPEG_QUANTIZATION_HEADER_LENGTH_BYTES
                + usize::from(self.length)
        } else {
            JPEG_MIN_HEADER_LENGTH_BYTES
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_header(offset: u32, q: u8) -> Vec<u8> {
        let mut buf = vec![0x00]; // default type specifier
        buf.extend_from_slice(&offset.to_be_bytes()[1..]); // 24-bit offset
        buf.extend_from_slice(&[1, q, 40, 30]); // type, Q, width, height
        buf
    }

    #[test]
    fn deserialize_minimal_header() {
        let buf = main_header(4000, 80);
        let header = JpegRtpHeader::deserialize(&buf, 0).unwrap();
        assert_eq!(header.type_specifier, 0);
        assert_eq!(header.fragment_offset, 4000);
        assert_eq!(header.jpeg_type, 1);
        assert_eq!(header.q, 80);
        assert_eq!(header.width_pixels(), 320);
        assert_eq!(header.height_pixels(), 240);
        assert!(header.qtable.is_empty());
        assert_eq!(header.scan_data_offset(), 8);
    }

    #[test]
    fn deserialize_with_inband_qtable() {
        let mut buf = main_header(0, 200);
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x80]); // MBZ, precision, length 128
        buf.extend((0u8..128).map(|i| i.wrapping_mul(3)));
        buf.extend_from_slice(&[0xEE, 0xEE]); // trailing scan data

        let header = JpegRtpHeader::deserialize(&buf, 0).unwrap();
        assert!(header.has_inband_qtable());
        assert_eq!(header.length, 128);
        assert_eq!(header.qtable.len(), 128);
        assert_eq!(header.qtable[1], 3);
        assert_eq!(header.scan_data_offset(), 8 + 4 + 128);
        assert_eq!(buf[header.scan_data_offset()], 0xEE);
    }

    #[test]
    fn nonzero_offset_ignores_inband_q_range() {
        // Q >= 128 at a non-zero offset means "table inherited from the
        // frame's first packet"; trailing bytes are scan data, not a table.
        let mut buf = main_header(4000, 200);
        buf.extend_from_slice(&[0xAB; 32]);
        let header = JpegRtpHeader::deserialize(&buf, 0).unwrap();
        assert!(!header.has_inband_qtable());
        assert!(header.qtable.is_empty());
        assert_eq!(header.length, 0);
        assert_eq!(header.scan_data_offset(), 8);
    }

    #[test]
    fn zero_length_qtable_stays_empty() {
        let mut buf = main_header(0, 255);
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        let header = JpegRtpHeader::deserialize(&buf, 0).unwrap();
        assert!(header.has_inband_qtable());
        assert!(header.qtable.is_empty());
        assert_eq!(header.scan_data_offset(), 12);
    }

    #[test]
    fn short_main_header_fails_with_counts() {
        let err = JpegRtpHeader::deserialize(&[0x00, 0x00, 0x00], 0).unwrap_err();
        assert_eq!(
            err,
            RtpJpegError::TruncatedInput {
                needed: 8,
                got: 3,
                context: "JPEG payload header".to_string(),
            }
        );
    }

    #[test]
    fn short_quantization_subheader_fails() {
        let mut buf = main_header(0, 128);
        buf.extend_from_slice(&[0x00, 0x00]); // only 2 of 4 sub-header bytes
        let err = JpegRtpHeader::deserialize(&buf, 0).unwrap_err();
        assert_eq!(
            err,
            RtpJpegError::TruncatedInput {
                needed: 4,
                got: 2,
                context: "JPEG quantization sub-header".to_string(),
            }
        );
    }

    #[test]
    fn short_qtable_data_fails() {
        let mut buf = main_header(0, 128);
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x80]); // announces 128 bytes
        buf.extend_from_slice(&[0x11; 40]); // delivers 40
        let err = JpegRtpHeader::deserialize(&buf, 0).unwrap_err();
        assert_eq!(
            err,
            RtpJpegError::TruncatedInput {
                needed: 128,
                got: 40,
                context: "JPEG quantization table data".to_string(),
            }
        );
    }

    #[test]
    fn non_default_type_specifier_rejected() {
        let mut buf = main_header(0, 80);
        buf[0] = 1;
        let err = JpegRtpHeader::deserialize(&buf, 0).unwrap_err();
        assert_eq!(
            err,
            RtpJpegError::UnsupportedFormat {
                field_name: "type specifier".to_string(),
                value: 1,
            }
        );
    }

    #[test]
    fn restart_marker_types_rejected() {
        for jpeg_type in [64u8, 100, 127] {
            let mut buf = main_header(0, 80);
            buf[4] = jpeg_type;
            let err = JpegRtpHeader::deserialize(&buf, 0).unwrap_err();
            assert_eq!(
                err,
                RtpJpegError::UnsupportedFormat {
                    field_name: "type".to_string(),
                    value: u32::from(jpeg_type),
                }
            );
        }
        // Types just outside the restart range decode fine.
        for jpeg_type in [63u8, 128] {
            let mut buf = main_header(0, 80);
            buf[4] = jpeg_type;
            assert!(JpegRtpHeader::deserialize(&buf, 0).is_ok());
        }
    }

    #[test]
    fn deserialize_respects_start_offset() {
        let mut buf = vec![0xFF; 3];
        buf.extend(main_header(16, 50));
        let header = JpegRtpHeader::deserialize(&buf, 3).unwrap();
        assert_eq!(header.fragment_offset, 16);
    }
}
