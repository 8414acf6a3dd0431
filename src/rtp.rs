//! Generic 12-byte RTP header serialization and deserialization (RFC 3550).
//!
//! Only the fixed part of the header is modeled; the CSRC list and header
//! extensions are outside the RTP/MJPEG subset this library handles, so the
//! CSRC count is carried as a plain field and assumed to be zero by callers.

use serde::{Deserialize, Serialize};

use crate::constants::{RTP_HEADER_LENGTH_BYTES, RTP_VERSION};
use crate::cursor::{ByteCursor, ByteWriter};
use crate::error::RtpJpegError;

/// Decoded fixed RTP header.
///
/// Field extraction and packing are pure bit masking; no semantic validation
/// of version or payload type is performed here. Callers enforcing a version
/// policy check [`RtpHeader::version`] themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtpHeader {
    /// Protocol version, 2 bits. Always 2 on the wire today.
    pub version: u8,
    /// Padding flag, 1 bit.
    pub padding: bool,
    /// Header extension flag, 1 bit.
    pub extension: bool,
    /// CSRC count, 4 bits. The list itself is not modeled.
    pub csrc_count: u8,
    /// Marker bit, 1 bit. Set on the last packet of a video frame.
    pub marker: bool,
    /// Payload type, 7 bits.
    pub payload_type: u8,
    /// Sequence number, wraps modulo 65536.
    pub sequence_number: u16,
    /// Media clock timestamp.
    pub timestamp: u32,
    /// Synchronization source identifier.
    pub ssrc: u32,
}

impl Default for RtpHeader {
    fn default() -> Self {
        Self {
            version: RTP_VERSION,
            padding: false,
            extension: false,
            csrc_count: 0,
            marker: false,
            payload_type: 0,
            sequence_number: 0,
            timestamp: 0,
            ssrc: 0,
        }
    }
}

impl RtpHeader {
    /// Packs the header into its 12-byte network-byte-order layout.
    pub fn serialize(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(RTP_HEADER_LENGTH_BYTES);
        writer.put_u8(
            (self.version << 6)
                | (u8::from(self.padding) << 5)
                | (u8::from(self.extension) << 4)
                | (self.csrc_count & 0x0F),
        );
        writer.put_u8((u8::from(self.marker) << 7) | (self.payload_type & 0x7F));
        writer.put_be16(self.sequence_number);
        writer.put_be32(self.timestamp);
        writer.put_be32(self.ssrc);
        writer.into_vec()
    }

    /// Decodes the fixed RTP header from `buf` starting at `offset`.
    ///
    /// # Errors
    /// [`RtpJpegError::TruncatedInput`] if fewer than 12 bytes remain.
    pub fn deserialize(buf: &[u8], offset: usize) -> Result<Self, RtpJpegError> {
        let mut cursor = ByteCursor::new(buf, offset);
        cursor.require(RTP_HEADER_LENGTH_BYTES, "RTP header")?;

        let first = cursor.read_u8("RTP header")?;
        let second = cursor.read_u8("RTP header")?;
        Ok(Self {
            version: first >> 6,
            padding: (first >> 5) & 0x01 == 1,
            extension: (first >> 4) & 0x01 == 1,
            csrc_count: first & 0x0F,
            marker: (second >> 7) & 0x01 == 1,
            payload_type: second & 0x7F,
            sequence_number: cursor.read_be16("RTP header")?,
            timestamp: cursor.read_be32("RTP header")?,
            ssrc: cursor.read_be32("RTP header")?,
        })
    }
}
