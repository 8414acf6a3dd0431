//! Common test utilities for RTP/MJPEG integration tests.
//!
//! Provides packet construction helpers and a JFIF segment walker used to
//! verify synthesized preambles structurally, the way a strict baseline
//! decoder reads them.

#![allow(dead_code)] // Allow dead code for helpers unused by individual test binaries

use rtpjpeg::RtpHeader;

/// JPEG payload type conventionally used for RTP/MJPEG.
pub const JPEG_PAYLOAD_TYPE: u8 = 26;

/// One parsed JFIF segment: marker code and body (excluding the length
/// prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub marker: u8,
    pub body: Vec<u8>,
}

/// Walks the marker segments of an assembled JPEG buffer.
///
/// Expects SOI first, then length-prefixed segments through SOS; everything
/// after the SOS body is returned as scan data. Panics on any structural
/// violation, which is exactly what the tests want to detect.
pub fn walk_jfif_segments(buf: &[u8]) -> (Vec<Segment>, Vec<u8>) {
    assert_eq!(&buf[..2], &[0xFF, 0xD8], "frame must start with SOI");
    let mut segments = Vec::new();
    let mut pos = 2;
    loop {
        assert_eq!(buf[pos], 0xFF, "expected marker prefix at {pos}");
        let marker = buf[pos + 1];
        let length = usize::from(u16::from_be_bytes([buf[pos + 2], buf[pos + 3]]));
        assert!(length >= 2, "segment length includes its own two bytes");
        let body = buf[pos + 4..pos + 2 + length].to_vec();
        pos += 2 + length;
        segments.push(Segment { marker, body });
        if marker == 0xDA {
            // Scan data runs from here; a trailing EOI stays part of it.
            return (segments, buf[pos..].to_vec());
        }
    }
}

/// Finds the first segment with the given marker code.
pub fn find_segment(segments: &[Segment], marker: u8) -> &Segment {
    segments
        .iter()
        .find(|s| s.marker == marker)
        .unwrap_or_else(|| panic!("no segment with marker 0x{marker:02X}"))
}

/// Builds one complete RTP/MJPEG packet: RTP header, JPEG payload header,
/// optional quantization sub-header, scan data.
pub fn build_packet(
    sequence_number: u16,
    marker: bool,
    fragment_offset: u32,
    q: u8,
    qtable: Option<&[u8]>,
    scan_data: &[u8],
) -> Vec<u8> {
    let mut packet = RtpHeader {
        marker,
        payload_type: JPEG_PAYLOAD_TYPE,
        sequence_number,
        timestamp: 90_000,
        ssrc: 0x1234_5678,
        ..Default::default()
    }
    .serialize();

    packet.push(0); // default type specifier
    packet.extend_from_slice(&fragment_offset.to_be_bytes()[1..]);
    packet.extend_from_slice(&[1, q, 40, 30]); // Type 1, 320x240 in blocks

    if let Some(table) = qtable {
        assert_eq!(fragment_offset, 0, "in-band tables ride the first packet");
        packet.extend_from_slice(&[0, 0]); // MBZ, 8-bit precision
        packet.extend_from_slice(&(table.len() as u16).to_be_bytes());
        packet.extend_from_slice(table);
    }

    packet.extend_from_slice(scan_data);
    packet
}
