//! `rtpjpeg`: RTP/MJPEG header codecs and JFIF synthesis per RFC 2435.
//!
//! This library turns the fragmented, header-only RTP/JPEG payloads produced
//! by IP cameras and conferencing endpoints back into standalone JPEG (JFIF)
//! frames. RFC 2435 deliberately strips the Huffman tables, quantization
//! tables, and frame/scan headers from the wire to save bandwidth; a receiver
//! must regenerate them byte-exactly before a standard decoder can open the
//! frame.
//!
//! ## Core concepts
//!
//! - **[`RtpHeader`]**: the generic 12-byte RTP header (RFC 3550),
//!   serialized and deserialized with pure bit masking.
//! - **[`JpegRtpHeader`]**: the RFC 2435 payload header, including the
//!   optional in-band quantization-table sub-header carried by a frame's
//!   first packet.
//! - **[`QuantizationTables`]** and [`synthesize_jfif_header`]: resolve a
//!   frame's quantization source (in-band bytes or a quality factor) and emit
//!   the SOI..SOS preamble to prepend to the concatenated scan data.
//!
//! Every codec is a pure, stateless transform over caller-owned buffers;
//! socket I/O, fragment reassembly scheduling, and pixel decoding live
//! outside this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use rtpjpeg::{JpegRtpHeader, QuantizationTables, RtpHeader, RtpJpegError};
//! use rtpjpeg::jfif::{end_of_image, synthesize_jfif_header};
//!
//! fn main() -> Result<(), RtpJpegError> {
//!     // A captured packet: RTP header, JPEG payload header, scan data.
//!     let mut packet = RtpHeader {
//!         marker: true, // last (and only) packet of the frame
//!         payload_type: 26,
//!         ..Default::default()
//!     }
//!     .serialize();
//!     packet.extend_from_slice(&[
//!         0, 0, 0, 0, // type specifier, fragment offset 0
//!         1, 80, 40, 30, // Type 1, Q 80, 320x240 in blocks
//!     ]);
//!     packet.extend_from_slice(&[0x12, 0x34, 0x56]); // entropy-coded data
//!
//!     let rtp = RtpHeader::deserialize(&packet, 0)?;
//!     let jpeg = JpegRtpHeader::deserialize(&packet, 12)?;
//!
//!     // First fragment of a frame: synthesize the JFIF preamble once.
//!     let tables = QuantizationTables::for_frame(&jpeg)?;
//!     let mut frame = synthesize_jfif_header(jpeg.width, jpeg.height, &tables, None);
//!     frame.extend_from_slice(&packet[12 + jpeg.scan_data_offset()..]);
//!     if rtp.marker {
//!         frame.extend_from_slice(&end_of_image());
//!     }
//!
//!     assert_eq!(&frame[..2], &[0xFF, 0xD8]); // SOI
//!     assert_eq!(jpeg.width_pixels(), 320);
//!     Ok(())
//! }
//! ```

pub mod constants;
pub mod cursor;
pub mod error;
pub mod huffman;
pub mod jfif;
pub mod payload;
pub mod quant;
pub mod rtp;

pub use error::RtpJpegError;
pub use jfif::{JpegMarker, QuantizationTables, end_of_image, synthesize_jfif_header};
pub use payload::JpegRtpHeader;
pub use rtp::RtpHeader;
