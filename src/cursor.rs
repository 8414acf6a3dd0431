//! Bounds-checked big-endian byte readers and writers.
//!
//! [`ByteCursor`] wraps an input buffer plus a start offset and fails with
//! [`RtpJpegError::TruncatedInput`] instead of reading out of bounds; every
//! error carries the exact required vs. available byte counts. [`ByteWriter`]
//! appends network-byte-order integers to an owned buffer and supports
//! patching a previously written 16-bit length field, which the JFIF
//! synthesizer uses for segment length prefixes.

use bytes::BufMut;

use crate::error::RtpJpegError;

/// Read cursor over a borrowed byte buffer. Never mutates the input.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor over `buf` starting at `offset`.
    ///
    /// An offset past the end of the buffer is allowed; the first read will
    /// report zero available bytes.
    pub fn new(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, pos: offset }
    }

    /// Number of unread bytes from the current position.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Current absolute position within the underlying buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Fails with `TruncatedInput` unless at least `needed` bytes remain.
    pub fn require(&self, needed: usize, context: &str) -> Result<(), RtpJpegError> {
        let got = self.remaining();
        if got < needed {
            return Err(RtpJpegError::TruncatedInput {
                needed,
                got,
                context: context.to_string(),
            });
        }
        Ok(())
    }

    /// Reads one byte.
    pub fn read_u8(&mut self, context: &str) -> Result<u8, RtpJpegError> {
        self.require(1, context)?;
        let value = self.buf[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a 16-bit big-endian integer.
    pub fn read_be16(&mut self, context: &str) -> Result<u16, RtpJpegError> {
        self.require(2, context)?;
        let value = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    /// Reads a 24-bit big-endian integer into the low bits of a `u32`.
    pub fn read_be24(&mut self, context: &str) -> Result<u32, RtpJpegError> {
        self.require(3, context)?;
        let value = (u32::from(self.buf[self.pos]) << 16)
            | (u32::from(self.buf[self.pos + 1]) << 8)
            | u32::from(self.buf[self.pos + 2]);
        self.pos += 3;
        Ok(value)
    }

    /// Reads a 32-bit big-endian integer.
    pub fn read_be32(&mut self, context: &str) -> Result<u32, RtpJpegError> {
        self.require(4, context)?;
        let value = u32::from_be_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
            self.buf[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(value)
    }

    /// Reads `len` raw bytes as a sub-slice of the input buffer.
    pub fn read_slice(&mut self, len: usize, context: &str) -> Result<&'a [u8], RtpJpegError> {
        self.require(len, context)?;
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

/// Append-only big-endian writer over an owned buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with `capacity` bytes pre-allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Appends one byte.
    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Appends a 16-bit big-endian integer.
    #[inline]
    pub fn put_be16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    /// Appends the low 24 bits of `value` big-endian.
    #[inline]
    pub fn put_be24(&mut self, value: u32) {
        self.buf.put_uint(u64::from(value) & 0x00FF_FFFF, 3);
    }

    /// Appends a 32-bit big-endian integer.
    #[inline]
    pub fn put_be32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    /// Appends raw bytes.
    #[inline]
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Overwrites a previously written 16-bit big-endian field at `position`.
    ///
    /// # Panics
    /// Panics if `position + 2` exceeds the bytes written so far.
    pub fn patch_be16(&mut self, position: usize, value: u16) {
        self.buf[position..position + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// Consumes the writer and returns the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reads_big_endian_fields() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];
        let mut cursor = ByteCursor::new(&data, 0);
        assert_eq!(cursor.read_u8("test").unwrap(), 0x01);
        assert_eq!(cursor.read_be16("test").unwrap(), 0x0203);
        assert_eq!(cursor.read_be24("test").unwrap(), 0x040506);
        assert_eq!(cursor.read_be32("test").unwrap(), 0x0708090A);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn cursor_respects_start_offset() {
        let data = [0xFF, 0xFF, 0x12, 0x34];
        let mut cursor = ByteCursor::new(&data, 2);
        assert_eq!(cursor.read_be16("test").unwrap(), 0x1234);
    }

    #[test]
    fn cursor_read_past_end_reports_exact_counts() {
        let data = [0x01, 0x02];
        let mut cursor = ByteCursor::new(&data, 1);
        let err = cursor.read_be32("sample field").unwrap_err();
        assert_eq!(
            err,
            RtpJpegError::TruncatedInput {
                needed: 4,
                got: 1,
                context: "sample field".to_string(),
            }
        );
        // A failed read must not advance the cursor.
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn cursor_offset_past_end_has_zero_remaining() {
        let data = [0x01];
        let cursor = ByteCursor::new(&data, 5);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.require(1, "test").is_err());
    }

    #[test]
    fn cursor_read_slice_borrows_input() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut cursor = ByteCursor::new(&data, 1);
        assert_eq!(cursor.read_slice(2, "test").unwrap(), &[0x02, 0x03]);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn writer_appends_big_endian_fields() {
        let mut writer = ByteWriter::new();
        writer.put_u8(0x01);
        writer.put_be16(0x0203);
        writer.put_be24(0x040506);
        writer.put_be32(0x0708090A);
        assert_eq!(
            writer.into_vec(),
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]
        );
    }

    #[test]
    fn writer_patches_length_prefix() {
        let mut writer = ByteWriter::new();
        writer.put_u8(0xFF);
        let length_pos = writer.len();
        writer.put_be16(0);
        writer.put_slice(&[0xAA, 0xBB, 0xCC]);
        writer.patch_be16(length_pos, 5);
        assert_eq!(writer.into_vec(), vec![0xFF, 0x00, 0x05, 0xAA, 0xBB, 0xCC]);
    }
}
