// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire cursor for reading Protobuf-encoded data.
//!
//! Reads varints, fixed-width values, and length-prefixed runs from a
//! borrowed byte slice with bounds checking. Nested decodes borrow
//! sub-slices of the same buffer; nothing is copied and no ownership moves.

use crate::core::error::{CodecError, Result};

/// Maximum encoded size of a varint (64 payload bits in 7-bit groups).
const MAX_VARINT_BYTES: usize = 10;

/// Wire type of a tag, the low three bits of the tag varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    /// Base-128 varint
    Varint,
    /// 8-byte little-endian value
    Fixed64,
    /// Length-prefixed byte run
    LengthDelimited,
    /// Deprecated group start marker
    StartGroup,
    /// Deprecated group end marker
    EndGroup,
    /// 4-byte little-endian value
    Fixed32,
}

impl WireType {
    /// Decode the wire-type bits of a tag.
    pub fn from_tag_bits(bits: u64) -> Result<Self> {
        match bits {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(CodecError::parse("wire type", format!("unknown: {other}"))),
        }
    }
}

/// Cursor over a Protobuf wire-format buffer.
///
/// Tracks the current read position; every read is bounds-checked and a
/// short read surfaces as [`CodecError::Truncated`]. Running out of bytes
/// exactly at a tag boundary is not an error — the decoder checks
/// [`WireCursor::is_empty`] before each tag read and treats exhaustion as
/// the normal end of the message.
pub struct WireCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> WireCursor<'a> {
    /// Create a cursor over a full message buffer or a nested sub-slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Check whether all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Current read position in the buffer.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Read one base-128 varint.
    pub fn read_varint(&mut self) -> Result<u64> {
        let mut result: u64 = 0;
        let mut shift = 0u32;
        let start = self.offset;

        loop {
            if self.offset >= self.data.len() {
                return Err(CodecError::truncated(1, 0, self.offset));
            }
            if self.offset - start >= MAX_VARINT_BYTES {
                return Err(CodecError::parse("varint", "overflow"));
            }

            let byte = self.data[self.offset];
            self.offset += 1;

            result |= ((byte & 0x7F) as u64) << shift;
            shift += 7;

            if byte & 0x80 == 0 {
                break;
            }
        }

        Ok(result)
    }

    /// Read one tag, split into field number and wire type.
    pub fn read_tag(&mut self) -> Result<(u32, WireType)> {
        let tag = self.read_varint()?;
        let wire_type = WireType::from_tag_bits(tag & 0x07)?;
        Ok(((tag >> 3) as u32, wire_type))
    }

    /// Read a 4-byte little-endian value.
    pub fn read_fixed32(&mut self) -> Result<u32> {
        let bytes = self.read_exact(4)?;
        // read_exact guarantees the length
        let array: [u8; 4] = bytes.try_into().map_err(|_| {
            CodecError::Other("fixed32 slice length mismatch".to_string())
        })?;
        Ok(u32::from_le_bytes(array))
    }

    /// Read an 8-byte little-endian value.
    pub fn read_fixed64(&mut self) -> Result<u64> {
        let bytes = self.read_exact(8)?;
        let array: [u8; 8] = bytes.try_into().map_err(|_| {
            CodecError::Other("fixed64 slice length mismatch".to_string())
        })?;
        Ok(u64::from_le_bytes(array))
    }

    /// Read a length-prefixed run, returning the payload as a borrowed slice.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.read_varint()? as usize;
        self.read_exact(len)
    }

    /// Read exactly `len` bytes.
    fn read_exact(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::truncated(len, self.remaining(), self.offset));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }
}
