//! Bit-level reading over an immutable buffer.

use thiserror::Error;

/// A read ran past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Requested {width} bits at offset {position} of a {len}-bit buffer.")]
pub struct Underrun {
    /// Bit offset at which the read was attempted.
    pub position: usize,
    /// Number of bits requested.
    pub width: u32,
    /// Total number of bits in the buffer.
    pub len: usize,
}

/// A cursor reading most-significant-bit-first unsigned integers from a byte
/// buffer.
///
/// Bits are numbered globally across byte boundaries: bit 0 is the most
/// significant bit of byte 0.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor positioned at the first bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current bit offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total number of bits in the buffer.
    pub fn len(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Whether the buffer holds no bits at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bits not yet consumed.
    pub fn remaining(&self) -> usize {
        self.len() - self.pos
    }

    /// Read the next `width` bits as an unsigned integer, advancing the
    /// cursor.
    ///
    /// Fails without consuming anything if fewer than `width` bits remain.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not in `1..=32`.
    pub fn read(&mut self, width: u32) -> Result<u32, Underrun> {
        assert!(
            (1..=32).contains(&width),
            "bit width {width} is outside 1..=32"
        );

        let end = self.pos + width as usize;

        if end > self.len() {
            Err(Underrun {
                position: self.pos,
                width,
                len: self.len(),
            })?;
        }

        let mut value: u64 = 0;
        let mut pos = self.pos;

        while pos < end {
            let offset = pos % 8;
            let take = (8 - offset).min(end - pos);

            let byte = self.bytes[pos / 8] >> (8 - offset - take);
            let mask = ((1u16 << take) - 1) as u8;

            value = (value << take) | u64::from(byte & mask);
            pos += take;
        }

        self.pos = end;

        Ok(value as u32)
    }
}
