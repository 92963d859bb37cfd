use std::ops::Range;

use super::error::Truncated;

/// Read-only view over the unconsumed tail of a frame.
///
/// Offsets passed to the `read_*` methods are relative to the start of the
/// view. The `take*` methods consume a prefix and hand back a new cursor
/// over what is left; a cursor is never advanced in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCursor<'a> {
    bytes: &'a [u8],
}

impl<'a> FrameCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn require_len(&self, needed: usize) -> Result<(), Truncated> {
        if self.bytes.len() < needed {
            return Err(Truncated {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, Truncated> {
        self.bytes.get(offset).copied().ok_or(Truncated {
            needed: offset + 1,
            actual: self.bytes.len(),
        })
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], Truncated> {
        self.bytes.get(range.clone()).ok_or(Truncated {
            needed: range.end,
            actual: self.bytes.len(),
        })
    }

    pub fn read_u16_le(&self, range: Range<usize>) -> Result<u16, Truncated> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(Truncated {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Like [`read_slice`](Self::read_slice) but clamps the range to the
    /// bytes actually present.
    pub fn read_up_to(&self, range: Range<usize>) -> &'a [u8] {
        let end = range.end.min(self.bytes.len());
        let start = range.start.min(end);
        &self.bytes[start..end]
    }

    pub fn take(self, count: usize) -> Result<(&'a [u8], FrameCursor<'a>), Truncated> {
        self.require_len(count)?;
        let (head, tail) = self.bytes.split_at(count);
        Ok((head, FrameCursor::new(tail)))
    }

    pub fn take_u8(self) -> Result<(u8, FrameCursor<'a>), Truncated> {
        let (head, rest) = self.take(1)?;
        Ok((head[0], rest))
    }

    pub fn take_array<const N: usize>(self) -> Result<(&'a [u8; N], FrameCursor<'a>), Truncated> {
        let (head, rest) = self.take(N)?;
        let array: &'a [u8; N] = head.try_into().map_err(|_| Truncated {
            needed: N,
            actual: head.len(),
        })?;
        Ok((array, rest))
    }
}
