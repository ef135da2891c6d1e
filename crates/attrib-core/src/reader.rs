//! Little-endian word reader over an immutable byte buffer.
//!
//! The capture client writes everything through a 16-bit view, so the
//! reader's unit of work is the word. A `u32` is two words combined as
//! `low + (high << 16)`.

use crate::error::ReadError;
use crate::WORD_BYTES;

/// Assemble a `u32` from its low and high 16-bit halves.
pub fn combine_words(low: u16, high: u16) -> u32 {
    u32::from(low) + (u32::from(high) << 16)
}

/// A forward-only cursor over a byte slice.
///
/// `base` is the absolute offset of `data[0]` within the whole input, so
/// sub-readers carved out for a buffer still report file offsets in
/// their errors.
#[derive(Clone, Debug)]
pub struct WordReader<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> WordReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Create a reader whose offsets are reported relative to `base`.
    pub fn with_base(data: &'a [u8], base: usize) -> Self {
        Self { data, pos: 0, base }
    }

    /// Position within this reader's slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Absolute offset of the cursor within the original input.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Total length of this reader's slice.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the cursor and the end of the slice.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// `true` once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow exactly `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        if self.remaining() < n {
            return Err(ReadError::TruncatedInput {
                offset: self.offset(),
                needed: n,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read one little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        let bytes = self.take(WORD_BYTES)?;
        Ok(u16::from(bytes[0]) + (u16::from(bytes[1]) << 8))
    }

    /// Read a `u32` stored as two words, low word first.
    ///
    /// Fails without consuming anything if fewer than four bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        if self.remaining() < 2 * WORD_BYTES {
            return Err(ReadError::TruncatedInput {
                offset: self.offset(),
                needed: 2 * WORD_BYTES,
                available: self.remaining(),
            });
        }
        let low = self.read_u16()?;
        let high = self.read_u16()?;
        Ok(combine_words(low, high))
    }

    /// Read `count` consecutive words.
    pub fn read_words(&mut self, count: usize) -> Result<Vec<u16>, ReadError> {
        let bytes = self.take(count * WORD_BYTES)?;
        Ok(bytes
            .chunks_exact(WORD_BYTES)
            .map(|pair| u16::from(pair[0]) + (u16::from(pair[1]) << 8))
            .collect())
    }

    /// Advance past `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<(), ReadError> {
        self.take(n).map(|_| ())
    }

    /// Carve out a reader over the next `n` bytes (or fewer, if the input
    /// ends first) without advancing this one.
    ///
    /// The sub-reader is clipped to the available input so a buffer whose
    /// declared length overruns the file can still be decoded up to the
    /// point where the bytes stop.
    pub fn window(&self, n: usize) -> WordReader<'a> {
        let end = self.pos.saturating_add(n).min(self.data.len());
        WordReader::with_base(&self.data[self.pos..end], self.offset())
    }

    /// Reposition the cursor within this reader's slice.
    ///
    /// Seeking past the end parks the cursor at the end.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reads_little_endian_words() {
        let data = [0x34, 0x12, 0xff, 0x00];
        let mut r = WordReader::new(&data);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.read_u16().unwrap(), 0x00ff);
        assert!(r.is_exhausted());
    }

    #[test]
    fn u32_combines_low_word_first() {
        // low = 0x0001, high = 0x0002 -> 0x0002_0001
        let data = [0x01, 0x00, 0x02, 0x00];
        let mut r = WordReader::new(&data);
        assert_eq!(r.read_u32().unwrap(), 0x0002_0001);
    }

    #[test]
    fn truncated_u16_reports_offset() {
        let data = [0xaa, 0xbb, 0xcc];
        let mut r = WordReader::with_base(&data, 100);
        r.read_u16().unwrap();
        let err = r.read_u16().unwrap_err();
        assert_eq!(
            err,
            ReadError::TruncatedInput {
                offset: 102,
                needed: 2,
                available: 1,
            }
        );
        // A failed read does not move the cursor.
        assert_eq!(r.position(), 2);
    }

    #[test]
    fn truncated_u32_consumes_nothing() {
        let data = [0x01, 0x00, 0x02];
        let mut r = WordReader::new(&data);
        assert!(r.read_u32().is_err());
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn window_is_clipped_to_input() {
        let data = [0u8; 6];
        let mut r = WordReader::new(&data);
        r.skip(2).unwrap();
        let w = r.window(100);
        assert_eq!(w.len(), 4);
        assert_eq!(w.offset(), 2);
        // The parent did not move.
        assert_eq!(r.position(), 2);
    }

    #[test]
    fn seek_parks_at_end() {
        let data = [0u8; 4];
        let mut r = WordReader::new(&data);
        r.seek(10);
        assert!(r.is_exhausted());
        assert!(r.read_u16().is_err());
    }

    proptest! {
        #[test]
        fn u16_matches_from_le_bytes(v in any::<u16>()) {
            let bytes = v.to_le_bytes();
            let got = WordReader::new(&bytes).read_u16().unwrap();
            prop_assert_eq!(v, got);
        }

        #[test]
        fn u32_matches_from_le_bytes(v in any::<u32>()) {
            let bytes = v.to_le_bytes();
            let got = WordReader::new(&bytes).read_u32().unwrap();
            prop_assert_eq!(v, got);
        }

        #[test]
        fn read_words_matches_individual_reads(
            words in prop::collection::vec(any::<u16>(), 0..64)
        ) {
            let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
            let got = WordReader::new(&bytes).read_words(words.len()).unwrap();
            prop_assert_eq!(words, got);
        }
    }
}
