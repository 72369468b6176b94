//! MSB-first bit packing across 64-bit words.
//!
//! Command layouts are written most-significant field first, and a field may
//! straddle a word boundary only in the sense that multi-word commands are one
//! long bit string: the writer and reader treat consecutive words as a single
//! big-endian stream.

use super::constants::{WORD_BITS, WORD_BYTES};

/// Returns a mask of the low `width` bits.
#[inline]
pub const fn low_mask(width: u32) -> u64 {
    if width >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Sign-extends the low `width` bits of `value`.
#[inline]
pub const fn sign_extend(value: u64, width: u32) -> i64 {
    if width == 0 {
        return 0;
    }
    if width >= WORD_BITS {
        return value as i64;
    }
    let shift = WORD_BITS - width;
    ((value << shift) as i64) >> shift
}

/// Accumulates fields into a sequence of 64-bit words.
#[derive(Debug, Default)]
pub struct BitWriter {
    words: Vec<u64>,
    acc: u64,
    filled: u32,
}

impl BitWriter {
    /// Creates an empty writer.
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            acc: 0,
            filled: 0,
        }
    }

    /// Appends the low `width` bits of `value`.
    ///
    /// # Arguments
    ///
    /// * `value` - Field value; bits above `width` are ignored.
    /// * `width` - Field width in bits, at most 64.
    pub fn push(&mut self, value: u64, width: u32) {
        let value = value & low_mask(width);
        let mut remaining = width;
        while remaining > 0 {
            let space = WORD_BITS - self.filled;
            let take = remaining.min(space);
            let chunk = (value >> (remaining - take)) & low_mask(take);
            self.acc = if take == WORD_BITS {
                chunk
            } else {
                (self.acc << take) | chunk
            };
            self.filled += take;
            remaining -= take;
            if self.filled == WORD_BITS {
                self.words.push(self.acc);
                self.acc = 0;
                self.filled = 0;
            }
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.words.len() * WORD_BITS as usize + self.filled as usize
    }

    /// Returns the packed words, zero-filling a partial last word on the right.
    pub fn finish(mut self) -> Vec<u64> {
        if self.filled > 0 {
            self.words.push(self.acc << (WORD_BITS - self.filled));
        }
        self.words
    }
}

/// Reads fields back out of a sequence of 64-bit words.
#[derive(Debug)]
pub struct BitReader<'a> {
    words: &'a [u64],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `words`.
    pub const fn new(words: &'a [u64]) -> Self {
        Self { words, pos: 0 }
    }

    /// Reads the next `width` bits as an unsigned value.
    ///
    /// Bits past the end of the input read as zero.
    pub fn read(&mut self, width: u32) -> u64 {
        let mut value = 0u64;
        let mut remaining = width;
        while remaining > 0 {
            let index = self.pos / WORD_BITS as usize;
            let bit = (self.pos % WORD_BITS as usize) as u32;
            let avail = WORD_BITS - bit;
            let take = remaining.min(avail);
            let word = self.words.get(index).copied().unwrap_or(0);
            let chunk = (word >> (avail - take)) & low_mask(take);
            value = if take == WORD_BITS {
                chunk
            } else {
                (value << take) | chunk
            };
            self.pos += take as usize;
            remaining -= take;
        }
        value
    }

    /// Current bit position from the start of the input.
    pub const fn position(&self) -> usize {
        self.pos
    }
}

/// Splits a big-endian byte buffer into words, ignoring a trailing partial word.
pub fn words_from_be_bytes(bytes: &[u8]) -> Vec<u64> {
    bytes
        .chunks_exact(WORD_BYTES)
        .map(|chunk| {
            let mut raw = [0u8; WORD_BYTES];
            raw.copy_from_slice(chunk);
            u64::from_be_bytes(raw)
        })
        .collect()
}

/// Serializes words as a big-endian byte buffer.
pub fn words_to_be_bytes(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_be_bytes()).collect()
}
