//! Codec-wide constants.
//!
//! Word geometry shared by the bit packer, the decoder and the stream walker.

/// Width of one display-list word in bits.
pub const WORD_BITS: u32 = 64;

/// Width of one display-list word in bytes.
pub const WORD_BYTES: usize = 8;

/// Bit position of the opcode byte within a word.
pub const OPCODE_SHIFT: u32 = 56;

/// Bit position of the segment number within a segmented address.
pub const SEGMENT_SHIFT: u32 = 24;

/// Most words a single command can span (`G_TEXRECT` and `G_TEXRECTFLIP`).
pub const MAX_COMMAND_WORDS: usize = 3;

/// Extracts the opcode byte from a word.
#[inline]
pub const fn opcode_byte(word: u64) -> u8 {
    (word >> OPCODE_SHIFT) as u8
}

/// Extracts the segment number from a segmented address.
#[inline]
pub const fn segment_of(address: u32) -> u8 {
    (address >> SEGMENT_SHIFT) as u8
}
