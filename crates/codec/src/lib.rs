//! F3DEX2 display-list codec.
//!
//! This crate turns F3DEX2 microcode commands into packed 64-bit words and back:
//! 1. **Encoding:** Structured `(name, args)` commands and texture-load macros into words.
//! 2. **Decoding:** Words into gbi macro names with symbolic arguments, including render modes.
//! 3. **Macros:** DXT throttle and TMEM line calculators used by the texture-load macros.
//! 4. **Disassembly:** Text rendering of decoded commands as gbi macro calls.
//! 5. **Walking:** Following a big-endian display list until it ends or branches away.

/// Common types (arguments, errors, bit packing, constants).
pub mod common;
/// Codec configuration (decode strictness, walker limits, rendering).
pub mod config;
/// Command set (opcodes, layouts, symbol tables, encode/decode, disassembly).
pub mod isa;
/// Decode statistics collection and reporting.
pub mod stats;

/// Structured argument value; integers, symbols, or OR-combined flags.
pub use crate::common::Arg;
/// Library error type and result alias.
pub use crate::common::error::{CodecError, Diagnostic, Result};
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// One-call entry points for the codec.
pub use crate::isa::decode::{decode, decode_all, decode_with};
pub use crate::isa::disasm::{disassemble, disassemble_with, disassemble_words};
pub use crate::isa::encode::{encode, encode_all, encode_to_bytes};
pub use crate::isa::instruction::{Command, Decoded};
pub use crate::isa::macros::compute_block_throttle;
pub use crate::isa::opcodes::Opcode;
pub use crate::isa::stream::{DisplayListWalker, WalkResult};
