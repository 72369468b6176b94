//! F3DEX2 command set.
//!
//! Contains opcode and layout definitions, the symbol tables shared by both
//! directions, and the encoder, decoder, disassembler and walker built on them.
//!
//! # Command families
//!
//! * `commands::rsp`: Geometry, matrices, display-list flow.
//! * `commands::rdp`: Rasterizer state, tiles, colors, images.
//! * `rendermode` / `othermode`: The packed othermode words.
//! * `combiner`: Color combiner selectors.
//! * `macros`: Texture-load macro expansion.

/// Color combiner selector tables.
pub mod combiner;

/// Per-opcode command descriptors and argument transforms.
pub mod commands;

/// Command decoding from packed words.
pub mod decode;

/// Text rendering of decoded commands as gbi macro calls.
pub mod disasm;

/// Command encoding into packed words.
pub mod encode;

/// Geometry mode flags.
pub mod geometry;

/// Structured command types.
pub mod instruction;

/// Bit-field layouts of every command.
pub mod layout;

/// Texture-load macros and TMEM parameter calculators.
pub mod macros;

/// Opcode enumeration.
pub mod opcodes;

/// Othermode masks and the high othermode word.
pub mod othermode;

/// The low othermode word and render-mode presets.
pub mod rendermode;

/// Display-list walker.
pub mod stream;

/// Bidirectional symbol tables.
pub mod symbols;
