//! # ISA Unit Tests
//!
//! This module contains unit tests for the F3DEX2 command set. It covers the
//! encoder and decoder, the othermode and combiner tables, texture macros,
//! disassembly and the display-list walker.

/// Color combiner packing and naming.
pub mod combiner;



/// Command encoding and argument validation.
pub mod encode;

/// Texture-load macro expansion and DXT throttles.
pub mod macros;



/// Render-mode and low othermode naming.
pub mod render_mode;

/// Display-list walking over byte buffers.
pub mod stream;
