//! Common utilities and types used throughout the codec.
//!
//! This module provides the building blocks shared by the encoder and decoder:
//! 1. **Arguments:** The `Arg` value carried by commands in both directions.
//! 2. **Bit Packing:** MSB-first field writers and readers spanning 64-bit words.
//! 3. **Constants:** Word geometry and display-list segment constants.
//! 4. **Error Handling:** `CodecError` and the non-fatal `Diagnostic` values.

/// Command argument values.
pub mod arg;

/// MSB-first bit packing across 64-bit words.
pub mod bits;

/// Common constants used throughout the codec.
pub mod constants;

/// Error types and decode diagnostics.
pub mod error;

pub use arg::{Arg, parse_int};
pub use bits::{BitReader, BitWriter};
pub use error::{CodecError, Diagnostic, Result};
