//! Codec errors and decode diagnostics.
//!
//! This module defines how the codec reports problems. It provides:
//! 1. **Fatal Errors:** `CodecError`, returned to the immediate caller of an encode or decode.
//! 2. **Diagnostics:** `Diagnostic`, informational findings attached to a decoded command.
//!
//! The codec performs no I/O and never retries; every error is final for the call
//! that produced it.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by encoding, decoding and display-list walking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The leading byte of a word is not a known opcode.
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),

    /// The command name is neither an opcode mnemonic nor a texture-load macro.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A symbolic argument is not in its field's symbol table.
    #[error("unknown symbol `{symbol}` in {table}")]
    UnknownSymbol {
        /// Name of the symbol table that was searched.
        table: &'static str,
        /// The symbol as written by the caller.
        symbol: String,
    },

    /// A value cannot be represented by its field.
    #[error("{command}: field `{field}` {reason}")]
    Encoding {
        /// Mnemonic of the command being encoded.
        command: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// The number of arguments does not match the command.
    #[error("{command} takes {expected} arguments, got {found}")]
    Arity {
        /// Command or macro name.
        command: String,
        /// Number of arguments the command takes.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A multi-word command runs past the end of the input.
    #[error("{command} spans {needed} words, only {available} available")]
    Truncated {
        /// Mnemonic of the command being decoded.
        command: &'static str,
        /// Words the command needs.
        needed: usize,
        /// Words left in the input.
        available: usize,
    },

    /// The second word of a `G_RDPHALF_1` pair appeared on its own.
    #[error("{0} word without a leading G_RDPHALF_1 word")]
    DetachedWord(&'static str),

    /// Fixed or padding bits differ from their required value (strict decoding only).
    #[error("{command}: fixed field `{field}` holds {found:#x}, expected {expected:#x}")]
    Padding {
        /// Mnemonic of the command being decoded.
        command: &'static str,
        /// Name of the fixed field.
        field: &'static str,
        /// Value the field must hold.
        expected: u64,
        /// Value found in the word.
        found: u64,
    },
}

/// Result type used throughout the codec.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Non-fatal findings reported alongside a decoded command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Fixed or padding bits are not at their required value.
    NonZeroPadding {
        /// Name of the fixed field.
        field: &'static str,
        /// Value the field must hold.
        expected: u64,
        /// Value found in the word.
        found: u64,
    },

    /// At least one render-mode cycle did not match a known preset and fell back to hex.
    AmbiguousRenderMode {
        /// Cycle-1 preset name or hex literal.
        cycle1: String,
        /// Cycle-2 preset name or hex literal.
        cycle2: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonZeroPadding {
                field,
                expected,
                found,
            } => write!(f, "field `{field}` holds {found:#x}, expected {expected:#x}"),
            Self::AmbiguousRenderMode { cycle1, cycle2 } => {
                write!(f, "unresolved render mode: {cycle1} (cycle 1), {cycle2} (cycle 2)")
            }
        }
    }
}
