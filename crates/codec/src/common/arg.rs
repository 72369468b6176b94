//! Command argument values.
//!
//! Every command argument, in either direction, is one of three shapes:
//! 1. **Int:** A raw or semantic integer (`32`, a vertex index, an address).
//! 2. **Sym:** A gbi symbol (`G_TX_CLAMP`), a `|`-joined list of symbols, or an integer spelled as text.
//! 3. **Flags:** An OR-combination of the above, as produced by the decoder.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single command argument.
///
/// Serializes untagged, so JSON `32`, `"G_TX_CLAMP"` and
/// `["G_TX_CLAMP", "G_TX_MIRROR"]` map to `Int`, `Sym` and `Flags`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    /// An integer value.
    Int(i64),
    /// A symbolic name, or an integer spelled as decimal or `0x` hex text.
    Sym(String),
    /// Values OR-ed together on encode.
    Flags(Vec<Arg>),
}

impl Arg {
    /// Creates a symbolic argument.
    pub fn sym(text: impl Into<String>) -> Self {
        Self::Sym(text.into())
    }

    /// Collapses decoded parts into one argument.
    ///
    /// No parts becomes `Int(0)`, a single part is returned as is, and two or
    /// more parts become `Flags`.
    pub fn from_parts(mut parts: Vec<Self>) -> Self {
        if parts.len() > 1 {
            return Self::Flags(parts);
        }
        parts.pop().unwrap_or(Self::Int(0))
    }

    /// Returns the integer value, accepting numeric text.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Sym(text) => parse_int(text),
            Self::Flags(_) => None,
        }
    }

    /// Returns the symbol text, if this is a symbol.
    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Self::Sym(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Sym(text) => f.write_str(text),
            Self::Flags(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Self::Sym(text.to_owned())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Self::Sym(text)
    }
}

/// Parses decimal or `0x`-prefixed hexadecimal text, with an optional sign.
///
/// Symbols that parse this way are raw pass-through values in every symbol
/// table.
///
/// # Arguments
///
/// * `text` - The text to parse; surrounding whitespace is ignored.
///
/// # Returns
///
/// The parsed value, or `None` if `text` is not an integer.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()?
    } else {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -value } else { value })
}
