//! Bidirectional symbol tables.
//!
//! One table per field category is shared by the encoder and the decoder.
//! Encoding accepts any table name (canonical or alias), a `|`-joined list of
//! names, or integer text; decoding maps a raw value back to its canonical
//! name when one exists.
//!
//! Lookups follow two rules when a table holds duplicate keys:
//! 1. **Name to value:** first entry wins (aliases are searched after entries).
//! 2. **Value to name:** last entry wins.

use crate::common::arg::{Arg, parse_int};
use crate::common::error::{CodecError, Result};

/// A named set of `(symbol, value)` pairs.
#[derive(Debug)]
pub struct SymbolTable {
    /// Table name used in `UnknownSymbol` errors.
    pub name: &'static str,
    entries: &'static [(&'static str, i64)],
    aliases: &'static [(&'static str, i64)],
}

impl SymbolTable {
    /// Creates a table from canonical entries and encode-only aliases.
    pub const fn new(
        name: &'static str,
        entries: &'static [(&'static str, i64)],
        aliases: &'static [(&'static str, i64)],
    ) -> Self {
        Self {
            name,
            entries,
            aliases,
        }
    }

    /// Canonical entries, in table order.
    pub const fn entries(&self) -> &'static [(&'static str, i64)] {
        self.entries
    }

    /// Looks up the value of a single symbol.
    pub fn value_of(&self, symbol: &str) -> Option<i64> {
        self.entries
            .iter()
            .chain(self.aliases)
            .find(|(name, _)| *name == symbol)
            .map(|&(_, value)| value)
    }

    /// Looks up the canonical name of a value.
    pub fn name_of(&self, value: i64) -> Option<&'static str> {
        self.entries
            .iter()
            .rev()
            .find(|&&(_, v)| v == value)
            .map(|&(name, _)| name)
    }

    /// Resolves one `|`-separated part: table name first, then integer text.
    fn resolve_part(&self, part: &str) -> Result<i64> {
        let part = part.trim();
        self.value_of(part)
            .or_else(|| parse_int(part))
            .ok_or_else(|| CodecError::UnknownSymbol {
                table: self.name,
                symbol: part.to_owned(),
            })
    }

    /// Resolves an argument to its raw value.
    ///
    /// Integers pass through unchanged. Symbols are split on `|` and each part
    /// is OR-ed in; `Flags` are resolved element-wise and OR-ed.
    ///
    /// # Arguments
    ///
    /// * `arg` - The argument as supplied by the caller.
    ///
    /// # Returns
    ///
    /// The raw value, or `CodecError::UnknownSymbol` for the first unresolved part.
    pub fn resolve(&self, arg: &Arg) -> Result<i64> {
        match arg {
            Arg::Int(value) => Ok(*value),
            Arg::Sym(text) => text
                .split('|')
                .try_fold(0, |acc, part| Ok(acc | self.resolve_part(part)?)),
            Arg::Flags(parts) => parts
                .iter()
                .try_fold(0, |acc, part| Ok(acc | self.resolve(part)?)),
        }
    }

    /// Returns the canonical symbol for `value`, or the value itself.
    pub fn symbolize(&self, value: i64) -> Arg {
        self.name_of(value)
            .map_or(Arg::Int(value), Arg::sym)
    }
}

// ── Image formats and sizes ───────────────────────────

/// Texel formats (`G_IM_FMT_*`).
pub static FORMAT: SymbolTable = SymbolTable::new(
    "image format",
    &[
        ("G_IM_FMT_RGBA", 0),
        ("G_IM_FMT_YUV", 1),
        ("G_IM_FMT_CI", 2),
        ("G_IM_FMT_IA", 3),
        ("G_IM_FMT_I", 4),
    ],
    &[("RGBA", 0), ("YUV", 1), ("CI", 2), ("IA", 3), ("I", 4)],
);

/// Texel sizes (`G_IM_SIZ_*`), as raw field values.
pub static SIZE: SymbolTable = SymbolTable::new(
    "image size",
    &[
        ("G_IM_SIZ_4b", 0),
        ("G_IM_SIZ_8b", 1),
        ("G_IM_SIZ_16b", 2),
        ("G_IM_SIZ_32b", 3),
    ],
    &[],
);

/// Tile wrap modes (`G_TX_*`).
pub static WRAP: SymbolTable = SymbolTable::new(
    "wrap mode",
    &[("G_TX_WRAP", 0), ("G_TX_MIRROR", 1), ("G_TX_CLAMP", 2)],
    &[
        ("wrap", 0),
        ("mirror", 1),
        ("clamp", 2),
        ("clamp&mirror", 3),
        ("clamp & mirror", 3),
    ],
);

// ── RSP indices ───────────────────────────────────────

/// `G_MODIFYVTX` attribute offsets (`G_MWO_POINT_*`).
pub static MWO_POINT: SymbolTable = SymbolTable::new(
    "modify-vertex attribute",
    &[
        ("G_MWO_POINT_RGBA", 0x10),
        ("G_MWO_POINT_ST", 0x14),
        ("G_MWO_POINT_XYSCREEN", 0x18),
        ("G_MWO_POINT_ZSCREEN", 0x1C),
    ],
    &[],
);

/// `G_DMA_IO` direction.
pub static DMA: SymbolTable = SymbolTable::new("DMA direction", &[("read", 0), ("write", 1)], &[]);

/// `G_MTX` parameter bits.
pub static MTX_PARAM: SymbolTable = SymbolTable::new(
    "matrix parameter",
    &[
        ("G_MTX_PUSH", 1),
        ("G_MTX_LOAD", 2),
        ("G_MTX_PROJECTION", 4),
    ],
    &[
        ("G_MTX_NOPUSH", 0),
        ("G_MTX_MUL", 0),
        ("G_MTX_MODELVIEW", 0),
    ],
);

/// `G_MOVEWORD` indices (`G_MW_*`).
pub static MOVEWORD_INDEX: SymbolTable = SymbolTable::new(
    "move-word index",
    &[
        ("G_MW_MATRIX", 0),
        ("G_MW_NUMLIGHT", 2),
        ("G_MW_CLIP", 4),
        ("G_MW_SEGMENT", 6),
        ("G_MW_FOG", 8),
        ("G_MW_LIGHTCOL", 10),
        ("G_MW_FORCEMTX", 12),
        ("G_MW_PERSPNORM", 14),
    ],
    &[("G_MV_LIGHTCOL", 10)],
);

/// `G_MOVEMEM` indices (`G_MV_*`).
pub static MOVEMEM_INDEX: SymbolTable = SymbolTable::new(
    "move-mem index",
    &[
        ("G_MV_MMTX", 2),
        ("G_MV_PMTX", 6),
        ("G_MV_VIEWPORT", 8),
        ("G_MV_LIGHT", 10),
        ("G_MV_POINT", 12),
        ("G_MV_MATRIX", 14),
    ],
    &[],
);

// ── RDP modes ─────────────────────────────────────────

/// Scissor interlace modes (`G_SC_*`).
pub static SCISSOR_MODE: SymbolTable = SymbolTable::new(
    "scissor mode",
    &[
        ("G_SC_NON_INTERLACE", 0),
        ("G_SC_EVEN_INTERLACE", 2),
        ("G_SC_ODD_INTERLACE", 3),
    ],
    &[],
);
