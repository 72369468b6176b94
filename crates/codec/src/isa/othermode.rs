//! Othermode field masks and the high othermode word (`G_SETOTHERMODE_H`).
//!
//! Both othermode commands address a contiguous run of bits by storing
//! `32 - sft - len` and `len - 1`. The helpers here convert between that pair
//! and the 32-bit mask it describes; `rendermode` handles the low word.

use crate::common::arg::Arg;
use crate::common::error::{CodecError, Result};
use crate::isa::decode::DecodeContext;
use crate::isa::encode::ArgList;
use crate::isa::symbols::SymbolTable;

/// Rebuilds the bit mask addressed by an othermode command.
///
/// # Arguments
///
/// * `shift` - The stored shift byte, `32 - sft - len`.
/// * `length` - The stored length byte, `len - 1`.
///
/// # Returns
///
/// `((1 << (length + 1)) - 1) << (32 - shift - length - 1)`, or zero when the
/// run does not fit in 32 bits.
pub const fn reconstruct_mask(shift: u32, length: u32) -> u32 {
    if shift + length + 1 > 32 {
        return 0;
    }
    let width = length + 1;
    let ones = if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    };
    ones << (32 - shift - width)
}

/// Splits a contiguous mask into the stored `(shift, length)` pair.
///
/// A zero mask maps to `(32, 255)`, which `reconstruct_mask` reads back as zero.
pub fn split_mask(command: &'static str, mask: i64) -> Result<(i64, i64)> {
    let invalid = |reason: String| CodecError::Encoding {
        command,
        field: "mask",
        reason,
    };
    let mask = u32::try_from(mask).map_err(|_| invalid(format!("{mask} is not a 32-bit mask")))?;
    if mask == 0 {
        return Ok((32, 255));
    }
    let low = mask.trailing_zeros();
    let len = mask.count_ones();
    if mask >> low != u32::MAX >> (32 - len) {
        return Err(invalid(format!("{mask:#010x} is not a contiguous run of bits")));
    }
    Ok((i64::from(32 - (low + len)), i64::from(len - 1)))
}

/// Shift and length of a stored pair, as `gsSPSetOtherMode` prints them.
pub const fn sft_len(shift: u32, length: u32) -> (i64, i64) {
    let len = length as i64 + 1;
    (32 - shift as i64 - len, len)
}

/// One `G_MDSFT_*` field of the high othermode word.
#[derive(Debug)]
pub struct HighField {
    /// `G_MDSFT_*` name.
    pub name: &'static str,
    /// Bit position of the field.
    pub sft: u32,
    /// Width in bits.
    pub len: u32,
    /// Dedicated `gsDPSet*` macro, if the gbi has one.
    pub macro_name: Option<&'static str>,
    /// Named values, already shifted into place.
    pub values: &'static [(&'static str, i64)],
}

impl HighField {
    /// The bits this field occupies.
    pub const fn mask(&self) -> u32 {
        ((1u32 << self.len) - 1) << self.sft
    }

    fn value_name(&self, value: i64) -> Option<&'static str> {
        self.values
            .iter()
            .rev()
            .find(|&&(_, v)| v == value)
            .map(|&(name, _)| name)
    }
}

/// Fields of the high othermode word, in bit order.
pub static HIGH_FIELDS: &[HighField] = &[
    HighField {
        name: "G_MDSFT_ALPHADITHER",
        sft: 4,
        len: 2,
        macro_name: Some("gsDPSetAlphaDither"),
        values: &[
            ("G_AD_PATTERN", 0),
            ("G_AD_NOTPATTERN", 1 << 4),
            ("G_AD_NOISE", 2 << 4),
            ("G_AD_DISABLE", 3 << 4),
        ],
    },
    HighField {
        name: "G_MDSFT_RGBDITHER",
        sft: 6,
        len: 2,
        macro_name: Some("gsDPSetColorDither"),
        values: &[
            ("G_CD_MAGICSQ", 0),
            ("G_CD_BAYER", 1 << 6),
            ("G_CD_NOISE", 2 << 6),
        ],
    },
    HighField {
        name: "G_MDSFT_COMBKEY",
        sft: 8,
        len: 1,
        macro_name: Some("gsDPSetCombineKey"),
        values: &[("G_CK_NONE", 0), ("G_CK_KEY", 1 << 8)],
    },
    HighField {
        name: "G_MDSFT_TEXTCONV",
        sft: 9,
        len: 3,
        macro_name: Some("gsDPSetTextureConvert"),
        values: &[
            ("G_TC_CONV", 0),
            ("G_TC_FILTCONV", 5 << 9),
            ("G_TC_FILT", 6 << 9),
        ],
    },
    HighField {
        name: "G_MDSFT_TCFILT",
        sft: 10,
        len: 1,
        macro_name: None,
        values: &[],
    },
    HighField {
        name: "G_MDSFT_TEXTFILT",
        sft: 12,
        len: 2,
        macro_name: Some("gsDPSetTextureFilter"),
        values: &[
            ("G_TF_POINT", 0),
            ("G_TF_AVERAGE", 3 << 12),
            ("G_TF_BILERP", 2 << 12),
        ],
    },
    HighField {
        name: "G_MDSFT_BILERP",
        sft: 13,
        len: 1,
        macro_name: None,
        values: &[],
    },
    HighField {
        name: "G_MDSFT_TEXTLUT",
        sft: 14,
        len: 2,
        macro_name: Some("gsDPSetTextureLUT"),
        values: &[
            ("G_TT_NONE", 0),
            ("G_TT_RGBA16", 2 << 14),
            ("G_TT_IA16", 3 << 14),
        ],
    },
    HighField {
        name: "G_MDSFT_RGBALUT",
        sft: 15,
        len: 1,
        macro_name: None,
        values: &[],
    },
    HighField {
        name: "G_MDSFT_TEXTLOD",
        sft: 16,
        len: 1,
        macro_name: Some("gsDPSetTextureLOD"),
        values: &[("G_TL_TILE", 0), ("G_TL_LOD", 1 << 16)],
    },
    HighField {
        name: "G_MDSFT_TEXTDETAIL",
        sft: 17,
        len: 2,
        macro_name: Some("gsDPSetTextureDetail"),
        values: &[
            ("G_TD_CLAMP", 0),
            ("G_TD_SHARPEN", 1 << 17),
            ("G_TD_DETAIL", 2 << 17),
        ],
    },
    HighField {
        name: "G_MDSFT_TD_DETAIL",
        sft: 18,
        len: 1,
        macro_name: None,
        values: &[],
    },
    HighField {
        name: "G_MDSFT_TEXTPERSP",
        sft: 19,
        len: 1,
        macro_name: Some("gsDPSetTexturePersp"),
        values: &[("G_TP_NONE", 0), ("G_TP_PERSP", 1 << 19)],
    },
    HighField {
        name: "G_MDSFT_CYCLETYPE",
        sft: 20,
        len: 2,
        macro_name: Some("gsDPSetCycleType"),
        values: &[
            ("G_CYC_1CYCLE", 0),
            ("G_CYC_2CYCLE", 1 << 20),
            ("G_CYC_COPY", 2 << 20),
            ("G_CYC_FILL", 3 << 20),
        ],
    },
    HighField {
        name: "G_MDSFT_COLORDITHER",
        sft: 22,
        len: 1,
        macro_name: None,
        values: &[],
    },
    HighField {
        name: "G_MDSFT_PIPELINE",
        sft: 23,
        len: 1,
        macro_name: Some("gsDPPipelineMode"),
        values: &[("G_PM_1PRIMITIVE", 0), ("G_PM_NPRIMITIVE", 1 << 23)],
    },
];

/// Looks up a high-word field by mask.
pub fn field_for_mask(mask: u32) -> Option<&'static HighField> {
    HIGH_FIELDS.iter().find(|field| field.mask() == mask)
}

fn field_named(name: &str) -> Option<&'static HighField> {
    HIGH_FIELDS.iter().find(|field| field.name == name)
}

/// Finds a value name in any high-word field.
fn value_named(name: &str) -> Option<i64> {
    HIGH_FIELDS
        .iter()
        .flat_map(|field| field.values)
        .find(|(n, _)| *n == name)
        .map(|&(_, value)| value)
}

static NO_SYMBOLS: SymbolTable = SymbolTable::new("othermode high", &[], &[]);

/// Resolves one part of a field or value argument.
fn resolve_high(arg: &Arg, lookup: fn(&str) -> Option<i64>) -> Result<i64> {
    match arg {
        Arg::Sym(text) => text.split('|').try_fold(0, |acc, part| {
            let part = part.trim();
            let value = match lookup(part) {
                Some(value) => value,
                None => NO_SYMBOLS.resolve(&Arg::sym(part))?,
            };
            Ok(acc | value)
        }),
        Arg::Flags(parts) => parts
            .iter()
            .try_fold(0, |acc, part| Ok(acc | resolve_high(part, lookup)?)),
        Arg::Int(value) => Ok(*value),
    }
}

pub(crate) fn encode_high(args: &ArgList<'_>) -> Result<Vec<i64>> {
    let mask = resolve_high(args.get(0)?, |name| {
        field_named(name).map(|field| i64::from(field.mask()))
    })?;
    let value = resolve_high(args.get(1)?, value_named)?;
    let (shift, length) = split_mask(args.command(), mask)?;
    Ok(vec![shift, length, value])
}

pub(crate) fn decode_high(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[shift, length, value] = values else {
        return values.iter().copied().map(Arg::Int).collect();
    };
    let mask = reconstruct_mask(shift as u32, length as u32);
    let Some(field) = field_for_mask(mask) else {
        return vec![Arg::Int(i64::from(mask)), Arg::Int(value)];
    };
    if let Some(name) = field.macro_name {
        ctx.set_name(name);
    }
    let value = field
        .value_name(value)
        .map_or(Arg::Int(value), Arg::sym);
    vec![Arg::sym(field.name), value]
}
