//! The low othermode word (`G_SETOTHERMODE_L`): alpha compare, depth source
//! and the blender render mode.
//!
//! A full render-mode write (mask `0xFFFFFFF8`) decodes to a pair of cycle
//! presets. Any other mask is decomposed over the low-word fields, naming the
//! individual `Ind_MASK` bits when the mask only touches some of them.

use tracing::warn;

use crate::common::arg::{Arg, parse_int};
use crate::common::error::{CodecError, Diagnostic, Result};
use crate::isa::decode::DecodeContext;
use crate::isa::encode::ArgList;
use crate::isa::othermode::{reconstruct_mask, split_mask};
use crate::isa::symbols::SymbolTable;

/// Mask of a whole render-mode write.
pub const RENDER_MODE_MASK: u32 = 0xFFFF_FFF8;

/// Bits of the render mode that belong to blender cycle 1.
const CYCLE1_BITS: u32 = 0xCCCC_FFF8;
/// Bits of the render mode that belong to blender cycle 2.
const CYCLE2_BITS: u32 = 0x3333_FFF8;

/// Cycle-1 blender inputs that collapse to a single preset, in match order.
const BLENDER_PRESETS: [u32; 3] = [0x0C08_0000, 0xC800_0000, 0xC400_0000];

const ALPHACOMPARE: u32 = 0x3;
const ZSRCSEL: u32 = 0x4;
const CYCLE_IND: u32 = 0xFFF8;
const CYCLE_DEP: u32 = 0xFFFF_0000;

/// Alpha compare values (`G_AC_*`).
pub static ALPHA_COMPARE: SymbolTable = SymbolTable::new(
    "alpha compare",
    &[("G_AC_NONE", 0), ("G_AC_THRESHOLD", 1), ("G_AC_DITHER", 3)],
    &[],
);

/// Depth source values.
pub static DEPTH_SOURCE: SymbolTable = SymbolTable::new(
    "depth source",
    &[("Z_SEL_PRIMITIVE", 0), ("Z_SEL_PIXEL", 4)],
    &[],
);

/// One named part of the cycle-independent render-mode bits.
#[derive(Debug)]
enum IndPart {
    /// A single flag bit.
    Bit(&'static str, u32),
    /// A multi-bit selector and its named settings.
    Group(&'static str, u32, &'static [(&'static str, u32)]),
}

impl IndPart {
    const fn mask(&self) -> u32 {
        match self {
            Self::Bit(_, mask) | Self::Group(_, mask, _) => *mask,
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Bit(name, _) | Self::Group(name, _, _) => name,
        }
    }
}

static IND_PARTS: &[IndPart] = &[
    IndPart::Bit("AA_EN", 1 << 3),
    IndPart::Bit("Z_CMP", 1 << 4),
    IndPart::Bit("Z_UPD", 1 << 5),
    IndPart::Bit("IM_RD", 1 << 6),
    IndPart::Bit("CLR_ON_CVG", 1 << 7),
    IndPart::Group(
        "CVG_DST",
        3 << 8,
        &[
            ("CVG_DST_CLAMP", 0),
            ("CVG_DST_WRAP", 1 << 8),
            ("CVG_DST_FULL", 2 << 8),
            ("CVG_DST_SAVE", 3 << 8),
        ],
    ),
    IndPart::Group(
        "ZMODE",
        3 << 10,
        &[
            ("ZMODE_OPA", 0),
            ("ZMODE_INTER", 1 << 10),
            ("ZMODE_XLU", 2 << 10),
            ("ZMODE_DEC", 3 << 10),
        ],
    ),
    IndPart::Bit("CVG_X_ALPHA", 1 << 12),
    IndPart::Bit("ALPHA_CVG_SEL", 1 << 13),
    IndPart::Bit("FORCE_BL", 1 << 14),
];

/// Names accepted for the mask (first) argument of `G_SETOTHERMODE_L`.
pub static CLEAR: SymbolTable = SymbolTable::new(
    "othermode low mask",
    &[
        ("None", 0),
        ("G_MDSFT_ALPHACOMPARE", ALPHACOMPARE as i64),
        ("G_MDSFT_AC_TRESHDITHER", 2),
        ("G_MDSFT_ZSRCSEL", ZSRCSEL as i64),
        ("G_MDSFT_RENDERMODE_CYCLE_IND", CYCLE_IND as i64),
        ("G_MDSFT_RENDERMODE_CYCLE_DEP", CYCLE_DEP as i64),
        ("Render_Mode", RENDER_MODE_MASK as i64),
        ("All", 0xFFFF_FFFF),
        ("AA_EN", 1 << 3),
        ("Z_CMP", 1 << 4),
        ("Z_UPD", 1 << 5),
        ("IM_RD", 1 << 6),
        ("CLR_ON_CVG", 1 << 7),
        ("CVG_DST", 3 << 8),
        ("ZMODE", 3 << 10),
        ("CVG_X_ALPHA", 1 << 12),
        ("ALPHA_CVG_SEL", 1 << 13),
        ("FORCE_BL", 1 << 14),
    ],
    &[],
);

/// Cycle presets (`G_RM_*`), in table order.
pub static PRESETS: SymbolTable = SymbolTable::new(
    "render mode preset",
    &[
        ("G_RM_AA_ZB_OPA_SURF", 0x0044_2078),
        ("G_RM_AA_ZB_OPA_SURF2", 0x0011_2078),
        ("G_RM_AA_ZB_XLU_SURF", 0x0040_49D8),
        ("G_RM_AA_ZB_XLU_SURF2", 0x0010_49D8),
        ("G_RM_AA_ZB_OPA_DECAL", 0x0044_2D58),
        ("G_RM_AA_ZB_OPA_DECAL2", 0x0011_2D58),
        ("G_RM_AA_ZB_XLU_DECAL", 0x0040_4DD8),
        ("G_RM_AA_ZB_XLU_DECAL2", 0x0010_4DD8),
        ("G_RM_AA_ZB_OPA_INTER", 0x0044_2478),
        ("G_RM_AA_ZB_OPA_INTER2", 0x0011_2478),
        ("G_RM_AA_ZB_XLU_INTER", 0x0040_45D8),
        ("G_RM_AA_ZB_XLU_INTER2", 0x0010_45D8),
        ("G_RM_AA_ZB_XLU_LINE", 0x0040_7858),
        ("G_RM_AA_ZB_XLU_LINE2", 0x0010_7858),
        ("G_RM_AA_ZB_DEC_LINE", 0x0040_7F58),
        ("G_RM_AA_ZB_DEC_LINE2", 0x0010_7F58),
        ("G_RM_AA_ZB_TEX_EDGE", 0x0044_3078),
        ("G_RM_AA_ZB_TEX_EDGE2", 0x0011_3078),
        ("G_RM_AA_ZB_TEX_INTER", 0x0044_3478),
        ("G_RM_AA_ZB_TEX_INTER2", 0x0011_3478),
        ("G_RM_AA_ZB_SUB_SURF", 0x0044_2278),
        ("G_RM_AA_ZB_SUB_SURF2", 0x0011_2278),
        ("G_RM_AA_ZB_PCL_SURF", 0x0040_007B),
        ("G_RM_AA_ZB_PCL_SURF2", 0x0010_007B),
        ("G_RM_AA_ZB_OPA_TERR", 0x0040_2078),
        ("G_RM_AA_ZB_OPA_TERR2", 0x0010_2078),
        ("G_RM_AA_ZB_TEX_TERR", 0x0040_3078),
        ("G_RM_AA_ZB_TEX_TERR2", 0x0010_3078),
        ("G_RM_AA_ZB_SUB_TERR", 0x0040_2278),
        ("G_RM_AA_ZB_SUB_TERR2", 0x0010_2278),
        ("G_RM_RA_ZB_OPA_SURF", 0x0044_2038),
        ("G_RM_RA_ZB_OPA_SURF2", 0x0011_2038),
        ("G_RM_RA_ZB_OPA_DECAL", 0x0044_2D18),
        ("G_RM_RA_ZB_OPA_DECAL2", 0x0011_2D18),
        ("G_RM_RA_ZB_OPA_INTER", 0x0044_2438),
        ("G_RM_RA_ZB_OPA_INTER2", 0x0011_2438),
        ("G_RM_AA_OPA_SURF", 0x0044_2048),
        ("G_RM_AA_OPA_SURF2", 0x0011_2048),
        ("G_RM_AA_XLU_SURF", 0x0040_41C8),
        ("G_RM_AA_XLU_SURF2", 0x0010_41C8),
        ("G_RM_AA_XLU_LINE", 0x0040_7048),
        ("G_RM_AA_XLU_LINE2", 0x0010_7048),
        ("G_RM_AA_DEC_LINE", 0x0040_7248),
        ("G_RM_AA_DEC_LINE2", 0x0010_7248),
        ("G_RM_AA_TEX_EDGE", 0x0044_3048),
        ("G_RM_AA_TEX_EDGE2", 0x0011_3048),
        ("G_RM_AA_SUB_SURF", 0x0044_2248),
        ("G_RM_AA_SUB_SURF2", 0x0011_2248),
        ("G_RM_AA_PCL_SURF", 0x0040_004B),
        ("G_RM_AA_PCL_SURF2", 0x0010_004B),
        ("G_RM_AA_OPA_TERR", 0x0040_2048),
        ("G_RM_AA_OPA_TERR2", 0x0010_2048),
        ("G_RM_AA_TEX_TERR", 0x0040_3048),
        ("G_RM_AA_TEX_TERR2", 0x0010_3048),
        ("G_RM_AA_SUB_TERR", 0x0040_2248),
        ("G_RM_AA_SUB_TERR2", 0x0010_2248),
        ("G_RM_RA_OPA_SURF", 0x0044_2008),
        ("G_RM_RA_OPA_SURF2", 0x0011_2008),
        ("G_RM_ZB_OPA_SURF", 0x0044_2230),
        ("G_RM_ZB_OPA_SURF2", 0x0011_2230),
        ("G_RM_ZB_XLU_SURF", 0x0040_4A50),
        ("G_RM_ZB_XLU_SURF2", 0x0010_4A50),
        ("G_RM_ZB_OPA_DECAL", 0x0044_2E10),
        ("G_RM_ZB_OPA_DECAL2", 0x0011_2E10),
        ("G_RM_ZB_XLU_DECAL", 0x0040_4E50),
        ("G_RM_ZB_XLU_DECAL2", 0x0010_4E50),
        ("G_RM_ZB_CLD_SURF", 0x0040_4B50),
        ("G_RM_ZB_CLD_SURF2", 0x0010_4B50),
        ("G_RM_ZB_OVL_SURF", 0x0040_4F50),
        ("G_RM_ZB_OVL_SURF2", 0x0010_4F50),
        ("G_RM_ZB_PCL_SURF", 0x0C08_0233),
        ("G_RM_ZB_PCL_SURF2", 0x0302_0233),
        ("G_RM_OPA_SURF", 0x0C08_4000),
        ("G_RM_OPA_SURF2", 0x0302_4000),
        ("G_RM_XLU_SURF", 0x0040_4240),
        ("G_RM_XLU_SURF2", 0x0010_4240),
        ("G_RM_CLD_SURF", 0x0040_4340),
        ("G_RM_CLD_SURF2", 0x0010_4340),
        ("G_RM_TEX_EDGE", 0x0C08_7008),
        ("G_RM_TEX_EDGE2", 0x0302_7008),
        ("G_RM_PCL_SURF", 0x0C08_4203),
        ("G_RM_PCL_SURF2", 0x0302_4203),
        ("G_RM_ADD", 0x0448_4340),
        ("G_RM_ADD2", 0x0112_4340),
        ("G_RM_NOOP2", 0x0000_0000),
        ("G_RM_VISCVG", 0x0C84_4040),
        ("G_RM_VISCVG2", 0x0321_4040),
        ("G_RM_OPA_CI2", 0x0302_0000),
        ("G_RM_CUSTOM_AA_ZB_XLU_SURF", 0x0040_49F8),
        ("G_RM_CUSTOM_AA_ZB_XLU_SURF2", 0x0010_49F8),
        ("G_RM_NOOP", 0x0000_0000),
        ("G_RM_PASS", 0x0C08_0000),
        ("G_RM_FOG_SHADE_A", 0xC800_0000),
        ("G_RM_FOG_PRIM_A", 0xC400_0000),
        ("G_RM_AA_ZB_OPA_DECAL_TERR", 0x0044_2C78),
        ("G_RM_AA_ZB_OPA_DECAL_TERR2", 0x0011_2C78),
        ("G_RM_AA_ZB_OPA_SURF", 0x0044_2058),
        ("G_RM_AA_ZB_OPA_SURF2", 0x0011_2058),
        ("G_RM_RA_ZB_OPA_SURF", 0x0044_2018),
        ("G_RM_RA_ZB_OPA_SURF2", 0x0011_2018),
        ("G_RM_AA_ZB_TEX_DECAL_TERR", 0x0044_3C58),
        ("G_RM_AA_ZB_TEX_DECAL_TERR2", 0x0011_3C58),
        ("G_RM_AA_ZB_TEX_DECAL_TERR", 0x0044_3C78),
        ("G_RM_AA_ZB_TEX_DECAL_TERR2", 0x0011_3C78),
        ("G_RM_RA_TEX_EDGE", 0x0044_3038),
        ("G_RM_RA_TEX_EDGE2", 0x0011_3038),
        ("G_RM_ZB_OPA_TERR", 0x0044_2030),
        ("G_RM_ZB_OPA_TERR2", 0x0011_2030),
        ("G_RM_RA_TEX_EDGE", 0x0044_3008),
        ("G_RM_RA_TEX_EDGE2", 0x0011_3008),
        ("G_RM_OPA_TERR", 0x0044_2040),
        ("G_RM_OPA_TERR2", 0x0011_2040),
        ("G_RM_RA_XLU_SURF", 0x0040_49C8),
        ("G_RM_RA_XLU_SURF2", 0x0010_49C8),
        ("G_RM_ZB_XLU_SURF", 0x0040_4950),
        ("G_RM_ZB_XLU_SURF2", 0x0010_4950),
        ("G_RM_ZB_XLU_DECAL", 0x0040_4D50),
        ("G_RM_ZB_XLU_DECAL2", 0x0010_4D50),
        ("G_RM_AA_ZB_XLU_DECAL_TERR", 0x0040_4C78),
        ("G_RM_AA_ZB_XLU_DECAL_TERR2", 0x0010_4C78),
        ("G_RM_ZB_CLD_SURF_CLR", 0x0040_4BD0),
        ("G_RM_ZB_CLD_SURF_CLR2", 0x0010_4BD0),
        ("G_RM_ZB_OVL_DECAL", 0x0040_4FD0),
        ("G_RM_ZB_OVL_DECAL2", 0x0010_4FD0),
        ("G_RM_AA_ZB_OVL_SURF", 0x0040_4F78),
        ("G_RM_AA_ZB_OVL_SURF2", 0x0010_4F78),
        ("G_RM_CLD_SURF", 0x0040_4B40),
        ("G_RM_OVL_SURF2", 0x0010_4B40),
        ("G_RM_AA_ZB_XLU_SURF", 0x0040_41D8),
        ("G_RM_AA_ZB_XLU_SURF2", 0x0010_41D8),
        ("G_RM_RA_ZB_OPA_SURF2", 0x0010_4038),
        ("G_RM_RA_OPA_SURF2", 0x0010_4008),
        ("G_RM_RA_ZB_XLU_SURF2", 0x0010_4858),
        ("G_RM_AA_ZB_OPA_FOG2", 0x0102_4078),
        ("G_RM_RA_ZB_OPA_BLEND_SURF", 0x0880_2038),
        ("G_RM_AA_ZB_OPA_BLEND_SURF", 0x0880_2078),
        ("G_RM_AA_ZB_DECAL_FOG_ALPHA", 0x0800_4DD8),
    ],
    &[],
);

/// Two-cycle render mode words by preset name.
pub static MODE_BITS: SymbolTable = SymbolTable::new(
    "render mode",
    &[
        ("G_RM_AA_ZB_OPA_SURF", 0x0055_2078),
        ("G_RM_AA_ZB_OPA_SURF2", 0x0011_2078),
        ("G_RM_AA_ZT_OPA_SURF", 0x0055_2058),
        ("G_RM_AA_ZT_OPA_SURF2", 0x0011_2058),
        ("G_RM_RA_OPA_SURF", 0x0055_2008),
        ("G_RM_RA_OPA_SURF2", 0x0011_2008),
        ("G_RM_ID_OPA_SURF", 0x0055_2040),
        ("G_RM_ID_OPA_SURF2", 0x0011_2040),
        ("G_RM_RA_ZT_OPA_SURF", 0x0055_2018),
        ("G_RM_RA_ZT_OPA_SURF2", 0x0011_2018),
        ("G_RM_AA_ZB_XLU_SURF", 0x0050_49D8),
        ("G_RM_AA_ZB_XLU_SURF2", 0x0010_49D8),
        ("G_RM_AA_XLU_SURF", 0x0050_49C8),
        ("G_RM_AA_XLU_SURF2", 0x0010_49C8),
        ("G_RM_AA_ZB_XLU_SURF_REVERSE", 0x0C18_49D8),
        ("G_RM_RA_TEX_EDGE", 0x0055_3008),
        ("G_RM_RA_TEX_EDGE2", 0x0011_3008),
        ("G_RM_RA_ZB_OPA_SURF", 0x0055_2038),
        ("G_RM_RA_ZB_OPA_SURF2", 0x0011_2038),
        ("G_RM_RA_ZB_TEX_EDGE", 0x0055_3038),
        ("G_RM_RA_ZB_TEX_EDGE2", 0x0011_3038),
        ("G_RM_AA_TEX_EDGE", 0x0055_3048),
        ("G_RM_AA_TEX_EDGE2", 0x0011_3048),
        ("G_RM_AA_ZB_OPA_DECAL", 0x0055_2C78),
        ("G_RM_AA_ZB_OPA_DECAL2", 0x0011_2C78),
        ("G_RM_AA_ZB_TEX_EDGE_DECAL", 0x0055_3C78),
        ("G_RM_AA_ZB_TEX_EDGE_DECAL2", 0x0011_3C78),
        ("G_RM_AA_OPA_SURF", 0x0055_2048),
        ("G_RM_AA_OPA_SURF2", 0x0011_2048),
        ("G_RM_AA_ZB_TEX_EDGE", 0x0055_3078),
        ("G_RM_AA_ZB_TEX_EDGE2", 0x0011_3078),
        ("G_RM_ZB_CLD_SURF", 0x0040_4B50),
        ("G_RM_ZB_CLD_SURF2", 0x0010_4B50),
        ("G_RM_ZB_OVL_SURF", 0x0040_4F50),
        ("G_RM_ZB_OVL_SURF2", 0x0010_4F50),
        ("G_RM_AA_ZB_TEX_TERR", 0x0050_3078),
        ("G_RM_AA_ZB_TEX_TERR2", 0x0010_3078),
        ("G_RM_AA_ZB_OPA_INVERT", 0x0C19_2078),
        ("G_RM_AA_ZB_TEX_EDGE_INVERT", 0x0C19_3078),
        ("G_RM_RA_ZB_TEX_EDGE_INVERT", 0x0C19_3038),
        ("G_RM_AA_TEX_EDGE_INVERT", 0x0C19_3048),
        ("G_RM_RA_ZB_OPA_INVERT", 0x0C19_2038),
        ("G_RM_RA_ZB_TEX_DECAL_INVERT", 0x0C19_3C78),
        ("G_RM_AA_OPA_INVERT", 0x0C19_2048),
        ("G_RM_RA_OPA_INVERT", 0x0C19_2008),
        ("G_RM_AA_ZB_XLU_DECAL", 0x0050_4DD8),
        ("G_RM_AA_ZB_XLU_DECAL_INVERT", 0x0C19_4DD8),
        ("G_RM_AA_ZB_XLU_DECAL_REVERSE", 0x0C18_4DD8),
        ("G_RM_AA_ZB_XLU_SURF_REVERSE", 0x0C18_4078),
        ("G_RM_RA_ZB_XLU_SURF_REVERSE", 0x0C18_4038),
        ("G_RM_AA_XLU_SURF_REVERSE", 0x0C18_49C8),
        ("G_RM_RA_XLU_SURF_REVERSE", 0x0C18_4008),
        ("G_RM_AA_ZB_OPA_SURF_FOG_ALPHA", 0xC811_2078),
        ("G_RM_NOOP", 0x0000_0000),
    ],
    &[],
);

fn ind_value(name: &str) -> Option<i64> {
    if name == "ZMODE_OPAQUE" {
        return Some(0);
    }
    IND_PARTS.iter().find_map(|part| match part {
        IndPart::Bit(bit, mask) => (*bit == name).then_some(i64::from(*mask)),
        IndPart::Group(_, _, values) => values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, value)| i64::from(value)),
    })
}

/// Resolves one `|`-separated part of a low-word value.
fn value_part(part: &str) -> Result<i64> {
    let part = part.trim();
    PRESETS
        .value_of(part)
        .or_else(|| MODE_BITS.value_of(part))
        .or_else(|| ind_value(part))
        .or_else(|| ALPHA_COMPARE.value_of(part))
        .or_else(|| DEPTH_SOURCE.value_of(part))
        .or_else(|| parse_int(part))
        .ok_or_else(|| CodecError::UnknownSymbol {
            table: "othermode low value",
            symbol: part.to_owned(),
        })
}

/// Resolves the value argument of `G_SETOTHERMODE_L`.
///
/// A lone two-cycle name such as `G_RM_AA_ZB_OPA_SURF` means the full
/// two-cycle word; inside a list the same name is its cycle-1 preset.
pub fn resolve_value(arg: &Arg) -> Result<i64> {
    match arg {
        Arg::Int(value) => Ok(*value),
        Arg::Sym(text) => {
            if let Some(value) = MODE_BITS.value_of(text.trim()) {
                return Ok(value);
            }
            text.split('|')
                .try_fold(0, |acc, part| Ok(acc | value_part(part)?))
        }
        Arg::Flags(parts) => parts.iter().try_fold(0, |acc, part| {
            let value = match part {
                Arg::Sym(text) => text
                    .split('|')
                    .try_fold(0, |acc, part| Ok::<_, CodecError>(acc | value_part(part)?))?,
                other => resolve_value(other)?,
            };
            Ok(acc | value)
        }),
    }
}

pub(crate) fn encode_low(args: &ArgList<'_>) -> Result<Vec<i64>> {
    let mask = CLEAR.resolve(args.get(0)?)?;
    let value = resolve_value(args.get(1)?)?;
    let (shift, length) = split_mask(args.command(), mask)?;
    Ok(vec![shift, length, value])
}

/// Collapses cycle-1 blender settings onto the pass and fog presets.
const fn collapse_cycle1(mut cycle1: u32) -> u32 {
    let mut i = 0;
    while i < BLENDER_PRESETS.len() {
        let preset = BLENDER_PRESETS[i];
        if cycle1 & preset == preset {
            cycle1 = preset;
        }
        i += 1;
    }
    cycle1
}

fn preset_name(bits: u32) -> Option<&'static str> {
    PRESETS.name_of(i64::from(bits))
}

fn decode_render_mode(value: u32, ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let mut cycle1 = value & CYCLE1_BITS;
    if ctx.config().collapse_blender_presets {
        cycle1 = collapse_cycle1(cycle1);
    }
    let cycle2 = value & CYCLE2_BITS;
    let name1 = preset_name(cycle1);
    let name2 = preset_name(cycle2);
    let text1 = name1.map_or_else(|| format!("0x{cycle1:08X}"), str::to_owned);
    let text2 = name2.map_or_else(|| format!("0x{cycle2:08X}"), str::to_owned);
    if name1.is_none() || name2.is_none() {
        if ctx.config().warn_ambiguous_render_modes {
            warn!("render mode {value:#010x} has no preset: {text1}, {text2}");
        }
        ctx.report(Diagnostic::AmbiguousRenderMode {
            cycle1: text1.clone(),
            cycle2: text2.clone(),
        });
    }
    ctx.set_name("gsDPSetRenderMode");
    vec![
        Arg::sym("Render_Mode"),
        Arg::Flags(vec![Arg::sym(text1), Arg::sym(text2)]),
    ]
}

/// Names the value bits of one low-word field, clearing what it names from `rest`.
fn name_field(field: u32, rest: &mut u32, set: &mut Vec<Arg>) {
    let named = match field {
        ALPHACOMPARE => ALPHA_COMPARE.name_of(i64::from(*rest & field)).map(|n| (n, field)),
        ZSRCSEL => DEPTH_SOURCE.name_of(i64::from(*rest & field)).map(|n| (n, field)),
        _ => None,
    };
    if let Some((name, bits)) = named {
        set.push(Arg::sym(name));
        *rest &= !bits;
    }
}

fn name_ind_part(part: &IndPart, rest: &mut u32, set: &mut Vec<Arg>) {
    match part {
        IndPart::Bit(name, bit) => {
            if *rest & bit != 0 {
                set.push(Arg::sym(*name));
                *rest &= !bit;
            }
        }
        IndPart::Group(_, mask, values) => {
            let bits = *rest & mask;
            if let Some(&(name, _)) = values.iter().find(|&&(_, v)| v == bits) {
                set.push(Arg::sym(name));
                *rest &= !mask;
            }
        }
    }
}

/// Splits a partial low-word mask into named fields and the values they hold.
fn decompose(mask: u32, value: u32, ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    const FIELDS: [(u32, &str); 4] = [
        (ALPHACOMPARE, "G_MDSFT_ALPHACOMPARE"),
        (ZSRCSEL, "G_MDSFT_ZSRCSEL"),
        (CYCLE_IND, "G_MDSFT_RENDERMODE_CYCLE_IND"),
        (CYCLE_DEP, "G_MDSFT_RENDERMODE_CYCLE_DEP"),
    ];
    let mut clear = Vec::new();
    let mut set = Vec::new();
    let mut rest = value;
    for (field, name) in FIELDS {
        let covered = mask & field;
        if covered == 0 {
            continue;
        }
        if covered == field {
            clear.push(Arg::sym(name));
            if field == CYCLE_IND {
                for part in IND_PARTS {
                    name_ind_part(part, &mut rest, &mut set);
                }
            } else {
                name_field(field, &mut rest, &mut set);
            }
            if mask == field {
                break;
            }
        } else if field == CYCLE_IND {
            let mut unnamed = covered;
            for part in IND_PARTS.iter().filter(|p| covered & p.mask() == p.mask()) {
                clear.push(Arg::sym(part.name()));
                unnamed &= !part.mask();
                name_ind_part(part, &mut rest, &mut set);
            }
            if unnamed != 0 {
                clear.push(Arg::Int(i64::from(unnamed)));
            }
        } else {
            clear.push(Arg::Int(i64::from(covered)));
        }
    }
    if rest != 0 {
        set.push(Arg::Int(i64::from(rest)));
    }
    if clear.is_empty() {
        clear.push(Arg::Int(i64::from(mask)));
    }

    match mask {
        ALPHACOMPARE => ctx.set_name("gsDPSetAlphaCompare"),
        ZSRCSEL => ctx.set_name("gsDPSetDepthSource"),
        _ => ctx.set_name("gsSPSetOtherMode"),
    }
    vec![Arg::from_parts(clear), Arg::from_parts(set)]
}

pub(crate) fn decode_low(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[shift, length, value] = values else {
        return values.iter().copied().map(Arg::Int).collect();
    };
    let mask = reconstruct_mask(shift as u32, length as u32);
    let value = value as u32;
    match mask {
        RENDER_MODE_MASK => decode_render_mode(value, ctx),
        u32::MAX | 0 => {
            ctx.set_name("gsSPSetOtherMode");
            let clear = if mask == 0 { "None" } else { "All" };
            vec![Arg::sym(clear), Arg::Int(i64::from(value))]
        }
        _ => decompose(mask, value, ctx),
    }
}
