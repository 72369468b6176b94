//! RDP command transforms.
//!
//! Tile and image commands take sizes the way the gbi macros do (texel
//! counts, widths, mask dimensions, bit depths) and store them the way the
//! RDP reads them (minus one, in 10.2 fixed point, as log2).

use super::{CommandSpec, command, no_args, no_values, raw_args, raw_values};
use crate::common::arg::Arg;
use crate::common::error::{CodecError, Result};
use crate::isa::combiner;
use crate::isa::decode::DecodeContext;
use crate::isa::encode::ArgList;
use crate::isa::layout;
use crate::isa::opcodes::Opcode;
use crate::isa::othermode;
use crate::isa::rendermode;
use crate::isa::symbols::{FORMAT, SCISSOR_MODE, SIZE, WRAP};

command!(SETOTHERMODE_L, SetOtherModeL, "gsSPSetOtherMode", layout::SETOTHERMODE_L, 2, rendermode::encode_low, rendermode::decode_low);
command!(SETOTHERMODE_H, SetOtherModeH, "gsSPSetOtherMode", layout::SETOTHERMODE_H, 2, othermode::encode_high, othermode::decode_high);
command!(TEXRECT, TexRect, "gsDPTextureRectangle", layout::TEXRECT, 9, raw_args, raw_values);
command!(TEXRECTFLIP, TexRectFlip, "gsDPTextureRectangleFlip", layout::TEXRECTFLIP, 9, raw_args, raw_values);
command!(RDPLOADSYNC, RdpLoadSync, "gsDPLoadSync", layout::RDPLOADSYNC, 0, no_args, no_values);
command!(RDPPIPESYNC, RdpPipeSync, "gsDPPipeSync", layout::RDPPIPESYNC, 0, no_args, no_values);
command!(RDPTILESYNC, RdpTileSync, "gsDPTileSync", layout::RDPTILESYNC, 0, no_args, no_values);
command!(RDPFULLSYNC, RdpFullSync, "gsDPFullSync", layout::RDPFULLSYNC, 0, no_args, no_values);
command!(SETKEYGB, SetKeyGb, "gsDPSetKeyGB", layout::SETKEYGB, 6, raw_args, raw_values);
command!(SETKEYR, SetKeyR, "gsDPSetKeyR", layout::SETKEYR, 3, raw_args, raw_values);
command!(SETCONVERT, SetConvert, "gsDPSetConvert", layout::SETCONVERT, 6, raw_args, raw_values);
command!(SETSCISSOR, SetScissor, "gsDPSetScissor", layout::SETSCISSOR, 5, encode_scissor, decode_scissor);
command!(SETPRIMDEPTH, SetPrimDepth, "gsDPSetPrimDepth", layout::SETPRIMDEPTH, 2, raw_args, raw_values);
command!(RDPSETOTHERMODE, RdpSetOtherMode, "gsDPSetOtherMode", layout::RDPSETOTHERMODE, 2, raw_args, raw_values);
command!(LOADTLUT, LoadTlut, "gsDPLoadTLUTCmd", layout::LOADTLUT, 2, encode_loadtlut, decode_loadtlut);
command!(RDPHALF_2, RdpHalf2, "G_RDPHALF_2", layout::RDPHALF_2, 1, raw_args, raw_values);
command!(SETTILESIZE, SetTileSize, "gsDPSetTileSize", layout::SETTILESIZE, 5, encode_tile_size, decode_tile_size);
command!(LOADBLOCK, LoadBlock, "gsDPLoadBlock", layout::LOADBLOCK, 5, encode_load_block, decode_load_block);
command!(LOADTILE, LoadTile, "gsDPLoadTile", layout::LOADTILE, 5, encode_load_tile, decode_load_tile);
command!(SETTILE, SetTile, "gsDPSetTile", layout::SETTILE, 12, encode_settile, decode_settile);
command!(FILLRECT, FillRect, "gsDPFillRectangle", layout::FILLRECT, 4, raw_args, raw_values);
command!(SETFILLCOLOR, SetFillColor, "gsDPSetFillColor", layout::SETFILLCOLOR, 4, raw_args, raw_values);
command!(SETFOGCOLOR, SetFogColor, "gsDPSetFogColor", layout::SETFOGCOLOR, 4, raw_args, raw_values);
command!(SETBLENDCOLOR, SetBlendColor, "gsDPSetBlendColor", layout::SETBLENDCOLOR, 4, raw_args, raw_values);
command!(SETPRIMCOLOR, SetPrimColor, "gsDPSetPrimColor", layout::SETPRIMCOLOR, 6, raw_args, raw_values);
command!(SETENVCOLOR, SetEnvColor, "gsDPSetEnvColor", layout::SETENVCOLOR, 4, raw_args, raw_values);
command!(SETCOMBINE, SetCombine, "gsDPSetCombineLERP", layout::SETCOMBINE, 16, combiner::encode, combiner::decode);
command!(SETTIMG, SetTImg, "gsDPSetTextureImage", layout::SETTIMG, 3, encode_image, decode_image);
command!(SETZIMG, SetZImg, "gsDPSetDepthImage", layout::SETZIMG, 1, raw_args, raw_values);
command!(SETCIMG, SetCImg, "gsDPSetColorImage", layout::SETCIMG, 4, encode_color_image, decode_color_image);

/// Largest palette a single `G_LOADTLUT` can load.
const MAX_TLUT_ENTRIES: i64 = 1024;

/// Resolves a texel size argument to its raw `G_IM_SIZ_*` value.
///
/// Integers are bit depths (4, 8, 16, 32) or raw values (0 to 3); symbols go
/// through the size table.
pub(crate) fn resolve_siz(arg: &Arg) -> Result<i64> {
    let depth = match arg {
        Arg::Int(value) => Some(*value),
        Arg::Sym(_) => arg.as_int(),
        Arg::Flags(_) => None,
    };
    match depth {
        Some(bits @ (4 | 8 | 16 | 32)) => Ok(i64::from((bits / 4).trailing_zeros())),
        Some(raw @ 0..=3) => Ok(raw),
        Some(other) => Err(CodecError::UnknownSymbol {
            table: SIZE.name,
            symbol: other.to_string(),
        }),
        None => match SIZE.resolve(arg)? {
            raw @ 0..=3 => Ok(raw),
            other => Err(CodecError::UnknownSymbol {
                table: SIZE.name,
                symbol: other.to_string(),
            }),
        },
    }
}

/// Bits per texel of a raw `G_IM_SIZ_*` value.
pub(crate) const fn texel_bits(siz: i64) -> i64 {
    4 << siz
}

fn encode_scissor(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.int(0, "xl")?,
        args.int(1, "yl")?,
        args.symbol(2, &SCISSOR_MODE)?,
        args.int(3, "xh")?,
        args.int(4, "yh")?,
    ])
}

fn decode_scissor(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let mut args = raw_values(values, ctx);
    if let Some(mode) = args.get_mut(2) {
        *mode = SCISSOR_MODE.symbolize(values[2]);
    }
    args
}

fn encode_loadtlut(args: &ArgList<'_>) -> Result<Vec<i64>> {
    let count = args.int(1, "count")?;
    if !(0..=MAX_TLUT_ENTRIES).contains(&count) {
        return Err(args.invalid("count", format!("{count} palette entries is out of range")));
    }
    Ok(vec![args.int(0, "tile")?, ((count - 1) & 0x3FF) << 2])
}

fn decode_loadtlut(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[tile, count] = values else {
        return raw_values(values, ctx);
    };
    vec![Arg::Int(tile), Arg::Int(((count >> 2) & 0x3FF) + 1)]
}

fn encode_tile_size(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.int(0, "uls")?,
        args.int(1, "ult")?,
        args.int(2, "tile")?,
        fixed_10_2(args, 3, "width")?,
        fixed_10_2(args, 4, "height")?,
    ])
}

/// Converts a whole-texel extent to its stored 10.2 lower-right coordinate.
fn fixed_10_2(args: &ArgList<'_>, index: usize, field: &'static str) -> Result<i64> {
    let extent = args.offset(index, field, -1)?;
    args.checked(field, extent.checked_mul(4))
}

fn decode_tile_size(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[uls, ult, tile, lrs, lrt] = values else {
        return raw_values(values, ctx);
    };
    vec![
        Arg::Int(uls),
        Arg::Int(ult),
        Arg::Int(tile),
        Arg::Int((lrs >> 2) + 1),
        Arg::Int((lrt >> 2) + 1),
    ]
}

fn encode_load_block(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.int(0, "uls")?,
        args.int(1, "ult")?,
        args.int(2, "tile")?,
        args.offset(3, "texels", -1)?,
        args.int(4, "dxt")?,
    ])
}

fn decode_load_block(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let mut args = raw_values(values, ctx);
    if let (Some(texels), Some(&raw)) = (args.get_mut(3), values.get(3)) {
        *texels = Arg::Int(raw + 1);
    }
    args
}

fn encode_load_tile(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.scaled(0, "uls", 4)?,
        args.scaled(1, "ult", 4)?,
        args.int(2, "tile")?,
        args.scaled(3, "lrs", 4)?,
        args.scaled(4, "lrt", 4)?,
    ])
}

fn decode_load_tile(values: &[i64], _ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| Arg::Int(if i == 2 { v } else { v >> 2 }))
        .collect()
}

/// Converts a tile mask dimension to the stored log2.
fn mask_log2(args: &ArgList<'_>, index: usize, field: &'static str) -> Result<i64> {
    let dim = args.int(index, field)?;
    match dim {
        0 => Ok(0),
        d if d > 0 && d & (d - 1) == 0 => Ok(i64::from(d.trailing_zeros())),
        d => Err(args.invalid(field, format!("mask {d} is not a power of two"))),
    }
}

fn wrap_arg(raw: i64) -> Arg {
    if raw == 3 {
        return Arg::Flags(vec![Arg::sym("G_TX_CLAMP"), Arg::sym("G_TX_MIRROR")]);
    }
    WRAP.symbolize(raw)
}

fn encode_settile(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.symbol(0, &FORMAT)?,
        resolve_siz(args.get(1)?)?,
        args.int(2, "line")?,
        args.int(3, "tmem")?,
        args.int(4, "tile")?,
        args.int(5, "palette")?,
        args.symbol(6, &WRAP)?,
        mask_log2(args, 7, "maskt")?,
        args.int(8, "shiftt")?,
        args.symbol(9, &WRAP)?,
        mask_log2(args, 10, "masks")?,
        args.int(11, "shifts")?,
    ])
}

fn decode_settile(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[fmt, siz, line, tmem, tile, palette, cmt, maskt, shiftt, cms, masks, shifts] = values
    else {
        return raw_values(values, ctx);
    };
    vec![
        FORMAT.symbolize(fmt),
        SIZE.symbolize(siz),
        Arg::Int(line),
        Arg::Int(tmem),
        Arg::Int(tile),
        Arg::Int(palette),
        wrap_arg(cmt),
        Arg::Int(1 << maskt),
        Arg::Int(shiftt),
        wrap_arg(cms),
        Arg::Int(1 << masks),
        Arg::Int(shifts),
    ]
}

fn encode_image(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.symbol(0, &FORMAT)?,
        resolve_siz(args.get(1)?)?,
        args.int(2, "address")?,
    ])
}

fn decode_image(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[fmt, siz, address] = values else {
        return raw_values(values, ctx);
    };
    vec![FORMAT.symbolize(fmt), SIZE.symbolize(siz), Arg::Int(address)]
}

fn encode_color_image(args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(vec![
        args.symbol(0, &FORMAT)?,
        resolve_siz(args.get(1)?)?,
        args.offset(2, "width", -1)?,
        args.int(3, "address")?,
    ])
}

fn decode_color_image(values: &[i64], ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let &[fmt, siz, width, address] = values else {
        return raw_values(values, ctx);
    };
    vec![
        FORMAT.symbolize(fmt),
        SIZE.symbolize(siz),
        Arg::Int(width + 1),
        Arg::Int(address),
    ]
}
