//! RSP geometry mode bits (`G_GEOMETRYMODE`).
//!
//! The command carries a 24-bit AND mask (stored inverted, so it reads as the
//! set of bits to clear) and a 32-bit OR mask of bits to set.

use bitflags::bitflags;

use crate::common::arg::{Arg, parse_int};
use crate::common::error::{CodecError, Result};

bitflags! {
    /// Geometry mode flags, named as in the gbi.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GeometryMode: u32 {
        const G_ZBUFFER = 0x0000_0001;
        const G_SHADE = 0x0000_0004;
        const G_CULL_FRONT = 0x0000_0200;
        const G_CULL_BACK = 0x0000_0400;
        const G_FOG = 0x0001_0000;
        const G_LIGHTING = 0x0002_0000;
        const G_TEXTURE_GEN = 0x0004_0000;
        const G_TEXTURE_GEN_LINEAR = 0x0008_0000;
        const G_SHADING_SMOOTH = 0x0020_0000;
        const G_CLIPPING = 0x0080_0000;
    }
}

/// Every bit of the clear mask.
pub const ALL: u32 = 0x00FF_FFFF;

const TABLE: &str = "geometry mode";

fn resolve_name(name: &str) -> Result<u32> {
    let name = name.trim();
    match name {
        "All" => Ok(ALL),
        "Clear" => Ok(0),
        _ => GeometryMode::from_name(name)
            .map(|flag| flag.bits())
            .or_else(|| parse_int(name).and_then(|value| u32::try_from(value).ok()))
            .ok_or_else(|| CodecError::UnknownSymbol {
                table: TABLE,
                symbol: name.to_owned(),
            }),
    }
}

/// Resolves a geometry-mode argument to its bits.
///
/// Accepts flag names, `All`, `Clear`, integer text, `|`-joined lists of
/// these, and `Flags`.
pub fn resolve(arg: &Arg) -> Result<u32> {
    match arg {
        Arg::Int(value) => u32::try_from(*value).map_err(|_| CodecError::Encoding {
            command: "G_GEOMETRYMODE",
            field: "mode",
            reason: format!("cannot hold {value} in 32 bits"),
        }),
        Arg::Sym(text) => text
            .split('|')
            .try_fold(0, |acc, part| Ok(acc | resolve_name(part)?)),
        Arg::Flags(parts) => parts.iter().try_fold(0, |acc, part| Ok(acc | resolve(part)?)),
    }
}

/// Names the bits of a geometry mode.
///
/// Exactly `0xFFFFFF` is `All`; zero stays `0`; anything else lists its flag
/// names followed by any unnamed residual bits.
pub fn symbolize(bits: u32) -> Arg {
    if bits == ALL {
        return Arg::sym("All");
    }
    let mode = GeometryMode::from_bits_truncate(bits);
    let mut parts: Vec<Arg> = mode.iter_names().map(|(name, _)| Arg::sym(name)).collect();
    let residual = bits & !mode.bits();
    if residual != 0 {
        parts.push(Arg::Int(i64::from(residual)));
    }
    Arg::from_parts(parts)
}

/// Converts a clear mask to the stored (inverted) field value.
pub fn encode_clear(arg: &Arg) -> Result<i64> {
    let clear = resolve(arg)?;
    if clear > ALL {
        return Err(CodecError::Encoding {
            command: "G_GEOMETRYMODE",
            field: "clear",
            reason: format!("{clear:#x} has bits above the 24-bit mask"),
        });
    }
    Ok(i64::from(!clear & ALL))
}

/// Converts the stored (inverted) field value back to a clear mask.
pub fn decode_clear(raw: i64) -> Arg {
    symbolize(!(raw as u32) & ALL)
}
