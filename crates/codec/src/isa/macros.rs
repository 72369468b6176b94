//! Texture-load macros and the TMEM parameters they compute.
//!
//! Each macro expands into a fixed sequence of primitive commands: point the
//! RDP at the texture, describe a load tile, load the whole texture as one
//! block, then describe the render tile. The palette variant first loads a
//! 128-entry TLUT.

use tracing::debug;

use crate::common::arg::Arg;
use crate::common::error::{CodecError, Result};
use crate::isa::commands::rdp::{resolve_siz, texel_bits};
use crate::isa::instruction::Command;

/// Number of 64-bit words the DXT accumulator must count to per texture row.
const DXT_ONE: i64 = 1 << 11;

/// Load tile used while streaming a texture into TMEM.
const LOAD_TILE: i64 = 7;

/// Tile the palette is loaded through.
const PALETTE_TILE: i64 = 5;

/// TMEM word offset of the palette (upper half of TMEM).
const PALETTE_TMEM: i64 = 256;

/// Entries loaded by the CI4 palette variant.
const CI4_PALETTE_ENTRIES: i64 = 128;

/// Computes the `G_LOADBLOCK` dxt value from a width and a size power.
///
/// # Arguments
///
/// * `width` - Texture width in texels.
/// * `bits_per_texel_power` - `p` such that one row is `width << p` bits divided by 8.
///
/// # Returns
///
/// `ceil(2048 / max(1, (width << p) / 8))`, or `None` when the row size
/// overflows.
///
/// # Examples
///
/// ```
/// use f3dex2_codec::compute_block_throttle;
///
/// assert_eq!(compute_block_throttle(32, 2), Some(128));
/// assert_eq!(compute_block_throttle(1, 0), Some(2048));
/// ```
pub fn compute_block_throttle(width: i64, bits_per_texel_power: u32) -> Option<i64> {
    let scale = 1i64.checked_shl(bits_per_texel_power).filter(|&s| s > 0)?;
    Some(throttle(width.checked_mul(scale)? / 8))
}

/// Computes the `G_LOADBLOCK` dxt value for a texel bit depth.
pub fn dxt_for_depth(width: i64, bits: i64) -> Option<i64> {
    Some(throttle(width.checked_mul(bits)? / 64))
}

/// TMEM line length, in 64-bit words, of a tile `width` texels wide.
///
/// 32-bit texels are split across both TMEM halves, so each half holds two
/// bytes per texel, as `G_IM_SIZ_32b_LINE_BYTES` says.
pub fn line_size(width: i64, bits: i64) -> Option<i64> {
    let bytes = match bits {
        32 => width.checked_mul(2)?,
        _ => width.checked_mul(bits)? / 8,
    };
    Some(bytes.checked_add(7)? >> 3)
}

/// `ceil(2048 / max(1, words))`.
const fn throttle(words: i64) -> i64 {
    let words = if words > 1 { words } else { 1 };
    (DXT_ONE - 1) / words + 1
}

/// The texture-load macros the encoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureMacro {
    /// `(fmt, siz, addr, width, height, cms, cmt)`.
    Block,
    /// `(fmt, addr, width, height, cms, cmt)`, 4-bit texels.
    Block4b,
    /// `(fmt, addr, width, height, cms, cmt)`, 8-bit texels.
    Block8b,
    /// `(fmt, addr, width, height, cms, cmt, palette)`, CI4 texels with a palette.
    ///
    /// `fmt` is accepted for call compatibility; the texture is always loaded as `G_IM_FMT_CI`.
    Block4bCi,
    /// `(fmt, addr, width, height, cms, cmt, tile, tmem)`, 4-bit texels.
    Block4bTile,
    /// `(fmt, addr, width, height, cms, cmt, tile, tmem)`, 8-bit texels.
    Block8bTile,
    /// `(fmt, siz, addr, width, height, cms, cmt, tile, tmem)`.
    BlockTile,
}

/// Resolved parameters shared by every block load.
struct BlockLoad<'a> {
    fmt: &'a Arg,
    addr: &'a Arg,
    width: i64,
    height: i64,
    cms: &'a Arg,
    cmt: &'a Arg,
    tile: i64,
    tmem: i64,
    /// Bit depth the texture is loaded at.
    load_bits: i64,
    /// Texels counted by `G_LOADBLOCK`, at the load depth.
    texels: i64,
    /// `G_LOADBLOCK` dxt for the render depth.
    dxt: i64,
    /// TMEM line length of the render tile.
    line: i64,
    /// Bit depth of the render tile.
    bits: i64,
}

impl TextureMacro {
    /// Every macro, in name order.
    pub const ALL: [Self; 7] = [
        Self::Block,
        Self::Block4b,
        Self::Block8b,
        Self::Block4bCi,
        Self::Block4bTile,
        Self::Block8bTile,
        Self::BlockTile,
    ];

    /// Looks up a macro by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// The macro's name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Block => "G_LoadTextureBlock",
            Self::Block4b => "G_LoadTextureBlock4B",
            Self::Block8b => "G_LoadTextureBlock8B",
            Self::Block4bCi => "G_LoadTextureBlock4BCI",
            Self::Block4bTile => "G_LoadTextureBlock4B_Tile",
            Self::Block8bTile => "G_LoadTextureBlock8B_Tile",
            Self::BlockTile => "G_LoadTextureBlock_Tile",
        }
    }

    /// Number of arguments the macro takes.
    pub const fn arity(self) -> usize {
        match self {
            Self::Block | Self::Block4bCi => 7,
            Self::Block4b | Self::Block8b => 6,
            Self::Block4bTile | Self::Block8bTile => 8,
            Self::BlockTile => 9,
        }
    }

    /// Expands the macro into primitive commands.
    ///
    /// # Arguments
    ///
    /// * `args` - Macro arguments, in the order documented on each variant.
    ///
    /// # Returns
    ///
    /// Seven commands, or thirteen for `G_LoadTextureBlock4BCI`.
    pub fn expand(self, args: &[Arg]) -> Result<Vec<Command>> {
        if args.len() != self.arity() {
            return Err(CodecError::Arity {
                command: self.name().to_owned(),
                expected: self.arity(),
                found: args.len(),
            });
        }
        let int = |index: usize, field: &'static str| -> Result<i64> {
            args[index].as_int().ok_or_else(|| CodecError::Encoding {
                command: self.name(),
                field,
                reason: format!("expects an integer, got `{}`", args[index]),
            })
        };
        let fits = |field: &'static str, value: Option<i64>| -> Result<i64> {
            value.ok_or_else(|| CodecError::Encoding {
                command: self.name(),
                field,
                reason: "overflows".to_owned(),
            })
        };
        // `shift` is log2 of the texels packed into one 16-bit load unit.
        let texels = |width: i64, height: i64, shift: u32| -> Result<i64> {
            let area = fits("height", width.checked_mul(height))?;
            let round = (1 << shift) - 1;
            Ok(fits("height", area.checked_add(round))? >> shift)
        };

        let commands = match self {
            Self::Block | Self::BlockTile => {
                let bits = texel_bits(resolve_siz(&args[1])?);
                let (width, height) = (int(3, "width")?, int(4, "height")?);
                let (tile, tmem) = if self == Self::BlockTile {
                    (int(7, "tile")?, int(8, "tmem")?)
                } else {
                    (0, 0)
                };
                block_load(&BlockLoad {
                    fmt: &args[0],
                    addr: &args[2],
                    width,
                    height,
                    cms: &args[5],
                    cmt: &args[6],
                    tile,
                    tmem,
                    load_bits: bits,
                    texels: texels(width, height, 0)?,
                    dxt: fits("width", dxt_for_depth(width, bits))?,
                    line: fits("width", line_size(width, bits))?,
                    bits,
                })
            }
            Self::Block4b | Self::Block8b | Self::Block4bTile | Self::Block8bTile => {
                let (width, height) = (int(2, "width")?, int(3, "height")?);
                let (tile, tmem) = match self {
                    Self::Block4bTile | Self::Block8bTile => (int(6, "tile")?, int(7, "tmem")?),
                    _ => (0, 0),
                };
                let (bits, shift) = match self {
                    Self::Block4b | Self::Block4bTile => (4, 2),
                    _ => (8, 1),
                };
                block_load(&BlockLoad {
                    fmt: &args[0],
                    addr: &args[1],
                    width,
                    height,
                    cms: &args[4],
                    cmt: &args[5],
                    tile,
                    tmem,
                    load_bits: 16,
                    texels: texels(width, height, shift)?,
                    dxt: fits("width", dxt_for_depth(width, bits))?,
                    line: fits("width", line_size(width, bits))?,
                    bits,
                })
            }
            Self::Block4bCi => {
                let (width, height) = (int(2, "width")?, int(3, "height")?);
                let ci = Arg::sym("G_IM_FMT_CI");
                let load = BlockLoad {
                    fmt: &ci,
                    addr: &args[1],
                    width,
                    height,
                    cms: &args[4],
                    cmt: &args[5],
                    tile: 0,
                    tmem: 0,
                    load_bits: 16,
                    texels: texels(width, height, 2)?,
                    dxt: fits("width", dxt_for_depth(width, 4))?,
                    line: fits("width", line_size(width, 4))?,
                    bits: 4,
                };
                ci4_load(&load, &args[6])
            }
        };
        debug!("{} expands to {} commands", self.name(), commands.len());
        Ok(commands)
    }
}

fn cmd(name: &str, args: Vec<Arg>) -> Command {
    Command::new(name, args)
}

/// `G_SETTILE` describing the whole texture.
fn settile(fmt: Arg, siz: i64, line: i64, tmem: i64, tile: i64, load: &BlockLoad<'_>) -> Command {
    cmd(
        "G_SETTILE",
        vec![
            fmt,
            Arg::Int(siz),
            Arg::Int(line),
            Arg::Int(tmem),
            Arg::Int(tile),
            Arg::Int(0),
            load.cmt.clone(),
            Arg::Int(load.height),
            Arg::Int(0),
            load.cms.clone(),
            Arg::Int(load.width),
            Arg::Int(0),
        ],
    )
}

fn load_block(load: &BlockLoad<'_>) -> Command {
    cmd(
        "G_LOADBLOCK",
        vec![
            Arg::Int(0),
            Arg::Int(0),
            Arg::Int(LOAD_TILE),
            Arg::Int(load.texels),
            Arg::Int(load.dxt),
        ],
    )
}

fn set_tile_size(load: &BlockLoad<'_>) -> Command {
    cmd(
        "G_SETTILESIZE",
        vec![
            Arg::Int(0),
            Arg::Int(0),
            Arg::Int(load.tile),
            Arg::Int(load.width),
            Arg::Int(load.height),
        ],
    )
}

fn block_load(load: &BlockLoad<'_>) -> Vec<Command> {
    vec![
        cmd(
            "G_SETTIMG",
            vec![load.fmt.clone(), Arg::Int(load.load_bits), load.addr.clone()],
        ),
        settile(load.fmt.clone(), load.load_bits, 0, load.tmem, LOAD_TILE, load),
        Command::bare("G_RDPLOADSYNC"),
        load_block(load),
        Command::bare("G_RDPPIPESYNC"),
        settile(load.fmt.clone(), load.bits, load.line, load.tmem, load.tile, load),
        set_tile_size(load),
    ]
}

fn ci4_load(load: &BlockLoad<'_>, palette: &Arg) -> Vec<Command> {
    let rgba = Arg::sym("G_IM_FMT_RGBA");
    let wrap = Arg::sym("G_TX_WRAP");
    vec![
        Command::bare("G_RDPTILESYNC"),
        cmd(
            "G_SETTILE",
            vec![
                rgba.clone(),
                Arg::Int(4),
                Arg::Int(0),
                Arg::Int(PALETTE_TMEM),
                Arg::Int(PALETTE_TILE),
                Arg::Int(0),
                wrap.clone(),
                Arg::Int(1),
                Arg::Int(0),
                wrap,
                Arg::Int(1),
                Arg::Int(0),
            ],
        ),
        settile(load.fmt.clone(), 16, 0, 0, LOAD_TILE, load),
        cmd("G_SETTIMG", vec![rgba, Arg::Int(16), palette.clone()]),
        Command::bare("G_RDPLOADSYNC"),
        cmd(
            "G_LOADTLUT",
            vec![Arg::Int(PALETTE_TILE), Arg::Int(CI4_PALETTE_ENTRIES)],
        ),
        Command::bare("G_RDPPIPESYNC"),
        cmd("G_SETTIMG", vec![load.fmt.clone(), Arg::Int(16), load.addr.clone()]),
        Command::bare("G_RDPLOADSYNC"),
        load_block(load),
        Command::bare("G_RDPPIPESYNC"),
        settile(load.fmt.clone(), 4, load.line, 0, 0, load),
        set_tile_size(load),
    ]
}
