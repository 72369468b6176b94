//! Per-opcode command descriptors.
//!
//! Every opcode maps to one static `CommandSpec` holding its layout, its gbi
//! macro name and the pair of transforms between semantic arguments and raw
//! field values. The transforms live with their command family:
//! 1. **RSP:** Geometry, matrix, display-list flow (`rsp`).
//! 2. **RDP:** Rasterizer state, tiles, colors, images (`rdp`).

use crate::common::arg::Arg;
use crate::common::error::Result;
use crate::isa::decode::DecodeContext;
use crate::isa::encode::ArgList;
use crate::isa::layout::Field;
use crate::isa::opcodes::Opcode;

/// RDP command transforms.
pub mod rdp;
/// RSP command transforms.
pub mod rsp;

/// Maps semantic arguments to raw field values, in layout order.
pub type EncodeFn = fn(&ArgList<'_>) -> Result<Vec<i64>>;

/// Maps raw field values (layout order) to semantic arguments.
pub type DecodeFn = fn(&[i64], &mut DecodeContext<'_>) -> Vec<Arg>;

/// Static description of one command.
#[derive(Debug)]
pub struct CommandSpec {
    /// The opcode this spec describes.
    pub opcode: Opcode,
    /// Default gbi macro name reported by the decoder.
    pub macro_name: &'static str,
    /// Bit-field layout, one to three words.
    pub layout: &'static [Field],
    /// Number of encoder arguments.
    pub arity: usize,
    /// Encode transform.
    pub encode: EncodeFn,
    /// Decode transform.
    pub decode: DecodeFn,
}

impl CommandSpec {
    /// The opcode's mnemonic.
    pub const fn mnemonic(&self) -> &'static str {
        self.opcode.mnemonic()
    }
}

/// Declares a `CommandSpec` static.
macro_rules! command {
    ($name:ident, $opcode:ident, $macro_name:literal, $layout:expr, $arity:expr, $encode:expr, $decode:expr $(,)?) => {
        #[doc = concat!("`", $macro_name, "`.")]
        pub static $name: CommandSpec = CommandSpec {
            opcode: Opcode::$opcode,
            macro_name: $macro_name,
            layout: $layout,
            arity: $arity,
            encode: $encode,
            decode: $decode,
        };
    };
}
pub(crate) use command;

/// Encode transform for commands without arguments.
pub(crate) fn no_args(_args: &ArgList<'_>) -> Result<Vec<i64>> {
    Ok(Vec::new())
}

/// Decode transform for commands without arguments.
pub(crate) fn no_values(_values: &[i64], _ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    Vec::new()
}

/// Encode transform for commands whose arguments are the raw fields.
pub(crate) fn raw_args(args: &ArgList<'_>) -> Result<Vec<i64>> {
    args.ints()
}

/// Decode transform for commands whose arguments are the raw fields.
pub(crate) fn raw_values(values: &[i64], _ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    values.iter().copied().map(Arg::Int).collect()
}

impl Opcode {
    /// Returns the static descriptor of this opcode.
    pub fn spec(self) -> &'static CommandSpec {
        match self {
            Self::SpNoop => &rsp::SPNOOP,
            Self::Vtx => &rsp::VTX,
            Self::ModifyVtx => &rsp::MODIFYVTX,
            Self::CullDl => &rsp::CULLDL,
            Self::BranchZ => &rsp::BRANCH_Z,
            Self::Tri1 => &rsp::TRI1,
            Self::Tri2 => &rsp::TRI2,
            Self::Quad => &rsp::QUAD,
            Self::DmaIo => &rsp::DMA_IO,
            Self::Texture => &rsp::TEXTURE,
            Self::PopMtx => &rsp::POPMTX,
            Self::GeometryMode => &rsp::GEOMETRYMODE,
            Self::Mtx => &rsp::MTX,
            Self::MoveWord => &rsp::MOVEWORD,
            Self::MoveMem => &rsp::MOVEMEM,
            Self::LoadUcode => &rsp::LOAD_UCODE,
            Self::Dl => &rsp::DL,
            Self::EndDl => &rsp::ENDDL,
            Self::Noop => &rsp::NOOP,
            Self::RdpHalf1 => &rsp::RDPHALF_1,
            Self::SetOtherModeL => &rdp::SETOTHERMODE_L,
            Self::SetOtherModeH => &rdp::SETOTHERMODE_H,
            Self::TexRect => &rdp::TEXRECT,
            Self::TexRectFlip => &rdp::TEXRECTFLIP,
            Self::RdpLoadSync => &rdp::RDPLOADSYNC,
            Self::RdpPipeSync => &rdp::RDPPIPESYNC,
            Self::RdpTileSync => &rdp::RDPTILESYNC,
            Self::RdpFullSync => &rdp::RDPFULLSYNC,
            Self::SetKeyGb => &rdp::SETKEYGB,
            Self::SetKeyR => &rdp::SETKEYR,
            Self::SetConvert => &rdp::SETCONVERT,
            Self::SetScissor => &rdp::SETSCISSOR,
            Self::SetPrimDepth => &rdp::SETPRIMDEPTH,
            Self::RdpSetOtherMode => &rdp::RDPSETOTHERMODE,
            Self::LoadTlut => &rdp::LOADTLUT,
            Self::RdpHalf2 => &rdp::RDPHALF_2,
            Self::SetTileSize => &rdp::SETTILESIZE,
            Self::LoadBlock => &rdp::LOADBLOCK,
            Self::LoadTile => &rdp::LOADTILE,
            Self::SetTile => &rdp::SETTILE,
            Self::FillRect => &rdp::FILLRECT,
            Self::SetFillColor => &rdp::SETFILLCOLOR,
            Self::SetFogColor => &rdp::SETFOGCOLOR,
            Self::SetBlendColor => &rdp::SETBLENDCOLOR,
            Self::SetPrimColor => &rdp::SETPRIMCOLOR,
            Self::SetEnvColor => &rdp::SETENVCOLOR,
            Self::SetCombine => &rdp::SETCOMBINE,
            Self::SetTImg => &rdp::SETTIMG,
            Self::SetZImg => &rdp::SETZIMG,
            Self::SetCImg => &rdp::SETCIMG,
        }
    }
}
