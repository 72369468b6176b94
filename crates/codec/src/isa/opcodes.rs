//! F3DEX2 opcodes.
//!
//! The high byte of every display-list word selects the command. RSP geometry
//! commands occupy `0x00..=0x07` and `0xD6..=0xE1`; RDP commands occupy
//! `0xE2..=0xFF`. `G_BRANCH_Z` (`0x04`) and `G_LOAD_UCODE` (`0xDD`) are always
//! preceded by a `G_RDPHALF_1` word carrying their address.

use std::fmt;

use serde::{Serialize, Serializer};

/// A known F3DEX2 opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Opcode {
    /// `G_SPNOOP`.
    SpNoop = 0x00,
    /// `G_VTX`: load vertices.
    Vtx = 0x01,
    /// `G_MODIFYVTX`.
    ModifyVtx = 0x02,
    /// `G_CULLDL`.
    CullDl = 0x03,
    /// `G_BRANCH_Z`.
    BranchZ = 0x04,
    /// `G_TRI1`.
    Tri1 = 0x05,
    /// `G_TRI2`.
    Tri2 = 0x06,
    /// `G_QUAD`.
    Quad = 0x07,
    /// `G_DMA_IO`.
    DmaIo = 0xD6,
    /// `G_TEXTURE`.
    Texture = 0xD7,
    /// `G_POPMTX`.
    PopMtx = 0xD8,
    /// `G_GEOMETRYMODE`.
    GeometryMode = 0xD9,
    /// `G_MTX`.
    Mtx = 0xDA,
    /// `G_MOVEWORD`.
    MoveWord = 0xDB,
    /// `G_MOVEMEM`.
    MoveMem = 0xDC,
    /// `G_LOAD_UCODE`.
    LoadUcode = 0xDD,
    /// `G_DL`: call or branch to a display list.
    Dl = 0xDE,
    /// `G_ENDDL`.
    EndDl = 0xDF,
    /// `G_NOOP`.
    Noop = 0xE0,
    /// `G_RDPHALF_1`.
    RdpHalf1 = 0xE1,
    /// `G_SETOTHERMODE_L`.
    SetOtherModeL = 0xE2,
    /// `G_SETOTHERMODE_H`.
    SetOtherModeH = 0xE3,
    /// `G_TEXRECT`.
    TexRect = 0xE4,
    /// `G_TEXRECTFLIP`.
    TexRectFlip = 0xE5,
    /// `G_RDPLOADSYNC`.
    RdpLoadSync = 0xE6,
    /// `G_RDPPIPESYNC`.
    RdpPipeSync = 0xE7,
    /// `G_RDPTILESYNC`.
    RdpTileSync = 0xE8,
    /// `G_RDPFULLSYNC`.
    RdpFullSync = 0xE9,
    /// `G_SETKEYGB`.
    SetKeyGb = 0xEA,
    /// `G_SETKEYR`.
    SetKeyR = 0xEB,
    /// `G_SETCONVERT`.
    SetConvert = 0xEC,
    /// `G_SETSCISSOR`.
    SetScissor = 0xED,
    /// `G_SETPRIMDEPTH`.
    SetPrimDepth = 0xEE,
    /// `G_RDPSETOTHERMODE`.
    RdpSetOtherMode = 0xEF,
    /// `G_LOADTLUT`.
    LoadTlut = 0xF0,
    /// `G_RDPHALF_2`.
    RdpHalf2 = 0xF1,
    /// `G_SETTILESIZE`.
    SetTileSize = 0xF2,
    /// `G_LOADBLOCK`.
    LoadBlock = 0xF3,
    /// `G_LOADTILE`.
    LoadTile = 0xF4,
    /// `G_SETTILE`.
    SetTile = 0xF5,
    /// `G_FILLRECT`.
    FillRect = 0xF6,
    /// `G_SETFILLCOLOR`.
    SetFillColor = 0xF7,
    /// `G_SETFOGCOLOR`.
    SetFogColor = 0xF8,
    /// `G_SETBLENDCOLOR`.
    SetBlendColor = 0xF9,
    /// `G_SETPRIMCOLOR`.
    SetPrimColor = 0xFA,
    /// `G_SETENVCOLOR`.
    SetEnvColor = 0xFB,
    /// `G_SETCOMBINE`.
    SetCombine = 0xFC,
    /// `G_SETTIMG`.
    SetTImg = 0xFD,
    /// `G_SETZIMG`.
    SetZImg = 0xFE,
    /// `G_SETCIMG`.
    SetCImg = 0xFF,
}

impl Opcode {
    /// Every opcode, in byte order.
    pub const ALL: [Self; 50] = [
        Self::SpNoop,
        Self::Vtx,
        Self::ModifyVtx,
        Self::CullDl,
        Self::BranchZ,
        Self::Tri1,
        Self::Tri2,
        Self::Quad,
        Self::DmaIo,
        Self::Texture,
        Self::PopMtx,
        Self::GeometryMode,
        Self::Mtx,
        Self::MoveWord,
        Self::MoveMem,
        Self::LoadUcode,
        Self::Dl,
        Self::EndDl,
        Self::Noop,
        Self::RdpHalf1,
        Self::SetOtherModeL,
        Self::SetOtherModeH,
        Self::TexRect,
        Self::TexRectFlip,
        Self::RdpLoadSync,
        Self::RdpPipeSync,
        Self::RdpTileSync,
        Self::RdpFullSync,
        Self::SetKeyGb,
        Self::SetKeyR,
        Self::SetConvert,
        Self::SetScissor,
        Self::SetPrimDepth,
        Self::RdpSetOtherMode,
        Self::LoadTlut,
        Self::RdpHalf2,
        Self::SetTileSize,
        Self::LoadBlock,
        Self::LoadTile,
        Self::SetTile,
        Self::FillRect,
        Self::SetFillColor,
        Self::SetFogColor,
        Self::SetBlendColor,
        Self::SetPrimColor,
        Self::SetEnvColor,
        Self::SetCombine,
        Self::SetTImg,
        Self::SetZImg,
        Self::SetCImg,
    ];

    /// Returns the opcode byte.
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Maps an opcode byte to its opcode, if known.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00..=0x07 => Some(Self::ALL[byte as usize]),
            0xD6..=0xFF => Some(Self::ALL[(byte - 0xD6) as usize + 8]),
            _ => None,
        }
    }

    /// Returns the gbi mnemonic (`G_VTX`).
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::SpNoop => "G_SPNOOP",
            Self::Vtx => "G_VTX",
            Self::ModifyVtx => "G_MODIFYVTX",
            Self::CullDl => "G_CULLDL",
            Self::BranchZ => "G_BRANCH_Z",
            Self::Tri1 => "G_TRI1",
            Self::Tri2 => "G_TRI2",
            Self::Quad => "G_QUAD",
            Self::DmaIo => "G_DMA_IO",
            Self::Texture => "G_TEXTURE",
            Self::PopMtx => "G_POPMTX",
            Self::GeometryMode => "G_GEOMETRYMODE",
            Self::Mtx => "G_MTX",
            Self::MoveWord => "G_MOVEWORD",
            Self::MoveMem => "G_MOVEMEM",
            Self::LoadUcode => "G_LOAD_UCODE",
            Self::Dl => "G_DL",
            Self::EndDl => "G_ENDDL",
            Self::Noop => "G_NOOP",
            Self::RdpHalf1 => "G_RDPHALF_1",
            Self::SetOtherModeL => "G_SETOTHERMODE_L",
            Self::SetOtherModeH => "G_SETOTHERMODE_H",
            Self::TexRect => "G_TEXRECT",
            Self::TexRectFlip => "G_TEXRECTFLIP",
            Self::RdpLoadSync => "G_RDPLOADSYNC",
            Self::RdpPipeSync => "G_RDPPIPESYNC",
            Self::RdpTileSync => "G_RDPTILESYNC",
            Self::RdpFullSync => "G_RDPFULLSYNC",
            Self::SetKeyGb => "G_SETKEYGB",
            Self::SetKeyR => "G_SETKEYR",
            Self::SetConvert => "G_SETCONVERT",
            Self::SetScissor => "G_SETSCISSOR",
            Self::SetPrimDepth => "G_SETPRIMDEPTH",
            Self::RdpSetOtherMode => "G_RDPSETOTHERMODE",
            Self::LoadTlut => "G_LOADTLUT",
            Self::RdpHalf2 => "G_RDPHALF_2",
            Self::SetTileSize => "G_SETTILESIZE",
            Self::LoadBlock => "G_LOADBLOCK",
            Self::LoadTile => "G_LOADTILE",
            Self::SetTile => "G_SETTILE",
            Self::FillRect => "G_FILLRECT",
            Self::SetFillColor => "G_SETFILLCOLOR",
            Self::SetFogColor => "G_SETFOGCOLOR",
            Self::SetBlendColor => "G_SETBLENDCOLOR",
            Self::SetPrimColor => "G_SETPRIMCOLOR",
            Self::SetEnvColor => "G_SETENVCOLOR",
            Self::SetCombine => "G_SETCOMBINE",
            Self::SetTImg => "G_SETTIMG",
            Self::SetZImg => "G_SETZIMG",
            Self::SetCImg => "G_SETCIMG",
        }
    }

    /// Looks up an opcode by mnemonic. `G_SNOOP` is accepted for `G_SPNOOP`.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        if name == "G_SNOOP" {
            return Some(Self::SpNoop);
        }
        Self::ALL.into_iter().find(|op| op.mnemonic() == name)
    }

    /// Whether this is an RDP (rasterizer) command.
    pub const fn is_rdp(self) -> bool {
        self.byte() >= 0xE2
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl Serialize for Opcode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.mnemonic())
    }
}
