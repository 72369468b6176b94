//! Display-list disassembler.
//!
//! Renders decoded commands as gbi macro calls for listings, logging, and
//! test diagnostics. Arguments are reordered from encoder order into the
//! order the gbi macro takes them, and the move-word family is expanded into
//! its dedicated macros.
//!
//! # Usage
//!
//! ```
//! use f3dex2_codec::disassemble_words;
//!
//! let lines = disassemble_words(&[0x0500_0204_0000_0000]).unwrap();
//! assert_eq!(lines, ["gsSP1Triangle(0, 1, 2, 0)"]);
//! ```

use crate::common::arg::Arg;
use crate::common::error::Result;
use crate::config::{DecodeConfig, RenderConfig};
use crate::isa::decode::decode_all;
use crate::isa::instruction::Decoded;
use crate::isa::opcodes::Opcode;
use crate::isa::othermode::sft_len;

/// Bytes between consecutive lights in the light-color move-word table.
const LIGHT_STRIDE: i64 = 0x18;

/// Bytes per light in the `G_MW_NUMLIGHT` count.
const NUMLIGHT_STRIDE: i64 = 24;

/// Formats arguments for one macro call.
struct Render<'a> {
    config: &'a RenderConfig,
    parts: Vec<String>,
}

impl<'a> Render<'a> {
    const fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            parts: Vec::new(),
        }
    }

    fn arg(mut self, arg: Option<&Arg>) -> Self {
        self.parts
            .push(arg.map_or_else(|| "?".to_owned(), ToString::to_string));
        self
    }

    fn int(mut self, value: i64) -> Self {
        self.parts.push(value.to_string());
        self
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(text.into());
        self
    }

    fn hex(mut self, value: i64, digits: usize) -> Self {
        self.parts.push(format!("0x{value:0digits$X}"));
        self
    }

    /// A segmented address, hex or decimal per the render settings.
    fn addr(self, arg: Option<&Arg>) -> Self {
        match arg {
            Some(Arg::Int(value)) if self.config.hex_addresses => self.hex(*value, 8),
            other => self.arg(other),
        }
    }

    fn call(self, name: &str) -> String {
        format!("{name}({})", self.parts.join(", "))
    }
}

fn int_at(decoded: &Decoded, index: usize) -> i64 {
    decoded.args.get(index).and_then(Arg::as_int).unwrap_or(0)
}

/// The raw `(shift, length)` bytes of an othermode command.
fn othermode_bytes(decoded: &Decoded) -> (u32, u32) {
    let word = decoded.words.first().copied().unwrap_or(0);
    (((word >> 40) & 0xFF) as u32, ((word >> 32) & 0xFF) as u32)
}

/// `G_MTX` parameter spelled as gbi flags.
fn matrix_param(param: i64) -> String {
    let push = if param & 1 != 0 { "G_MTX_PUSH" } else { "G_MTX_NOPUSH" };
    let load = if param & 2 != 0 { "G_MTX_LOAD" } else { "G_MTX_MUL" };
    let kind = if param & 4 != 0 {
        "G_MTX_PROJECTION"
    } else {
        "G_MTX_MODELVIEW"
    };
    format!("{push} | {load} | {kind}")
}

fn moveword(decoded: &Decoded, config: &RenderConfig) -> String {
    let a = |i: usize| decoded.args.get(i);
    let offset = int_at(decoded, 1);
    let value = int_at(decoded, 2);
    let r = Render::new(config);
    match decoded.name {
        "gsSPSegment" => r.int(offset / 4).hex(value, 8).call(decoded.name),
        "gsSPNumLights" => r
            .text(format!("NUMLIGHTS_{}", value / NUMLIGHT_STRIDE))
            .call(decoded.name),
        "gsSPLightColor" => {
            let half = if offset % LIGHT_STRIDE == 4 { "b" } else { "a" };
            let light = offset / LIGHT_STRIDE + 1;
            r.text(format!("G_MWO_{half}LIGHT_{light}"))
                .hex(value, 8)
                .call(decoded.name)
        }
        "gsSPFogPosition" => {
            let high = i64::from((value >> 16) as i16);
            let low = i64::from(value as i16);
            if high == 0 {
                return r.arg(a(0)).int(offset).hex(value, 8).call("gsMoveWd");
            }
            let diff = 128_000 / high;
            let min = 500 - low * diff / 256;
            r.int(min).int(diff + min).call(decoded.name)
        }
        "gsSPInsertMatrix" => r.int(offset).hex(value, 8).call(decoded.name),
        "gsSPPerspNormalize" => r.int(value).call(decoded.name),
        _ => r.arg(a(0)).int(offset).hex(value, 8).call("gsMoveWd"),
    }
}

fn othermode(decoded: &Decoded, config: &RenderConfig, which: &str) -> String {
    let r = Render::new(config);
    match decoded.name {
        "gsDPSetRenderMode" => match decoded.args.get(1) {
            Some(Arg::Flags(cycles)) => {
                r.arg(cycles.first()).arg(cycles.get(1)).call(decoded.name)
            }
            other => r.arg(other).call(decoded.name),
        },
        "gsSPSetOtherMode" => {
            let (shift, length) = othermode_bytes(decoded);
            let (sft, len) = sft_len(shift, length);
            r.text(which)
                .int(sft)
                .int(len)
                .arg(decoded.args.get(1))
                .call(decoded.name)
        }
        _ => r.arg(decoded.args.get(1)).call(decoded.name),
    }
}

/// Renders one decoded command with default settings.
pub fn disassemble(decoded: &Decoded) -> String {
    disassemble_with(decoded, &RenderConfig::default())
}

/// Renders one decoded command as a gbi macro call.
///
/// # Arguments
///
/// * `decoded` - A command produced by the decoder.
/// * `config` - Text rendering settings.
///
/// # Returns
///
/// A line such as `gsSPVertex(0x06000000, 4, 0)`.
pub fn disassemble_with(decoded: &Decoded, config: &RenderConfig) -> String {
    let a = |i: usize| decoded.args.get(i);
    let r = Render::new(config);
    let name = decoded.name;
    match decoded.opcode {
        Opcode::Vtx => r.addr(a(2)).arg(a(0)).arg(a(1)).call(name),
        Opcode::ModifyVtx => r.arg(a(1)).arg(a(0)).arg(a(2)).call(name),
        Opcode::Tri1 => r.arg(a(0)).arg(a(1)).arg(a(2)).int(0).call(name),
        Opcode::Tri2 => r
            .arg(a(0))
            .arg(a(1))
            .arg(a(2))
            .int(0)
            .arg(a(3))
            .arg(a(4))
            .arg(a(5))
            .int(0)
            .call(name),
        Opcode::Quad => (0..6)
            .fold(r, |r, i| r.arg(a(i)))
            .int(0)
            .call(name),
        Opcode::BranchZ => {
            let r = r.addr(a(0)).arg(a(1));
            let r = if a(1) == a(2) { r } else { r.arg(a(2)) };
            r.arg(a(3)).call(name)
        }
        Opcode::DmaIo => r.arg(a(0)).arg(a(1)).addr(a(3)).arg(a(2)).call(name),
        Opcode::Texture => r
            .arg(a(3))
            .arg(a(4))
            .arg(a(0))
            .arg(a(1))
            .arg(a(2))
            .call(name),
        Opcode::PopMtx => r.text("G_MTX_MODELVIEW").arg(a(0)).call(name),
        Opcode::Mtx => r
            .addr(a(1))
            .text(matrix_param(int_at(decoded, 0)))
            .call(name),
        Opcode::MoveWord => moveword(decoded, config),
        Opcode::MoveMem => r.addr(a(3)).arg(a(0)).arg(a(2)).arg(a(1)).call(name),
        Opcode::LoadUcode => r.addr(a(2)).addr(a(0)).arg(a(1)).call(name),
        Opcode::Dl => r.addr(a(1)).call(name),
        Opcode::RdpHalf1 | Opcode::RdpHalf2 => r.hex(int_at(decoded, 0), 8).call(name),
        Opcode::SetOtherModeL => othermode(decoded, config, "G_SETOTHERMODE_L"),
        Opcode::SetOtherModeH => othermode(decoded, config, "G_SETOTHERMODE_H"),
        Opcode::TexRect | Opcode::TexRectFlip => [0, 1, 3, 4, 2, 5, 6, 7, 8]
            .into_iter()
            .fold(r, |r, i| r.arg(a(i)))
            .call(name),
        Opcode::SetKeyGb => [2, 3, 0, 4, 5, 1]
            .into_iter()
            .fold(r, |r, i| r.arg(a(i)))
            .call(name),
        Opcode::SetKeyR => r.arg(a(1)).arg(a(2)).arg(a(0)).call(name),
        Opcode::SetScissor => r
            .arg(a(2))
            .arg(a(0))
            .arg(a(1))
            .arg(a(3))
            .arg(a(4))
            .call(name),
        Opcode::RdpSetOtherMode => r
            .hex(int_at(decoded, 0), 6)
            .hex(int_at(decoded, 1), 8)
            .call(name),
        Opcode::LoadTlut => r.arg(a(0)).int(int_at(decoded, 1) - 1).call(name),
        Opcode::SetTile => {
            let log2 = |i: usize| i64::from(int_at(decoded, i).max(1).trailing_zeros());
            (0..7)
                .fold(r, |r, i| r.arg(a(i)))
                .int(log2(7))
                .arg(a(8))
                .arg(a(9))
                .int(log2(10))
                .arg(a(11))
                .call(name)
        }
        Opcode::SetFillColor => {
            let packed = (0..4).fold(0, |acc, i| (acc << 8) | (int_at(decoded, i) & 0xFF));
            r.hex(packed, 8).call(name)
        }
        Opcode::SetTImg => r.arg(a(0)).arg(a(1)).int(1).addr(a(2)).call(name),
        Opcode::SetZImg => r.addr(a(0)).call(name),
        Opcode::SetCImg => r.arg(a(0)).arg(a(1)).arg(a(2)).addr(a(3)).call(name),
        _ => decoded.args.iter().fold(r, |r, arg| r.arg(Some(arg))).call(name),
    }
}

/// Decodes and renders a word stream, one line per command.
pub fn disassemble_words(words: &[u64]) -> Result<Vec<String>> {
    let config = RenderConfig::default();
    Ok(decode_all(words, &DecodeConfig::default())?
        .iter()
        .map(|decoded| disassemble_with(decoded, &config))
        .collect())
}
