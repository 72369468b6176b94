//! Bit-field layouts for every F3DEX2 command.
//!
//! A layout is the ordered list of fields of a command, most significant first,
//! covering one to three 64-bit words exactly. Each field is unsigned, signed
//! (two's complement), or fixed to a constant (opcode bytes, the `G_RDPHALF`
//! prefixes of multi-word commands, and zero padding).

use tracing::trace;

use crate::common::bits::{BitReader, BitWriter, low_mask, sign_extend};
use crate::common::constants::WORD_BITS;
use crate::common::error::{CodecError, Result};

/// How a field's bits are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned integer.
    Unsigned,
    /// Two's-complement signed integer.
    Signed,
    /// Constant bits that carry no argument.
    Fixed(u64),
}

/// One bit field of a command layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field name, used in error messages and diagnostics.
    pub name: &'static str,
    /// Width in bits.
    pub width: u32,
    /// Interpretation of the bits.
    pub kind: FieldKind,
}

impl Field {
    /// An unsigned argument field.
    pub const fn unsigned(name: &'static str, width: u32) -> Self {
        Self {
            name,
            width,
            kind: FieldKind::Unsigned,
        }
    }

    /// A signed argument field.
    pub const fn signed(name: &'static str, width: u32) -> Self {
        Self {
            name,
            width,
            kind: FieldKind::Signed,
        }
    }

    /// A constant field.
    pub const fn fixed(name: &'static str, width: u32, value: u64) -> Self {
        Self {
            name,
            width,
            kind: FieldKind::Fixed(value),
        }
    }

    /// Zero padding.
    pub const fn pad(width: u32) -> Self {
        Self::fixed("pad", width, 0)
    }

    /// An 8-bit opcode byte.
    pub const fn opcode(byte: u8) -> Self {
        Self::fixed("opcode", 8, byte as u64)
    }

    /// Whether this field carries an argument.
    pub const fn is_variable(&self) -> bool {
        !matches!(self.kind, FieldKind::Fixed(_))
    }

    /// Checks that `value` is representable, returning its raw bits.
    fn raw_bits(&self, value: i64) -> Option<u64> {
        let width = self.width;
        let fits = match self.kind {
            FieldKind::Unsigned => {
                value >= 0 && (width >= 63 || (value as u64) <= low_mask(width))
            }
            FieldKind::Signed => {
                let half = 1i128 << (width - 1);
                let value = i128::from(value);
                value >= -half && value < half
            }
            FieldKind::Fixed(_) => true,
        };
        fits.then(|| (value as u64) & low_mask(width))
    }
}

/// Number of argument-carrying fields in a layout.
pub fn variable_count(layout: &[Field]) -> usize {
    layout.iter().filter(|field| field.is_variable()).count()
}

/// Number of 64-bit words a layout spans.
pub fn word_count(layout: &[Field]) -> usize {
    let bits: u32 = layout.iter().map(|field| field.width).sum();
    bits.div_ceil(WORD_BITS) as usize
}

/// Packs raw field values into words.
///
/// # Arguments
///
/// * `command` - Mnemonic used in error messages.
/// * `layout` - The command layout.
/// * `raws` - One value per variable field, in layout order.
///
/// # Returns
///
/// The packed words, or `CodecError::Encoding` naming the first field whose
/// value does not fit.
pub fn pack(command: &'static str, layout: &[Field], raws: &[i64]) -> Result<Vec<u64>> {
    let expected = variable_count(layout);
    if raws.len() != expected {
        return Err(CodecError::Arity {
            command: command.to_owned(),
            expected,
            found: raws.len(),
        });
    }

    let mut writer = BitWriter::new();
    let mut values = raws.iter();
    for field in layout {
        let bits = match field.kind {
            FieldKind::Fixed(constant) => constant,
            FieldKind::Unsigned | FieldKind::Signed => {
                let value = values.next().copied().unwrap_or_default();
                field.raw_bits(value).ok_or_else(|| CodecError::Encoding {
                    command,
                    field: field.name,
                    reason: format!("cannot hold {value} in {} bits", field.width),
                })?
            }
        };
        trace!(command, field = field.name, bits, "pack");
        writer.push(bits, field.width);
    }
    Ok(writer.finish())
}

/// A fixed field whose bits differ from the layout constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMismatch {
    /// Field name.
    pub field: &'static str,
    /// Required value.
    pub expected: u64,
    /// Value found.
    pub found: u64,
}

/// Values read back from packed words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unpacked {
    /// One value per variable field, signed fields sign-extended.
    pub values: Vec<i64>,
    /// Fixed fields that did not hold their constant.
    pub mismatches: Vec<FixedMismatch>,
}

/// Unpacks the fields of a layout from `words`.
pub fn unpack(layout: &[Field], words: &[u64]) -> Unpacked {
    let mut reader = BitReader::new(words);
    let mut out = Unpacked::default();
    for field in layout {
        let bits = reader.read(field.width);
        match field.kind {
            FieldKind::Fixed(expected) => {
                if bits != expected {
                    out.mismatches.push(FixedMismatch {
                        field: field.name,
                        expected,
                        found: bits,
                    });
                }
            }
            FieldKind::Unsigned => out.values.push(bits as i64),
            FieldKind::Signed => out.values.push(sign_extend(bits, field.width)),
        }
    }
    out
}

/// `G_RDPHALF_1` prefix word of two-word commands.
const RDPHALF_1_PREFIX: u64 = 0xE100_0000;

/// `G_RDPHALF_2` prefix word of the texture-rectangle tail.
const RDPHALF_2_PREFIX: u64 = 0xF100_0000;

/// Layout of commands with no arguments.
macro_rules! bare_layout {
    ($name:ident, $byte:expr) => {
        #[doc = concat!("Layout of the `", stringify!($name), "` command.")]
        pub const $name: &[Field] = &[Field::opcode($byte), Field::pad(56)];
    };
}

bare_layout!(SPNOOP, 0x00);
bare_layout!(ENDDL, 0xDF);
bare_layout!(NOOP, 0xE0);
bare_layout!(RDPLOADSYNC, 0xE6);
bare_layout!(RDPPIPESYNC, 0xE7);
bare_layout!(RDPTILESYNC, 0xE8);
bare_layout!(RDPFULLSYNC, 0xE9);

// ── RSP geometry commands ─────────────────────────────

/// `G_VTX`: count and end index (both doubled by the encoder) and a segmented address.
pub const VTX: &[Field] = &[
    Field::fixed("opcode", 12, 0x010),
    Field::unsigned("count", 8),
    Field::pad(4),
    Field::unsigned("end", 8),
    Field::unsigned("address", 32),
];

/// `G_MODIFYVTX`.
pub const MODIFYVTX: &[Field] = &[
    Field::opcode(0x02),
    Field::unsigned("where", 8),
    Field::unsigned("vertex", 16),
    Field::unsigned("value", 32),
];

/// `G_CULLDL`.
pub const CULLDL: &[Field] = &[
    Field::opcode(0x03),
    Field::pad(8),
    Field::unsigned("first", 16),
    Field::pad(16),
    Field::unsigned("last", 16),
];

/// `G_BRANCH_Z`, preceded by its `G_RDPHALF_1` word.
pub const BRANCH_Z: &[Field] = &[
    Field::fixed("rdphalf_1", 32, RDPHALF_1_PREFIX),
    Field::unsigned("address", 32),
    Field::opcode(0x04),
    Field::unsigned("vertex_x5", 12),
    Field::unsigned("vertex_x2", 12),
    Field::unsigned("zval", 32),
];

/// `G_TRI1`.
pub const TRI1: &[Field] = &[
    Field::opcode(0x05),
    Field::unsigned("v0", 8),
    Field::unsigned("v1", 8),
    Field::unsigned("v2", 8),
    Field::pad(32),
];

/// `G_TRI2`.
pub const TRI2: &[Field] = &[
    Field::opcode(0x06),
    Field::unsigned("v0", 8),
    Field::unsigned("v1", 8),
    Field::unsigned("v2", 8),
    Field::pad(8),
    Field::unsigned("v3", 8),
    Field::unsigned("v4", 8),
    Field::unsigned("v5", 8),
];

/// `G_QUAD`.
pub const QUAD: &[Field] = &[
    Field::opcode(0x07),
    Field::unsigned("v0", 8),
    Field::unsigned("v1", 8),
    Field::unsigned("v2", 8),
    Field::pad(8),
    Field::unsigned("v3", 8),
    Field::unsigned("v4", 8),
    Field::unsigned("v5", 8),
];

/// `G_DMA_IO`: DMEM address is stored in 8-byte units.
pub const DMA_IO: &[Field] = &[
    Field::opcode(0xD6),
    Field::unsigned("flag", 1),
    Field::unsigned("dmem", 10),
    Field::pad(1),
    Field::unsigned("size", 12),
    Field::unsigned("dram", 32),
];

/// `G_TEXTURE`: `on` sits in bits 1..=7 of the first word, bit 0 is padding.
/// The scales are stored as raw 16-bit values; negative scales arrive already wrapped.
pub const TEXTURE: &[Field] = &[
    Field::fixed("opcode", 16, 0xD700),
    Field::pad(2),
    Field::unsigned("level", 3),
    Field::unsigned("tile", 3),
    Field::unsigned("on", 7),
    Field::pad(1),
    Field::unsigned("s", 16),
    Field::unsigned("t", 16),
];

/// `G_POPMTX`: byte count of the popped matrices.
pub const POPMTX: &[Field] = &[
    Field::fixed("opcode", 32, 0xD838_0002),
    Field::unsigned("bytes", 32),
];

/// `G_GEOMETRYMODE`: inverted clear mask, then set mask.
pub const GEOMETRYMODE: &[Field] = &[
    Field::opcode(0xD9),
    Field::unsigned("clear", 24),
    Field::unsigned("set", 32),
];

/// `G_MTX`.
pub const MTX: &[Field] = &[
    Field::fixed("opcode", 24, 0xDA_3800),
    Field::unsigned("param", 8),
    Field::unsigned("address", 32),
];

/// `G_MOVEWORD`.
pub const MOVEWORD: &[Field] = &[
    Field::opcode(0xDB),
    Field::unsigned("index", 8),
    Field::unsigned("offset", 16),
    Field::unsigned("value", 32),
];

/// `G_MOVEMEM`: size byte holds `(size - 1) / 8` in its top five bits, offset is in 8-byte units.
pub const MOVEMEM: &[Field] = &[
    Field::opcode(0xDC),
    Field::unsigned("size", 8),
    Field::unsigned("offset", 8),
    Field::unsigned("index", 8),
    Field::unsigned("address", 32),
];

/// `G_LOAD_UCODE`, preceded by its `G_RDPHALF_1` word.
pub const LOAD_UCODE: &[Field] = &[
    Field::fixed("rdphalf_1", 32, RDPHALF_1_PREFIX),
    Field::unsigned("data", 32),
    Field::fixed("opcode", 16, 0xDD00),
    Field::unsigned("size", 16),
    Field::unsigned("text", 32),
];

/// `G_DL`: non-zero `push` means branch without return.
pub const DL: &[Field] = &[
    Field::opcode(0xDE),
    Field::unsigned("push", 8),
    Field::pad(16),
    Field::unsigned("address", 32),
];

/// `G_RDPHALF_1`.
pub const RDPHALF_1: &[Field] = &[
    Field::fixed("opcode", 32, RDPHALF_1_PREFIX),
    Field::unsigned("bits", 32),
];

/// `G_RDPHALF_2`.
pub const RDPHALF_2: &[Field] = &[
    Field::fixed("opcode", 32, RDPHALF_2_PREFIX),
    Field::unsigned("bits", 32),
];

// ── RDP state commands ────────────────────────────────

/// `G_SETOTHERMODE_L`: shift is `32 - sft - len`, length is `len - 1`.
pub const SETOTHERMODE_L: &[Field] = &[
    Field::fixed("opcode", 16, 0xE200),
    Field::unsigned("shift", 8),
    Field::unsigned("length", 8),
    Field::unsigned("data", 32),
];

/// `G_SETOTHERMODE_H`, same shape as the low half.
pub const SETOTHERMODE_H: &[Field] = &[
    Field::fixed("opcode", 16, 0xE300),
    Field::unsigned("shift", 8),
    Field::unsigned("length", 8),
    Field::unsigned("data", 32),
];

/// Shared three-word texture rectangle layout.
macro_rules! texrect_layout {
    ($name:ident, $byte:expr) => {
        #[doc = concat!("`G_", stringify!($name), "`: rectangle word, then `G_RDPHALF_1` S/T, then `G_RDPHALF_2` steps.")]
        pub const $name: &[Field] = &[
            Field::opcode($byte),
            Field::unsigned("xl", 12),
            Field::unsigned("yl", 12),
            Field::pad(4),
            Field::unsigned("tile", 4),
            Field::unsigned("xh", 12),
            Field::unsigned("yh", 12),
            Field::fixed("rdphalf_1", 32, RDPHALF_1_PREFIX),
            Field::unsigned("s", 16),
            Field::unsigned("t", 16),
            Field::fixed("rdphalf_2", 32, RDPHALF_2_PREFIX),
            Field::unsigned("dsdx", 16),
            Field::unsigned("dtdy", 16),
        ];
    };
}

texrect_layout!(TEXRECT, 0xE4);
texrect_layout!(TEXRECTFLIP, 0xE5);

/// `G_SETKEYGB`.
pub const SETKEYGB: &[Field] = &[
    Field::opcode(0xEA),
    Field::unsigned("width_g", 12),
    Field::unsigned("width_b", 12),
    Field::unsigned("center_g", 8),
    Field::unsigned("scale_g", 8),
    Field::unsigned("center_b", 8),
    Field::unsigned("scale_b", 8),
];

/// `G_SETKEYR`.
pub const SETKEYR: &[Field] = &[
    Field::fixed("opcode", 36, 0xE_B000_0000),
    Field::unsigned("width_r", 12),
    Field::unsigned("center_r", 8),
    Field::unsigned("scale_r", 8),
];

/// `G_SETCONVERT`: six signed 9-bit YUV coefficients.
pub const SETCONVERT: &[Field] = &[
    Field::opcode(0xEC),
    Field::pad(2),
    Field::signed("k0", 9),
    Field::signed("k1", 9),
    Field::signed("k2", 9),
    Field::signed("k3", 9),
    Field::signed("k4", 9),
    Field::signed("k5", 9),
];

/// `G_SETSCISSOR`.
pub const SETSCISSOR: &[Field] = &[
    Field::opcode(0xED),
    Field::unsigned("xl", 12),
    Field::unsigned("yl", 12),
    Field::pad(4),
    Field::unsigned("mode", 4),
    Field::unsigned("xh", 12),
    Field::unsigned("yh", 12),
];

/// `G_SETPRIMDEPTH`.
pub const SETPRIMDEPTH: &[Field] = &[
    Field::fixed("opcode", 32, 0xEE00_0000),
    Field::unsigned("z", 16),
    Field::unsigned("dz", 16),
];

/// `G_RDPSETOTHERMODE`.
pub const RDPSETOTHERMODE: &[Field] = &[
    Field::opcode(0xEF),
    Field::unsigned("hi", 24),
    Field::unsigned("lo", 32),
];

/// `G_LOADTLUT`: the count field holds `(count - 1) << 2`.
pub const LOADTLUT: &[Field] = &[
    Field::fixed("opcode", 36, 0xF_0000_0000),
    Field::unsigned("tile", 4),
    Field::unsigned("count", 12),
    Field::pad(12),
];

/// Shared tile-rectangle layout of `G_SETTILESIZE`, `G_LOADBLOCK` and `G_LOADTILE`.
macro_rules! tile_rect_layout {
    ($name:ident, $byte:expr, $lo:expr, $hi:expr) => {
        #[doc = concat!("`G_", stringify!($name), "`.")]
        pub const $name: &[Field] = &[
            Field::opcode($byte),
            Field::unsigned("uls", 12),
            Field::unsigned("ult", 12),
            Field::pad(4),
            Field::unsigned("tile", 4),
            Field::unsigned($lo, 12),
            Field::unsigned($hi, 12),
        ];
    };
}

tile_rect_layout!(SETTILESIZE, 0xF2, "lrs", "lrt");
tile_rect_layout!(LOADBLOCK, 0xF3, "texels", "dxt");
tile_rect_layout!(LOADTILE, 0xF4, "lrs", "lrt");

/// `G_SETTILE`.
pub const SETTILE: &[Field] = &[
    Field::opcode(0xF5),
    Field::unsigned("fmt", 3),
    Field::unsigned("siz", 2),
    Field::pad(1),
    Field::unsigned("line", 9),
    Field::unsigned("tmem", 9),
    Field::pad(5),
    Field::unsigned("tile", 3),
    Field::unsigned("palette", 4),
    Field::unsigned("cmt", 2),
    Field::unsigned("maskt", 4),
    Field::unsigned("shiftt", 4),
    Field::unsigned("cms", 2),
    Field::unsigned("masks", 4),
    Field::unsigned("shifts", 4),
];

/// `G_FILLRECT`.
pub const FILLRECT: &[Field] = &[
    Field::opcode(0xF6),
    Field::unsigned("xl", 12),
    Field::unsigned("yl", 12),
    Field::pad(8),
    Field::unsigned("xh", 12),
    Field::unsigned("yh", 12),
];

/// Shared RGBA colour layout.
macro_rules! color_layout {
    ($name:ident, $prefix:expr) => {
        #[doc = concat!("`G_", stringify!($name), "`.")]
        pub const $name: &[Field] = &[
            Field::fixed("opcode", 32, $prefix),
            Field::unsigned("r", 8),
            Field::unsigned("g", 8),
            Field::unsigned("b", 8),
            Field::unsigned("a", 8),
        ];
    };
}

color_layout!(SETFILLCOLOR, 0xF700_0000);
color_layout!(SETFOGCOLOR, 0xF800_0000);
color_layout!(SETBLENDCOLOR, 0xF900_0000);
color_layout!(SETENVCOLOR, 0xFB00_0000);

/// `G_SETPRIMCOLOR`.
pub const SETPRIMCOLOR: &[Field] = &[
    Field::fixed("opcode", 16, 0xFA00),
    Field::unsigned("min_level", 8),
    Field::unsigned("lod_frac", 8),
    Field::unsigned("r", 8),
    Field::unsigned("g", 8),
    Field::unsigned("b", 8),
    Field::unsigned("a", 8),
];

/// `G_SETCOMBINE`, in hardware bit order.
pub const SETCOMBINE: &[Field] = &[
    Field::opcode(0xFC),
    Field::unsigned("a0", 4),
    Field::unsigned("c0", 5),
    Field::unsigned("alpha_a0", 3),
    Field::unsigned("alpha_c0", 3),
    Field::unsigned("a1", 4),
    Field::unsigned("c1", 5),
    Field::unsigned("b0", 4),
    Field::unsigned("b1", 4),
    Field::unsigned("alpha_a1", 3),
    Field::unsigned("alpha_c1", 3),
    Field::unsigned("d0", 3),
    Field::unsigned("alpha_b0", 3),
    Field::unsigned("alpha_d0", 3),
    Field::unsigned("d1", 3),
    Field::unsigned("alpha_b1", 3),
    Field::unsigned("alpha_d1", 3),
];

/// `G_SETTIMG`.
pub const SETTIMG: &[Field] = &[
    Field::opcode(0xFD),
    Field::unsigned("fmt", 3),
    Field::unsigned("siz", 2),
    Field::pad(19),
    Field::unsigned("address", 32),
];

/// `G_SETZIMG`.
pub const SETZIMG: &[Field] = &[
    Field::fixed("opcode", 32, 0xFE00_0000),
    Field::unsigned("address", 32),
];

/// `G_SETCIMG`.
pub const SETCIMG: &[Field] = &[
    Field::opcode(0xFF),
    Field::unsigned("fmt", 3),
    Field::unsigned("siz", 2),
    Field::pad(7),
    Field::unsigned("width", 12),
    Field::unsigned("address", 32),
];
