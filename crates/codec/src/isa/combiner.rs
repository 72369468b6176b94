//! Color combiner selectors (`G_SETCOMBINE`).
//!
//! The combiner computes `(A - B) * C + D` separately for color and alpha in
//! each of two cycles, giving sixteen selectors. Arguments use the order of
//! `gsDPSetCombineLERP`; the word packs them in hardware order.

use crate::common::arg::Arg;
use crate::common::error::Result;
use crate::isa::encode::ArgList;
use crate::isa::decode::DecodeContext;
use crate::isa::symbols::SymbolTable;

static COLOR_A: SymbolTable = SymbolTable::new(
    "combiner color A",
    &[
        ("COMBINED", 0),
        ("TEXEL0", 1),
        ("TEXEL1", 2),
        ("PRIMITIVE", 3),
        ("SHADE", 4),
        ("ENVIRONMENT", 5),
        ("1", 6),
        ("NOISE", 7),
        ("0", 15),
    ],
    &[],
);

static COLOR_B: SymbolTable = SymbolTable::new(
    "combiner color B",
    &[
        ("COMBINED", 0),
        ("TEXEL0", 1),
        ("TEXEL1", 2),
        ("PRIMITIVE", 3),
        ("SHADE", 4),
        ("ENVIRONMENT", 5),
        ("CENTER", 6),
        ("K4", 7),
        ("0", 15),
    ],
    &[],
);

static COLOR_C: SymbolTable = SymbolTable::new(
    "combiner color C",
    &[
        ("COMBINED", 0),
        ("TEXEL0", 1),
        ("TEXEL1", 2),
        ("PRIMITIVE", 3),
        ("SHADE", 4),
        ("ENVIRONMENT", 5),
        ("SCALE", 6),
        ("COMBINED_ALPHA", 7),
        ("TEXEL0_ALPHA", 8),
        ("TEXEL1_ALPHA", 9),
        ("PRIMITIVE_ALPHA", 10),
        ("SHADE_ALPHA", 11),
        ("ENV_ALPHA", 12),
        ("LOD_FRACTION", 13),
        ("PRIM_LOD_FRAC", 14),
        ("K5", 15),
        ("0", 31),
    ],
    &[],
);

static COLOR_D: SymbolTable = SymbolTable::new(
    "combiner color D",
    &[
        ("COMBINED", 0),
        ("TEXEL0", 1),
        ("TEXEL1", 2),
        ("PRIMITIVE", 3),
        ("SHADE", 4),
        ("ENVIRONMENT", 5),
        ("1", 6),
        ("0", 7),
    ],
    &[],
);

/// Alpha A, B and D share one table.
static ALPHA_ABD: SymbolTable = SymbolTable::new(
    "combiner alpha A/B/D",
    &[
        ("COMBINED", 0),
        ("TEXEL0", 1),
        ("TEXEL1", 2),
        ("PRIMITIVE", 3),
        ("SHADE", 4),
        ("ENVIRONMENT", 5),
        ("1", 6),
        ("0", 7),
    ],
    &[],
);

static ALPHA_C: SymbolTable = SymbolTable::new(
    "combiner alpha C",
    &[
        ("LOD_FRACTION", 0),
        ("TEXEL0", 1),
        ("TEXEL1", 2),
        ("PRIMITIVE", 3),
        ("SHADE", 4),
        ("ENVIRONMENT", 5),
        ("PRIM_LOD_FRAC", 6),
        ("0", 7),
    ],
    &[],
);

/// Selector tables in `gsDPSetCombineLERP` order for one cycle.
const CYCLE_TABLES: [&SymbolTable; 8] = [
    &COLOR_A, &COLOR_B, &COLOR_C, &COLOR_D, &ALPHA_ABD, &ALPHA_ABD, &ALPHA_C, &ALPHA_ABD,
];

/// For each packed field, the index of its argument in `gsDPSetCombineLERP` order.
///
/// Packed order: `a0 c0 Aa0 Ac0 a1 c1 b0 b1 Aa1 Ac1 d0 Ab0 Ad0 d1 Ab1 Ad1`.
const PACK_ORDER: [usize; 16] = [0, 2, 4, 6, 8, 10, 1, 9, 12, 14, 3, 5, 7, 11, 13, 15];

fn table_for(arg_index: usize) -> &'static SymbolTable {
    CYCLE_TABLES[arg_index % CYCLE_TABLES.len()]
}

/// Encodes sixteen selectors into packed field order.
pub(crate) fn encode(args: &ArgList<'_>) -> Result<Vec<i64>> {
    PACK_ORDER
        .iter()
        .map(|&index| args.symbol(index, table_for(index)))
        .collect()
}

/// Decodes packed fields into selector names in `gsDPSetCombineLERP` order.
///
/// Codes with no selector (reserved values) read as `0`.
pub(crate) fn decode(values: &[i64], _ctx: &mut DecodeContext<'_>) -> Vec<Arg> {
    let mut args = vec![Arg::sym("0"); PACK_ORDER.len()];
    for (&raw, &index) in values.iter().zip(PACK_ORDER.iter()) {
        let name = table_for(index).name_of(raw).unwrap_or("0");
        args[index] = Arg::sym(name);
    }
    args
}
