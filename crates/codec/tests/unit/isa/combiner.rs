//! # Color Combiner Tests
//!
//! Tests for `G_SETCOMBINE` packing order and selector naming.

use f3dex2_codec::{Arg, CodecError, decode, disassemble, encode};
use pretty_assertions::assert_eq;

use crate::common::builder::CommandBuilder;

const SHADE_SHADE: u64 = 0xFCFF_FFFF_FFFE_793C;

fn cycle(builder: CommandBuilder, selectors: [&str; 8]) -> CommandBuilder {
    selectors.into_iter().fold(builder, CommandBuilder::sym)
}

#[test]
fn shade_decodes_in_lerp_order() {
    let decoded = decode(&[SHADE_SHADE]).unwrap();
    assert_eq!(decoded.name, "gsDPSetCombineLERP");
    let expected: Vec<Arg> = ["0", "0", "0", "SHADE"]
        .repeat(4)
        .into_iter()
        .map(Arg::sym)
        .collect();
    assert_eq!(decoded.args, expected);
    assert_eq!(
        disassemble(&decoded),
        "gsDPSetCombineLERP(0, 0, 0, SHADE, 0, 0, 0, SHADE, 0, 0, 0, SHADE, 0, 0, 0, SHADE)"
    );
}

#[test]
fn modulate_texture_and_shade() {
    let builder = CommandBuilder::new("G_SETCOMBINE");
    let builder = cycle(
        builder,
        ["TEXEL0", "0", "SHADE", "0", "TEXEL0", "0", "SHADE", "0"],
    );
    let builder = cycle(
        builder,
        ["TEXEL0", "0", "SHADE", "0", "TEXEL0", "0", "SHADE", "0"],
    );
    let words = builder.words();
    assert_eq!(words, vec![0xFC12_1824_FF33_FFFF]);

    let decoded = decode(&words).unwrap();
    assert_eq!(decoded.args[0], Arg::sym("TEXEL0"));
    assert_eq!(decoded.args[2], Arg::sym("SHADE"));
    assert_eq!(decoded.args[6], Arg::sym("SHADE"));
}

#[test]
fn reserved_codes_read_as_zero() {
    let decoded = decode(&[0xFC8F_FFFF_FFFE_793C]).unwrap();
    assert_eq!(decoded.args[0], Arg::sym("0"));
    assert_eq!(encode(&decoded.to_command()).unwrap(), vec![SHADE_SHADE]);
}

#[test]
fn selector_table_depends_on_slot() {
    // NOISE is only valid as color input A.
    let builder = cycle(
        CommandBuilder::new("G_SETCOMBINE"),
        ["0", "NOISE", "0", "SHADE", "0", "0", "0", "SHADE"],
    );
    let builder = cycle(builder, ["0", "0", "0", "SHADE", "0", "0", "0", "SHADE"]);
    let err = encode(&builder.build()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::UnknownSymbol {
            table: "combiner color B",
            ..
        }
    ));
}
