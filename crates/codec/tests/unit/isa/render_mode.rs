//! # Render Mode Tests
//!
//! Tests for the low othermode word: render-mode presets, blender collapse,
//! field masks and the `None`/`All` sentinels.

use f3dex2_codec::config::DecodeConfig;
use f3dex2_codec::{Arg, CodecError, Diagnostic, decode, decode_with, encode};
use pretty_assertions::assert_eq;

use crate::common::builder::CommandBuilder;

const OPA_SURF: u64 = 0xE200_001C_0055_2078;

fn preset_pair(first: &str, second: &str) -> Arg {
    Arg::Flags(vec![Arg::sym(first), Arg::sym(second)])
}

#[test]
fn render_mode_pair_decodes() {
    let decoded = decode(&[OPA_SURF]).unwrap();
    assert_eq!(decoded.name, "gsDPSetRenderMode");
    assert_eq!(
        decoded.args,
        vec![
            Arg::sym("Render_Mode"),
            preset_pair("G_RM_AA_ZB_OPA_SURF", "G_RM_AA_ZB_OPA_SURF2"),
        ]
    );
    assert!(decoded.diagnostics.is_empty());
}

#[test]
fn render_mode_pair_encodes() {
    let words = CommandBuilder::new("G_SETOTHERMODE_L")
        .sym("Render_Mode")
        .flags(&["G_RM_AA_ZB_OPA_SURF", "G_RM_AA_ZB_OPA_SURF2"])
        .words();
    assert_eq!(words, vec![OPA_SURF]);
}

#[test]
fn lone_preset_name_is_both_cycles() {
    let words = CommandBuilder::new("G_SETOTHERMODE_L")
        .sym("Render_Mode")
        .sym("G_RM_AA_ZB_OPA_SURF")
        .words();
    assert_eq!(words, vec![OPA_SURF]);
}

#[test]
fn noop_pair() {
    let decoded = decode(&[0xE200_001C_0000_0000]).unwrap();
    assert_eq!(decoded.args[1], preset_pair("G_RM_NOOP", "G_RM_NOOP2"));
}

#[test]
fn fog_blender_collapses_by_default() {
    let decoded = decode(&[0xE200_001C_C811_2078]).unwrap();
    assert_eq!(
        decoded.args[1],
        preset_pair("G_RM_FOG_SHADE_A", "G_RM_AA_ZB_OPA_SURF2")
    );
}

#[test]
fn collapse_can_be_disabled() {
    let config = DecodeConfig {
        collapse_blender_presets: false,
        warn_ambiguous_render_modes: false,
        ..DecodeConfig::default()
    };
    let decoded = decode_with(&[0xE200_001C_C811_2078], &config).unwrap();
    assert_eq!(
        decoded.args[1],
        preset_pair("0xC8002078", "G_RM_AA_ZB_OPA_SURF2")
    );
    assert_eq!(
        decoded.diagnostics,
        vec![Diagnostic::AmbiguousRenderMode {
            cycle1: "0xC8002078".to_owned(),
            cycle2: "G_RM_AA_ZB_OPA_SURF2".to_owned(),
        }]
    );
}

#[test]
fn unmatched_cycle_falls_back_to_hex() {
    let decoded = decode(&[0xE200_001C_0044_2078]).unwrap();
    assert_eq!(
        decoded.args[1],
        preset_pair("G_RM_AA_ZB_OPA_SURF", "0x00002078")
    );
    assert_eq!(decoded.diagnostics.len(), 1);
}

#[test]
fn alpha_compare_round_trip() {
    let words = CommandBuilder::new("G_SETOTHERMODE_L")
        .sym("G_MDSFT_ALPHACOMPARE")
        .sym("G_AC_THRESHOLD")
        .words();
    assert_eq!(words, vec![0xE200_1E01_0000_0001]);

    let decoded = decode(&words).unwrap();
    assert_eq!(decoded.name, "gsDPSetAlphaCompare");
    assert_eq!(
        decoded.args,
        vec![Arg::sym("G_MDSFT_ALPHACOMPARE"), Arg::sym("G_AC_THRESHOLD")]
    );
}

#[test]
fn depth_source_field() {
    let words = CommandBuilder::new("G_SETOTHERMODE_L")
        .sym("G_MDSFT_ZSRCSEL")
        .sym("Z_SEL_PRIMITIVE")
        .words();
    assert_eq!(words, vec![0xE200_1D00_0000_0000]);
    let decoded = decode(&words).unwrap();
    assert_eq!(decoded.name, "gsDPSetDepthSource");
    assert_eq!(decoded.args[1], Arg::sym("Z_SEL_PRIMITIVE"));
}

#[test]
fn partial_mask_names_bits() {
    let words = CommandBuilder::new("G_SETOTHERMODE_L")
        .sym("Z_CMP | Z_UPD")
        .sym("Z_CMP")
        .words();
    assert_eq!(words, vec![0xE200_1A01_0000_0010]);
    let decoded = decode(&words).unwrap();
    assert_eq!(decoded.name, "gsSPSetOtherMode");
    assert_eq!(
        decoded.args,
        vec![
            Arg::Flags(vec![Arg::sym("Z_CMP"), Arg::sym("Z_UPD")]),
            Arg::sym("Z_CMP"),
        ]
    );
}

#[test]
fn none_and_all_sentinels() {
    let none = CommandBuilder::new("G_SETOTHERMODE_L")
        .sym("None")
        .int(0)
        .words();
    assert_eq!(none, vec![0xE200_20FF_0000_0000]);
    assert_eq!(
        decode(&none).unwrap().args,
        vec![Arg::sym("None"), Arg::Int(0)]
    );

    let all = CommandBuilder::new("G_SETOTHERMODE_L")
        .sym("All")
        .int(0x0055_2078)
        .words();
    assert_eq!(all, vec![0xE200_001F_0055_2078]);
    let decoded = decode(&all).unwrap();
    assert_eq!(decoded.name, "gsSPSetOtherMode");
    assert_eq!(decoded.args, vec![Arg::sym("All"), Arg::Int(0x0055_2078)]);
}

#[test]
fn non_contiguous_mask_is_rejected() {
    let err = encode(
        &CommandBuilder::new("G_SETOTHERMODE_L")
            .int(0b101)
            .int(0)
            .build(),
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::Encoding { field: "mask", .. }));
}

#[test]
fn unknown_value_symbol() {
    let err = encode(
        &CommandBuilder::new("G_SETOTHERMODE_L")
            .sym("Render_Mode")
            .sym("G_RM_BOGUS")
            .build(),
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::UnknownSymbol { .. }));
}
