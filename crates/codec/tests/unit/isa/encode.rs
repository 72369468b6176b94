//! # Encoder Tests
//!
//! Tests for packing commands into words and for argument validation.

use f3dex2_codec::{Arg, CodecError, Command, decode, encode, encode_all, encode_to_bytes};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::CommandBuilder;

#[test]
fn triangles_store_doubled_indices() {
    assert_eq!(
        CommandBuilder::new("G_TRI1").ints(&[0, 1, 2]).words(),
        vec![0x0500_0204_0000_0000]
    );
    assert_eq!(
        CommandBuilder::new("G_TRI2").ints(&[0, 1, 2, 2, 3, 0]).words(),
        vec![0x0600_0204_0004_0600]
    );
}

#[test]
fn vertex_load_stores_end_index() {
    let words = CommandBuilder::new("G_VTX")
        .ints(&[4, 0, 0x0600_0000])
        .words();
    assert_eq!(words, vec![0x0100_4008_0600_0000]);

    let words = CommandBuilder::new("G_VTX")
        .ints(&[2, 3, 0x0600_0040])
        .words();
    assert_eq!(words, vec![0x0100_200A_0600_0040]);
}

#[test]
fn display_list_flow() {
    assert_eq!(
        CommandBuilder::new("G_DL").ints(&[0, 0x0600_0000]).words(),
        vec![0xDE00_0000_0600_0000]
    );
    assert_eq!(
        CommandBuilder::new("G_DL").ints(&[1, 0x0600_0000]).words(),
        vec![0xDE01_0000_0600_0000]
    );
    assert_eq!(
        CommandBuilder::new("G_ENDDL").words(),
        vec![0xDF00_0000_0000_0000]
    );
}

#[test]
fn branch_z_emits_rdphalf_pair() {
    let words = CommandBuilder::new("G_BRANCH_Z")
        .ints(&[0x0600_0100, 2, 2, 0x1_0000])
        .words();
    assert_eq!(words, vec![0xE100_0000_0600_0100, 0x0400_A004_0001_0000]);
}

#[test]
fn texture_image_resolves_symbols_and_depth() {
    let words = CommandBuilder::new("G_SETTIMG")
        .sym("G_IM_FMT_RGBA")
        .int(16)
        .int(0x0600_0000)
        .words();
    assert_eq!(words, vec![0xFD10_0000_0600_0000]);

    let by_name = CommandBuilder::new("G_SETTIMG")
        .sym("RGBA")
        .sym("G_IM_SIZ_16b")
        .int(0x0600_0000)
        .words();
    assert_eq!(by_name, words);
}

#[test]
fn geometry_mode_inverts_clear_mask() {
    let words = CommandBuilder::new("G_GEOMETRYMODE")
        .sym("G_ZBUFFER")
        .sym("G_SHADE | G_LIGHTING")
        .words();
    assert_eq!(words, vec![0xD9FF_FFFE_0002_0004]);

    let words = CommandBuilder::new("G_GEOMETRYMODE")
        .sym("All")
        .sym("Clear")
        .words();
    assert_eq!(words, vec![0xD900_0000_0000_0000]);
}

#[test]
fn combiner_shade_shade() {
    let mut builder = CommandBuilder::new("G_SETCOMBINE");
    for _ in 0..2 {
        builder = builder.sym("0").sym("0").sym("0").sym("SHADE");
        builder = builder.sym("0").sym("0").sym("0").sym("SHADE");
    }
    assert_eq!(builder.words(), vec![0xFCFF_FFFF_FFFE_793C]);
}

#[test]
fn fill_color_bytes() {
    assert_eq!(
        CommandBuilder::new("G_SETFILLCOLOR")
            .ints(&[0xFF, 0x00, 0x80, 0x01])
            .words(),
        vec![0xF700_0000_FF00_8001]
    );
}

#[test]
fn tile_size_stores_last_texel_in_fixed_point() {
    let words = CommandBuilder::new("G_SETTILESIZE")
        .ints(&[0, 0, 0, 32, 32])
        .words();
    assert_eq!(words, vec![0xF200_0000_0007_C07C]);
}

#[test]
fn texture_rectangle_spans_three_words() {
    let words = CommandBuilder::new("G_TEXRECT")
        .ints(&[0x80, 0x80, 0, 0x40, 0x40, 0, 0, 0x400, 0x400])
        .words();
    assert_eq!(
        words,
        vec![
            0xE408_0080_0004_0040,
            0xE100_0000_0000_0000,
            0xF100_0000_0400_0400,
        ]
    );
}

#[test]
fn settile_masks_are_dimensions() {
    let words = CommandBuilder::new("G_SETTILE")
        .sym("G_IM_FMT_RGBA")
        .int(16)
        .int(8)
        .int(0)
        .int(0)
        .int(0)
        .sym("G_TX_CLAMP")
        .int(32)
        .int(0)
        .sym("G_TX_WRAP")
        .int(32)
        .int(0)
        .words();
    assert_eq!(words, vec![0xF510_1000_0009_4050]);

    let err = encode(
        &CommandBuilder::new("G_SETTILE")
            .sym("G_IM_FMT_RGBA")
            .ints(&[16, 8, 0, 0, 0, 0, 24, 0, 0, 32, 0])
            .build(),
    )
    .unwrap_err();
    assert!(matches!(err, CodecError::Encoding { field: "maskt", .. }));
}

#[test]
fn unknown_command() {
    let err = encode(&Command::bare("G_BOGUS")).unwrap_err();
    assert_eq!(err, CodecError::UnknownCommand("G_BOGUS".to_owned()));
}

#[test]
fn unknown_symbol() {
    let err = encode(
        &CommandBuilder::new("G_SETTIMG")
            .sym("G_IM_FMT_BOGUS")
            .int(16)
            .int(0)
            .build(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        CodecError::UnknownSymbol {
            table: "image format",
            symbol: "G_IM_FMT_BOGUS".to_owned(),
        }
    );
}

#[test]
fn wrong_arity() {
    let err = encode(&CommandBuilder::new("G_TRI1").ints(&[0, 1]).build()).unwrap_err();
    assert_eq!(
        err,
        CodecError::Arity {
            command: "G_TRI1".to_owned(),
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn value_too_wide_for_field() {
    let err = encode(&CommandBuilder::new("G_TRI1").ints(&[0, 1, 200]).build()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Encoding {
            command: "G_TRI1",
            field: "v2",
            ..
        }
    ));
}

#[test]
fn symbols_spelled_as_integers_pass_through() {
    let words = CommandBuilder::new("G_SETTIMG")
        .sym("0x0")
        .sym("2")
        .int(0x0600_0000)
        .words();
    assert_eq!(words, vec![0xFD10_0000_0600_0000]);
}

#[test]
fn encode_all_and_bytes_concatenate() {
    let commands = vec![
        Command::new("G_TRI1", vec![Arg::Int(0), Arg::Int(1), Arg::Int(2)]),
        Command::bare("G_ENDDL"),
    ];
    assert_eq!(
        encode_all(&commands).unwrap(),
        vec![0x0500_0204_0000_0000, 0xDF00_0000_0000_0000]
    );
    let bytes = encode_to_bytes(&commands).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[..4], &[0x05, 0x00, 0x02, 0x04]);
    assert_eq!(bytes[8], 0xDF);
}

#[test]
fn snoop_alias_is_accepted() {
    assert_eq!(
        encode(&Command::bare("G_SNOOP")).unwrap(),
        encode(&Command::bare("G_SPNOOP")).unwrap()
    );
}

#[rstest]
#[case::vtx_last_vertex("G_VTX", &[1, 126, 0])]
#[case::tri1_top_index("G_TRI1", &[127, 127, 127])]
#[case::tri2_top_index("G_TRI2", &[0, 1, 127, 127, 2, 3])]
#[case::quad_top_index("G_QUAD", &[127, 0, 0, 0, 0, 127])]
#[case::culldl_top_index("G_CULLDL", &[0, 32767])]
#[case::popmtx_most_matrices("G_POPMTX", &[0x3FF_FFFF])]
#[case::modifyvtx_top_index("G_MODIFYVTX", &[0x10, 32767, 0])]
#[case::branch_z_top_indices("G_BRANCH_Z", &[0x0600_0000, 819, 2047, 0])]
#[case::loadtile_top_coords("G_LOADTILE", &[1023, 1023, 7, 1023, 1023])]
#[case::settilesize_widest("G_SETTILESIZE", &[4095, 4095, 7, 1024, 1024])]
#[case::loadblock_most_texels("G_LOADBLOCK", &[0, 0, 7, 4096, 4095])]
#[case::setcimg_widest("G_SETCIMG", &[0, 16, 4096, 0xFFFF_FFFF])]
fn field_maxima_encode_and_reencode(#[case] name: &str, #[case] args: &[i64]) {
    let words = CommandBuilder::new(name).ints(args).words();
    let reencoded = encode(&decode(&words).unwrap().to_command()).unwrap();
    assert_eq!(reencoded, words);
}

#[rstest]
#[case::vtx_end_past_field("G_VTX", &[1, 127, 0])]
#[case::vtx_start_overflows("G_VTX", &[1, i64::MAX, 0])]
#[case::vtx_negative_count("G_VTX", &[-1, 0, 0])]
#[case::tri1_index_past_field("G_TRI1", &[128, 0, 0])]
#[case::tri1_negative_index("G_TRI1", &[0, -1, 0])]
#[case::tri1_index_overflows("G_TRI1", &[i64::MAX, 0, 0])]
#[case::tri1_index_underflows("G_TRI1", &[i64::MIN + 1, 0, 0])]
#[case::tri2_index_overflows("G_TRI2", &[0, 0, 0, 0, 0, i64::MAX])]
#[case::quad_index_underflows("G_QUAD", &[0, 0, 0, i64::MIN, 0, 0])]
#[case::culldl_index_past_field("G_CULLDL", &[0, 32768])]
#[case::culldl_index_overflows("G_CULLDL", &[i64::MAX, 0])]
#[case::popmtx_past_field("G_POPMTX", &[0x400_0000])]
#[case::popmtx_overflows("G_POPMTX", &[i64::MAX])]
#[case::popmtx_negative("G_POPMTX", &[-1])]
#[case::modifyvtx_index_past_field("G_MODIFYVTX", &[0x10, 32768, 0])]
#[case::modifyvtx_index_overflows("G_MODIFYVTX", &[0x10, i64::MIN + 1, 0])]
#[case::branch_z_x5_past_field("G_BRANCH_Z", &[0, 820, 0, 0])]
#[case::branch_z_x5_overflows("G_BRANCH_Z", &[0, i64::MAX, 0, 0])]
#[case::branch_z_x2_past_field("G_BRANCH_Z", &[0, 0, 2048, 0])]
#[case::loadtile_coord_past_field("G_LOADTILE", &[1024, 0, 0, 0, 0])]
#[case::loadtile_coord_overflows("G_LOADTILE", &[0, 0, 0, i64::MAX, 0])]
#[case::loadtile_negative_coord("G_LOADTILE", &[0, 0, 0, 0, -1])]
#[case::settilesize_width_past_field("G_SETTILESIZE", &[0, 0, 0, 1025, 1])]
#[case::settilesize_zero_width("G_SETTILESIZE", &[0, 0, 0, 0, 1])]
#[case::settilesize_width_overflows("G_SETTILESIZE", &[0, 0, 0, i64::MAX, 1])]
#[case::settilesize_height_underflows("G_SETTILESIZE", &[0, 0, 0, 1, i64::MIN])]
#[case::loadblock_texels_past_field("G_LOADBLOCK", &[0, 0, 7, 4097, 0])]
#[case::loadblock_no_texels("G_LOADBLOCK", &[0, 0, 7, 0, 0])]
#[case::loadblock_texels_underflow("G_LOADBLOCK", &[0, 0, 7, i64::MIN, 0])]
#[case::setcimg_width_past_field("G_SETCIMG", &[0, 16, 4097, 0])]
#[case::setcimg_width_underflows("G_SETCIMG", &[0, 16, i64::MIN, 0])]
#[case::setcimg_address_past_field("G_SETCIMG", &[0, 16, 320, 0x1_0000_0000])]
fn out_of_range_integers_are_rejected(#[case] name: &str, #[case] args: &[i64]) {
    let result = encode(&CommandBuilder::new(name).ints(args).build());
    assert!(
        matches!(result, Err(CodecError::Encoding { .. })),
        "{name} {args:?} gave {result:?}"
    );
}

#[test]
fn overflowing_vertex_index_names_its_field() {
    let err = encode(&CommandBuilder::new("G_VTX").ints(&[1, i64::MAX, 0]).build()).unwrap_err();
    assert_eq!(
        err,
        CodecError::Encoding {
            command: "G_VTX",
            field: "end",
            reason: "overflows".to_owned(),
        }
    );
}

#[rstest]
#[case(-1, 0xD700_0002_FFFF_FFFF)]
#[case(-0x8000, 0xD700_0002_8000_8000)]
#[case(0xFFFF, 0xD700_0002_FFFF_FFFF)]
fn texture_scales_accept_both_signs(#[case] s: i64, #[case] expected: u64) {
    let t = if s == -0x8000 { s } else { -1 };
    let words = CommandBuilder::new("G_TEXTURE").ints(&[0, 0, 1, s, t]).words();
    assert_eq!(words, vec![expected]);
}

#[rstest]
#[case(-0x8001)]
#[case(0x1_0000)]
fn texture_scale_outside_sixteen_bits(#[case] s: i64) {
    let result = encode(&CommandBuilder::new("G_TEXTURE").ints(&[0, 0, 1, s, 0]).build());
    assert!(matches!(result, Err(CodecError::Encoding { field: "s", .. })));
}
