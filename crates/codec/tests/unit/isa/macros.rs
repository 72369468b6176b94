//! # Texture Macro Tests
//!
//! Tests for DXT throttles, TMEM line sizes and texture-load macro expansion.

use f3dex2_codec::isa::macros::{TextureMacro, dxt_for_depth, line_size};
use f3dex2_codec::{Arg, CodecError, Command, compute_block_throttle, encode};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn block_args() -> Vec<Arg> {
    vec![
        Arg::sym("G_IM_FMT_RGBA"),
        Arg::Int(16),
        Arg::Int(0x0600_0000),
        Arg::Int(32),
        Arg::Int(32),
        Arg::sym("G_TX_WRAP"),
        Arg::sym("G_TX_WRAP"),
    ]
}

#[rstest]
#[case(32, 2, 128)]
#[case(64, 1, 128)]
#[case(16, 3, 128)]
#[case(1, 0, 2048)]
#[case(3, 2, 2048)]
#[case(100, 3, 21)]
#[case(2048, 5, 1)]
#[case(64, 4, 16)]
#[case(16, 1, 512)]
#[case(320, 4, 4)]
fn block_throttle(#[case] width: i64, #[case] power: u32, #[case] expected: i64) {
    assert_eq!(compute_block_throttle(width, power), Some(expected));
}

#[rstest]
#[case(i64::MAX, 2)]
#[case(1, 63)]
#[case(1, 64)]
fn block_throttle_overflow(#[case] width: i64, #[case] power: u32) {
    assert_eq!(compute_block_throttle(width, power), None);
}

#[rstest]
#[case(32, 16, 256)]
#[case(64, 8, 256)]
#[case(64, 4, 512)]
#[case(16, 32, 256)]
#[case(8, 4, 2048)]
fn depth_throttle(#[case] width: i64, #[case] bits: i64, #[case] expected: i64) {
    assert_eq!(dxt_for_depth(width, bits), Some(expected));
}

#[rstest]
#[case(32, 16, 8)]
#[case(32, 4, 2)]
#[case(64, 8, 8)]
#[case(3, 4, 1)]
#[case(16, 32, 4)]
#[case(32, 32, 8)]
fn tmem_line(#[case] width: i64, #[case] bits: i64, #[case] expected: i64) {
    assert_eq!(line_size(width, bits), Some(expected));
}

#[test]
fn wide_textures_overflow_the_calculators() {
    assert_eq!(dxt_for_depth(i64::MAX, 16), None);
    assert_eq!(line_size(i64::MAX, 32), None);
    assert_eq!(line_size(i64::MAX / 2, 16), None);
}

#[rstest]
#[case::width(3, i64::MAX)]
#[case::height(4, i64::MAX)]
#[case::negative_area(3, i64::MIN + 1)]
fn block_load_dimensions_overflow(#[case] index: usize, #[case] value: i64) {
    let mut args = block_args();
    args[index] = Arg::Int(value);
    let err = encode(&Command::new("G_LoadTextureBlock", args)).unwrap_err();
    assert!(matches!(err, CodecError::Encoding { .. }), "{err:?}");
}

#[test]
fn block_load_words() {
    let words = encode(&Command::new("G_LoadTextureBlock", block_args())).unwrap();
    assert_eq!(
        words,
        vec![
            0xFD10_0000_0600_0000,
            0xF510_0000_0701_4050,
            0xE600_0000_0000_0000,
            0xF300_0000_073F_F100,
            0xE700_0000_0000_0000,
            0xF510_1000_0001_4050,
            0xF200_0000_0007_C07C,
        ]
    );
}

#[test]
fn block_load_command_sequence() {
    let commands = TextureMacro::Block.expand(&block_args()).unwrap();
    let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "G_SETTIMG",
            "G_SETTILE",
            "G_RDPLOADSYNC",
            "G_LOADBLOCK",
            "G_RDPPIPESYNC",
            "G_SETTILE",
            "G_SETTILESIZE",
        ]
    );
}

#[test]
fn eight_bit_block_loads_as_sixteen() {
    let args = vec![
        Arg::sym("G_IM_FMT_I"),
        Arg::Int(0x0600_0000),
        Arg::Int(64),
        Arg::Int(32),
        Arg::sym("G_TX_CLAMP"),
        Arg::sym("G_TX_CLAMP"),
    ];
    let commands = TextureMacro::Block8b.expand(&args).unwrap();
    assert_eq!(commands[0].args[1], Arg::Int(16));
    assert_eq!(
        commands[3].args,
        vec![
            Arg::Int(0),
            Arg::Int(0),
            Arg::Int(7),
            Arg::Int(1024),
            Arg::Int(256)
        ]
    );
    assert_eq!(commands[5].args[1], Arg::Int(8));
    assert_eq!(commands[5].args[2], Arg::Int(8));
}

#[test]
fn tile_variant_uses_tile_and_tmem() {
    let mut args = block_args();
    args.extend([Arg::Int(1), Arg::Int(256)]);
    let commands = TextureMacro::BlockTile.expand(&args).unwrap();
    assert_eq!(commands.len(), 7);
    assert_eq!(commands[1].args[3], Arg::Int(256));
    assert_eq!(commands[5].args[4], Arg::Int(1));
    assert_eq!(commands[6].args[2], Arg::Int(1));
}

fn ci4_args() -> Vec<Arg> {
    vec![
        Arg::sym("G_IM_FMT_CI"),
        Arg::Int(0x0600_0000),
        Arg::Int(32),
        Arg::Int(32),
        Arg::sym("G_TX_CLAMP"),
        Arg::sym("G_TX_WRAP"),
        Arg::Int(0x0600_0800),
    ]
}

#[test]
fn ci4_block_loads_palette_first() {
    let ci = || Arg::sym("G_IM_FMT_CI");
    let rgba = || Arg::sym("G_IM_FMT_RGBA");
    let wrap = || Arg::sym("G_TX_WRAP");
    let clamp = || Arg::sym("G_TX_CLAMP");
    let ints = |values: &[i64]| values.iter().copied().map(Arg::Int).collect::<Vec<_>>();
    let tile = |fmt: Arg, siz: i64, line: i64, tmem: i64, index: i64| {
        let mut args = vec![fmt];
        args.extend(ints(&[siz, line, tmem, index, 0]));
        args.extend([wrap(), Arg::Int(32), Arg::Int(0), clamp(), Arg::Int(32), Arg::Int(0)]);
        Command::new("G_SETTILE", args)
    };

    let commands = TextureMacro::Block4bCi.expand(&ci4_args()).unwrap();
    assert_eq!(
        commands,
        vec![
            Command::bare("G_RDPTILESYNC"),
            Command::new(
                "G_SETTILE",
                vec![
                    rgba(),
                    Arg::Int(4),
                    Arg::Int(0),
                    Arg::Int(256),
                    Arg::Int(5),
                    Arg::Int(0),
                    wrap(),
                    Arg::Int(1),
                    Arg::Int(0),
                    wrap(),
                    Arg::Int(1),
                    Arg::Int(0),
                ]
            ),
            tile(ci(), 16, 0, 0, 7),
            Command::new("G_SETTIMG", vec![rgba(), Arg::Int(16), Arg::Int(0x0600_0800)]),
            Command::bare("G_RDPLOADSYNC"),
            Command::new("G_LOADTLUT", ints(&[5, 128])),
            Command::bare("G_RDPPIPESYNC"),
            Command::new("G_SETTIMG", vec![ci(), Arg::Int(16), Arg::Int(0x0600_0000)]),
            Command::bare("G_RDPLOADSYNC"),
            Command::new("G_LOADBLOCK", ints(&[0, 0, 7, 256, 1024])),
            Command::bare("G_RDPPIPESYNC"),
            tile(ci(), 4, 2, 0, 0),
            Command::new("G_SETTILESIZE", ints(&[0, 0, 0, 32, 32])),
        ]
    );

    let words = encode(&Command::new("G_LoadTextureBlock4BCI", ci4_args())).unwrap();
    assert_eq!(words.len(), 13);
    assert_eq!(words[5], 0xF000_0000_051F_C000);
}

#[test]
fn ci4_format_argument_is_ignored() {
    let mut args = ci4_args();
    args[0] = Arg::sym("G_IM_FMT_RGBA");
    assert_eq!(
        TextureMacro::Block4bCi.expand(&args).unwrap(),
        TextureMacro::Block4bCi.expand(&ci4_args()).unwrap()
    );
}

#[test]
fn ci4_without_format_is_an_arity_error() {
    let err = TextureMacro::Block4bCi.expand(&ci4_args()[1..]).unwrap_err();
    assert_eq!(
        err,
        CodecError::Arity {
            command: "G_LoadTextureBlock4BCI".to_owned(),
            expected: 7,
            found: 6,
        }
    );
}

#[test]
fn wrong_macro_arity() {
    let err = TextureMacro::Block4b.expand(&block_args()).unwrap_err();
    assert_eq!(
        err,
        CodecError::Arity {
            command: "G_LoadTextureBlock4B".to_owned(),
            expected: 6,
            found: 7,
        }
    );
}

#[test]
fn symbolic_width_is_rejected() {
    let mut args = block_args();
    args[3] = Arg::sym("WIDTH");
    let err = TextureMacro::Block.expand(&args).unwrap_err();
    assert!(matches!(err, CodecError::Encoding { field: "width", .. }));
}

#[test]
fn macro_names_are_distinct() {
    for m in TextureMacro::ALL {
        assert_eq!(TextureMacro::from_name(m.name()), Some(m));
    }
}
