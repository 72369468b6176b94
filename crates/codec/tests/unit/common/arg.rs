//! # Argument Tests
//!
//! Tests for `Arg` construction, integer parsing and display.

use f3dex2_codec::Arg;
use f3dex2_codec::common::parse_int;
use pretty_assertions::assert_eq;

#[test]
fn parse_int_accepts_decimal_hex_and_sign() {
    assert_eq!(parse_int("32"), Some(32));
    assert_eq!(parse_int("0x20"), Some(32));
    assert_eq!(parse_int("0X1f"), Some(31));
    assert_eq!(parse_int("-8"), Some(-8));
    assert_eq!(parse_int("  7 "), Some(7));
}

#[test]
fn parse_int_rejects_symbols() {
    assert_eq!(parse_int("G_TX_CLAMP"), None);
    assert_eq!(parse_int("0x"), None);
    assert_eq!(parse_int(""), None);
    assert_eq!(parse_int("12ab"), None);
}

#[test]
fn as_int_reads_numeric_text() {
    assert_eq!(Arg::Int(5).as_int(), Some(5));
    assert_eq!(Arg::sym("0x10").as_int(), Some(16));
    assert_eq!(Arg::sym("G_SHADE").as_int(), None);
    assert_eq!(Arg::Flags(vec![Arg::Int(1)]).as_int(), None);
}

#[test]
fn from_parts_collapses_by_count() {
    assert_eq!(Arg::from_parts(vec![]), Arg::Int(0));
    assert_eq!(Arg::from_parts(vec![Arg::sym("A")]), Arg::sym("A"));
    assert_eq!(
        Arg::from_parts(vec![Arg::sym("A"), Arg::sym("B")]),
        Arg::Flags(vec![Arg::sym("A"), Arg::sym("B")])
    );
}

#[test]
fn display_joins_flags() {
    let flags = Arg::Flags(vec![Arg::sym("G_TX_CLAMP"), Arg::sym("G_TX_MIRROR")]);
    assert_eq!(flags.to_string(), "G_TX_CLAMP | G_TX_MIRROR");
    assert_eq!(Arg::Int(-3).to_string(), "-3");
}

#[test]
fn json_is_untagged() {
    let args: Vec<Arg> = serde_json::from_str(r#"[32, "G_TX_CLAMP", ["A", 2]]"#).unwrap();
    assert_eq!(
        args,
        vec![
            Arg::Int(32),
            Arg::sym("G_TX_CLAMP"),
            Arg::Flags(vec![Arg::sym("A"), Arg::Int(2)]),
        ]
    );
}

#[test]
fn conversions() {
    assert_eq!(Arg::from(4u32), Arg::Int(4));
    assert_eq!(Arg::from(-4i32), Arg::Int(-4));
    assert_eq!(Arg::from("G_SHADE").as_sym(), Some("G_SHADE"));
    assert_eq!(Arg::from(String::from("x")), Arg::sym("x"));
}
