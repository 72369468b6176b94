//! # Error Tests
//!
//! Tests for error messages and diagnostic serialization.

use f3dex2_codec::{CodecError, Diagnostic};
use pretty_assertions::assert_eq;

#[test]
fn unknown_opcode_message() {
    assert_eq!(CodecError::UnknownOpcode(0x0A).to_string(), "unknown opcode 0x0a");
}

#[test]
fn arity_message() {
    let err = CodecError::Arity {
        command: "G_TRI1".to_owned(),
        expected: 3,
        found: 2,
    };
    assert_eq!(err.to_string(), "G_TRI1 takes 3 arguments, got 2");
}

#[test]
fn unknown_symbol_message() {
    let err = CodecError::UnknownSymbol {
        table: "image format",
        symbol: "G_IM_FMT_BOGUS".to_owned(),
    };
    assert_eq!(err.to_string(), "unknown symbol `G_IM_FMT_BOGUS` in image format");
}

#[test]
fn truncated_message() {
    let err = CodecError::Truncated {
        command: "G_TEXRECT",
        needed: 3,
        available: 1,
    };
    assert_eq!(err.to_string(), "G_TEXRECT spans 3 words, only 1 available");
}

#[test]
fn diagnostic_display() {
    let diagnostic = Diagnostic::NonZeroPadding {
        field: "pad",
        expected: 0,
        found: 1,
    };
    assert_eq!(diagnostic.to_string(), "field `pad` holds 0x1, expected 0x0");
}

#[test]
fn diagnostic_serializes_with_kind() {
    let diagnostic = Diagnostic::AmbiguousRenderMode {
        cycle1: "G_RM_AA_ZB_OPA_SURF".to_owned(),
        cycle2: "0x00002078".to_owned(),
    };
    let json = serde_json::to_value(&diagnostic).unwrap();
    assert_eq!(json["kind"], "ambiguous_render_mode");
    assert_eq!(json["cycle2"], "0x00002078");
}
