//! # Statistics Tests
//!
//! Tests for decode statistics counters and report sections.

use f3dex2_codec::config::DecodeConfig;
use f3dex2_codec::stats::DecodeStats;
use f3dex2_codec::{Opcode, decode, decode_all};

#[test]
fn default_stats_all_zero() {
    let stats = DecodeStats::default();
    assert_eq!(stats.commands, 0);
    assert_eq!(stats.words, 0);
    assert!(stats.per_opcode.is_empty());
    assert_eq!(stats.errors, 0);
}

#[test]
fn record_counts_words_and_opcodes() {
    let words = [
        0xE100_0000_0600_0100,
        0x0400_A004_0001_0000,
        0x0500_0204_0000_0000,
        0x0500_0204_0000_0000,
    ];
    let mut stats = DecodeStats::default();
    for decoded in decode_all(&words, &DecodeConfig::default()).unwrap() {
        stats.record(&decoded);
    }
    assert_eq!(stats.commands, 3);
    assert_eq!(stats.words, 4);
    assert_eq!(stats.per_opcode.get(&Opcode::Tri1), Some(&2));
    assert_eq!(stats.per_opcode.get(&Opcode::BranchZ), Some(&1));
}

#[test]
fn record_counts_diagnostics() {
    let mut stats = DecodeStats::default();
    stats.record(&decode(&[0x0500_0204_0000_0001]).unwrap());
    stats.record(&decode(&[0xE200_001C_0044_2078]).unwrap());
    assert_eq!(stats.padding_diagnostics, 1);
    assert_eq!(stats.ambiguous_render_modes, 1);
}

#[test]
fn merge_adds_counters() {
    let mut a = DecodeStats::default();
    a.record(&decode(&[0xDF00_0000_0000_0000]).unwrap());
    let mut b = DecodeStats::default();
    b.record(&decode(&[0xDF00_0000_0000_0000]).unwrap());
    b.record_error();
    a.merge(&b);
    assert_eq!(a.commands, 2);
    assert_eq!(a.errors, 1);
    assert_eq!(a.per_opcode.get(&Opcode::EndDl), Some(&2));
}

#[test]
fn render_selected_sections() {
    let mut stats = DecodeStats::default();
    stats.record(&decode(&[0xDF00_0000_0000_0000]).unwrap());

    let all = stats.render_sections(&[]);
    assert!(all.contains("F3DEX2 DISPLAY LIST STATISTICS"));
    assert!(all.contains("dl_commands              1"));
    assert!(all.contains("G_ENDDL"));
    assert!(all.contains("DIAGNOSTICS"));

    let summary = stats.render_sections(&["summary".to_owned()]);
    assert!(summary.contains("dl_words"));
    assert!(!summary.contains("OPCODE MIX"));
}
