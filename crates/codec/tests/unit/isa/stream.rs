//! # Display List Walker Tests
//!
//! Tests for walking big-endian display lists: termination, child list
//! collection, offsets and command limits.

use f3dex2_codec::config::Config;
use f3dex2_codec::{CodecError, Command, DisplayListWalker, Opcode, encode_to_bytes};
use pretty_assertions::assert_eq;

use crate::common::builder::CommandBuilder;

fn tri() -> Command {
    CommandBuilder::new("G_TRI1").ints(&[0, 1, 2]).build()
}

fn call(push: i64, address: i64) -> Command {
    CommandBuilder::new("G_DL").ints(&[push, address]).build()
}

fn list(commands: &[Command]) -> Vec<u8> {
    encode_to_bytes(commands).unwrap()
}

#[test]
fn walks_until_end_and_collects_children() {
    let bytes = list(&[
        CommandBuilder::new("G_VTX").ints(&[4, 0, 0x0600_0000]).build(),
        call(0, 0x0600_1000),
        call(0, 0x0E00_0200),
        call(0, 0x0600_1000),
        tri(),
        Command::bare("G_ENDDL"),
        tri(),
    ]);
    let config = Config::default();
    let result = DisplayListWalker::new(&bytes, &config).walk(0).unwrap();

    assert!(result.terminated);
    assert_eq!(result.commands.len(), 6);
    assert_eq!(result.dl_targets, vec![0x0600_1000]);
    assert_eq!(result.stats.commands, 6);
    assert_eq!(result.stats.per_opcode.get(&Opcode::Dl), Some(&3));
}

#[test]
fn starts_at_byte_offset() {
    let bytes = list(&[call(0, 0x0700_0000), tri(), Command::bare("G_ENDDL")]);
    let config = Config::default();
    let result = DisplayListWalker::new(&bytes, &config).walk(8).unwrap();
    assert_eq!(result.commands.len(), 2);
    assert!(result.dl_targets.is_empty());
    assert!(result.terminated);
}

#[test]
fn branch_list_ends_the_walk() {
    let bytes = list(&[tri(), call(1, 0x0700_0000), tri()]);
    let config = Config::default();
    let result = DisplayListWalker::new(&bytes, &config).walk(0).unwrap();
    assert!(result.terminated);
    assert_eq!(result.commands.len(), 2);
    assert_eq!(result.dl_targets, vec![0x0700_0000]);
}

#[test]
fn branch_list_can_continue() {
    let bytes = list(&[tri(), call(1, 0x0700_0000), tri()]);
    let mut config = Config::default();
    config.walk.stop_on_branch_list = false;
    let result = DisplayListWalker::new(&bytes, &config).walk(0).unwrap();
    assert!(!result.terminated);
    assert_eq!(result.commands.len(), 3);
}

#[test]
fn branch_z_target_is_collected() {
    let branch = CommandBuilder::new("G_BRANCH_Z")
        .ints(&[0x0800_0000, 2, 2, 0x1_0000])
        .build();
    let bytes = list(&[branch, Command::bare("G_ENDDL")]);
    let config = Config::default();
    let result = DisplayListWalker::new(&bytes, &config).walk(0).unwrap();
    assert_eq!(result.commands.len(), 2);
    assert_eq!(result.stats.words, 3);
    assert_eq!(result.dl_targets, vec![0x0800_0000]);
}

#[test]
fn command_limit() {
    let bytes = list(&[tri(), tri(), tri(), Command::bare("G_ENDDL")]);
    let mut config = Config::default();
    config.walk.max_commands = 2;
    let result = DisplayListWalker::new(&bytes, &config).walk(0).unwrap();
    assert_eq!(result.commands.len(), 2);
    assert!(!result.terminated);
}

#[test]
fn unterminated_buffer() {
    let bytes = list(&[tri(), tri()]);
    let config = Config::default();
    let result = DisplayListWalker::new(&bytes, &config).walk(0).unwrap();
    assert_eq!(result.commands.len(), 2);
    assert!(!result.terminated);
}

#[test]
fn offset_past_end_is_empty() {
    let bytes = list(&[tri()]);
    let config = Config::default();
    let result = DisplayListWalker::new(&bytes, &config).walk(64).unwrap();
    assert!(result.commands.is_empty());
    assert!(!result.terminated);
}

#[test]
fn decode_errors_propagate() {
    let mut bytes = list(&[tri()]);
    bytes.extend([0x0A, 0, 0, 0, 0, 0, 0, 0]);
    let config = Config::default();
    assert_eq!(
        DisplayListWalker::new(&bytes, &config).walk(0),
        Err(CodecError::UnknownOpcode(0x0A))
    );
}
