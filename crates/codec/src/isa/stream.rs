//! Display-list walker.
//!
//! Follows one display list through a big-endian buffer, decoding command by
//! command from a byte offset until the list ends, branches away, or runs past
//! the configured command limit. Calls into other segments are collected so a
//! caller can walk the child lists next.

use tracing::debug;

use crate::common::bits::words_from_be_bytes;
use crate::common::constants::segment_of;
use crate::common::error::Result;
use crate::config::Config;
use crate::isa::decode::decode_with;
use crate::isa::instruction::Decoded;
use crate::isa::opcodes::Opcode;
use crate::stats::DecodeStats;

/// Outcome of walking one display list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkResult {
    /// Commands in list order.
    pub commands: Vec<Decoded>,
    /// Segmented addresses of child lists outside the local segment, first-seen order.
    pub dl_targets: Vec<u32>,
    /// Counters for the walked commands.
    pub stats: DecodeStats,
    /// Whether the list ended on `gsSPEndDisplayList` or a terminating branch.
    pub terminated: bool,
}

/// Walks display lists stored in a byte buffer.
#[derive(Debug)]
pub struct DisplayListWalker<'a> {
    bytes: &'a [u8],
    config: &'a Config,
}

impl<'a> DisplayListWalker<'a> {
    /// Creates a walker over `bytes`.
    pub const fn new(bytes: &'a [u8], config: &'a Config) -> Self {
        Self { bytes, config }
    }

    /// Decodes the display list starting at byte `offset`.
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset of the first command.
    ///
    /// # Returns
    ///
    /// The walked commands, or the first decode error.
    pub fn walk(&self, offset: usize) -> Result<WalkResult> {
        let words = words_from_be_bytes(self.bytes.get(offset..).unwrap_or_default());
        let walk = &self.config.walk;
        let mut result = WalkResult::default();
        let mut pos = 0;

        debug!("walking display list at {offset:#x} ({} words)", words.len());
        while pos < words.len() && result.commands.len() < walk.max_commands {
            let decoded = decode_with(&words[pos..], &self.config.decode)?;
            pos += decoded.len();
            result.stats.record(&decoded);

            if let Some(target) = decoded.branch_target() {
                if segment_of(target) != walk.local_segment && !result.dl_targets.contains(&target)
                {
                    debug!("child display list at {target:#010x}");
                    result.dl_targets.push(target);
                }
            }

            let ends = decoded.opcode == Opcode::EndDl
                || (walk.stop_on_branch_list && decoded.name == "gsSPBranchList");
            result.commands.push(decoded);
            if ends {
                result.terminated = true;
                break;
            }
        }
        debug!(
            "walked {} commands, terminated: {}",
            result.commands.len(),
            result.terminated
        );
        Ok(result)
    }
}
