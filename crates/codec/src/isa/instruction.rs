//! Structured command representations.
//!
//! `Command` is the encoder's input: a mnemonic or macro name plus semantic
//! arguments. `Decoded` is the decoder's output: the gbi macro name chosen for
//! the words, arguments shaped like the encoder's, and the words consumed.

use serde::{Deserialize, Serialize};

use crate::common::arg::Arg;
use crate::common::error::Diagnostic;
use crate::isa::opcodes::Opcode;

/// A command to encode.
///
/// Deserializes from `{ "name": "G_TRI1", "args": [0, 1, 2] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Opcode mnemonic (`G_SETTILE`) or texture-load macro name.
    pub name: String,
    /// Arguments in encoder order.
    #[serde(default)]
    pub args: Vec<Arg>,
}

impl Command {
    /// Creates a command from a name and arguments.
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Creates a command with no arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

/// One decoded command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// The command's opcode.
    pub opcode: Opcode,
    /// gbi macro name selected from the decoded fields.
    pub name: &'static str,
    /// Arguments in encoder order for `opcode`.
    pub args: Vec<Arg>,
    /// Words consumed, including any `G_RDPHALF` prefix or tail.
    pub words: Vec<u64>,
    /// Non-fatal findings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
    /// Number of words consumed.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no words were consumed; never true for a successful decode.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Rebuilds the encoder command for this decode.
    pub fn to_command(&self) -> Command {
        Command::new(self.opcode.mnemonic(), self.args.clone())
    }

    /// The segmented address targeted by a display-list call or branch.
    pub fn branch_target(&self) -> Option<u32> {
        let index = match self.opcode {
            Opcode::Dl => 1,
            Opcode::BranchZ => 0,
            _ => return None,
        };
        self.args
            .get(index)
            .and_then(Arg::as_int)
            .and_then(|value| u32::try_from(value).ok())
    }
}
