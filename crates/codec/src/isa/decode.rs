//! Command decoder.
//!
//! This module turns packed words back into structured commands. It handles:
//! 1. **Dispatch:** The high byte of the first word selects the opcode.
//! 2. **Pairing:** A `G_RDPHALF_1` word followed by `G_BRANCH_Z` or `G_LOAD_UCODE` decodes as one command.
//! 3. **Unpacking:** Fields are read per layout; fixed fields that differ are diagnosed (or rejected when strict).
//! 4. **Transform:** The command's decode transform rebuilds semantic arguments and picks the gbi macro name.

use crate::common::constants::opcode_byte;
use crate::common::error::{CodecError, Diagnostic, Result};
use crate::config::DecodeConfig;
use crate::isa::instruction::Decoded;
use crate::isa::layout::{unpack, word_count};
use crate::isa::opcodes::Opcode;

/// Mutable state handed to a decode transform.
#[derive(Debug)]
pub struct DecodeContext<'a> {
    config: &'a DecodeConfig,
    name: &'static str,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> DecodeContext<'a> {
    /// Creates a context whose macro name starts as `name`.
    pub const fn new(config: &'a DecodeConfig, name: &'static str) -> Self {
        Self {
            config,
            name,
            diagnostics: Vec::new(),
        }
    }

    /// Active decode settings.
    pub const fn config(&self) -> &DecodeConfig {
        self.config
    }

    /// The gbi macro name reported for this command.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Overrides the gbi macro name reported for this command.
    pub fn set_name(&mut self, name: &'static str) {
        self.name = name;
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Attaches a diagnostic to the decoded command.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Determines which command starts at `words[0]`.
fn dispatch(words: &[u64]) -> Result<Opcode> {
    let first = words.first().ok_or(CodecError::Truncated {
        command: "command",
        needed: 1,
        available: 0,
    })?;
    let byte = opcode_byte(*first);
    let opcode = Opcode::from_byte(byte).ok_or(CodecError::UnknownOpcode(byte))?;
    match opcode {
        Opcode::BranchZ | Opcode::LoadUcode => Err(CodecError::DetachedWord(opcode.mnemonic())),
        Opcode::RdpHalf1 => Ok(match words.get(1).copied().map(opcode_byte) {
            Some(0x04) => Opcode::BranchZ,
            Some(0xDD) => Opcode::LoadUcode,
            _ => Opcode::RdpHalf1,
        }),
        other => Ok(other),
    }
}

/// Decodes the command at the front of `words` with default settings.
pub fn decode(words: &[u64]) -> Result<Decoded> {
    decode_with(words, &DecodeConfig::default())
}

/// Decodes the command at the front of `words`.
///
/// # Arguments
///
/// * `words` - Words starting at a command boundary; trailing words are ignored.
/// * `config` - Decode settings (padding strictness, render-mode handling).
///
/// # Returns
///
/// The decoded command, whose `words` field reports how many words it used.
pub fn decode_with(words: &[u64], config: &DecodeConfig) -> Result<Decoded> {
    let opcode = dispatch(words)?;
    let spec = opcode.spec();
    let mnemonic = opcode.mnemonic();
    let needed = word_count(spec.layout);
    let used = words.get(..needed).ok_or(CodecError::Truncated {
        command: mnemonic,
        needed,
        available: words.len(),
    })?;

    let unpacked = unpack(spec.layout, used);
    let mut ctx = DecodeContext::new(config, spec.macro_name);
    for mismatch in unpacked.mismatches {
        if let Some(err) =
            config.padding_error(mnemonic, mismatch.field, mismatch.expected, mismatch.found)
        {
            return Err(err);
        }
        ctx.report(Diagnostic::NonZeroPadding {
            field: mismatch.field,
            expected: mismatch.expected,
            found: mismatch.found,
        });
    }

    let args = (spec.decode)(&unpacked.values, &mut ctx);
    Ok(Decoded {
        opcode,
        name: ctx.name,
        args,
        words: used.to_vec(),
        diagnostics: ctx.diagnostics,
    })
}

/// Decodes every command in `words`, stopping at the first error.
pub fn decode_all(words: &[u64], config: &DecodeConfig) -> Result<Vec<Decoded>> {
    let mut out = Vec::new();
    let mut rest = words;
    while !rest.is_empty() {
        let decoded = decode_with(rest, config)?;
        rest = rest.get(decoded.len()..).unwrap_or_default();
        out.push(decoded);
    }
    Ok(out)
}
