//! Command encoder.
//!
//! Encoding runs in three steps:
//! 1. **Lookup:** The command name selects a texture-load macro or an opcode's `CommandSpec`.
//! 2. **Transform:** The command's encode transform maps semantic arguments to raw field values.
//! 3. **Pack:** Raw values are range-checked and packed most-significant field first.

use tracing::debug;

use crate::common::arg::Arg;
use crate::common::bits::words_to_be_bytes;
use crate::common::error::{CodecError, Result};
use crate::isa::instruction::Command;
use crate::isa::layout::{Field, pack};
use crate::isa::macros::TextureMacro;
use crate::isa::opcodes::Opcode;
use crate::isa::symbols::SymbolTable;

/// Arguments of one command, as seen by an encode transform.
#[derive(Debug, Clone, Copy)]
pub struct ArgList<'a> {
    command: &'static str,
    layout: &'static [Field],
    items: &'a [Arg],
}

impl<'a> ArgList<'a> {
    /// Wraps the arguments of `command`.
    pub const fn new(command: &'static str, layout: &'static [Field], items: &'a [Arg]) -> Self {
        Self {
            command,
            layout,
            items,
        }
    }

    /// Mnemonic of the command being encoded.
    pub const fn command(&self) -> &'static str {
        self.command
    }

    /// Number of arguments supplied.
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no arguments were supplied.
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns argument `index`.
    pub fn get(&self, index: usize) -> Result<&'a Arg> {
        self.items.get(index).ok_or_else(|| CodecError::Arity {
            command: self.command.to_owned(),
            expected: index + 1,
            found: self.items.len(),
        })
    }

    /// Returns argument `index` as an integer.
    pub fn int(&self, index: usize, field: &'static str) -> Result<i64> {
        let arg = self.get(index)?;
        arg.as_int()
            .ok_or_else(|| self.invalid(field, format!("expects an integer, got `{arg}`")))
    }

    /// Returns argument `index` multiplied by `factor`.
    pub fn scaled(&self, index: usize, field: &'static str, factor: i64) -> Result<i64> {
        let value = self.int(index, field)?;
        self.checked(field, value.checked_mul(factor))
    }

    /// Returns argument `index` plus `delta`.
    pub fn offset(&self, index: usize, field: &'static str, delta: i64) -> Result<i64> {
        let value = self.int(index, field)?;
        self.checked(field, value.checked_add(delta))
    }

    /// Unwraps checked arithmetic on `field`, failing when it overflowed.
    pub fn checked(&self, field: &'static str, value: Option<i64>) -> Result<i64> {
        value.ok_or_else(|| self.invalid(field, "overflows"))
    }

    /// Resolves argument `index` through a symbol table.
    pub fn symbol(&self, index: usize, table: &SymbolTable) -> Result<i64> {
        table.resolve(self.get(index)?)
    }

    /// Returns every argument as an integer, naming errors after the layout's fields.
    pub fn ints(&self) -> Result<Vec<i64>> {
        let names = self.layout.iter().filter(|f| f.is_variable()).map(|f| f.name);
        names
            .chain(std::iter::repeat("arg"))
            .zip(0..self.items.len())
            .map(|(name, index)| self.int(index, name))
            .collect()
    }

    /// Builds an `Encoding` error for `field`.
    pub fn invalid(&self, field: &'static str, reason: impl Into<String>) -> CodecError {
        CodecError::Encoding {
            command: self.command,
            field,
            reason: reason.into(),
        }
    }
}

/// Encodes one opcode's arguments into words.
///
/// # Arguments
///
/// * `opcode` - The command to encode.
/// * `args` - Arguments in encoder order.
///
/// # Returns
///
/// The packed words: one to three, per the opcode's layout.
pub fn encode_opcode(opcode: Opcode, args: &[Arg]) -> Result<Vec<u64>> {
    let spec = opcode.spec();
    let mnemonic = opcode.mnemonic();
    if args.len() != spec.arity {
        return Err(CodecError::Arity {
            command: mnemonic.to_owned(),
            expected: spec.arity,
            found: args.len(),
        });
    }
    let raws = (spec.encode)(&ArgList::new(mnemonic, spec.layout, args))?;
    pack(mnemonic, spec.layout, &raws)
}

/// Encodes a command or texture-load macro into words.
///
/// # Arguments
///
/// * `command` - Opcode mnemonic or macro name, with its arguments.
///
/// # Returns
///
/// The packed words, or the first error raised by lookup, transform or packing.
pub fn encode(command: &Command) -> Result<Vec<u64>> {
    if let Some(texture_macro) = TextureMacro::from_name(&command.name) {
        let expanded = texture_macro.expand(&command.args)?;
        debug!(
            "expanded {} into {} commands",
            command.name,
            expanded.len()
        );
        return encode_all(&expanded);
    }
    let opcode = Opcode::from_mnemonic(&command.name)
        .ok_or_else(|| CodecError::UnknownCommand(command.name.clone()))?;
    encode_opcode(opcode, &command.args)
}

/// Encodes a sequence of commands, concatenating their words in order.
pub fn encode_all(commands: &[Command]) -> Result<Vec<u64>> {
    let mut words = Vec::with_capacity(commands.len());
    for command in commands {
        words.extend(encode(command)?);
    }
    Ok(words)
}

/// Encodes a sequence of commands as a big-endian byte buffer.
pub fn encode_to_bytes(commands: &[Command]) -> Result<Vec<u8>> {
    encode_all(commands).map(|words| words_to_be_bytes(&words))
}
