//! Decode statistics collection and reporting.
//!
//! This module tracks what a decode or walk saw. It provides:
//! 1. **Summary:** Commands decoded, words consumed, and decode errors.
//! 2. **Opcode mix:** Counts per opcode mnemonic.
//! 3. **Diagnostics:** Ambiguous render modes and non-zero padding findings.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::common::error::Diagnostic;
use crate::isa::instruction::Decoded;
use crate::isa::opcodes::Opcode;

/// Counters gathered while decoding a stream of words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    /// Number of commands decoded.
    pub commands: u64,
    /// Number of 64-bit words consumed by decoded commands.
    pub words: u64,
    /// Commands decoded, keyed by opcode.
    pub per_opcode: BTreeMap<Opcode, u64>,
    /// Render-mode words with at least one cycle outside the preset table.
    pub ambiguous_render_modes: u64,
    /// Fixed fields found holding unexpected bits.
    pub padding_diagnostics: u64,
    /// Words that failed to decode.
    pub errors: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"opcodes"`, `"diagnostics"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "opcodes", "diagnostics"];

impl DecodeStats {
    /// Accounts for one decoded command.
    pub fn record(&mut self, decoded: &Decoded) {
        self.commands += 1;
        self.words += decoded.len() as u64;
        *self.per_opcode.entry(decoded.opcode).or_default() += 1;
        for diagnostic in &decoded.diagnostics {
            match diagnostic {
                Diagnostic::AmbiguousRenderMode { .. } => self.ambiguous_render_modes += 1,
                Diagnostic::NonZeroPadding { .. } => self.padding_diagnostics += 1,
            }
        }
    }

    /// Accounts for one word that did not decode.
    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Adds another set of counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.commands += other.commands;
        self.words += other.words;
        self.ambiguous_render_modes += other.ambiguous_render_modes;
        self.padding_diagnostics += other.padding_diagnostics;
        self.errors += other.errors;
        for (&opcode, &count) in &other.per_opcode {
            *self.per_opcode.entry(opcode).or_default() += count;
        }
    }

    /// Renders the requested sections as text.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to include, or empty for all.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let total = self.commands.max(1) as f64;
        let mut out = String::new();

        let _ = writeln!(out, "\n==========================================================");
        let _ = writeln!(out, "F3DEX2 DISPLAY LIST STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let _ = writeln!(out, "dl_commands              {}", self.commands);
            let _ = writeln!(out, "dl_words                 {}", self.words);
            let _ = writeln!(out, "dl_errors                {}", self.errors);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("opcodes") {
            let _ = writeln!(out, "OPCODE MIX");
            for (opcode, &count) in &self.per_opcode {
                let _ = writeln!(
                    out,
                    "  {:<22} {} ({:.2}%)",
                    opcode.mnemonic(),
                    count,
                    (count as f64 / total) * 100.0
                );
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("diagnostics") {
            let _ = writeln!(out, "DIAGNOSTICS");
            let _ = writeln!(out, "  render_mode.ambiguous  {}", self.ambiguous_render_modes);
            let _ = writeln!(out, "  padding.nonzero        {}", self.padding_diagnostics);
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
