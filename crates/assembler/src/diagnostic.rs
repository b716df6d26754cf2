//! Recoverable conditions collected while assembling.
//!
//! Both passes keep going after any of these. A run that produced at least
//! one diagnostic still yields machine code, but that code is advisory only.

use std::fmt;

use thiserror::Error;

/// A condition reported without stopping the pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A label defined a second time. The first address stands.
    #[error("line {line}: duplicate definition of symbol '{name}' at LC {location} (first defined at {existing})")]
    DuplicateSymbol {
        line: usize,
        name: String,
        location: u32,
        existing: u32,
    },

    /// A mnemonic not in the opcode table. The line is dropped.
    #[error("line {line}: unknown opcode '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// A line with a label and nothing else.
    #[error("line {line}: missing opcode")]
    MissingOpcode { line: usize },

    /// A symbol reference with no defined address. The operand becomes 0.
    #[error(
        "undefined symbol '{}' (index {index}) referenced at {location:03}; operand set to 0",
        .name.as_deref().unwrap_or("?")
    )]
    UnresolvedSymbol {
        index: usize,
        name: Option<String>,
        location: u32,
    },
}

/// Diagnostic counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub duplicate_symbols: usize,
    pub unknown_opcodes: usize,
    pub missing_opcodes: usize,
    pub unresolved_symbols: usize,
}

impl Summary {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Summary::default();
        for diagnostic in diagnostics {
            match diagnostic {
                Diagnostic::DuplicateSymbol { .. } => summary.duplicate_symbols += 1,
                Diagnostic::UnknownOpcode { .. } => summary.unknown_opcodes += 1,
                Diagnostic::MissingOpcode { .. } => summary.missing_opcodes += 1,
                Diagnostic::UnresolvedSymbol { .. } => summary.unresolved_symbols += 1,
            }
        }
        summary
    }

    /// True when nothing at all was reported.
    pub fn is_clean(&self) -> bool {
        *self == Summary::default()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} duplicate symbol(s), {} unknown opcode(s), {} missing opcode(s), {} unresolved symbol(s)",
            self.duplicate_symbols, self.unknown_opcodes, self.missing_opcodes, self.unresolved_symbols
        )
    }
}
