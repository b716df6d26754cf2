//! Fatal errors for the twopass assembler.
//!
//! Anything reported here aborts the run. Recoverable conditions are
//! [`Diagnostic`](crate::Diagnostic)s instead.

use thiserror::Error;

/// Errors that stop an assembly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A required numeric operand could not be converted.
    #[error("line {line}: {mnemonic} operand '{token}' is not a valid number")]
    MalformedOperand {
        line: usize,
        mnemonic: &'static str,
        token: String,
    },

    /// A statement that needs an operand has none.
    #[error("line {line}: {mnemonic} requires an operand")]
    MissingOperand { line: usize, mnemonic: &'static str },

    /// The location counter ran past the largest address.
    #[error("line {line}: location counter overflow")]
    AddressOverflow { line: usize },

    /// An intermediate record has a shape Pass-I never produces.
    #[error("intermediate record {record}: {reason}")]
    MalformedRecord { record: usize, reason: &'static str },
}
