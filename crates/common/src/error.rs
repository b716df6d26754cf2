//! Decode errors for the serialized intermediate code and symbol table.

use thiserror::Error;

/// Errors that occur while decoding `intermediate.ic` or `symtab.txt` text.
///
/// Every variant except [`DecodeError::MissingHeader`] carries the 1-based
/// line number of the offending text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// An operation field did not have the `(CLASS,CODE)` shape.
    #[error("line {line}: malformed record '{text}'")]
    MalformedRecord { line: usize, text: String },

    /// The class in `(CLASS,CODE)` is not AD, IS or DL.
    #[error("line {line}: unknown operation class '{token}'")]
    UnknownClass { line: usize, token: String },

    /// The class/code pair does not name an entry of the opcode table.
    #[error("line {line}: no operation ({class},{code:02})")]
    UnknownOperation {
        line: usize,
        class: &'static str,
        code: u8,
    },

    /// An operand field was neither `(C,n)`, `(S,n)` nor `-`.
    #[error("line {line}: malformed operand '{token}'")]
    MalformedOperand { line: usize, token: String },

    /// A numeric field could not be parsed or is out of range.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// The symbol table text has no `Index Symbol Address Defined` header.
    #[error("symbol table header missing")]
    MissingHeader,

    /// A symbol table row did not have four fields.
    #[error("line {line}: malformed symbol row '{text}'")]
    MalformedSymbolRow { line: usize, text: String },

    /// Symbol rows must be numbered 1, 2, 3, ... in order.
    #[error("line {line}: expected symbol index {expected}, found {found}")]
    IndexOutOfSequence {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The `Defined` column was not `YES` or `NO`.
    #[error("line {line}: invalid defined flag '{token}'")]
    InvalidDefinedFlag { line: usize, token: String },

    /// A `YES` row without an address, or a `NO` row with one.
    #[error("line {line}: symbol '{name}' address disagrees with its defined flag")]
    InconsistentSymbol { line: usize, name: String },

    /// The same symbol name appears in two rows.
    #[error("line {line}: symbol '{name}' listed twice")]
    DuplicateRow { line: usize, name: String },
}
