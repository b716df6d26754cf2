//! Intermediate code: the hand-off from Pass-I to Pass-II.
//!
//! Text form, one record per line:
//! ```text
//! [LOC] (CLASS,CC) [OPERAND]
//!
//! 100 (AD,01) (C,100)     START 100
//! 100 (IS,01) (S,2)       LDA ALPHA   (ALPHA is symbol #2)
//! 103 (DL,01) (C,5)       DC 5
//! (AD,02)                 END
//! ```
//! `LOC` is zero-padded to three digits and `CC` to two. OPERAND is
//! `(C,value)` for a literal, `(S,index)` for a 1-based symbol index and
//! `-` when there is none. A record without a location omits both the
//! location and a `-` operand, which is how END is written.

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::{Mnemonic, OpClass};

/// Operand of an intermediate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// A literal value.
    Constant(i64),
    /// A reference to the symbol with this 1-based table index.
    Symbol(usize),
    /// No operand.
    None,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant(value) => write!(f, "(C,{value})"),
            Operand::Symbol(index) => write!(f, "(S,{index})"),
            Operand::None => f.write_str("-"),
        }
    }
}

/// One intermediate record, produced by Pass-I for a single source statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrRecord {
    /// Location counter at the statement. `None` only for END.
    pub location: Option<u32>,
    /// The statement's operation.
    pub mnemonic: Mnemonic,
    /// The single operand.
    pub operand: Operand,
}

impl IrRecord {
    pub fn new(location: Option<u32>, mnemonic: Mnemonic, operand: Operand) -> Self {
        Self {
            location,
            mnemonic,
            operand,
        }
    }

    /// Encode this record as one line of text, without the newline.
    pub fn encode(&self) -> String {
        let op = format!(
            "({},{:02})",
            self.mnemonic.class().name(),
            self.mnemonic.code()
        );
        match (self.location, self.operand) {
            (Some(loc), operand) => format!("{loc:03} {op} {operand}"),
            (None, Operand::None) => op,
            (None, operand) => format!("{op} {operand}"),
        }
    }

    /// Decode one non-blank line of intermediate code.
    ///
    /// `line` is the 1-based line number used in errors.
    pub fn decode(text: &str, line: usize) -> Result<Self, DecodeError> {
        let mut fields = text.split_whitespace().peekable();

        let location = match fields.peek() {
            Some(&first) if !first.starts_with('(') => {
                let loc = parse_number::<u32>(first, line)?;
                fields.next();
                Some(loc)
            }
            _ => None,
        };

        let op = fields.next().ok_or_else(|| DecodeError::MalformedRecord {
            line,
            text: text.trim().to_string(),
        })?;
        let mnemonic = parse_operation(op, line)?;

        let operand = match fields.next() {
            Some(token) => parse_operand(token, line)?,
            None => Operand::None,
        };

        if fields.next().is_some() {
            return Err(DecodeError::MalformedRecord {
                line,
                text: text.trim().to_string(),
            });
        }

        Ok(Self {
            location,
            mnemonic,
            operand,
        })
    }
}

/// The complete intermediate code of one assembly, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntermediateCode {
    /// Records in the order their statements appear in the source.
    pub records: Vec<IrRecord>,
}

impl IntermediateCode {
    pub fn new(records: Vec<IrRecord>) -> Self {
        Self { records }
    }

    /// Encode every record, one per line, each newline-terminated.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.encode());
            out.push('\n');
        }
        out
    }

    /// Decode intermediate code text. Blank lines are skipped.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let mut records = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            records.push(IrRecord::decode(raw, idx + 1)?);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_number<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, DecodeError> {
    token.parse().map_err(|_| DecodeError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Split `(X,Y)` into `X` and `Y`.
fn split_pair(token: &str) -> Option<(&str, &str)> {
    token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .and_then(|t| t.split_once(','))
}

fn parse_operation(token: &str, line: usize) -> Result<Mnemonic, DecodeError> {
    let (class, code) = split_pair(token).ok_or_else(|| DecodeError::MalformedRecord {
        line,
        text: token.to_string(),
    })?;
    let class = OpClass::from_name(class).ok_or_else(|| DecodeError::UnknownClass {
        line,
        token: class.to_string(),
    })?;
    let code = parse_number::<u8>(code, line)?;
    Mnemonic::from_class_code(class, code).ok_or(DecodeError::UnknownOperation {
        line,
        class: class.name(),
        code,
    })
}

fn parse_operand(token: &str, line: usize) -> Result<Operand, DecodeError> {
    if token == "-" {
        return Ok(Operand::None);
    }
    match split_pair(token) {
        Some(("C", value)) => Ok(Operand::Constant(parse_number(value, line)?)),
        Some(("S", index)) => {
            let index: usize = parse_number(index, line)?;
            if index == 0 {
                return Err(DecodeError::InvalidNumber {
                    line,
                    token: token.to_string(),
                });
            }
            Ok(Operand::Symbol(index))
        }
        _ => Err(DecodeError::MalformedOperand {
            line,
            token: token.to_string(),
        }),
    }
}
