//! Pass-I: assign addresses, build the symbol table, emit intermediate code.
//!
//! Labels are bound before the opcode is checked, so a label on a line with
//! an unknown opcode still gets the current location counter. Unknown and
//! missing opcodes drop the line without moving the counter. A numeric field
//! that fails to convert stops the pass.

use twopass_common::{Definition, IntermediateCode, IrRecord, Mnemonic, Operand, SymbolTable};

use crate::diagnostic::Diagnostic;
use crate::error::AsmError;
use crate::lexer::{parse_statement, tokenize_line, Statement};

/// Everything Pass-I hands to Pass-II.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pass1Output {
    pub ir: IntermediateCode,
    /// Final table. Symbols never defined stay marked undefined.
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run Pass-I over the whole source text.
pub fn run_pass1(source: &str) -> Result<Pass1Output, AsmError> {
    let mut pass = Pass1::default();

    for (idx, raw) in source.lines().enumerate() {
        let tokens = tokenize_line(raw);
        if let Some(stmt) = parse_statement(&tokens) {
            pass.statement(idx + 1, stmt)?;
        }
    }

    tracing::debug!(
        records = pass.records.len(),
        symbols = pass.symbols.len(),
        diagnostics = pass.diagnostics.len(),
        "pass 1 complete"
    );

    Ok(Pass1Output {
        ir: IntermediateCode::new(pass.records),
        symbols: pass.symbols,
        diagnostics: pass.diagnostics,
    })
}

#[derive(Debug, Default)]
struct Pass1 {
    location: u32,
    records: Vec<IrRecord>,
    symbols: SymbolTable,
    diagnostics: Vec<Diagnostic>,
}

impl Pass1 {
    fn statement(&mut self, line: usize, stmt: Statement<'_>) -> Result<(), AsmError> {
        if let Some(label) = stmt.label {
            self.bind_label(line, label);
        }

        let Some(token) = stmt.mnemonic else {
            self.diagnostics.push(Diagnostic::MissingOpcode { line });
            return Ok(());
        };
        let Some(mnemonic) = twopass_common::opcode::lookup(token) else {
            self.diagnostics.push(Diagnostic::UnknownOpcode {
                line,
                token: token.to_string(),
            });
            return Ok(());
        };

        tracing::trace!(line, lc = self.location, mnemonic = mnemonic.name(), "statement");

        match mnemonic {
            Mnemonic::Start => {
                let start = match stmt.operand {
                    Some(token) => parse_count(token, line, mnemonic)?,
                    None => 0,
                };
                self.location = start;
                self.emit(mnemonic, Operand::Constant(i64::from(start)));
            }

            Mnemonic::End => {
                self.records.push(IrRecord::new(None, mnemonic, Operand::None));
            }

            Mnemonic::Lda | Mnemonic::Sta | Mnemonic::Add | Mnemonic::Sub | Mnemonic::Mov => {
                let operand = match stmt.operand {
                    None => Operand::None,
                    Some(token) if is_literal(token) => {
                        Operand::Constant(parse_value(token, line, mnemonic)?)
                    }
                    Some(name) => Operand::Symbol(self.symbols.reference(name)),
                };
                self.emit(mnemonic, operand);
                self.advance(1, line)?;
            }

            Mnemonic::Dc => {
                let token = require_operand(stmt.operand, line, mnemonic)?;
                let value = parse_value(token, line, mnemonic)?;
                self.emit(mnemonic, Operand::Constant(value));
                self.advance(1, line)?;
            }

            Mnemonic::Ds => {
                let token = require_operand(stmt.operand, line, mnemonic)?;
                let words = parse_count(token, line, mnemonic)?;
                self.emit(mnemonic, Operand::Constant(i64::from(words)));
                self.advance(words, line)?;
            }
        }

        Ok(())
    }

    fn bind_label(&mut self, line: usize, label: &str) {
        match self.symbols.define(label, self.location) {
            Definition::Inserted(_) | Definition::Resolved(_) => {}
            Definition::Duplicate { existing, .. } => {
                self.diagnostics.push(Diagnostic::DuplicateSymbol {
                    line,
                    name: label.to_string(),
                    location: self.location,
                    existing,
                });
            }
        }
    }

    /// Record the statement at the current location counter.
    fn emit(&mut self, mnemonic: Mnemonic, operand: Operand) {
        self.records
            .push(IrRecord::new(Some(self.location), mnemonic, operand));
    }

    fn advance(&mut self, words: u32, line: usize) -> Result<(), AsmError> {
        self.location = self
            .location
            .checked_add(words)
            .ok_or(AsmError::AddressOverflow { line })?;
        Ok(())
    }
}

/// An imperative operand made only of ASCII digits is a literal.
fn is_literal(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn require_operand<'a>(
    operand: Option<&'a str>,
    line: usize,
    mnemonic: Mnemonic,
) -> Result<&'a str, AsmError> {
    operand.ok_or(AsmError::MissingOperand {
        line,
        mnemonic: mnemonic.name(),
    })
}

/// A non-negative address or word count.
fn parse_count(token: &str, line: usize, mnemonic: Mnemonic) -> Result<u32, AsmError> {
    token.parse().map_err(|_| malformed(token, line, mnemonic))
}

/// A signed constant.
fn parse_value(token: &str, line: usize, mnemonic: Mnemonic) -> Result<i64, AsmError> {
    token.parse().map_err(|_| malformed(token, line, mnemonic))
}

fn malformed(token: &str, line: usize, mnemonic: Mnemonic) -> AsmError {
    AsmError::MalformedOperand {
        line,
        mnemonic: mnemonic.name(),
        token: token.to_string(),
    }
}
