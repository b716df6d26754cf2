//! Pass-II: resolve intermediate records into machine code.
//!
//! Symbols are read only through their 1-based index; names are never
//! parsed again. AD records and DS emit nothing.

use twopass_common::{
    IntermediateCode, IrRecord, MachineCode, MachineWord, Mnemonic, OpClass, Operand, SymbolTable,
};

use crate::diagnostic::Diagnostic;
use crate::error::AsmError;

/// Machine code plus the conditions found while resolving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pass2Output {
    pub code: MachineCode,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run Pass-II over finished Pass-I output.
///
/// A reference to a symbol with no address yields operand 0 and an
/// [`Diagnostic::UnresolvedSymbol`]. Records whose shape Pass-I never
/// produces are rejected with [`AsmError::MalformedRecord`].
pub fn run_pass2(ir: &IntermediateCode, symbols: &SymbolTable) -> Result<Pass2Output, AsmError> {
    let mut words = Vec::new();
    let mut diagnostics = Vec::new();

    for (idx, record) in ir.records.iter().enumerate() {
        let number = idx + 1;
        match record.mnemonic.class() {
            OpClass::Ad => {}
            OpClass::Dl => {
                if record.mnemonic == Mnemonic::Dc {
                    let address = location(record, number)?;
                    let Operand::Constant(value) = record.operand else {
                        return Err(AsmError::MalformedRecord {
                            record: number,
                            reason: "DC requires a constant operand",
                        });
                    };
                    words.push(MachineWord::Data { address, value });
                }
            }
            OpClass::Is => {
                let address = location(record, number)?;
                let operand = match record.operand {
                    Operand::Constant(value) => value,
                    Operand::None => 0,
                    Operand::Symbol(index) => match symbols.address_of(index) {
                        Some(resolved) => i64::from(resolved),
                        None => {
                            let diagnostic = Diagnostic::UnresolvedSymbol {
                                index,
                                name: symbols.by_index(index).map(|s| s.name.clone()),
                                location: address,
                            };
                            tracing::debug!(%diagnostic);
                            diagnostics.push(diagnostic);
                            0
                        }
                    },
                };
                words.push(MachineWord::Instruction {
                    address,
                    opcode: record.mnemonic.code(),
                    operand,
                });
            }
        }
    }

    tracing::debug!(
        words = words.len(),
        diagnostics = diagnostics.len(),
        "pass 2 complete"
    );

    Ok(Pass2Output {
        code: MachineCode::new(words),
        diagnostics,
    })
}

fn location(record: &IrRecord, number: usize) -> Result<u32, AsmError> {
    record.location.ok_or(AsmError::MalformedRecord {
        record: number,
        reason: "code record has no location",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ir(records: Vec<IrRecord>) -> IntermediateCode {
        IntermediateCode::new(records)
    }

    #[test]
    fn directives_and_ds_emit_nothing() {
        let code = ir(vec![
            IrRecord::new(Some(100), Mnemonic::Start, Operand::Constant(100)),
            IrRecord::new(Some(100), Mnemonic::Ds, Operand::Constant(3)),
            IrRecord::new(None, Mnemonic::End, Operand::None),
        ]);
        let out = run_pass2(&code, &SymbolTable::new()).unwrap();
        assert!(out.code.is_empty());
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn dc_emits_data_word() {
        let code = ir(vec![IrRecord::new(
            Some(103),
            Mnemonic::Dc,
            Operand::Constant(5),
        )]);
        let out = run_pass2(&code, &SymbolTable::new()).unwrap();
        assert_eq!(
            out.code.words,
            vec![MachineWord::Data {
                address: 103,
                value: 5
            }]
        );
    }

    #[test]
    fn symbol_resolved_by_index() {
        let mut symbols = SymbolTable::new();
        symbols.define("A", 50);
        symbols.define("B", 60);
        let code = ir(vec![IrRecord::new(Some(0), Mnemonic::Sub, Operand::Symbol(2))]);
        let out = run_pass2(&code, &symbols).unwrap();
        assert_eq!(
            out.code.words,
            vec![MachineWord::Instruction {
                address: 0,
                opcode: 4,
                operand: 60
            }]
        );
    }

    #[test]
    fn missing_operand_becomes_zero() {
        let code = ir(vec![IrRecord::new(Some(9), Mnemonic::Mov, Operand::None)]);
        let out = run_pass2(&code, &SymbolTable::new()).unwrap();
        assert_eq!(out.code.encode(), "009 07 000\n");
    }

    #[test]
    fn undefined_symbol_substitutes_zero() {
        let mut symbols = SymbolTable::new();
        symbols.reference("GHOST");
        let code = ir(vec![IrRecord::new(Some(4), Mnemonic::Lda, Operand::Symbol(1))]);
        let out = run_pass2(&code, &symbols).unwrap();
        assert_eq!(out.code.encode(), "004 01 000\n");
        assert_eq!(
            out.diagnostics,
            vec![Diagnostic::UnresolvedSymbol {
                index: 1,
                name: Some("GHOST".to_string()),
                location: 4
            }]
        );
    }

    #[test]
    fn index_outside_table_is_unresolved() {
        let code = ir(vec![IrRecord::new(Some(0), Mnemonic::Add, Operand::Symbol(3))]);
        let out = run_pass2(&code, &SymbolTable::new()).unwrap();
        assert_eq!(out.code.encode(), "000 03 000\n");
        assert!(matches!(
            out.diagnostics[0],
            Diagnostic::UnresolvedSymbol {
                index: 3,
                name: None,
                ..
            }
        ));
    }

    #[test]
    fn dc_with_symbol_operand_is_rejected() {
        let code = ir(vec![
            IrRecord::new(None, Mnemonic::End, Operand::None),
            IrRecord::new(Some(1), Mnemonic::Dc, Operand::Symbol(1)),
        ]);
        let err = run_pass2(&code, &SymbolTable::new()).unwrap_err();
        assert_eq!(
            err,
            AsmError::MalformedRecord {
                record: 2,
                reason: "DC requires a constant operand"
            }
        );
    }

    #[test]
    fn instruction_without_location_is_rejected() {
        let code = ir(vec![IrRecord::new(None, Mnemonic::Lda, Operand::Constant(1))]);
        let err = run_pass2(&code, &SymbolTable::new()).unwrap_err();
        assert!(matches!(err, AsmError::MalformedRecord { record: 1, .. }));
    }
}
