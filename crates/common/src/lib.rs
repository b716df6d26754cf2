//! Shared types for the twopass assembler.
//!
//! - [`Mnemonic`] / [`OpClass`] — the static opcode table
//! - [`SymbolTable`] — first-appearance ordered symbols with 1-based indices
//! - [`IntermediateCode`] — Pass-I output, with its line-oriented text form
//! - [`MachineCode`] — Pass-II output
//! - [`DecodeError`] — errors from decoding the text forms
//!
//! Nothing here holds process-wide state; every table is an ordinary value.

pub mod error;
pub mod ir;
pub mod machine;
pub mod opcode;
pub mod symbol;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use ir::{IntermediateCode, IrRecord, Operand};
pub use machine::{MachineCode, MachineWord};
pub use opcode::{Mnemonic, OpClass};
pub use symbol::{Definition, Symbol, SymbolTable};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_mnemonic() -> impl Strategy<Value = Mnemonic> {
        prop::sample::select(&opcode::ALL_MNEMONICS[..])
    }

    fn arb_operand() -> impl Strategy<Value = Operand> {
        prop_oneof![
            any::<i64>().prop_map(Operand::Constant),
            (1usize..10_000).prop_map(Operand::Symbol),
            Just(Operand::None),
        ]
    }

    fn arb_record() -> impl Strategy<Value = IrRecord> {
        (prop::option::of(any::<u32>()), arb_mnemonic(), arb_operand())
            .prop_map(|(loc, m, operand)| IrRecord::new(loc, m, operand))
    }

    fn arb_symbol_table() -> impl Strategy<Value = SymbolTable> {
        prop::collection::vec(
            ("[A-Z][A-Z0-9]{0,7}", prop::option::of(any::<u32>())),
            0..30,
        )
        .prop_map(|entries| {
            let mut table = SymbolTable::new();
            for (name, address) in entries {
                match address {
                    Some(addr) => {
                        table.define(&name, addr);
                    }
                    None => {
                        table.reference(&name);
                    }
                }
            }
            table
        })
    }

    proptest! {
        /// Intermediate code text decodes back to the same records.
        #[test]
        fn intermediate_code_text_is_lossless(
            records in prop::collection::vec(arb_record(), 0..50)
        ) {
            let code = IntermediateCode::new(records);
            let decoded = IntermediateCode::decode(&code.encode()).unwrap();
            prop_assert_eq!(code, decoded);
        }

        /// Symbol table text keeps names, order, addresses and defined flags.
        #[test]
        fn symbol_table_text_is_lossless(table in arb_symbol_table()) {
            let decoded = SymbolTable::decode(&table.encode()).unwrap();
            prop_assert_eq!(table, decoded);
        }

        /// Arbitrary text never panics the decoders.
        #[test]
        fn decoders_never_panic(text in "\\PC{0,200}") {
            let _ = IntermediateCode::decode(&text);
            let _ = SymbolTable::decode(&text);
        }
    }
}
