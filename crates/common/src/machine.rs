//! Machine code emitted by Pass-II.
//!
//! Two line shapes, zero-padded:
//! ```text
//! LOC VALUE          DC word          103 005
//! LOC OPCODE VALUE   IS instruction   100 01 103
//! ```

use std::fmt;

/// One emitted machine-code line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineWord {
    /// A constant data word from DC.
    Data { address: u32, value: i64 },
    /// An executable instruction with its resolved operand.
    Instruction {
        address: u32,
        opcode: u8,
        operand: i64,
    },
}

impl MachineWord {
    pub fn address(&self) -> u32 {
        match self {
            MachineWord::Data { address, .. } | MachineWord::Instruction { address, .. } => {
                *address
            }
        }
    }
}

impl fmt::Display for MachineWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineWord::Data { address, value } => write!(f, "{address:03} {value:03}"),
            MachineWord::Instruction {
                address,
                opcode,
                operand,
            } => write!(f, "{address:03} {opcode:02} {operand:03}"),
        }
    }
}

/// The machine code of one assembly, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineCode {
    pub words: Vec<MachineWord>,
}

impl MachineCode {
    pub fn new(words: Vec<MachineWord>) -> Self {
        Self { words }
    }

    /// Encode one word per line, each newline-terminated.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for word in &self.words {
            out.push_str(&word.to_string());
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_word_has_two_fields() {
        let w = MachineWord::Data {
            address: 103,
            value: 5,
        };
        assert_eq!(w.to_string(), "103 005");
    }

    #[test]
    fn instruction_word_has_three_fields() {
        let w = MachineWord::Instruction {
            address: 100,
            opcode: 1,
            operand: 103,
        };
        assert_eq!(w.to_string(), "100 01 103");
    }

    #[test]
    fn small_values_are_padded() {
        let w = MachineWord::Instruction {
            address: 0,
            opcode: 7,
            operand: 0,
        };
        assert_eq!(w.to_string(), "000 07 000");
    }

    #[test]
    fn wide_values_are_not_truncated() {
        let w = MachineWord::Data {
            address: 1234,
            value: 56789,
        };
        assert_eq!(w.to_string(), "1234 56789");
    }

    #[test]
    fn negative_constant() {
        let w = MachineWord::Data {
            address: 10,
            value: -5,
        };
        assert_eq!(w.to_string(), "010 -05");
    }

    #[test]
    fn encode_program() {
        let code = MachineCode::new(vec![
            MachineWord::Instruction {
                address: 100,
                opcode: 2,
                operand: 104,
            },
            MachineWord::Data {
                address: 105,
                value: 10,
            },
        ]);
        assert_eq!(code.encode(), "100 02 104\n105 010\n");
        assert_eq!(code.len(), 2);
        assert_eq!(code.words[1].address(), 105);
    }

    #[test]
    fn empty_program() {
        let code = MachineCode::default();
        assert!(code.is_empty());
        assert_eq!(code.encode(), "");
    }
}
