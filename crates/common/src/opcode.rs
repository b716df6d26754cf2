//! The static opcode table of the pseudo-machine.
//!
//! Every mnemonic belongs to one of three classes and carries a two-digit
//! numeric code that is unique within its class:
//!
//! ```text
//! AD  START 01   END 02
//! IS  LDA 01  STA 02  ADD 03  SUB 04  MOV 07
//! DL  DC 01   DS 02
//! ```

/// Instruction class of a mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// Assembler directive: controls assembly, emits no code.
    Ad,
    /// Imperative statement: an executable instruction.
    Is,
    /// Declarative statement: defines or reserves data words.
    Dl,
}

impl OpClass {
    /// The two-letter name used in the intermediate code.
    pub fn name(&self) -> &'static str {
        match self {
            OpClass::Ad => "AD",
            OpClass::Is => "IS",
            OpClass::Dl => "DL",
        }
    }

    /// Parse a class from its two-letter name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AD" => Some(OpClass::Ad),
            "IS" => Some(OpClass::Is),
            "DL" => Some(OpClass::Dl),
            _ => None,
        }
    }
}

/// A mnemonic from the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // Assembler directives
    /// Set the location counter to the operand.
    Start,
    /// End of source.
    End,

    // Imperative statements
    /// Load accumulator.
    Lda,
    /// Store accumulator.
    Sta,
    /// Add to accumulator.
    Add,
    /// Subtract from accumulator.
    Sub,
    /// Move.
    Mov,

    // Declarative statements
    /// Define a one-word constant.
    Dc,
    /// Reserve N words of storage.
    Ds,
}

/// All mnemonics, in table order.
pub const ALL_MNEMONICS: [Mnemonic; 9] = [
    Mnemonic::Start,
    Mnemonic::End,
    Mnemonic::Lda,
    Mnemonic::Sta,
    Mnemonic::Add,
    Mnemonic::Sub,
    Mnemonic::Mov,
    Mnemonic::Dc,
    Mnemonic::Ds,
];

/// Look up a source mnemonic. Matching is exact and case-sensitive.
pub fn lookup(mnemonic: &str) -> Option<Mnemonic> {
    ALL_MNEMONICS.iter().find(|m| m.name() == mnemonic).copied()
}

impl Mnemonic {
    /// Source spelling of this mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            Mnemonic::Start => "START",
            Mnemonic::End => "END",
            Mnemonic::Lda => "LDA",
            Mnemonic::Sta => "STA",
            Mnemonic::Add => "ADD",
            Mnemonic::Sub => "SUB",
            Mnemonic::Mov => "MOV",
            Mnemonic::Dc => "DC",
            Mnemonic::Ds => "DS",
        }
    }

    pub fn class(&self) -> OpClass {
        match self {
            Mnemonic::Start | Mnemonic::End => OpClass::Ad,
            Mnemonic::Lda | Mnemonic::Sta | Mnemonic::Add | Mnemonic::Sub | Mnemonic::Mov => {
                OpClass::Is
            }
            Mnemonic::Dc | Mnemonic::Ds => OpClass::Dl,
        }
    }

    /// Numeric opcode within the mnemonic's class.
    pub fn code(&self) -> u8 {
        match self {
            Mnemonic::Start => 1,
            Mnemonic::End => 2,
            Mnemonic::Lda => 1,
            Mnemonic::Sta => 2,
            Mnemonic::Add => 3,
            Mnemonic::Sub => 4,
            Mnemonic::Mov => 7,
            Mnemonic::Dc => 1,
            Mnemonic::Ds => 2,
        }
    }

    /// Reverse lookup from the `(CLASS,CODE)` pair of the intermediate code.
    pub fn from_class_code(class: OpClass, code: u8) -> Option<Self> {
        ALL_MNEMONICS
            .iter()
            .find(|m| m.class() == class && m.code() == code)
            .copied()
    }
}
