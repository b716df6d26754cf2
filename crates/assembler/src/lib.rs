//! twopass assembler — Pass-I / Pass-II translation of pseudo-machine source.
//!
//! Pass-I scans the source once, assigning addresses and collecting symbols
//! into a table; Pass-II then resolves the intermediate code against that
//! finished table, so forward references need no special handling.
//!
//! # Usage
//!
//! ```
//! use twopass_assembler::assemble;
//!
//! let source = "START 100\nLDA X\nX DC 7\nEND\n";
//! let assembly = assemble(source).unwrap();
//! assert_eq!(assembly.code.encode(), "100 01 101\n101 007\n");
//! assert!(assembly.summary().is_clean());
//! ```
//!
//! # Failure model
//!
//! Duplicate labels, unknown or missing opcodes and unresolved symbols are
//! collected as [`Diagnostic`]s and the run continues. A numeric field that
//! does not convert is an [`AsmError`] and ends the run.
//!
//! The passes are plain functions over values. Nothing is kept between
//! calls, so separate assemblies never share state.

pub mod diagnostic;
pub mod error;
pub mod pass1;
pub mod pass2;

mod lexer;

pub use diagnostic::{Diagnostic, Summary};
pub use error::AsmError;
pub use pass1::{run_pass1, Pass1Output};
pub use pass2::{run_pass2, Pass2Output};

use twopass_common::{IntermediateCode, MachineCode, SymbolTable};

/// The products of a complete two-pass assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub ir: IntermediateCode,
    pub symbols: SymbolTable,
    pub code: MachineCode,
    /// Pass-I diagnostics followed by Pass-II diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn summary(&self) -> Summary {
        Summary::from_diagnostics(&self.diagnostics)
    }
}

/// Assemble source text: Pass-I, then Pass-II on Pass-I's finished output.
pub fn assemble(source: &str) -> Result<Assembly, AsmError> {
    let Pass1Output {
        ir,
        symbols,
        mut diagnostics,
    } = run_pass1(source)?;
    let pass2 = run_pass2(&ir, &symbols)?;
    diagnostics.extend(pass2.diagnostics);

    Ok(Assembly {
        ir,
        symbols,
        code: pass2.code,
        diagnostics,
    })
}
