//! CLI command implementations.

use std::fs;
use std::path::Path;

use twopass_assembler::{run_pass1, run_pass2, Diagnostic, Summary};
use twopass_common::{IntermediateCode, SymbolTable};

use crate::{HandoffArgs, OutputArg, SourceArg};

/// Exit code for input, decode and fatal assembly errors.
const FAILED: u8 = 1;
/// Exit code when output was written but diagnostics were reported.
const ADVISORY: u8 = 2;

/// Run both passes over a source file.
pub fn assemble(source: &SourceArg, handoff: &HandoffArgs, output: &OutputArg) -> Result<(), u8> {
    let text = read(&source.source)?;

    let assembly = twopass_assembler::assemble(&text).map_err(|e| {
        tracing::error!("{e}");
        FAILED
    })?;

    write(&handoff.intermediate, &assembly.ir.encode())?;
    write(&handoff.symtab, &assembly.symbols.encode())?;
    write(&output.output, &assembly.code.encode())?;

    tracing::info!("intermediate: {}", handoff.intermediate.display());
    tracing::info!("symbol table: {}", handoff.symtab.display());
    tracing::info!("machine code: {}", output.output.display());

    report(
        &assembly.diagnostics,
        &format!(
            "assembled {} records, {} symbols, {} machine words",
            assembly.ir.len(),
            assembly.symbols.len(),
            assembly.code.len()
        ),
    )
}

/// Run Pass-I and write the hand-off files.
pub fn pass1(source: &SourceArg, handoff: &HandoffArgs) -> Result<(), u8> {
    let text = read(&source.source)?;

    let out = run_pass1(&text).map_err(|e| {
        tracing::error!("{e}");
        FAILED
    })?;

    write(&handoff.intermediate, &out.ir.encode())?;
    write(&handoff.symtab, &out.symbols.encode())?;

    for (index, symbol) in out.symbols.undefined() {
        tracing::info!("symbol '{}' (index {index}) is undefined after pass 1", symbol.name);
    }

    report(
        &out.diagnostics,
        &format!(
            "pass 1: {} records, {} symbols -> {}, {}",
            out.ir.len(),
            out.symbols.len(),
            handoff.intermediate.display(),
            handoff.symtab.display()
        ),
    )
}

/// Decode the hand-off files and run Pass-II.
pub fn pass2(handoff: &HandoffArgs, output: &OutputArg) -> Result<(), u8> {
    let ir_text = read(&handoff.intermediate)?;
    let symtab_text = read(&handoff.symtab)?;

    let ir = IntermediateCode::decode(&ir_text).map_err(|e| {
        tracing::error!("{}: {e}", handoff.intermediate.display());
        FAILED
    })?;
    let symbols = SymbolTable::decode(&symtab_text).map_err(|e| {
        tracing::error!("{}: {e}", handoff.symtab.display());
        FAILED
    })?;

    let out = run_pass2(&ir, &symbols).map_err(|e| {
        tracing::error!("{e}");
        FAILED
    })?;

    write(&output.output, &out.code.encode())?;

    report(
        &out.diagnostics,
        &format!(
            "pass 2: {} machine words -> {}",
            out.code.len(),
            output.output.display()
        ),
    )
}

fn read(path: &Path) -> Result<String, u8> {
    fs::read_to_string(path).map_err(|e| {
        tracing::error!("cannot read '{}': {e}", path.display());
        FAILED
    })
}

fn write(path: &Path, contents: &str) -> Result<(), u8> {
    fs::write(path, contents).map_err(|e| {
        tracing::error!("cannot write '{}': {e}", path.display());
        FAILED
    })
}

/// Log every diagnostic and the run summary; map them to an exit status.
fn report(diagnostics: &[Diagnostic], done: &str) -> Result<(), u8> {
    for diagnostic in diagnostics {
        tracing::warn!("{diagnostic}");
    }

    let summary = Summary::from_diagnostics(diagnostics);
    if summary.is_clean() {
        tracing::info!("{done}");
        Ok(())
    } else {
        tracing::warn!("{done}; {summary}");
        Err(ADVISORY)
    }
}
