//! twopass CLI — run the two-pass assembler over files.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, input, decode or fatal assembly error
//! - 2: Finished with diagnostics (output is advisory only)

mod commands;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "twopass", version, about = "Two-pass assembler for a pseudo-machine")]
struct Cli {
    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[arg(short, long, global = true, default_value_t = Level::INFO)]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run both passes and write intermediate code, symbol table and machine code
    Assemble {
        #[command(flatten)]
        source: SourceArg,
        #[command(flatten)]
        handoff: HandoffArgs,
        #[command(flatten)]
        output: OutputArg,
    },
    /// Run Pass-I only and write intermediate code and symbol table
    Pass1 {
        #[command(flatten)]
        source: SourceArg,
        #[command(flatten)]
        handoff: HandoffArgs,
    },
    /// Run Pass-II on previously written intermediate code and symbol table
    Pass2 {
        #[command(flatten)]
        handoff: HandoffArgs,
        #[command(flatten)]
        output: OutputArg,
    },
}

#[derive(Debug, Args)]
pub struct SourceArg {
    /// Assembly source file
    #[arg(default_value = "source.asm")]
    pub source: PathBuf,
}

/// Files passed from Pass-I to Pass-II.
#[derive(Debug, Args)]
pub struct HandoffArgs {
    /// Intermediate code file
    #[arg(short, long, default_value = "intermediate.ic")]
    pub intermediate: PathBuf,

    /// Symbol table file
    #[arg(short, long, default_value = "symtab.txt")]
    pub symtab: PathBuf,
}

#[derive(Debug, Args)]
pub struct OutputArg {
    /// Machine code file
    #[arg(short, long, default_value = "machinecode.mc")]
    pub output: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    let result = match &cli.command {
        Command::Assemble {
            source,
            handoff,
            output,
        } => commands::assemble(source, handoff, output),
        Command::Pass1 { source, handoff } => commands::pass1(source, handoff),
        Command::Pass2 { handoff, output } => commands::pass2(handoff, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}
