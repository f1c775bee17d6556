//! This crate provides the core logic for a single-tape Turing Machine emulator.
//! It includes a loader for raw transition tables, an assembler for the TinyASM language,
//! the execution engine, static analysis of tables and a set of built-in programs.
//!
//! ```
//! use tinytm::{assemble, encode, run, Config, ProgramLoader};
//!
//! let config = Config::default();
//! let source = "state 0:\n  on 1: write 0, move R, goto 0\n  on _: write _, move R, goto ACCEPT\n";
//!
//! let transitions = assemble(source, &config).unwrap();
//! let loaded = ProgramLoader::load_program(&encode(&transitions), &config);
//! let execution = run(&loaded.table, "11", &config);
//!
//! assert!(execution.accepted());
//! assert_eq!(execution.output, "00");
//! ```

pub mod analyzer;
pub mod assembler;
pub mod config;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod table;
pub mod trace;
pub mod types;

/// Re-exports the `Rule` enum from the assembler module, used by the `pest` grammar.
pub use crate::assembler::Rule;
/// Re-exports the `analyze` function and `Diagnostic` enum from the analyzer module.
pub use analyzer::{analyze, Diagnostic};
/// Re-exports the `assemble` function from the assembler module.
pub use assembler::assemble;
/// Re-exports the `Config` struct from the config module.
pub use config::Config;
/// Re-exports the encoding functions from the encoder module.
pub use encoder::{encode, encode_table};
/// Re-exports the loader and its report types.
pub use loader::{LoadWarning, LoadedProgram, ProgramLoader, WarningKind};
/// Re-exports the engine entry points from the machine module.
pub use machine::{run, TuringMachine};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the core types from the types module.
pub use types::{
    Action, AssemblyError, Direction, Execution, Halt, Step, SyntaxError, TraceEvent,
    Transition, TuringMachineError,
};
