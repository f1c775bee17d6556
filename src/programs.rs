//! Built-in TinyASM programs, compiled once on first use.

use crate::assembler::assemble;
use crate::config::Config;
use crate::table::TransitionTable;
use crate::types::{Transition, TuringMachineError};

/// Embedded program sources with a sample input each.
const PROGRAM_SOURCES: [(&str, &str, &str); 3] = [
    (
        "Bit flipper",
        include_str!("../programs/bit-flip.tasm"),
        "0110",
    ),
    (
        "Unary addition",
        include_str!("../programs/unary-addition.tasm"),
        "111+11",
    ),
    (
        "Even ones",
        include_str!("../programs/even-ones.tasm"),
        "0110",
    ),
];

/// A built-in program together with its compiled table.
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub name: &'static str,
    pub source: &'static str,
    pub sample_input: &'static str,
    pub transitions: Vec<Transition>,
    pub table: TransitionTable,
}

lazy_static::lazy_static! {
    /// The built-in programs compiled with the default configuration. Sources that fail to
    /// compile are logged and left out.
    pub static ref PROGRAMS: Vec<ProgramInfo> = compile_all(&Config::default());
}

fn compile_all(config: &Config) -> Vec<ProgramInfo> {
    PROGRAM_SOURCES
        .iter()
        .filter_map(|&(name, source, sample_input)| match assemble(source, config) {
            Ok(transitions) => Some(ProgramInfo {
                name,
                source,
                sample_input,
                table: transitions.iter().cloned().collect(),
                transitions,
            }),
            Err(e) => {
                log::error!("Failed to compile built-in program '{name}': {e}");
                None
            }
        })
        .collect()
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<&'static ProgramInfo, TuringMachineError> {
        PROGRAMS.get(index).ok_or_else(|| {
            TuringMachineError::UnknownProgram(format!("index {index} out of range"))
        })
    }

    /// Get a program by its name, ignoring case
    pub fn get_program_by_name(name: &str) -> Result<&'static ProgramInfo, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| TuringMachineError::UnknownProgram(name.to_string()))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }
}
