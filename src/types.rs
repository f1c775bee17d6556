//! This module defines the core data structures and types used throughout the Turing Machine
//! emulator, including transitions, directions, execution results, trace events and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The blank symbol filling every unwritten tape cell.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The state every run starts in.
pub const DEFAULT_INITIAL_STATE: &str = "0";
/// The terminal state signalling acceptance.
pub const DEFAULT_ACCEPT_STATE: &str = "A";
/// The TinyASM `goto` target that compiles to the accept state.
pub const DEFAULT_ACCEPT_LABEL: &str = "ACCEPT";
/// The maximum number of steps to execute before halting.
pub const DEFAULT_MAX_STEPS: usize = 50;

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Normalizes a direction token (`L`/`R`, case-insensitive).
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "L" => Some(Direction::Left),
            "R" => Some(Direction::Right),
            _ => None,
        }
    }

    /// The single-letter form used in table text and traces.
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single transition rule: in `state` reading `read`, write `write`, move the head in
/// `direction` and continue in `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state the rule applies to.
    pub state: String,
    /// The symbol under the head.
    pub read: char,
    /// The state the machine continues in.
    pub next_state: String,
    /// The symbol written over `read`.
    pub write: char,
    /// Where the head moves after writing.
    pub direction: Direction,
}

impl Transition {
    pub fn new(
        state: impl Into<String>,
        read: char,
        next_state: impl Into<String>,
        write: char,
        direction: Direction,
    ) -> Self {
        Self {
            state: state.into(),
            read,
            next_state: next_state.into(),
            write,
            direction,
        }
    }

    /// The right-hand side of the rule as stored in a table.
    pub fn action(&self) -> Action {
        Action {
            next_state: self.next_state.clone(),
            write: self.write,
            direction: self.direction,
        }
    }
}

/// The `(next_state, write, direction)` half of a transition, keyed in a table by
/// `(state, read)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub next_state: String,
    pub write: char,
    pub direction: Direction,
}

/// Represents the outcome of a single engine step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine fired a transition and may continue.
    Continue(TraceEvent),
    /// The machine has halted; further steps return the same halt.
    Halt(Halt),
}

/// Why a run stopped. Only `Accepted` is a successful halt; all other variants are
/// rejections and are reported as values, never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    /// The machine entered the accept state.
    Accepted,
    /// No rule is defined for the current state and symbol.
    NoTransition { state: String, symbol: char },
    /// A left move was requested while the head was on the first cell.
    ///
    /// The rule's output symbol is already written to the first cell, so it shows up in
    /// the output. The move is not made, so the step is neither counted nor traced.
    LeftOverrun { state: String },
    /// The step budget ran out before the accept state was reached.
    StepLimit { steps: usize },
}

impl Halt {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Halt::Accepted)
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::Accepted => write!(f, "accepted"),
            Halt::NoTransition { state, symbol } => {
                write!(f, "no transition for state {state} and symbol '{symbol}'")
            }
            Halt::LeftOverrun { state } => {
                write!(f, "left move past the start of the tape in state {state}")
            }
            Halt::StepLimit { steps } => write!(f, "step limit of {steps} exceeded"),
        }
    }
}

/// One record of the per-step trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 1-based number of the step that produced this event.
    pub step: usize,
    /// The state after the step.
    pub state: String,
    /// The tape after the step, blank cells removed.
    pub tape: String,
    /// The head position after the step.
    pub head: usize,
    /// The direction the head moved.
    pub direction: Direction,
    /// Whether the step moved the machine into a different state.
    pub state_changed: bool,
}

/// The result of running a machine to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// The final tape with blank cells removed.
    pub output: String,
    pub halt: Halt,
    /// Number of transitions fired.
    pub steps: usize,
    pub trace: Vec<TraceEvent>,
}

impl Execution {
    pub fn accepted(&self) -> bool {
        self.halt.is_accepted()
    }
}

/// The reason a TinyASM line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("'on' outside of any state")]
    UnboundOnLine,
    #[error("missing ':' in state definition")]
    MissingStateColon,
    #[error("empty state name")]
    EmptyStateName,
    #[error("invalid state name '{0}'")]
    InvalidStateName(String),
    #[error("expected 'on', got: {0}")]
    ExpectedOn(String),
    #[error("missing ':' in 'on' line")]
    MissingOnColon,
    #[error("expected 'on <symbol>'")]
    ExpectedOnSymbol,
    #[error("input symbol must be a single character")]
    InputSymbolLength,
    #[error("expected 'write..., move..., goto...', got: {0}")]
    CommandCount(String),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("output symbol must be a single character")]
    OutputSymbolLength,
    #[error("move direction must be 'L' or 'R'")]
    InvalidDirection,
    #[error("empty goto state")]
    EmptyGoto,
    #[error("missing write/move/goto in 'on' line")]
    MissingCommand,
    #[error("{0}")]
    Grammar(String),
}

/// A fatal TinyASM compilation error, tied to the 1-based source line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at line {line}: {kind}")]
pub struct AssemblyError {
    pub line: usize,
    pub kind: SyntaxError,
}

impl AssemblyError {
    pub fn new(line: usize, kind: SyntaxError) -> Self {
        Self { line, kind }
    }
}

/// Represents the errors surfaced by the crate's fallible entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// A TinyASM program failed to compile.
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),
    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Indicates an error related to file system operations, such as reading program files.
    #[error("File error: {0}")]
    FileError(String),
    /// No built-in program matches the requested name or index.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
    /// A JSON document could not be read or written.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TuringMachineError {
    fn from(error: serde_json::Error) -> Self {
        TuringMachineError::Serialization(error.to_string())
    }
}
