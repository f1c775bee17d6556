//! This module provides the `ProgramLoader` struct, responsible for reading raw transition
//! table text (`qc inp qn out dir` per line) into a `TransitionTable`.
//!
//! Loading never fails: malformed lines are skipped and reported as warnings.

use crate::config::Config;
use crate::table::TransitionTable;
use crate::types::{Direction, Transition};
use std::collections::HashMap;
use std::fmt;

/// Number of whitespace-separated tokens on a table line.
const LINE_TOKENS: usize = 5;

/// `ProgramLoader` is a utility struct for loading raw transition tables.
pub struct ProgramLoader;

/// A table together with the warnings produced while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProgram {
    pub table: TransitionTable,
    pub warnings: Vec<LoadWarning>,
}

/// A non-fatal problem on a single line of table text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// 1-based line number.
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// The line does not have exactly five tokens. The line was skipped.
    TokenCount(usize),
    /// The input or output token is not a single character. The line was skipped.
    SymbolLength(String),
    /// The direction token is not `L` or `R`. The line was skipped.
    UnknownDirection(String),
    /// The line redefines a key first defined on the given line. The new rule wins.
    Duplicate { state: String, symbol: char, previous: usize },
    /// The rule starts from the accept state, where a run has already stopped. The rule is
    /// kept but never fires.
    FromAcceptState(String),
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            WarningKind::TokenCount(count) => write!(
                f,
                "expected {LINE_TOKENS} tokens 'qc inp qn out dir', found {count}; line skipped"
            ),
            WarningKind::SymbolLength(token) => write!(
                f,
                "symbol '{token}' must be a single character; line skipped"
            ),
            WarningKind::UnknownDirection(token) => {
                write!(f, "direction '{token}' must be L or R; line skipped")
            }
            WarningKind::Duplicate {
                state,
                symbol,
                previous,
            } => write!(
                f,
                "rule for state {state} and symbol '{symbol}' overrides line {previous}"
            ),
            WarningKind::FromAcceptState(state) => {
                write!(f, "rule starts from accept state {state} and never fires")
            }
        }
    }
}

impl ProgramLoader {
    /// Loads a transition table from raw table text.
    ///
    /// Lines starting with `#` (after leading whitespace) and blank lines are ignored.
    /// Every other line must be `qc inp qn out dir`; lines that are not are skipped with a
    /// warning. When a `(qc, inp)` key appears twice the later line wins. Rules leaving the
    /// configured accept state are loaded but flagged, since they can never fire.
    ///
    /// # Arguments
    ///
    /// * `content` - The table text.
    /// * `config` - Supplies the accept state.
    pub fn load_program(content: &str, config: &Config) -> LoadedProgram {
        let mut table = TransitionTable::new();
        let mut warnings = Vec::new();
        let mut defined_at: HashMap<(String, char), usize> = HashMap::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let transition = match parse_line(trimmed) {
                Ok(transition) => transition,
                Err(kind) => {
                    warnings.push(LoadWarning { line, kind });
                    continue;
                }
            };

            let key = (transition.state.clone(), transition.read);
            if let Some(previous) = defined_at.insert(key, line) {
                warnings.push(LoadWarning {
                    line,
                    kind: WarningKind::Duplicate {
                        state: transition.state.clone(),
                        symbol: transition.read,
                        previous,
                    },
                });
            }

            if transition.state == config.accept_state {
                warnings.push(LoadWarning {
                    line,
                    kind: WarningKind::FromAcceptState(transition.state.clone()),
                });
            }

            table.insert(transition);
        }

        for warning in &warnings {
            log::warn!("{warning}");
        }

        log::debug!("loaded {} rules, {} warnings", table.len(), warnings.len());

        LoadedProgram { table, warnings }
    }
}

/// Parses one non-comment line into a transition.
fn parse_line(line: &str) -> Result<Transition, WarningKind> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [state, read, next_state, write, direction] = tokens[..] else {
        return Err(WarningKind::TokenCount(tokens.len()));
    };

    let read = parse_symbol(read)?;
    let write = parse_symbol(write)?;
    let direction = Direction::parse(direction)
        .ok_or_else(|| WarningKind::UnknownDirection(direction.to_string()))?;

    Ok(Transition::new(state, read, next_state, write, direction))
}

fn parse_symbol(token: &str) -> Result<char, WarningKind> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(WarningKind::SymbolLength(token.to_string())),
    }
}
