//! This module serializes transitions into the raw table text format read by the loader:
//! one `qc inp qn out dir` line per rule.

use crate::table::TransitionTable;
use crate::types::Transition;

/// Encodes transitions in the order given, one newline-terminated line each.
///
/// Feeding the result to [`crate::loader::ProgramLoader::load_program`] rebuilds a table
/// with the same lookups as collecting the transitions directly.
pub fn encode(transitions: &[Transition]) -> String {
    transitions.iter().map(encode_line).collect()
}

/// Encodes a whole table, sorted by state then symbol for a stable listing.
pub fn encode_table(table: &TransitionTable) -> String {
    encode(&table.transitions())
}

fn encode_line(transition: &Transition) -> String {
    format!(
        "{} {} {} {} {}\n",
        transition.state,
        transition.read,
        transition.next_state,
        transition.write,
        transition.direction
    )
}
