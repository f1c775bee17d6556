//! Renders an [`Execution`] as the human-readable step trace.
//!
//! ```text
//! Input: 01
//! q0 11 R
//! q0 10 R
//!
//! qA 10 R
//!
//! q_Accept: 10
//! ```

use crate::types::{Execution, Halt};
use std::fmt::Write;

/// Renders the input line, one line per step (preceded by an empty line whenever the state
/// changed) and the final verdict.
pub fn render(input: &str, execution: &Execution) -> String {
    let mut out = String::new();
    // Writing to a `String` cannot fail.
    let _ = writeln!(out, "Input: {input}");

    for event in &execution.trace {
        if event.state_changed {
            out.push('\n');
        }
        let _ = writeln!(out, "q{} {} {}", event.state, event.tape, event.direction);
    }

    out.push('\n');
    let _ = match &execution.halt {
        Halt::Accepted => writeln!(out, "q_Accept: {}", execution.output),
        halt => writeln!(out, "q_Reject: {} ({halt})", execution.output),
    };

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::machine::run;
    use crate::table::TransitionTable;
    use crate::types::{Direction, Transition};

    #[test]
    fn test_render_accepted_run() {
        let table: TransitionTable = vec![
            Transition::new("0", '0', "0", '1', Direction::Right),
            Transition::new("0", '1', "0", '0', Direction::Right),
            Transition::new("0", '_', "A", '_', Direction::Right),
        ]
        .into_iter()
        .collect();

        let execution = run(&table, "01", &Config::default());

        assert_eq!(
            render("01", &execution),
            "Input: 01\nq0 11 R\nq0 10 R\n\nqA 10 R\n\nq_Accept: 10\n"
        );
    }

    #[test]
    fn test_render_rejected_run() {
        let execution = run(&TransitionTable::new(), "0", &Config::default());

        assert_eq!(
            render("0", &execution),
            "Input: 0\n\nq_Reject: 0 (no transition for state 0 and symbol '0')\n"
        );
    }
}
