//! This module defines the `TuringMachine` struct, which simulates a single-tape Turing
//! Machine over a borrowed `TransitionTable`. It handles the state register, the tape, head
//! movement and halt detection.
//!
//! A machine is also an iterator over its trace: each call to `next` fires one transition
//! and yields the resulting [`TraceEvent`], and the sequence ends when the machine halts.

use crate::config::Config;
use crate::table::TransitionTable;
use crate::types::{Direction, Execution, Halt, Step, TraceEvent};

/// Upper bound on the blank cells allocated ahead of the input.
const MAX_PRESIZED_BLANKS: usize = 1 << 12;

/// Runs `table` against `input` until it halts and collects the full trace.
///
/// The run is a pure function of its arguments: nothing is kept between calls.
pub fn run(table: &TransitionTable, input: &str, config: &Config) -> Execution {
    let mut machine = TuringMachine::new(table, input, config);
    let trace: Vec<TraceEvent> = machine.by_ref().collect();
    let halt = machine.halt();

    log::debug!("halted after {} steps: {}", machine.step_count(), halt);

    Execution {
        output: machine.output(),
        halt,
        steps: machine.step_count(),
        trace,
    }
}

/// Represents a single-tape Turing Machine in the middle of a run.
///
/// The tape starts as the input followed by up to `max_steps` blank cells, which covers every
/// position the head can reach within a typical step budget. Cells past the end read as
/// blank and the tape grows on write, so huge budgets never allocate up front.
pub struct TuringMachine<'a> {
    table: &'a TransitionTable,
    config: &'a Config,
    state: String,
    tape: Vec<char>,
    head: usize,
    step_count: usize,
    halted: Option<Halt>,
}

impl<'a> TuringMachine<'a> {
    /// Creates a machine in the initial state with the head on the first input cell.
    pub fn new(table: &'a TransitionTable, input: &str, config: &'a Config) -> Self {
        let mut tape: Vec<char> = input.chars().collect();
        let blanks = config.max_steps.min(MAX_PRESIZED_BLANKS);
        tape.resize(tape.len() + blanks, config.blank);

        Self {
            table,
            config,
            state: config.initial_state.clone(),
            tape,
            head: 0,
            step_count: 0,
            halted: None,
        }
    }

    /// Executes a single step.
    ///
    /// # Returns
    ///
    /// * `Step::Continue(event)` if a transition fired.
    /// * `Step::Halt(halt)` if the machine accepted or rejected. Once halted, every further
    ///   call returns the same halt without touching the tape.
    pub fn step(&mut self) -> Step {
        if let Some(halt) = &self.halted {
            return Step::Halt(halt.clone());
        }

        match self.advance() {
            Ok(event) => Step::Continue(event),
            Err(halt) => {
                self.halted = Some(halt.clone());
                Step::Halt(halt)
            }
        }
    }

    /// Runs until the machine halts and returns the halt reason.
    pub fn run(&mut self) -> Halt {
        loop {
            if let Step::Halt(halt) = self.step() {
                return halt;
            }
        }
    }

    fn advance(&mut self) -> Result<TraceEvent, Halt> {
        if self.state == self.config.accept_state {
            return Err(Halt::Accepted);
        }

        if self.step_count >= self.config.max_steps {
            return Err(Halt::StepLimit {
                steps: self.step_count,
            });
        }

        let table = self.table;
        let symbol = self.symbol();
        let action = table
            .get(&self.state, symbol)
            .ok_or_else(|| Halt::NoTransition {
                state: self.state.clone(),
                symbol,
            })?;

        self.write(action.write);

        self.head = match action.direction {
            Direction::Right => self.head + 1,
            Direction::Left if self.head == 0 => {
                return Err(Halt::LeftOverrun {
                    state: self.state.clone(),
                });
            }
            Direction::Left => self.head - 1,
        };

        let state_changed = action.next_state != self.state;
        if state_changed {
            self.state = action.next_state.clone();
        }

        self.step_count += 1;

        Ok(TraceEvent {
            step: self.step_count,
            state: self.state.clone(),
            tape: self.output(),
            head: self.head,
            direction: action.direction,
            state_changed,
        })
    }

    /// Writes `symbol` under the head, growing the tape if the head is past its end.
    fn write(&mut self, symbol: char) {
        if self.head >= self.tape.len() {
            self.tape.resize(self.head + 1, self.config.blank);
        }
        self.tape[self.head] = symbol;
    }

    /// Returns the symbol under the head; cells past the end of the tape are blank.
    pub fn symbol(&self) -> char {
        self.tape
            .get(self.head)
            .copied()
            .unwrap_or(self.config.blank)
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the current head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the raw tape, blank cells included.
    pub fn tape(&self) -> &[char] {
        &self.tape
    }

    /// Returns the total number of transitions fired.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns `true` once `step` has reported a halt.
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Returns the tape contents with blank cells removed.
    pub fn output(&self) -> String {
        self.tape
            .iter()
            .filter(|&&symbol| symbol != self.config.blank)
            .collect()
    }

    /// Returns the halt reason, stepping to completion first if the machine is still running.
    pub fn halt(&mut self) -> Halt {
        self.run()
    }
}

impl Iterator for TuringMachine<'_> {
    type Item = TraceEvent;

    fn next(&mut self) -> Option<TraceEvent> {
        match self.step() {
            Step::Continue(event) => Some(event),
            Step::Halt(_) => None,
        }
    }
}
