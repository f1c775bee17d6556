//! This module provides static checks over a `TransitionTable` to spot programs that cannot
//! behave as intended before they are run. Findings are advisory: a table with diagnostics
//! still runs, it just rejects where the author probably expected something else.

use crate::config::Config;
use crate::table::TransitionTable;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

/// Represents the issues that can be found during the analysis of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The initial state has no rules, so every run rejects immediately.
    NoInitialTransitions(String),
    /// Rules leave the accept state; they never fire because the machine halts on entry.
    RulesFromAcceptState(String),
    /// Target states that have no rules of their own and are not the accept state.
    DeadEndStates(Vec<String>),
    /// States with rules that cannot be reached from the initial state.
    UnreachableStates(Vec<String>),
    /// No rule ever moves the machine into the accept state.
    AcceptUnreachable(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoInitialTransitions(state) => {
                write!(f, "Initial state {state} has no transitions")
            }
            Diagnostic::RulesFromAcceptState(state) => {
                write!(f, "Transitions from accept state {state} never fire")
            }
            Diagnostic::DeadEndStates(states) => {
                write!(f, "Transitions reference states without rules: {states:?}")
            }
            Diagnostic::UnreachableStates(states) => {
                write!(f, "Unreachable states detected: {states:?}")
            }
            Diagnostic::AcceptUnreachable(state) => {
                write!(f, "No transition leads to accept state {state}")
            }
        }
    }
}

/// Analyzes a table and returns every finding, in a fixed order.
///
/// # Arguments
///
/// * `table` - The table to check.
/// * `config` - Supplies the initial and accept state names.
pub fn analyze(table: &TransitionTable, config: &Config) -> Vec<Diagnostic> {
    [
        check_initial_state,
        check_accept_state_rules,
        check_dead_ends,
        check_unreachable_states,
        check_accept_reachable,
    ]
    .iter()
    .filter_map(|check| check(table, config))
    .collect()
}

fn check_initial_state(table: &TransitionTable, config: &Config) -> Option<Diagnostic> {
    (!table.has_state(&config.initial_state))
        .then(|| Diagnostic::NoInitialTransitions(config.initial_state.clone()))
}

fn check_accept_state_rules(table: &TransitionTable, config: &Config) -> Option<Diagnostic> {
    table
        .has_state(&config.accept_state)
        .then(|| Diagnostic::RulesFromAcceptState(config.accept_state.clone()))
}

fn check_dead_ends(table: &TransitionTable, config: &Config) -> Option<Diagnostic> {
    let dead_ends: BTreeSet<String> = table
        .transitions()
        .into_iter()
        .map(|t| t.next_state)
        .filter(|state| *state != config.accept_state && !table.has_state(state))
        .collect();

    (!dead_ends.is_empty()).then(|| Diagnostic::DeadEndStates(dead_ends.into_iter().collect()))
}

/// Breadth-first search from the initial state over rule targets.
fn check_unreachable_states(table: &TransitionTable, config: &Config) -> Option<Diagnostic> {
    if !table.has_state(&config.initial_state) {
        // Already reported; every state would count as unreachable.
        return None;
    }

    let mut reachable: HashSet<&str> = HashSet::new();
    let mut queue = VecDeque::from([config.initial_state.as_str()]);

    while let Some(state) = queue.pop_front() {
        if !reachable.insert(state) || state == config.accept_state {
            continue;
        }
        for (_, action) in table.actions(state) {
            queue.push_back(action.next_state.as_str());
        }
    }

    let unreachable: BTreeSet<String> = table
        .states()
        .filter(|state| !reachable.contains(state) && *state != config.accept_state)
        .map(str::to_string)
        .collect();

    (!unreachable.is_empty())
        .then(|| Diagnostic::UnreachableStates(unreachable.into_iter().collect()))
}

fn check_accept_reachable(table: &TransitionTable, config: &Config) -> Option<Diagnostic> {
    let targeted = table
        .transitions()
        .iter()
        .any(|t| t.next_state == config.accept_state);

    (!table.is_empty() && !targeted)
        .then(|| Diagnostic::AcceptUnreachable(config.accept_state.clone()))
}
