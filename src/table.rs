//! The transition table: an immutable-once-built mapping from `(state, symbol)` to the
//! action the machine takes.

use crate::types::{Action, Transition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Transition rules grouped by source state, then by the symbol under the head.
///
/// Keys are unique: inserting a rule for an existing `(state, symbol)` pair replaces the
/// earlier one. Lookups borrow, so a built table can be shared by any number of runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    rules: HashMap<String, HashMap<char, Action>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule, returning the action it replaced, if any.
    pub fn insert(&mut self, transition: Transition) -> Option<Action> {
        let action = transition.action();
        self.rules
            .entry(transition.state)
            .or_default()
            .insert(transition.read, action)
    }

    /// Finds the action for `state` reading `symbol`.
    pub fn get(&self, state: &str, symbol: char) -> Option<&Action> {
        self.rules.get(state)?.get(&symbol)
    }

    /// Returns `true` if `state` has at least one outgoing rule.
    pub fn has_state(&self, state: &str) -> bool {
        self.rules
            .get(state)
            .is_some_and(|actions| !actions.is_empty())
    }

    /// Iterates over the rules of a single state.
    pub fn actions(&self, state: &str) -> impl Iterator<Item = (char, &Action)> {
        self.rules
            .get(state)
            .into_iter()
            .flat_map(|actions| actions.iter().map(|(&symbol, action)| (symbol, action)))
    }

    /// Iterates over the states that have rules, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of `(state, symbol)` entries.
    pub fn len(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lists every rule as a `Transition`, sorted by state then symbol.
    pub fn transitions(&self) -> Vec<Transition> {
        let mut transitions: Vec<Transition> = self
            .rules
            .iter()
            .flat_map(|(state, actions)| {
                actions.iter().map(move |(&read, action)| Transition {
                    state: state.clone(),
                    read,
                    next_state: action.next_state.clone(),
                    write: action.write,
                    direction: action.direction,
                })
            })
            .collect();

        transitions.sort_by(|a, b| (&a.state, a.read).cmp(&(&b.state, b.read)));
        transitions
    }
}

impl FromIterator<Transition> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        let mut table = TransitionTable::new();
        for transition in iter {
            table.insert(transition);
        }
        table
    }
}

impl Extend<Transition> for TransitionTable {
    fn extend<I: IntoIterator<Item = Transition>>(&mut self, iter: I) {
        for transition in iter {
            self.insert(transition);
        }
    }
}
