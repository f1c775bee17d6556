//! Explicit configuration shared by the loader, the assembler and the engine.

use crate::types::{
    TuringMachineError, DEFAULT_ACCEPT_LABEL, DEFAULT_ACCEPT_STATE, DEFAULT_BLANK_SYMBOL,
    DEFAULT_INITIAL_STATE, DEFAULT_MAX_STEPS,
};
use serde::{Deserialize, Serialize};

/// Reserved names and limits for a machine.
///
/// Every field has a default, so a partial JSON document such as `{"max_steps": 500}` is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The symbol filling unwritten cells, stripped from output.
    pub blank: char,
    /// The state every run starts in.
    pub initial_state: String,
    /// The state that ends a run successfully.
    pub accept_state: String,
    /// The TinyASM `goto` target that compiles to `accept_state`.
    pub accept_label: String,
    /// Step budget; also the number of blank cells appended to the input.
    pub max_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blank: DEFAULT_BLANK_SYMBOL,
            initial_state: DEFAULT_INITIAL_STATE.to_string(),
            accept_state: DEFAULT_ACCEPT_STATE.to_string(),
            accept_label: DEFAULT_ACCEPT_LABEL.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl Config {
    /// Returns the default configuration with a different step budget.
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps,
            ..Self::default()
        }
    }

    /// Parses a JSON configuration document and validates it.
    pub fn from_json(content: &str) -> Result<Self, TuringMachineError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the reserved names can be written to and read back from table text.
    pub fn validate(&self) -> Result<(), TuringMachineError> {
        for (field, value) in [
            ("initial_state", &self.initial_state),
            ("accept_state", &self.accept_state),
            ("accept_label", &self.accept_label),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(TuringMachineError::InvalidConfig(format!(
                    "{field} must be a non-empty token without whitespace, got '{value}'"
                )));
            }
        }

        if self.initial_state == self.accept_state {
            return Err(TuringMachineError::InvalidConfig(format!(
                "initial_state and accept_state must differ, both are '{}'",
                self.accept_state
            )));
        }

        if self.blank.is_whitespace() {
            return Err(TuringMachineError::InvalidConfig(
                "blank symbol must not be whitespace".to_string(),
            ));
        }

        Ok(())
    }
}
