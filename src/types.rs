//! This module defines the core data structures and types used throughout the Turing Machine
//! engine, including transitions, step outcomes, run results, snapshots, and error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// The blank symbol used by the built-in programs.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// A special input symbol used in tape strings to represent the blank symbol.
pub const INPUT_BLANK_SYMBOL: char = '_';
/// The default maximum number of steps executed by [`crate::TuringMachine::run`].
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// A tape symbol. Any small comparable value qualifies.
pub trait Symbol: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> Symbol for T {}

/// A machine state label.
pub trait State: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> State for T {}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    #[serde(alias = "L")]
    Left,
    /// Move the head one position to the right.
    #[serde(alias = "R")]
    Right,
    /// Keep the head in the same position.
    #[serde(alias = "N", alias = "S")]
    Stay,
}

impl Direction {
    /// Returns the change applied to the head position.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = TuringMachineError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            'N' | 'S' => Ok(Direction::Stay),
            other => Err(TuringMachineError::ValidationError(format!(
                "Invalid direction '{}'",
                other
            ))),
        }
    }
}

/// The right-hand side of a transition rule: what to write, where to move, and which
/// state to enter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<Q, S> {
    /// The next state the machine transitions to.
    pub next_state: Q,
    /// The symbol written under the head.
    pub write: S,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

/// A complete transition rule, keyed by the current state and the symbol read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule<Q, S> {
    /// The state in which the rule applies.
    pub state: Q,
    /// The symbol under the head for which the rule applies.
    pub read: S,
    /// What the rule does.
    #[serde(flatten)]
    pub transition: Transition<Q, S>,
}

impl<Q, S> Rule<Q, S> {
    pub fn new(state: Q, read: S, next_state: Q, write: S, direction: Direction) -> Self {
        Self {
            state,
            read,
            transition: Transition {
                next_state,
                write,
                direction,
            },
        }
    }
}

/// Represents the outcome of a single call to [`crate::TuringMachine::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step<Q, S> {
    /// The machine applied a rule.
    Advanced(Advance<Q, S>),
    /// The machine is halted; nothing changed.
    Halted,
}

impl<Q, S> Step<Q, S> {
    pub fn is_halted(&self) -> bool {
        matches!(self, Step::Halted)
    }
}

/// The pre- and post-transition values of an applied rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance<Q, S> {
    /// State before the step.
    pub from: Q,
    /// State after the step.
    pub to: Q,
    /// Symbol read under the head.
    pub read: S,
    /// Symbol written in its place.
    pub written: S,
    /// Direction the head moved.
    pub direction: Direction,
    /// Head position at which the symbol was read and written.
    pub position: i64,
}

/// Why a machine stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt<Q, S> {
    /// The designated halting state was reached.
    Final,
    /// No rule exists for the current state and symbol.
    Undefined { state: Q, symbol: S },
}

/// The result of a bounded free run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Whether the machine is halted at the end of the run.
    pub halted: bool,
    /// Number of steps executed during the run.
    pub steps: usize,
    /// The step budget the run was given.
    pub max_steps: usize,
}

impl Run {
    /// Treats an exhausted step budget as an error.
    pub fn into_result(self) -> Result<usize, TuringMachineError> {
        if self.halted {
            Ok(self.steps)
        } else {
            Err(TuringMachineError::StepBudgetExceeded(self.max_steps))
        }
    }
}

/// A copy of a machine's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot<Q, S> {
    pub state: Q,
    pub head: i64,
    pub halted: bool,
    pub step_count: usize,
    /// Inclusive range of materialized positions.
    pub bounds: (i64, i64),
    /// Supplied and written cells by position. Other positions read blank.
    pub cells: BTreeMap<i64, S>,
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Two rules share the same state and read symbol.
    #[error("Duplicate rule for state {state} and symbol {symbol}")]
    DuplicateRule { state: String, symbol: String },
    /// A bounded run ended before the machine halted.
    #[error("Machine did not halt within {0} steps")]
    StepBudgetExceeded(usize),
    /// No built-in program matches the requested name or index.
    #[error("Program not found: {0}")]
    ProgramNotFound(String),
    /// Indicates an invalid configuration supplied by a driver.
    #[error("Configuration error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_direction_short_aliases() {
        let stay: Direction = serde_json::from_str("\"N\"").unwrap();
        let right: Direction = serde_json::from_str("\"R\"").unwrap();

        assert_eq!(stay, Direction::Stay);
        assert_eq!(right, Direction::Right);
    }

    #[test]
    fn test_direction_offset_and_parse() {
        assert_eq!(Direction::try_from('L').unwrap().offset(), -1);
        assert_eq!(Direction::try_from('R').unwrap().offset(), 1);
        assert_eq!(Direction::try_from('N').unwrap().offset(), 0);
        assert!(Direction::try_from('X').is_err());
    }

    #[test]
    fn test_rule_serializes_flat() {
        let rule = Rule::new("start", '1', "carry", '0', Direction::Left);
        let value = serde_json::to_value(&rule).unwrap();

        assert_eq!(value["state"], "start");
        assert_eq!(value["read"], "1");
        assert_eq!(value["next_state"], "carry");
        assert_eq!(value["write"], "0");
        assert_eq!(value["direction"], "Left");
    }

    #[test]
    fn test_run_into_result() {
        let halted = Run {
            halted: true,
            steps: 9,
            max_steps: 100,
        };
        let exhausted = Run {
            halted: false,
            steps: 5,
            max_steps: 5,
        };

        assert_eq!(halted.into_result(), Ok(9));
        assert_eq!(
            exhausted.into_result(),
            Err(TuringMachineError::StepBudgetExceeded(5))
        );
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::DuplicateRule {
            state: "\"start\"".to_string(),
            symbol: "'0'".to_string(),
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Duplicate rule"));
        assert!(error_msg.contains("start"));
    }
}
