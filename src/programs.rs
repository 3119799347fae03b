//! Built-in programs: the binary increment reference machine and a small busy beaver, kept
//! in a lazily initialised registry with lookup, listing and search helpers.

use crate::machine::MachineConfig;
use crate::table::TransitionTable;
use crate::types::{Direction, Rule, TuringMachineError, DEFAULT_BLANK_SYMBOL};

/// The configuration type used by all built-in programs.
pub type Config = MachineConfig<String, char>;

/// A rule written as `(state, read, next_state, write, direction)`.
pub type RuleTuple = (&'static str, char, &'static str, char, Direction);

/// Binary increment: walk right to the end of the number, then propagate the carry left.
///
/// `write1` has one rule per alphabet symbol leading to the halting state `halt`, and
/// writes back whatever it reads.
pub const BINARY_INCREMENT_RULES: [RuleTuple; 9] = [
    ("start", '0', "start", '0', Direction::Right),
    ("start", '1', "start", '1', Direction::Right),
    ("start", '_', "carry", '_', Direction::Left),
    ("carry", '1', "carry", '0', Direction::Left),
    ("carry", '0', "write1", '1', Direction::Stay),
    ("carry", '_', "write1", '1', Direction::Stay),
    ("write1", '0', "halt", '0', Direction::Stay),
    ("write1", '1', "halt", '1', Direction::Stay),
    ("write1", '_', "halt", '_', Direction::Stay),
];

/// The 3-state, 2-symbol busy beaver. Halts after 14 steps leaving six `1`s.
pub const BUSY_BEAVER_3_RULES: [RuleTuple; 6] = [
    ("A", '0', "B", '1', Direction::Right),
    ("A", '1', "H", '1', Direction::Right),
    ("B", '0', "C", '0', Direction::Right),
    ("B", '1', "B", '1', Direction::Right),
    ("C", '0', "C", '1', Direction::Left),
    ("C", '1', "A", '1', Direction::Left),
];

/// Builds a `String`-labelled table from rule tuples.
pub fn table_from_tuples(
    rules: &[RuleTuple],
) -> Result<TransitionTable<String, char>, TuringMachineError> {
    TransitionTable::new(rules.iter().map(|&(state, read, next, write, direction)| {
        Rule::new(state.to_string(), read, next.to_string(), write, direction)
    }))
}

/// The reference binary increment machine on input `_1011___` with the head on the first
/// digit.
pub fn binary_increment() -> Result<Config, TuringMachineError> {
    Ok(MachineConfig::new(
        "_1011___".chars().collect(),
        1,
        "start".to_string(),
        table_from_tuples(&BINARY_INCREMENT_RULES)?,
        "halt".to_string(),
        DEFAULT_BLANK_SYMBOL,
    ))
}

pub fn busy_beaver_3() -> Result<Config, TuringMachineError> {
    Ok(MachineConfig::new(
        Vec::new(),
        0,
        "A".to_string(),
        table_from_tuples(&BUSY_BEAVER_3_RULES)?,
        "H".to_string(),
        '0',
    ))
}

/// A named built-in machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub description: String,
    pub config: Config,
}

type Builder = fn() -> Result<Config, TuringMachineError>;

const BUILTINS: [(&str, &str, Builder); 2] = [
    (
        "Binary Increment",
        "Adds one to a binary number",
        binary_increment,
    ),
    (
        "Busy Beaver (3-state)",
        "Writes six 1s on a blank tape before halting",
        busy_beaver_3,
    ),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = BUILTINS
        .iter()
        .filter_map(|&(name, description, build)| match build() {
            Ok(config) => Some(Program {
                name: name.to_string(),
                description: description.to_string(),
                config,
            }),
            Err(e) => {
                tracing::warn!(program = name, "failed to build program: {}", e);
                None
            }
        })
        .collect();
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::ProgramNotFound(format!("index {} out of range", index))
        })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| TuringMachineError::ProgramNotFound(format!("'{}'", name)))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.clone()).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;
        let config = &program.config;

        Ok(ProgramInfo {
            index,
            name: program.name.clone(),
            initial_state: config.initial_state.clone(),
            initial_tape: config.initial_tape.iter().collect(),
            state_count: config.table.states().len(),
            rule_count: config.table.len(),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub initial_state: String,
    pub initial_tape: String,
    pub state_count: usize,
    pub rule_count: usize,
}
