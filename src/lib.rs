//! This crate provides the execution engine of a deterministic single-tape Turing Machine.
//! It includes modules for the tape, the validated transition table, the step-driven machine,
//! and a small collection of built-in programs. The engine performs no I/O; drivers call
//! `step`, `run_to_halt` and `reset` at their own pace.

pub mod machine;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the machine and its configuration from the machine module.
pub use machine::{MachineConfig, TuringMachine};
/// Re-exports the built-in program registry from the programs module.
pub use programs::{Program, ProgramInfo, ProgramManager, PROGRAMS};
pub use table::TransitionTable;
pub use tape::Tape;
/// Re-exports the types describing rules, step outcomes and errors from the types module.
pub use types::{
    Advance, Direction, Halt, Rule, Run, Snapshot, State, Step, Symbol, Transition,
    TuringMachineError, MAX_EXECUTION_STEPS,
};
