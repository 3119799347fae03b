//! This module defines the `TuringMachine` struct, which executes a single-tape Turing Machine
//! one step at a time, and the immutable `MachineConfig` it is built from.

use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{
    Advance, Halt, Run, Snapshot, State, Step, Symbol, Transition, MAX_EXECUTION_STEPS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// The complete initial configuration of a machine.
///
/// A machine never mutates its configuration; [`TuringMachine::reset`] restores the values
/// held here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "Q: Serialize, S: Serialize",
    deserialize = "Q: State + Deserialize<'de>, S: Symbol + Deserialize<'de>"
))]
pub struct MachineConfig<Q, S> {
    /// Tape contents, starting at position 0.
    pub initial_tape: Vec<S>,
    #[serde(default)]
    pub initial_head: i64,
    pub initial_state: Q,
    /// Reaching this state halts the machine.
    pub halting_state: Q,
    pub blank: S,
    pub table: TransitionTable<Q, S>,
}

impl<Q: State, S: Symbol> MachineConfig<Q, S> {
    pub fn new(
        initial_tape: Vec<S>,
        initial_head: i64,
        initial_state: Q,
        table: TransitionTable<Q, S>,
        halting_state: Q,
        blank: S,
    ) -> Self {
        Self {
            initial_tape,
            initial_head,
            initial_state,
            halting_state,
            blank,
            table,
        }
    }

    /// Returns a copy of this configuration with a different input.
    pub fn with_input(&self, initial_tape: Vec<S>, initial_head: i64) -> Self {
        Self {
            initial_tape,
            initial_head,
            ..self.clone()
        }
    }

    fn tape(&self) -> Tape<S> {
        Tape::new(self.initial_tape.iter().copied(), self.blank)
    }
}

/// Represents a single-tape Turing Machine.
///
/// The machine owns its tape exclusively and performs no I/O. A driver advances it with
/// [`step`](Self::step), [`run_to_halt`](Self::run_to_halt) or [`run`](Self::run), and
/// returns it to its initial configuration with [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct TuringMachine<Q, S> {
    config: MachineConfig<Q, S>,
    tape: Tape<S>,
    head: i64,
    state: Q,
    halted: bool,
    step_count: usize,
}

impl<Q: State, S: Symbol> TuringMachine<Q, S> {
    /// Creates a new `TuringMachine` from a configuration.
    ///
    /// The machine starts halted if the initial state is the halting state or no rule
    /// applies to the initial symbol.
    pub fn new(config: MachineConfig<Q, S>) -> Self {
        let mut machine = Self {
            tape: config.tape(),
            head: config.initial_head,
            state: config.initial_state.clone(),
            halted: false,
            step_count: 0,
            config,
        };
        machine.halted = machine.should_halt();
        machine
    }

    /// Executes a single step of the machine's computation.
    ///
    /// # Returns
    ///
    /// * `Step::Advanced` with the pre- and post-transition values when a rule was applied.
    /// * `Step::Halted` if the machine is (or just became) halted. Nothing is mutated in
    ///   that case apart from the halted flag.
    pub fn step(&mut self) -> Step<Q, S> {
        if self.halted {
            return Step::Halted;
        }

        let position = self.head;
        let read = self.tape.read(position);

        let Some(transition) = self.config.table.get(&self.state, read).cloned() else {
            self.halted = true;
            debug!(state = ?self.state, symbol = ?read, "no rule applies, halting");
            return Step::Halted;
        };

        self.tape.write(position, transition.write);
        self.head = position.saturating_add(transition.direction.offset());
        let from = std::mem::replace(&mut self.state, transition.next_state);
        self.step_count += 1;
        self.halted = self.should_halt();

        trace!(
            step = self.step_count,
            from = ?from,
            to = ?self.state,
            read = ?read,
            written = ?transition.write,
            position,
            "advanced"
        );
        if self.halted {
            debug!(reason = ?self.halt(), steps = self.step_count, "machine halted");
        }

        Step::Advanced(Advance {
            from,
            to: self.state.clone(),
            read,
            written: transition.write,
            direction: transition.direction,
            position,
        })
    }

    /// Steps until the machine halts or `max_steps` steps have been executed.
    pub fn run_to_halt(&mut self, max_steps: usize) -> Run {
        let mut steps = 0;
        while steps < max_steps {
            match self.step() {
                Step::Advanced(_) => steps += 1,
                Step::Halted => break,
            }
        }

        Run {
            halted: self.halted,
            steps,
            max_steps,
        }
    }

    /// Runs the machine with the default step budget, [`MAX_EXECUTION_STEPS`].
    pub fn run(&mut self) -> Run {
        self.run_to_halt(MAX_EXECUTION_STEPS)
    }

    /// Resets the machine to its initial configuration.
    /// This includes the tape, head position, state, halted flag, and step count.
    pub fn reset(&mut self) {
        self.tape = self.config.tape();
        self.head = self.config.initial_head;
        self.state = self.config.initial_state.clone();
        self.step_count = 0;
        self.halted = self.should_halt();
        debug!(state = ?self.state, head = self.head, "machine reset");
    }

    /// Collects the snapshot sequence produced by stepping at most `max_steps` times,
    /// beginning with the current snapshot.
    pub fn trace(&mut self, max_steps: usize) -> Vec<Snapshot<Q, S>> {
        let mut snapshots = vec![self.snapshot()];
        for _ in 0..max_steps {
            if self.step().is_halted() {
                break;
            }
            snapshots.push(self.snapshot());
        }
        snapshots
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &Q {
        &self.state
    }

    /// Returns the initial state of the machine.
    pub fn initial_state(&self) -> &Q {
        &self.config.initial_state
    }

    /// Returns the state that halts the machine.
    pub fn halting_state(&self) -> &Q {
        &self.config.halting_state
    }

    /// Returns the current head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Returns the total number of steps executed since construction or the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Explains why the machine is halted, or `None` while it can still advance.
    pub fn halt(&self) -> Option<Halt<Q, S>> {
        if !self.halted {
            None
        } else if self.state == self.config.halting_state {
            Some(Halt::Final)
        } else {
            Some(Halt::Undefined {
                state: self.state.clone(),
                symbol: self.symbol(),
            })
        }
    }

    pub fn tape(&self) -> &Tape<S> {
        &self.tape
    }

    /// Returns the tape contents in the inclusive range `from..=to`.
    pub fn window(&self, from: i64, to: i64) -> Vec<S> {
        self.tape.window(from, to)
    }

    /// Returns the symbol currently under the head.
    pub fn symbol(&self) -> S {
        self.tape.read(self.head)
    }

    /// Returns the transition the next step would apply, if any.
    pub fn transition(&self) -> Option<&Transition<Q, S>> {
        if self.state == self.config.halting_state {
            return None;
        }
        self.config.table.get(&self.state, self.symbol())
    }

    pub fn config(&self) -> &MachineConfig<Q, S> {
        &self.config
    }

    pub fn blank(&self) -> S {
        self.config.blank
    }

    /// Captures the machine's observable state.
    pub fn snapshot(&self) -> Snapshot<Q, S> {
        Snapshot {
            state: self.state.clone(),
            head: self.head,
            halted: self.halted,
            step_count: self.step_count,
            bounds: self.tape.bounds(),
            cells: self.tape.entries().collect(),
        }
    }

    fn should_halt(&self) -> bool {
        self.transition().is_none()
    }
}
