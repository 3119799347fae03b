//! This module defines the `TransitionTable`, the immutable and deterministic rule set of a
//! Turing Machine. Construction rejects tables in which two rules share a key.

use crate::types::{Rule, State, Symbol, Transition, TuringMachineError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};

/// A validated mapping from `(state, symbol)` to a [`Transition`].
///
/// Rules are kept in insertion order for display and serialization; lookups go through a
/// per-state index.
#[derive(Debug, Clone)]
pub struct TransitionTable<Q, S> {
    rules: Vec<Rule<Q, S>>,
    index: HashMap<Q, HashMap<S, usize>>,
}

impl<Q: State, S: Symbol> TransitionTable<Q, S> {
    /// Builds a table from a list of rules.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` if every `(state, read)` key is unique.
    /// * `Err(TuringMachineError::DuplicateRule)` for the first key that appears twice.
    pub fn new(rules: impl IntoIterator<Item = Rule<Q, S>>) -> Result<Self, TuringMachineError> {
        let rules: Vec<Rule<Q, S>> = rules.into_iter().collect();
        let mut index: HashMap<Q, HashMap<S, usize>> = HashMap::new();

        for (i, rule) in rules.iter().enumerate() {
            let by_symbol = index.entry(rule.state.clone()).or_default();
            if by_symbol.insert(rule.read, i).is_some() {
                return Err(TuringMachineError::DuplicateRule {
                    state: format!("{:?}", rule.state),
                    symbol: format!("{:?}", rule.read),
                });
            }
        }

        Ok(Self { rules, index })
    }

    /// Returns the transition for `state` reading `symbol`, if one exists.
    pub fn get(&self, state: &Q, symbol: S) -> Option<&Transition<Q, S>> {
        self.index
            .get(state)
            .and_then(|by_symbol| by_symbol.get(&symbol))
            .map(|&i| &self.rules[i].transition)
    }

    /// Returns the rules in the order they were supplied.
    pub fn rules(&self) -> &[Rule<Q, S>] {
        &self.rules
    }

    /// Returns the rules whose current state is `state`.
    pub fn rules_for<'a>(&'a self, state: &'a Q) -> impl Iterator<Item = &'a Rule<Q, S>> + 'a {
        self.rules.iter().filter(move |rule| &rule.state == state)
    }

    /// Returns every state mentioned by the table, either as a source or a target.
    pub fn states(&self) -> HashSet<&Q> {
        self.rules
            .iter()
            .flat_map(|rule| [&rule.state, &rule.transition.next_state])
            .collect()
    }

    /// Returns every symbol the table reads or writes.
    pub fn symbols(&self) -> HashSet<S> {
        self.rules
            .iter()
            .flat_map(|rule| [rule.read, rule.transition.write])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<Q: PartialEq, S: PartialEq> PartialEq for TransitionTable<Q, S> {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl<Q: Serialize, S: Serialize> Serialize for TransitionTable<Q, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.rules.serialize(serializer)
    }
}

impl<'de, Q, S> Deserialize<'de> for TransitionTable<Q, S>
where
    Q: State + Deserialize<'de>,
    S: Symbol + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rules = Vec::<Rule<Q, S>>::deserialize(deserializer)?;
        Self::new(rules).map_err(D::Error::custom)
    }
}
