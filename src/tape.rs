//! This module defines the `Tape`, an unbounded sequence of symbols addressed by signed
//! positions. Cells that were never materialized read as the blank symbol.

use crate::types::{Symbol, INPUT_BLANK_SYMBOL};
use std::collections::BTreeMap;
use std::fmt;

/// A tape that grows on demand in both directions and never shrinks.
///
/// Only supplied and written cells are stored. The materialized range is tracked
/// separately; positions inside it without a stored cell read as blank, so a write far
/// from the origin costs a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape<S> {
    cells: BTreeMap<i64, S>,
    min: i64,
    max: i64,
    blank: S,
}

impl<S: Symbol> Tape<S> {
    /// Creates a tape whose cells start at position 0.
    ///
    /// Position 0 is always materialized: an empty input yields a single blank cell.
    pub fn new(cells: impl IntoIterator<Item = S>, blank: S) -> Self {
        let cells: BTreeMap<i64, S> = (0..).zip(cells).collect();
        let max = cells.keys().next_back().copied().unwrap_or(0);

        Self {
            cells,
            min: 0,
            max,
            blank,
        }
    }

    /// Returns the symbol at `position`, or the blank symbol if it was never materialized.
    pub fn read(&self, position: i64) -> S {
        self.cells.get(&position).copied().unwrap_or(self.blank)
    }

    /// Stores `value` at `position`, widening the materialized range to include it.
    pub fn write(&mut self, position: i64, value: S) {
        self.cells.insert(position, value);
        self.min = self.min.min(position);
        self.max = self.max.max(position);
    }

    /// Returns the inclusive range of materialized positions.
    pub fn bounds(&self) -> (i64, i64) {
        (self.min, self.max)
    }

    /// Returns the symbols in the inclusive range `from..=to`, blank outside the bounds.
    pub fn window(&self, from: i64, to: i64) -> Vec<S> {
        (from..=to).map(|position| self.read(position)).collect()
    }

    /// Iterates over every materialized position from left to right, blanks included.
    pub fn cells(&self) -> impl Iterator<Item = S> + '_ {
        (self.min..=self.max).map(move |position| self.read(position))
    }

    /// Iterates over the stored cells only, as `(position, symbol)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (i64, S)> + '_ {
        self.cells.iter().map(|(&position, &symbol)| (position, symbol))
    }

    /// Returns the materialized cells without leading and trailing blanks.
    pub fn trimmed(&self) -> Vec<S> {
        let mut marked = self
            .cells
            .iter()
            .map(|(&position, &symbol)| (position, symbol))
            .filter(|&(_, symbol)| symbol != self.blank);
        let first = marked.next().map(|(position, _)| position);
        let last = marked.next_back().map(|(position, _)| position).or(first);

        match (first, last) {
            (Some(first), Some(last)) => self.window(first, last),
            _ => Vec::new(),
        }
    }

    pub fn blank(&self) -> S {
        self.blank
    }
}

impl Tape<char> {
    /// Builds a character tape from a string. [`INPUT_BLANK_SYMBOL`] maps to `blank`.
    pub fn parse(input: &str, blank: char) -> Self {
        Self::new(
            input
                .chars()
                .map(|c| if c == INPUT_BLANK_SYMBOL { blank } else { c }),
            blank,
        )
    }
}

impl<S: Symbol + fmt::Display> fmt::Display for Tape<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells() {
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(input: &str) -> Tape<char> {
        Tape::parse(input, '_')
    }

    #[test]
    fn test_unwritten_positions_read_blank() {
        let tape = tape("101");

        for position in [-1_000_000, -2, -1, 3, 4, 1_000_000, i64::MIN, i64::MAX] {
            assert_eq!(tape.read(position), '_', "position {}", position);
        }
        assert_eq!(tape.read(0), '1');
        assert_eq!(tape.read(1), '0');
        assert_eq!(tape.read(2), '1');
    }

    #[test]
    fn test_write_then_read() {
        let mut tape = tape("_");

        for (position, value) in [(0, 'a'), (5, 'b'), (-3, 'c'), (-1, 'd'), (2, 'e')] {
            tape.write(position, value);
            assert_eq!(tape.read(position), value);
        }
        assert_eq!(tape.read(5), 'b');
        assert_eq!(tape.read(-3), 'c');
    }

    #[test]
    fn test_write_extends_right_with_blanks() {
        let mut tape = tape("1");
        tape.write(4, '0');

        assert_eq!(tape.bounds(), (0, 4));
        assert_eq!(tape.to_string(), "1___0");
    }

    #[test]
    fn test_write_extends_left_with_blanks() {
        let mut tape = tape("1");
        tape.write(-3, '0');

        assert_eq!(tape.bounds(), (-3, 0));
        assert_eq!(tape.to_string(), "0__1");
        assert_eq!(tape.read(-2), '_');
    }

    #[test]
    fn test_tape_never_shrinks() {
        let mut tape = tape("111");
        tape.write(-2, '1');
        let bounds = tape.bounds();

        tape.write(-2, '_');
        tape.write(2, '_');
        tape.write(0, '_');

        assert_eq!(tape.bounds(), bounds);
        assert_eq!(tape.bounds(), (-2, 2));
        assert_eq!(tape.to_string(), "_____");
    }

    #[test]
    fn test_empty_input_materializes_origin() {
        let tape = tape("");

        assert_eq!(tape.bounds(), (0, 0));
        assert_eq!(tape.to_string(), "_");
        assert_eq!(tape.read(0), '_');
    }

    #[test]
    fn test_parse_maps_input_blank() {
        let tape = Tape::parse("a_b", '-');

        assert_eq!(tape.cells().collect::<Vec<_>>(), vec!['a', '-', 'b']);
        assert_eq!(tape.blank(), '-');
    }

    #[test]
    fn test_window_spans_outside_bounds() {
        let tape = tape("10");

        assert_eq!(tape.window(-2, 3), vec!['_', '_', '1', '0', '_', '_']);
        assert_eq!(tape.window(1, 1), vec!['0']);
        assert!(tape.window(2, 1).is_empty());
    }

    #[test]
    fn test_trimmed() {
        let mut tape = tape("__101__");
        tape.write(-2, '_');

        assert_eq!(tape.trimmed(), vec!['1', '0', '1']);
        assert!(Tape::parse("___", '_').trimmed().is_empty());
    }

    #[test]
    fn test_generic_symbols() {
        let mut tape: Tape<u8> = Tape::new([1, 2, 3], 0);
        tape.write(-1, 9);

        assert_eq!(tape.cells().collect::<Vec<_>>(), vec![9, 1, 2, 3]);
        assert_eq!(tape.read(10), 0);
    }

    #[test]
    fn test_write_at_extreme_positions() {
        let mut tape = tape("1");

        tape.write(i64::MAX, 'r');
        tape.write(i64::MIN, 'l');

        assert_eq!(tape.read(i64::MAX), 'r');
        assert_eq!(tape.read(i64::MIN), 'l');
        assert_eq!(tape.read(0), '1');
        assert_eq!(tape.read(1_000_000_000_000), '_');
        assert_eq!(tape.bounds(), (i64::MIN, i64::MAX));
        assert_eq!(tape.window(-1, 1), vec!['_', '1', '_']);
        assert_eq!(
            tape.entries().collect::<Vec<_>>(),
            vec![(i64::MIN, 'l'), (0, '1'), (i64::MAX, 'r')]
        );
    }

    #[test]
    fn test_trimmed_single_mark() {
        let mut tape = tape("___");
        tape.write(-4, '1');

        assert_eq!(tape.trimmed(), vec!['1']);
    }
}
