//! This crate fills crossword grids from a word list.
//! Every blank slot is a variable and the crossings are binary
//! constraints; the grid is solved by node consistency, arc
//! consistency (AC-3) and backtracking search.

mod arc;
mod assignment;
mod crossword;
mod domains;
mod error;
mod solver;

use std::fmt;

pub use assignment::Assignment;
pub use crossword::Crossword;
pub use error::Error;
pub use solver::{Solver, SolverOptions};

/// A crossword variable token, i.e. the index of a slot within its
/// crossword.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VarToken(usize);

impl VarToken {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The orientation of a slot.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Across,
    Down,
}

/// A fillable slot: a maximal run of open cells in one direction.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable {
    pub i: usize,
    pub j: usize,
    pub direction: Direction,
    pub length: usize,
}

/// Letter offsets `(ox, oy)` at which two crossing slots share a cell.
pub type Overlap = (usize, usize);

/// A result during propagation (Err = contradiction).
pub type XwResult<T> = Result<T, Error>;

impl Variable {
    /// Create a slot.  A slot holds at least one letter.
    pub fn new(i: usize, j: usize, direction: Direction, length: usize) -> Self {
        debug_assert!(length >= 1, "slot at ({}, {}) has no cells", i, j);
        Variable {
            i,
            j,
            direction,
            length,
        }
    }

    /// The cells covered by the slot, in letter order.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.length).map(move |k| match self.direction {
            Direction::Across => (self.i, self.j + k),
            Direction::Down => (self.i + k, self.j),
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {} : {}", self.i, self.j, self.direction, self.length)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, Variable};

    #[test]
    fn test_cells() {
        let down = Variable::new(1, 2, Direction::Down, 3);
        assert_eq!(down.cells().collect::<Vec<_>>(), [(1, 2), (2, 2), (3, 2)]);
        assert_eq!(down.to_string(), "(1, 2) down : 3");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "has no cells")]
    fn test_empty_slot() {
        Variable::new(0, 0, Direction::Across, 0);
    }
}
