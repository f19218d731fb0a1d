#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// An identifier for a given variable (fill slot), based on its index in the Structure's
/// `variables` field.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the WordList's `words` field.
pub type WordId = usize;

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Across,
    Down,
}

/// A fill slot: a maximal run of open cells in one direction, identified by its starting cell,
/// direction, and length. Zero-indexed, where row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    #[must_use]
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable {
            row,
            col,
            direction,
            length,
        }
    }

    /// The grid coordinates of the `index`th cell of this slot.
    #[must_use]
    pub fn cell(&self, index: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + index),
            Direction::Down => (self.row + index, self.col),
        }
    }

    /// The grid coordinates of every cell in this slot, in order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(|index| self.cell(index))
    }
}

/// The shared cell between two crossing variables x and y: character `index` of x's word must
/// equal character `other_index` of y's word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Overlap {
    pub index: usize,
    pub other_index: usize,
}

impl Overlap {
    /// The same overlap as seen from the other variable.
    #[must_use]
    pub fn reversed(self) -> Overlap {
        Overlap {
            index: self.other_index,
            other_index: self.index,
        }
    }
}
