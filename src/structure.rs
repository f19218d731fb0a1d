//! The static description of a puzzle: grid dimensions, which cells are open, the fill slots
//! (variables) those cells form, and the overlap table between every pair of crossing slots.
//! None of this changes while solving.

use smallvec::SmallVec;
use std::collections::HashMap;
use thiserror::Error;

use crate::types::{Direction, Overlap, Variable, VariableId};
use crate::MAX_SLOT_LENGTH;

/// Reasons a structure can't be built from the given description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("row {row} has {actual} cells, but the first row has {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("variable {variable_id} has length 0")]
    ZeroLengthVariable { variable_id: VariableId },

    #[error("variable {variable_id} extends past the edge of the {width}x{height} grid")]
    VariableOutOfBounds {
        variable_id: VariableId,
        width: usize,
        height: usize,
    },

    #[error("variables {first} and {second} share more than one cell")]
    MultipleOverlaps {
        first: VariableId,
        second: VariableId,
    },
}

/// A crossing between one variable and another, referencing the other variable's id and where
/// the shared cell falls in each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub variable_id: VariableId,
    pub overlap: Overlap,
}

/// An immutable puzzle structure.
#[derive(Debug, Clone)]
pub struct Structure {
    width: usize,
    height: usize,
    cells: Vec<Vec<bool>>,
    variables: Vec<Variable>,

    /// For each variable, its crossings in ascending order of the other variable's id. Each
    /// overlap is stored from the perspective of the variable that owns the list.
    neighbors: Vec<SmallVec<[Neighbor; MAX_SLOT_LENGTH]>>,
}

impl Structure {
    /// Build a structure from a matrix of cells, where `true` means the cell is open. Variables are
    /// derived by scanning the grid in row-major order and emitting the across slot, then the down
    /// slot, that starts at each cell. Runs of a single open cell aren't slots.
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Structure, StructureError> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        if let Some((row, line)) = cells
            .iter()
            .enumerate()
            .find(|(_, line)| line.len() != width)
        {
            return Err(StructureError::RaggedRows {
                row,
                expected: width,
                actual: line.len(),
            });
        }

        let run_length = |row: usize, col: usize, direction: Direction| -> usize {
            let probe = Variable::new(row, col, direction, 0);
            (0..)
                .map(|index| probe.cell(index))
                .take_while(|&(r, c)| r < height && c < width && cells[r][c])
                .count()
        };

        let mut variables = vec![];
        for row in 0..height {
            for col in 0..width {
                if !cells[row][col] {
                    continue;
                }

                if col == 0 || !cells[row][col - 1] {
                    let length = run_length(row, col, Direction::Across);
                    if length > 1 {
                        variables.push(Variable::new(row, col, Direction::Across, length));
                    }
                }

                if row == 0 || !cells[row - 1][col] {
                    let length = run_length(row, col, Direction::Down);
                    if length > 1 {
                        variables.push(Variable::new(row, col, Direction::Down, length));
                    }
                }
            }
        }

        Structure::build(width, height, cells, variables)
    }

    /// Build a structure from a variable list that the caller has already derived. The open cells
    /// are exactly the cells covered by some variable.
    pub fn from_variables(
        width: usize,
        height: usize,
        variables: Vec<Variable>,
    ) -> Result<Structure, StructureError> {
        for (variable_id, variable) in variables.iter().enumerate() {
            if variable.length == 0 {
                return Err(StructureError::ZeroLengthVariable { variable_id });
            }

            let extent = variable.length - 1;
            let (last_row, last_col) = match variable.direction {
                Direction::Across => (Some(variable.row), variable.col.checked_add(extent)),
                Direction::Down => (variable.row.checked_add(extent), Some(variable.col)),
            };
            let in_bounds = matches!(
                (last_row, last_col),
                (Some(row), Some(col)) if row < height && col < width
            );
            if !in_bounds {
                return Err(StructureError::VariableOutOfBounds {
                    variable_id,
                    width,
                    height,
                });
            }
        }

        let mut cells = vec![vec![false; width]; height];
        for variable in &variables {
            for (row, col) in variable.cells() {
                cells[row][col] = true;
            }
        }

        Structure::build(width, height, cells, variables)
    }

    /// Compute the overlap table for a validated set of variables.
    fn build(
        width: usize,
        height: usize,
        cells: Vec<Vec<bool>>,
        variables: Vec<Variable>,
    ) -> Result<Structure, StructureError> {
        let mut entries_by_cell: HashMap<(usize, usize), SmallVec<[(VariableId, usize); 2]>> =
            HashMap::new();
        for (variable_id, variable) in variables.iter().enumerate() {
            for (index, cell) in variable.cells().enumerate() {
                entries_by_cell
                    .entry(cell)
                    .or_default()
                    .push((variable_id, index));
            }
        }

        let mut overlaps: HashMap<(VariableId, VariableId), Overlap> = HashMap::new();
        for entries in entries_by_cell.values() {
            for (a, &(first, first_index)) in entries.iter().enumerate() {
                for &(second, second_index) in &entries[a + 1..] {
                    let key = (first.min(second), first.max(second));
                    let overlap = if first < second {
                        Overlap {
                            index: first_index,
                            other_index: second_index,
                        }
                    } else {
                        Overlap {
                            index: second_index,
                            other_index: first_index,
                        }
                    };

                    if overlaps.insert(key, overlap).is_some() {
                        return Err(StructureError::MultipleOverlaps {
                            first: key.0,
                            second: key.1,
                        });
                    }
                }
            }
        }

        let mut neighbors: Vec<SmallVec<[Neighbor; MAX_SLOT_LENGTH]>> =
            vec![SmallVec::new(); variables.len()];
        for (&(first, second), &overlap) in &overlaps {
            neighbors[first].push(Neighbor {
                variable_id: second,
                overlap,
            });
            neighbors[second].push(Neighbor {
                variable_id: first,
                overlap: overlap.reversed(),
            });
        }
        for crossings in &mut neighbors {
            crossings.sort_unstable_by_key(|neighbor| neighbor.variable_id);
        }

        Ok(Structure {
            width,
            height,
            cells,
            variables,
            neighbors,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Is the given cell open? Cells outside the grid are not.
    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|line| line.get(col))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[must_use]
    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Look up a variable's id by its position and direction.
    #[must_use]
    pub fn find_variable(&self, row: usize, col: usize, direction: Direction) -> Option<VariableId> {
        self.variables.iter().position(|variable| {
            variable.row == row && variable.col == col && variable.direction == direction
        })
    }

    /// Every variable crossing `variable_id`, with overlaps from `variable_id`'s perspective.
    #[must_use]
    pub fn neighbors(&self, variable_id: VariableId) -> &[Neighbor] {
        &self.neighbors[variable_id]
    }

    /// Number of variables crossing `variable_id`.
    #[must_use]
    pub fn degree(&self, variable_id: VariableId) -> usize {
        self.neighbors[variable_id].len()
    }

    /// The overlap between `x` and `y`, oriented so that `index` refers to `x`, or None if they
    /// don't cross.
    #[must_use]
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.neighbors[x]
            .binary_search_by_key(&y, |neighbor| neighbor.variable_id)
            .ok()
            .map(|idx| self.neighbors[x][idx].overlap)
    }
}
