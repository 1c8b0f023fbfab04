//! Gravity-fed cell matrix.
//!
//! This module contains:
//! - Cell and player identifier types
//! - The `Grid` itself with its stacking rule
//! - Errors raised when stacking or loading fails
//!
//! Row 0 is the top of the grid and `n_rows - 1` is the bottom. Tokens fall
//! toward the highest row index, so within any column the occupied cells are
//! always a contiguous run ending at the bottom row.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Player identifier (1 for the first player, up to the player count)
pub type PlayerId = u8;

/// A single grid position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Token belonging to a player
    Owner(PlayerId),
}

impl Cell {
    /// Owner of this cell, if any
    pub fn owner(&self) -> Option<PlayerId> {
        match self {
            Cell::Owner(id) => Some(*id),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Errors that can occur when stacking a token
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GridError {
    #[error("Column {column} is full")]
    ColumnFull { column: usize },

    #[error("Column {column} is out of range (grid has {n_columns} columns)")]
    ColumnOutOfRange { column: usize, n_columns: usize },

    #[error("Invalid grid layout: {0}")]
    InvalidLayout(String),
}

/// Fixed-size grid of cells, indexed `[row][column]`.
///
/// Deserialization checks the dimensions and that no column has a gap below
/// a token, so a loaded grid holds the same guarantees as one built with
/// [`Grid::new`] and [`Grid::stack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    n_rows: usize,
    n_columns: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(n_rows: usize, n_columns: usize) -> Self {
        assert!(
            n_rows > 0 && n_columns > 0,
            "Grid dimensions must be positive"
        );

        Self {
            n_rows,
            n_columns,
            cells: vec![vec![Cell::Empty; n_columns]; n_rows],
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    /// Whether `(row, column)` lies inside the grid
    pub fn in_bounds(&self, row: isize, column: isize) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.n_rows && (column as usize) < self.n_columns
    }

    /// Get a cell, or `None` when the coordinates are outside the grid
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Get a cell the engine already knows to be in range.
    ///
    /// # Panics
    ///
    /// Panics if `(row, column)` is outside the grid.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Iterate over the rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Number of tokens currently in a column
    pub fn column_height(&self, column: usize) -> usize {
        if column >= self.n_columns {
            return 0;
        }
        self.cells
            .iter()
            .rev()
            .take_while(|row| !row[column].is_empty())
            .count()
    }

    /// Whether no further token fits in a column.
    ///
    /// Only the top cell is inspected; out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        match self.get(0, column) {
            Some(cell) => !cell.is_empty(),
            None => true,
        }
    }

    /// Whether every cell of the grid is occupied
    pub fn is_filled(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Place `owner`'s token in the lowest empty cell of `column`.
    ///
    /// Returns the row the token landed in. The grid is left untouched on
    /// failure.
    pub fn stack(&mut self, column: usize, owner: PlayerId) -> Result<usize, GridError> {
        if column >= self.n_columns {
            return Err(GridError::ColumnOutOfRange {
                column,
                n_columns: self.n_columns,
            });
        }

        let row = (0..self.n_rows)
            .rev()
            .find(|&row| self.cells[row][column].is_empty())
            .ok_or(GridError::ColumnFull { column })?;

        self.cells[row][column] = Cell::Owner(owner);
        Ok(row)
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::Empty);
        }
    }
}

/// Unchecked wire form of a [`Grid`]
#[derive(Deserialize)]
struct GridRepr {
    n_rows: usize,
    n_columns: usize,
    cells: Vec<Vec<Cell>>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        if repr.n_rows == 0 || repr.n_columns == 0 {
            return Err(GridError::InvalidLayout(
                "dimensions must be positive".into(),
            ));
        }
        if repr.cells.len() != repr.n_rows
            || repr.cells.iter().any(|row| row.len() != repr.n_columns)
        {
            return Err(GridError::InvalidLayout(format!(
                "cells do not match {}x{}",
                repr.n_rows, repr.n_columns
            )));
        }

        // Scanning each column from the top, once a token is seen every
        // cell below it must be occupied
        for column in 0..repr.n_columns {
            let mut seen_token = false;
            for row in &repr.cells {
                match row[column] {
                    Cell::Owner(_) => seen_token = true,
                    Cell::Empty if seen_token => {
                        return Err(GridError::InvalidLayout(format!(
                            "column {} has a gap below a token",
                            column
                        )));
                    }
                    Cell::Empty => {}
                }
            }
        }

        Ok(Self {
            n_rows: repr.n_rows,
            n_columns: repr.n_columns,
            cells: repr.cells,
        })
    }
}

/// Number of decimal digits needed to print `n`
pub(crate) fn digits(n: usize) -> usize {
    n.to_string().len()
}

impl Grid {
    /// Render the grid with every cell right-aligned to `width` characters
    pub fn render(&self, width: usize) -> String {
        let mut out = String::new();
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => format!("{:>width$}", ".", width = width),
                    Cell::Owner(id) => format!("{:>width$}", id, width = width),
                })
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    /// Width of the widest owner id currently on the grid (at least 1)
    pub fn cell_width(&self) -> usize {
        self.rows()
            .flatten()
            .filter_map(Cell::owner)
            .map(|id| digits(id as usize))
            .max()
            .unwrap_or(1)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.cell_width()))
    }
}
