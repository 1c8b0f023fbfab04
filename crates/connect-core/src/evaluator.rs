//! Win detection.
//!
//! The evaluator only ever looks at the cell that was just filled and walks
//! outward from it along the four axes, so a check costs O(connect_n) per
//! axis rather than a full board scan.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Default run length needed to win
pub const DEFAULT_CONNECT_N: usize = 4;

/// The four straight-line directions a run can follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right (`\`)
    Diagonal,
    /// Bottom-left to top-right (`/`)
    AntiDiagonal,
}

impl Axis {
    /// All axes, in evaluation order
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Step along this axis as `(Δrow, Δcolumn)`
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (-1, 1),
        }
    }
}

/// A completed run, described by its two end cells as `(row, column)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    pub axis: Axis,
    pub start: (usize, usize),
    pub end: (usize, usize),
    /// Total run length (may exceed connect_n)
    pub length: usize,
}

/// Checks whether a freshly placed token completes a run.
///
/// Only constructible through [`Evaluator::new`], which rejects thresholds
/// below 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    connect_n: usize,
}

impl Evaluator {
    pub fn new(connect_n: usize) -> Self {
        assert!(connect_n >= 2, "connect_n must be at least 2");
        Self { connect_n }
    }

    pub fn connect_n(&self) -> usize {
        self.connect_n
    }

    /// Whether the cell at `(row, column)` is part of a winning run.
    ///
    /// Empty cells and coordinates outside the grid never win.
    pub fn check(&self, grid: &Grid, row: usize, column: usize) -> bool {
        self.winning_line(grid, row, column).is_some()
    }

    /// Length of the run through `(row, column)` along one axis.
    ///
    /// Returns 0 for an empty or out-of-range cell.
    pub fn run_length(&self, grid: &Grid, row: usize, column: usize, axis: Axis) -> usize {
        match grid.get(row, column) {
            Some(cell) if !cell.is_empty() => {
                let (dr, dc) = axis.delta();
                let forward = count_consecutive(grid, row, column, dr, dc);
                let backward = count_consecutive(grid, row, column, -dr, -dc);
                // The pivot is counted by both directions
                forward + backward - 1
            }
            _ => 0,
        }
    }

    /// The first run through `(row, column)` that reaches `connect_n`, if any
    pub fn winning_line(&self, grid: &Grid, row: usize, column: usize) -> Option<WinningLine> {
        let cell = grid.get(row, column)?;
        if cell.is_empty() {
            return None;
        }

        for axis in Axis::ALL {
            let (dr, dc) = axis.delta();
            let forward = count_consecutive(grid, row, column, dr, dc);
            let backward = count_consecutive(grid, row, column, -dr, -dc);
            let length = forward + backward - 1;

            if length >= self.connect_n {
                let offset = |steps: usize, dr: isize, dc: isize| {
                    let steps = steps as isize - 1;
                    (
                        (row as isize + dr * steps) as usize,
                        (column as isize + dc * steps) as usize,
                    )
                };
                return Some(WinningLine {
                    axis,
                    start: offset(backward, -dr, -dc),
                    end: offset(forward, dr, dc),
                    length,
                });
            }
        }

        None
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_N)
    }
}

/// Count same-owner cells starting at the pivot (inclusive) and stepping by
/// `(dr, dc)` until the owner changes or the grid edge is reached.
fn count_consecutive(grid: &Grid, row: usize, column: usize, dr: isize, dc: isize) -> usize {
    let owner = grid.cell(row, column);
    let limit = grid.n_rows().max(grid.n_columns());

    let mut count = 1;
    let (mut r, mut c) = (row as isize, column as isize);
    while count < limit {
        r += dr;
        c += dc;
        if !grid.in_bounds(r, c) || grid.cell(r as usize, c as usize) != owner {
            break;
        }
        count += 1;
    }
    count
}
