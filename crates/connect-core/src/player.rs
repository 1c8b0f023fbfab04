//! Player identity and cumulative score.

use crate::grid::{Grid, GridError, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant in a game session.
///
/// The score survives restarts and is only written by the game when a round
/// is won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (1-based, also the owner stored in grid cells)
    pub id: PlayerId,
    /// Rounds won so far
    pub score: u32,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self { id, score: 0 }
    }

    /// Drop one of this player's tokens into `column`.
    ///
    /// Returns the landing row; stacking errors are passed through unchanged.
    pub fn drop(&self, grid: &mut Grid, column: usize) -> Result<usize, GridError> {
        grid.stack(column, self.id)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_new_player_has_zero_score() {
        let player = Player::new(2);
        assert_eq!(player.id, 2);
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_drop_attributes_token() {
        let mut grid = Grid::new(6, 7);
        let player = Player::new(2);

        let row = player.drop(&mut grid, 4).unwrap();
        assert_eq!(row, 5);
        assert_eq!(grid.cell(5, 4), Cell::Owner(2));
    }

    #[test]
    fn test_drop_propagates_column_full() {
        let mut grid = Grid::new(1, 1);
        let player = Player::new(1);

        player.drop(&mut grid, 0).unwrap();
        assert_eq!(
            player.drop(&mut grid, 0),
            Err(GridError::ColumnFull { column: 0 })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::new(3).to_string(), "player 3");
    }
}
