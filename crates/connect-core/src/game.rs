//! Core game state machine.
//!
//! This module contains the main `Game` struct: turn order, the legality
//! gate, win and draw detection, scoring, restart and observer fan-out.
//!
//! The engine is synchronous and assumes exclusive access. Callers that
//! accept moves from several sources must serialize them before they reach
//! [`Game::drop`] or [`Game::restart`].

use crate::config::{ConfigError, GameConfig};
use crate::evaluator::{Evaluator, WinningLine};
use crate::grid::{Grid, PlayerId};
use crate::observer::{Observer, ObserverId, Observers};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Moves are being accepted
    InProgress,

    /// A player completed a run
    Won { winner: PlayerId },

    /// The grid filled up without a winner
    Drawn,
}

/// Result of an accepted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Token placed, turn passed to the next player
    Placed {
        player: PlayerId,
        row: usize,
        column: usize,
    },

    /// Token placed and the round was won
    Won {
        player: PlayerId,
        row: usize,
        column: usize,
        line: WinningLine,
    },

    /// Token placed into the last empty cell
    Drawn {
        player: PlayerId,
        row: usize,
        column: usize,
    },
}

/// Serializable view of the game for pull-side observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub grid: Grid,
    pub players: Vec<Player>,
    pub current_player: PlayerId,
    pub phase: GamePhase,
    pub winning_line: Option<WinningLine>,
    pub move_count: usize,
}

impl GameSnapshot {
    /// Parse a snapshot, rejecting one whose grid does not fit its config
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        use serde::de::Error as _;

        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        snapshot
            .config
            .validate()
            .map_err(serde_json::Error::custom)?;
        if snapshot.grid.n_rows() != snapshot.config.n_rows
            || snapshot.grid.n_columns() != snapshot.config.n_columns
        {
            return Err(serde_json::Error::custom(format!(
                "grid is {}x{} but config is {}x{}",
                snapshot.grid.n_rows(),
                snapshot.grid.n_columns(),
                snapshot.config.n_rows,
                snapshot.config.n_columns
            )));
        }
        if snapshot.players.len() != snapshot.config.n_players {
            return Err(serde_json::Error::custom(
                "player list does not match n_players",
            ));
        }
        Ok(snapshot)
    }
}

/// A game session.
///
/// The player list and scores live as long as the session; everything else
/// is reset by [`Game::restart`].
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    players: Vec<Player>,
    grid: Grid,
    evaluator: Evaluator,
    /// Index into `players` of whoever moves next
    current: usize,
    phase: GamePhase,
    winning_line: Option<WinningLine>,
    move_count: usize,
    observers: Observers,
}

impl Game {
    /// Create a new game, rejecting configurations that cannot be played
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Create a standard 6x7 connect-4 game for two players
    pub fn standard() -> Self {
        Self::from_valid_config(GameConfig::default())
    }

    fn from_valid_config(config: GameConfig) -> Self {
        let players = (1..=config.n_players)
            .map(|id| Player::new(id as PlayerId))
            .collect();

        Self {
            config,
            players,
            grid: Grid::new(config.n_rows, config.n_columns),
            evaluator: Evaluator::new(config.connect_n),
            current: 0,
            phase: GamePhase::InProgress,
            winning_line: None,
            move_count: 0,
            observers: Observers::default(),
        }
    }

    // ==================== Queries ====================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the grid, indexed `[row][column]`
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All players in turn order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The player who moves next
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Cumulative scores in turn order
    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.score).collect()
    }

    /// Scores formatted for display, e.g. `"1 / 0"`
    pub fn score_line(&self) -> String {
        self.players
            .iter()
            .map(|p| p.score.to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Check if the round is over
    pub fn is_finished(&self) -> bool {
        !matches!(self.phase, GamePhase::InProgress)
    }

    /// Get the winner if the round was won
    pub fn winner(&self) -> Option<&Player> {
        match self.phase {
            GamePhase::Won { winner } => self.get_player(winner),
            _ => None,
        }
    }

    /// The run that ended the round, if it was won
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    /// Number of tokens placed since the last restart
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Whether `drop(column)` would currently be accepted
    pub fn is_legal(&self, column: usize) -> bool {
        self.phase == GamePhase::InProgress && !self.grid.is_column_full(column)
    }

    /// All columns that would currently accept a token
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.config.n_columns)
            .filter(|&column| self.is_legal(column))
            .collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config,
            grid: self.grid.clone(),
            players: self.players.clone(),
            current_player: self.current_player().id,
            phase: self.phase,
            winning_line: self.winning_line,
            move_count: self.move_count,
        }
    }

    /// Snapshot serialized as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    // ==================== Commands ====================

    /// Drop the current player's token into `column`.
    ///
    /// Moves after the round ended, into a full column or outside the grid
    /// are ignored: nothing changes, no observer is notified and `None` is
    /// returned. Every accepted move notifies observers exactly once.
    pub fn drop(&mut self, column: usize) -> Option<MoveOutcome> {
        if !self.is_legal(column) {
            debug!(column, phase = ?self.phase, "Ignoring illegal drop");
            return None;
        }

        let player = self.players[self.current].id;
        let row = match self.players[self.current].drop(&mut self.grid, column) {
            Ok(row) => row,
            Err(e) => {
                // The legality gate should make this unreachable
                error!(column, "Stack failed after legality check: {}", e);
                return None;
            }
        };
        self.move_count += 1;
        debug!(player, row, column, "Token dropped");

        let outcome = if let Some(line) = self.evaluator.winning_line(&self.grid, row, column) {
            self.players[self.current].score += 1;
            self.phase = GamePhase::Won { winner: player };
            self.winning_line = Some(line);
            info!(player, axis = ?line.axis, "Round won");

            MoveOutcome::Won {
                player,
                row,
                column,
                line,
            }
        } else if self.grid.is_filled() {
            self.phase = GamePhase::Drawn;
            info!(moves = self.move_count, "Round drawn");

            MoveOutcome::Drawn {
                player,
                row,
                column,
            }
        } else {
            self.current = (self.current + 1) % self.players.len();

            MoveOutcome::Placed {
                player,
                row,
                column,
            }
        };

        self.notify();
        Some(outcome)
    }

    /// Start a new round with an empty grid, keeping players and scores.
    ///
    /// Allowed at any time, including mid-round.
    pub fn restart(&mut self) {
        self.grid = Grid::new(self.config.n_rows, self.config.n_columns);
        self.evaluator = Evaluator::new(self.config.connect_n);
        self.current = 0;
        self.phase = GamePhase::InProgress;
        self.winning_line = None;
        self.move_count = 0;
        debug!(scores = %self.score_line(), "Game restarted");

        self.notify();
    }

    // ==================== Observers ====================

    /// Subscribe to state changes; observers are called in attach order
    pub fn attach<O>(&mut self, observer: O) -> ObserverId
    where
        O: Observer + 'static,
    {
        self.observers.attach(Box::new(observer))
    }

    /// Unsubscribe; returns false if the handle was not attached
    pub fn detach(&mut self, id: ObserverId) -> bool {
        self.observers.detach(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Call every attached observer once
    pub fn notify(&mut self) {
        let mut entries = self.observers.take_entries();
        for (_, observer) in &mut entries {
            observer.on_update(self);
        }
        self.observers.restore_entries(entries);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}
