//! Input handling: turns typed commands into engine calls.

use connect_core::Game;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Columns are numbered from 1")]
    ZeroColumn,

    #[error("Unknown command: {0}")]
    Unknown(String),
}

/// A single line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Drop into a 0-based column
    Drop(usize),
    Restart,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    /// Columns are typed 1-based, as they are labelled on screen
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        match input.to_ascii_lowercase().as_str() {
            "r" | "restart" => Ok(Command::Restart),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => match other.parse::<usize>() {
                Ok(0) => Err(CommandError::ZeroColumn),
                Ok(column) => Ok(Command::Drop(column - 1)),
                Err(_) => Err(CommandError::Unknown(input.to_string())),
            },
        }
    }
}

/// Forwards player input to the game
pub struct Controller {
    game: Game,
}

impl Controller {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// A click on a column
    pub fn click(&mut self, column: usize) {
        if self.game.drop(column).is_none() {
            warn!("Column {} is not playable right now", column + 1);
        }
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// Apply a command; returns false once the session should end
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Drop(column) => self.click(column),
            Command::Restart => self.restart(),
            Command::Quit => return false,
        }
        true
    }

    /// Parse and apply one line of input
    pub fn handle_line(&mut self, line: &str) -> Result<bool, CommandError> {
        let command: Command = line.parse()?;
        Ok(self.handle(command))
    }
}
