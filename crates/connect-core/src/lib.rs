//! Connect-N game engine
//!
//! This crate provides the core game logic for a gravity-fed connect-N board
//! game, including:
//! - The grid and its stacking rule
//! - Win detection along the four line axes
//! - Players and cumulative scores
//! - The game state machine with restart and observer notifications
//!
//! # Architecture
//!
//! The engine knows nothing about rendering or input. A presentation layer
//! attaches an [`Observer`], reads state back through the [`Game`] queries,
//! and forwards column choices to [`Game::drop`]. It can be compiled to:
//! - Native Rust for terminal or server front-ends
//! - WebAssembly for a browser front-end (feature `wasm`)
//!
//! # Modules
//!
//! - [`grid`]: Cell matrix and gravity stacking
//! - [`evaluator`]: Run detection around the last placed token
//! - [`player`]: Player identity and score
//! - [`game`]: Game state machine
//! - [`observer`]: State-change subscribers
//! - [`config`]: Board and rule configuration

pub mod config;
pub mod evaluator;
pub mod game;
pub mod grid;
pub mod observer;
pub mod player;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use evaluator::{Axis, Evaluator, WinningLine, DEFAULT_CONNECT_N};
pub use game::{Game, GamePhase, GameSnapshot, MoveOutcome};
pub use grid::{Cell, Grid, GridError, PlayerId};
pub use observer::{Observer, ObserverId};
pub use player::Player;
