//! Board engine for a sliding-tile number puzzle.
//!
//! A [`GameSession`] owns one square [`Board`] and plays turns on it: every move slides and merges
//! tiles toward one edge, checks the goal and loss conditions, and spawns a new tile from a seeded
//! generator so that a seed and a sequence of moves always replay the same game.
//!
//! ```
//! use numbers48::{Direction, GameSession, SessionConfig, State};
//!
//! let mut session = GameSession::new(SessionConfig::new(4, 7, 11))?;
//! session.start();
//! let turn = session.shift(Direction::Left);
//! assert_ne!(turn.state, State::NotStarted);
//! # Ok::<(), numbers48::Error>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{LossRule, Precedence, Rules, SessionConfig};
pub use engine::board::{Board, Idx};
pub use engine::direction::Direction;
pub use engine::session::{Cell, GameSession, State, Turn};
pub use engine::shift::{has_moves, Shift};
pub use engine::spawner::{initial_tile_count, Spawner};
pub use engine::tile::{Card, Tile};
pub use error::{ConfigError, Error, Result};
