use crate::config::{self, LossRule, Precedence, SessionConfig};
use crate::error::Result;

use super::board::{Board, Idx};
use super::direction::Direction;
use super::shift;
use super::spawner::{initial_tile_count, Spawner};
use super::tile::Card;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum State {
    #[default]
    NotStarted,
    InProgress,
    Paused,
    Won,
    Lost,
}

impl State {
    /// Won and Lost accept nothing but a reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Paused => "paused",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        write!(f, "{}", s)
    }
}

/// Cell is the new value of one board position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cell {
    pub idx: Idx,
    pub value: Card,
}

/// Turn describes what a session call did to the board.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Turn {
    pub state: State,
    /// The move slid or merged at least one tile.
    pub changed: bool,
    pub goal_reached: bool,
    pub points: u64,
    /// Every cell whose value differs from before the call, in row-major order.
    pub changed_cells: Vec<Cell>,
}

impl Turn {
    fn unchanged(state: State) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }
}

/// GameSession sequences moves, win/loss checks and spawns on a single board.
///
/// The board is allocated once when the session is created and reused by every subsequent game.
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    spawner: Spawner,
    state: State,
    started_once: bool,
    score: u64,
    moves: usize,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let spawner = Spawner::new(config.seed);
        Self::with_spawner(config, spawner)
    }

    pub fn with_spawner(config: SessionConfig, spawner: Spawner) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Board::init_empty(config.size)?,
            config,
            spawner,
            state: State::NotStarted,
            started_once: false,
            score: 0,
            moves: 0,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn goal_value(&self) -> Card {
        self.config.goal_value()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn move_count(&self) -> usize {
        self.moves
    }

    /// Populate the board and begin play.
    pub fn start(&mut self) -> Turn {
        if self.state != State::NotStarted {
            log::debug!("ignoring start while {}", self.state);
            return Turn::unchanged(self.state);
        }
        let before = self.board.clone();
        let seed = self.config.seed;
        if self.started_once {
            self.spawner.populate_initial_reset(&mut self.board, seed);
        } else {
            let tile_count = initial_tile_count(seed, self.board.size());
            self.spawner.populate_initial(&mut self.board, seed, tile_count);
            self.started_once = true;
        }
        self.state = State::InProgress;
        log::info!(
            "started {0}x{0} game with seed {1}, goal {2}",
            self.config.size,
            seed,
            self.goal_value()
        );
        Turn {
            state: self.state,
            changed_cells: self.diff(&before),
            ..Turn::default()
        }
    }

    /// Clear the board and return to NotStarted, keeping seed and goal.
    pub fn reset(&mut self) {
        self.board.fill_with_zeros();
        self.state = State::NotStarted;
        self.score = 0;
        self.moves = 0;
        log::info!("game reset");
    }

    /// Reset with a new seed and goal exponent, validated against the board size.
    pub fn reset_with(&mut self, seed: u64, goal_exponent: u32) -> Result<()> {
        config::validate_seed(seed)?;
        config::validate_goal_exponent(goal_exponent, self.config.size)?;
        self.config.seed = seed;
        self.config.goal_exponent = goal_exponent;
        self.reset();
        Ok(())
    }

    pub fn pause(&mut self) -> State {
        if self.state == State::InProgress {
            self.state = State::Paused;
            log::debug!("game paused");
        }
        self.state
    }

    pub fn resume(&mut self) -> State {
        if self.state == State::Paused {
            self.state = State::InProgress;
            log::debug!("game resumed");
        }
        self.state
    }

    /// Play one turn: shift the board, decide win or loss, then spawn a tile if play continues.
    pub fn shift(&mut self, direction: Direction) -> Turn {
        if self.state != State::InProgress {
            log::debug!("ignoring {} while {}", direction, self.state);
            return Turn::unchanged(self.state);
        }
        let before = self.board.clone();
        let rules = self.config.rules;
        let goal_value = self.goal_value();
        let outcome = shift::apply(&mut self.board, &direction, goal_value);
        self.moves += 1;
        self.score += outcome.points;

        let won = outcome.goal_reached;
        let lost = match rules.loss {
            LossRule::BoardFull => self.board.is_full(),
            LossRule::NoMovesLeft => self.board.is_full() && !shift::has_moves(&self.board),
        };
        self.state = match (rules.precedence, won, lost) {
            (Precedence::WinFirst, true, _) => State::Won,
            (Precedence::LossFirst, _, true) => State::Lost,
            (_, true, _) => State::Won,
            (_, _, true) => State::Lost,
            _ => State::InProgress,
        };

        if self.state == State::InProgress && (outcome.changed || rules.spawn_on_noop) {
            let _ = self.spawner.spawn_one(&mut self.board, rules.reproducible);
        }
        if self.state.is_terminal() {
            log::info!("game {} after {} moves, score {}", self.state, self.moves, self.score);
        }

        Turn {
            state: self.state,
            changed: outcome.changed,
            goal_reached: outcome.goal_reached,
            points: outcome.points,
            changed_cells: self.diff(&before),
        }
    }

    fn diff(&self, before: &Board) -> Vec<Cell> {
        self.board
            .indices()
            .filter(|idx| before.value(idx) != self.board.value(idx))
            .map(|idx| Cell {
                idx,
                value: self.board.value(&idx),
            })
            .collect()
    }
}
