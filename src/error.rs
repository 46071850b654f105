use thiserror;

use crate::engine::tile::Card;

/// The Result type for numbers48.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum Error {
    #[error("out of range ({row}, {column}) on a {size}x{size} board")]
    OutOfRange {
        row: usize,
        column: usize,
        size: usize,
    },

    #[error("invalid tile value {0}, must be 0 or a power of two")]
    InvalidTileValue(Card),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ConfigError {
    #[error("board size {size} outside supported range {min}..={max}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("goal exponent {exponent} outside supported range {min}..={max}")]
    GoalExponentOutOfRange { exponent: u32, min: u32, max: u32 },

    #[error("seed must be nonzero")]
    ZeroSeed,
}
