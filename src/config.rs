use crate::engine::tile::Card;
use crate::error::{ConfigError, Result};

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 12;
pub const DEFAULT_SIZE: usize = 4;

pub const MIN_GOAL_EXPONENT: u32 = 2;
/// Largest exponent whose power of two still fits in a [`Card`].
pub const MAX_GOAL_EXPONENT: u32 = Card::BITS - 1;
pub const DEFAULT_GOAL_EXPONENT: u32 = 11;

pub const DEFAULT_SEED: u64 = 1;

/// Which outcome wins when a move both reaches the goal and ends the game.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Precedence {
    #[default]
    WinFirst,
    LossFirst,
}

/// When a game is considered lost.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LossRule {
    /// Every cell holds a tile after the move.
    #[default]
    BoardFull,
    /// Every cell holds a tile and no direction would merge anything.
    NoMovesLeft,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rules {
    pub precedence: Precedence,
    pub loss: LossRule,
    /// Spawn a tile even after a move that changed nothing.
    pub spawn_on_noop: bool,
    /// Draw spawns after the initial layout from the seeded generator.
    pub reproducible: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            precedence: Precedence::default(),
            loss: LossRule::default(),
            spawn_on_noop: false,
            reproducible: true,
        }
    }
}

impl Rules {
    /// The turn protocol of the classic desktop game: loss overrides a win, a full board loses,
    /// every move spawns, and later spawns are unseeded.
    pub fn classic() -> Self {
        Self {
            precedence: Precedence::LossFirst,
            loss: LossRule::BoardFull,
            spawn_on_noop: true,
            reproducible: false,
        }
    }
}

/// SessionConfig holds everything needed to start a game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    pub size: usize,
    pub seed: u64,
    pub goal_exponent: u32,
    pub rules: Rules,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: DEFAULT_SEED,
            goal_exponent: DEFAULT_GOAL_EXPONENT,
            rules: Rules::default(),
        }
    }
}

impl SessionConfig {
    pub fn new(size: usize, seed: u64, goal_exponent: u32) -> Self {
        Self {
            size,
            seed,
            goal_exponent,
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// `2^goal_exponent`. An exponent too large for a [`Card`] gives `Card::MAX`, which no tile can
    /// reach; [`SessionConfig::validate`] rejects such configs.
    pub fn goal_value(&self) -> Card {
        (1 as Card).checked_shl(self.goal_exponent).unwrap_or(Card::MAX)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::SizeOutOfRange {
                size: self.size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            }
            .into());
        }
        validate_seed(self.seed)?;
        validate_goal_exponent(self.goal_exponent, self.size)
    }
}

pub(crate) fn validate_seed(seed: u64) -> Result<()> {
    if seed == 0 {
        return Err(ConfigError::ZeroSeed.into());
    }
    Ok(())
}

/// A goal must be reachable on the board: at most one exponent per cell, and small enough for a
/// tile to hold.
pub(crate) fn validate_goal_exponent(exponent: u32, size: usize) -> Result<()> {
    let cells = u32::try_from(size * size).unwrap_or(u32::MAX);
    let max = cells.min(MAX_GOAL_EXPONENT);
    if !(MIN_GOAL_EXPONENT..=max).contains(&exponent) {
        return Err(ConfigError::GoalExponentOutOfRange {
            exponent,
            min: MIN_GOAL_EXPONENT,
            max,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults() -> Result<()> {
        let config = SessionConfig::default();
        config.validate()?;
        assert_eq!(config.goal_value(), 2048);
        Ok(())
    }

    #[rstest]
    #[case::too_small(SessionConfig::new(1, 1, 2), ConfigError::SizeOutOfRange { size: 1, min: MIN_SIZE, max: MAX_SIZE })]
    #[case::too_large(SessionConfig::new(13, 1, 2), ConfigError::SizeOutOfRange { size: 13, min: MIN_SIZE, max: MAX_SIZE })]
    #[case::zero_seed(SessionConfig::new(4, 0, 11), ConfigError::ZeroSeed)]
    #[case::goal_too_small(SessionConfig::new(4, 1, 1), ConfigError::GoalExponentOutOfRange { exponent: 1, min: 2, max: 16 })]
    #[case::goal_beyond_cells(SessionConfig::new(2, 1, 5), ConfigError::GoalExponentOutOfRange { exponent: 5, min: 2, max: 4 })]
    #[case::goal_beyond_card(SessionConfig::new(8, 1, 32), ConfigError::GoalExponentOutOfRange { exponent: 32, min: 2, max: 31 })]
    fn invalid(#[case] config: SessionConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate(), Err(Error::InvalidConfiguration(expected)));
    }

    #[rstest]
    #[case::two_by_two_max(SessionConfig::new(2, 99, 4))]
    #[case::large_seed(SessionConfig::new(4, u64::MAX, 16))]
    #[case::largest_goal(SessionConfig::new(MAX_SIZE, 1, 31))]
    fn valid(#[case] config: SessionConfig) -> Result<()> {
        config.validate()
    }

    #[rstest]
    #[case::one_past_card(32)]
    #[case::far_past_card(200)]
    fn unvalidated_goal_saturates(#[case] exponent: u32) {
        let config = SessionConfig::new(4, 1, exponent);
        assert_eq!(config.goal_value(), Card::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn largest_goal_fits() {
        assert_eq!(SessionConfig::new(MAX_SIZE, 1, MAX_GOAL_EXPONENT).goal_value(), 1 << 31);
    }
}
