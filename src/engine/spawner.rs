use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::board::{Board, Idx};
use super::tile::Card;

const NEW_CARD_CHOICES: [Card; 2] = [2, 4];
const NEW_CARD_WEIGHTS: [u8; 2] = [9, 1];

/// Number of tiles placed when a game starts: two, plus one more for every 25 of seed magnitude,
/// never covering more than half the board.
pub fn initial_tile_count(seed: u64, size: usize) -> usize {
    let extra = usize::try_from(seed / 25).unwrap_or(usize::MAX);
    2usize
        .saturating_add(extra)
        .min(size * size / 2)
        .max(1)
}

/// Spawner places new tiles into empty board cells.
///
/// Two generators are kept: a seeded one that makes a game reproducible from its seed, and an
/// unseeded one for callers that want later spawns to vary between runs.
pub struct Spawner {
    seeded: ChaCha8Rng,
    unseeded: Box<dyn RngCore>,
    weights: WeightedIndex<u8>,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self::with_unseeded(seed, StdRng::from_entropy())
    }

    /// Use the given generator for unseeded spawns.
    pub fn with_unseeded(seed: u64, unseeded: impl RngCore + 'static) -> Self {
        Self {
            seeded: ChaCha8Rng::seed_from_u64(seed),
            unseeded: Box::new(unseeded),
            weights: WeightedIndex::new(NEW_CARD_WEIGHTS)
                .expect("NEW_CARD_WEIGHTS should never be empty"),
        }
    }

    /// Reseed, then place `tile_count` tiles on the board. Stops early if the board fills up.
    pub fn populate_initial(&mut self, board: &mut Board, seed: u64, tile_count: usize) {
        self.seeded = ChaCha8Rng::seed_from_u64(seed);
        let placed = (0..tile_count)
            .map_while(|_| self.spawn_one(board, true))
            .count();
        log::debug!("populated {} of {} initial tiles from seed {}", placed, tile_count, seed);
    }

    /// Clear a previously used board and populate it as a fresh game would be.
    pub fn populate_initial_reset(&mut self, board: &mut Board, seed: u64) {
        board.fill_with_zeros();
        let tile_count = initial_tile_count(seed, board.size());
        self.populate_initial(board, seed, tile_count);
    }

    /// Place one tile into a uniformly chosen empty cell and return where it went. Does nothing on
    /// a full board.
    pub fn spawn_one(&mut self, board: &mut Board, deterministic: bool) -> Option<(Idx, Card)> {
        let rng: &mut (dyn RngCore + 'static) = if deterministic {
            &mut self.seeded
        } else {
            self.unseeded.as_mut()
        };
        let empty = board.empty_cells();
        let idx = *empty.choose(&mut *rng)?;
        let value = NEW_CARD_CHOICES[self.weights.sample(&mut *rng)];
        board.put(&idx, value);
        log::trace!("spawned {} at {}", value, idx);
        Some((idx, value))
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rstest::*;

    use super::*;

    fn spawner(seed: u64) -> Spawner {
        Spawner::with_unseeded(seed, SmallRng::seed_from_u64(42))
    }

    fn tiles(board: &Board) -> Vec<Card> {
        board
            .snapshot()
            .into_iter()
            .flatten()
            .filter(|v| *v != 0)
            .collect()
    }

    #[rstest]
    #[case::low_seed(1, 4, 2)]
    #[case::just_below(24, 4, 2)]
    #[case::quarter(25, 4, 3)]
    #[case::half(50, 4, 4)]
    #[case::top_of_range(99, 4, 5)]
    #[case::small_board(99, 2, 2)]
    #[case::huge_seed(u64::MAX, 3, 4)]
    fn tile_count(#[case] seed: u64, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(initial_tile_count(seed, size), expected);
    }

    #[test]
    fn populate_initial() {
        let mut board = Board::init_empty(4).expect("valid size");
        spawner(7).populate_initial(&mut board, 7, 5);
        let placed = tiles(&board);
        assert_eq!(placed.len(), 5);
        assert!(placed.iter().all(|v| *v == 2 || *v == 4));
    }

    #[test]
    fn populate_initial_stops_when_full() {
        let mut board = Board::init_empty(2).expect("valid size");
        spawner(3).populate_initial(&mut board, 3, 10);
        assert!(board.is_full());
    }

    #[test]
    fn same_seed_same_layout() {
        let mut a = Board::init_empty(4).expect("valid size");
        let mut b = Board::init_empty(4).expect("valid size");
        spawner(11).populate_initial(&mut a, 11, 3);
        Spawner::with_unseeded(11, SmallRng::seed_from_u64(9000)).populate_initial(&mut b, 11, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn reset_matches_fresh_start() {
        let seed = 42;
        let mut fresh = Board::init_empty(4).expect("valid size");
        spawner(seed).populate_initial(&mut fresh, seed, initial_tile_count(seed, 4));

        let mut reused = Board::from_rows([[2, 4, 8, 16], [0, 0, 2, 0], [4, 0, 0, 0], [0, 0, 0, 64]]);
        let mut other = spawner(5);
        let _ = other.spawn_one(&mut reused, true);
        other.populate_initial_reset(&mut reused, seed);

        assert_eq!(fresh, reused);
    }

    #[test]
    fn spawn_one_fills_only_empty_cells() {
        let mut board = Board::from_rows([[2, 4, 8], [16, 0, 32], [64, 128, 256]]);
        let spawned = spawner(1).spawn_one(&mut board, true);
        let (idx, value) = spawned.expect("one cell is empty");
        assert_eq!(idx, Idx(1, 1));
        assert!(value == 2 || value == 4);
        assert_eq!(board.value(&Idx(1, 1)), value);
        assert!(board.is_full());
    }

    #[rstest]
    #[case::seeded(true)]
    #[case::unseeded(false)]
    fn spawn_one_on_full_board(#[case] deterministic: bool) {
        let full = Board::from_rows([[2, 4], [8, 16]]);
        let mut board = full.clone();
        assert_eq!(spawner(1).spawn_one(&mut board, deterministic), None);
        assert_eq!(board, full);
    }

    #[test]
    fn unseeded_does_not_advance_seeded() {
        let mut a = Board::init_empty(4).expect("valid size");
        let mut b = Board::init_empty(4).expect("valid size");
        let mut with_unseeded = spawner(8);
        let mut plain = spawner(8);

        let _ = with_unseeded.spawn_one(&mut Board::init_empty(4).expect("valid size"), false);
        for _ in 0..4 {
            let _ = with_unseeded.spawn_one(&mut a, true);
            let _ = plain.spawn_one(&mut b, true);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn value_distribution() {
        let mut spawner = spawner(1234);
        let mut fours = 0;
        for _ in 0..1000 {
            let mut board = Board::init_empty(2).expect("valid size");
            if let Some((_, 4)) = spawner.spawn_one(&mut board, true) {
                fours += 1;
            }
        }
        // weights are 9:1
        assert!((50..=150).contains(&fours), "{} fours", fours);
    }
}
