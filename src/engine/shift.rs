use super::board::{Board, Idx};
use super::direction::Direction;
use super::tile::Card;

/// Shift is the outcome of sliding a board in one direction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Shift {
    /// At least one tile moved or merged.
    pub changed: bool,
    /// Some tile on the board is at or above the goal value after the move.
    pub goal_reached: bool,
    /// Sum of the values produced by merges during the move.
    pub points: u64,
}

/// Slide and merge every line of `board` toward `direction`, then report whether the goal value is
/// present. The board is always left in its fully shifted state.
pub fn apply(board: &mut Board, direction: &Direction, goal_value: Card) -> Shift {
    let mut shift = Shift::default();
    let idxs = Indices::new(board.size(), *direction).collect::<Vec<Idx>>();
    for line in idxs.chunks(board.size()) {
        let values = line.iter().map(|idx| board.value(idx)).collect::<Vec<Card>>();
        let (slid, points) = slide_line(&values);
        if slid != values {
            log::trace!("{} line {:?} -> {:?}", direction, values, slid);
            shift.changed = true;
            for (idx, value) in line.iter().zip(slid) {
                board.put(idx, value);
            }
        }
        shift.points += points;
    }
    shift.goal_reached = board.max_value() >= goal_value;
    log::debug!(
        "shifted {}: changed={} goal_reached={} points={}",
        direction,
        shift.changed,
        shift.goal_reached,
        shift.points
    );
    shift
}

/// True if shifting in any direction would change the board.
pub fn has_moves(board: &Board) -> bool {
    Direction::ALL.iter().any(|direction| {
        Indices::new(board.size(), *direction)
            .collect::<Vec<Idx>>()
            .chunks(board.size())
            .any(|line| {
                let values = line.iter().map(|idx| board.value(idx)).collect::<Vec<Card>>();
                slide_line(&values).0 != values
            })
    })
}

/// Slide one line of values toward index 0 and merge equal neighbours once, returning the new line
/// and the points scored by its merges.
pub(crate) fn slide_line(values: &[Card]) -> (Vec<Card>, u64) {
    let mut compacted = values.iter().copied().filter(|v| *v != 0).peekable();
    let mut slid = Vec::with_capacity(values.len());
    let mut points = 0;
    while let Some(pivot) = compacted.next() {
        // a merged tile is pushed and both sources consumed, so it is never compared again;
        // a pair whose double would not fit in a Card stays unmerged
        match pivot.checked_mul(2) {
            Some(merged) if compacted.peek() == Some(&pivot) => {
                let _ = compacted.next();
                points += u64::from(merged);
                slid.push(merged);
            }
            _ => slid.push(pivot),
        }
    }
    slid.resize(values.len(), 0);
    (slid, points)
}

// Indices iterates a board's cells one line at a time, each line ordered from the edge tiles move
// toward to the opposite edge.
struct Indices {
    direction: Direction,
    size: usize,
    line: usize,
    pos: usize,
}

impl Indices {
    fn new(size: usize, direction: Direction) -> Self {
        Indices {
            direction,
            size,
            line: 0,
            pos: 0,
        }
    }
}

impl Iterator for Indices {
    type Item = Idx;

    fn next(&mut self) -> Option<Self::Item> {
        if self.line == self.size {
            return None;
        }
        let far = self.size - 1 - self.pos;
        let idx = match self.direction {
            Direction::Left => Idx(self.line, self.pos),
            Direction::Right => Idx(self.line, far),
            Direction::Up => Idx(self.pos, self.line),
            Direction::Down => Idx(far, self.line),
        };
        if self.pos == self.size - 1 {
            self.pos = 0;
            self.line += 1;
        } else {
            self.pos += 1;
        }
        Some(idx)
    }
}
