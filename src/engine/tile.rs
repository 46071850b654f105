pub type Card = u32;

/// Tile is the value held by a single board cell; zero means the cell is empty.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Tile(pub(crate) Card);

impl Tile {
    pub const EMPTY: Tile = Tile(0);

    pub fn value(&self) -> Card {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Values a tile may hold: zero, or a power of two.
    pub(crate) fn is_valid_value(value: Card) -> bool {
        value == 0 || value.is_power_of_two()
    }
}

impl From<Tile> for Card {
    fn from(tile: Tile) -> Card {
        tile.0
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
