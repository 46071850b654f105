use crate::config::{MAX_SIZE, MIN_SIZE};
use crate::error::{ConfigError, Error, Result};

use super::tile::{Card, Tile};

/// Idx addresses a board cell by (row, column).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Idx(pub usize, pub usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx({0},{1})", self.0, self.1)
    }
}

impl Idx {
    pub fn row(&self) -> usize {
        self.0
    }

    pub fn column(&self) -> usize {
        self.1
    }
}

/// Board is a square grid of tiles, allocated once and reused across games.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Allocate a `size` x `size` board with every cell empty.
    pub fn init_empty(size: usize) -> Result<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(ConfigError::SizeOutOfRange {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            }
            .into());
        }
        Ok(Self {
            size,
            cells: vec![Tile::EMPTY; size * size],
        })
    }

    /// Reset every cell to empty in place.
    pub fn fill_with_zeros(&mut self) {
        self.cells.iter_mut().for_each(|t| *t = Tile::EMPTY);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, column: usize) -> Result<Tile> {
        let offset = self.offset(row, column)?;
        Ok(self.cells[offset])
    }

    pub fn set(&mut self, row: usize, column: usize, value: Card) -> Result<()> {
        let offset = self.offset(row, column)?;
        if !Tile::is_valid_value(value) {
            return Err(Error::InvalidTileValue(value));
        }
        self.cells[offset] = Tile(value);
        Ok(())
    }

    /// True when no cell is empty. A full board may still have merges available, see
    /// [`crate::engine::shift::has_moves`].
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|t| !t.is_empty())
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Idx> {
        self.indices().filter(|idx| self.value(idx) == 0).collect()
    }

    pub fn max_value(&self) -> Card {
        self.cells.iter().map(|t| t.value()).max().unwrap_or(0)
    }

    /// Copy of every cell value, one `Vec` per row.
    pub fn snapshot(&self) -> Vec<Vec<Card>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|t| t.value()).collect())
            .collect()
    }

    /// All indices in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = Idx> {
        let size = self.size;
        (0..size * size).map(move |n| Idx(n / size, n % size))
    }

    #[cfg(test)]
    pub(crate) fn from_rows<const N: usize>(rows: [[Card; N]; N]) -> Self {
        Self {
            size: N,
            cells: rows.iter().flatten().map(|v| Tile(*v)).collect(),
        }
    }
}

// crate-internal access for the shift and spawn paths; indices come from the board itself
impl Board {
    pub(crate) fn value(&self, idx: &Idx) -> Card {
        self.cells[idx.0 * self.size + idx.1].value()
    }

    pub(crate) fn put(&mut self, idx: &Idx, value: Card) {
        self.cells[idx.0 * self.size + idx.1] = Tile(value);
    }

    fn offset(&self, row: usize, column: usize) -> Result<usize> {
        if row >= self.size || column >= self.size {
            return Err(Error::OutOfRange {
                row,
                column,
                size: self.size,
            });
        }
        Ok(row * self.size + column)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.max_value().to_string().len().max(1);
        for row in self.cells.chunks(self.size) {
            let line = row
                .iter()
                .map(|t| format!("{:>width$}", t.to_string(), width = width))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
