use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::types::{nd_index, square_cells};
use crate::*;

/// Square grid of cells with mines placed and neighbor counts computed.
#[derive(Clone, Debug, PartialEq)]
pub struct MineField {
    cells: Array2<Cell>,
    mine_count: CellCount,
    safe_tile: Option<Coord2>,
}

impl MineField {
    fn empty(size: Coord) -> Self {
        Self {
            cells: Array2::default(nd_index((size, size))),
            mine_count: 0,
            safe_tile: None,
        }
    }

    /// Builds a field with mines at exactly the given coordinates, without a safe tile.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut field = Self::empty(size);
        for &coords in mine_coords {
            field.validate_coords(coords)?;
        }
        field.place_mines(mine_coords.iter().copied());
        Ok(field)
    }

    /// Marks each coordinate as mined and bumps the counts around it.
    fn place_mines(&mut self, mine_coords: impl IntoIterator<Item = Coord2>) {
        for coords in mine_coords {
            if self[coords].has_mine {
                continue;
            }
            self[coords].has_mine = true;
            self.mine_count += 1;
            for neighbor in self.neighbors_of(coords) {
                self[neighbor].neighbor_mine_count += 1;
            }
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> Coord {
        Coord::try_from(self.cells.nrows()).unwrap_or(Coord::MAX)
    }

    pub fn total_cells(&self) -> CellCount {
        square_cells(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn safe_tile(&self) -> Option<Coord2> {
        self.safe_tile
    }

    /// The in-bounds 8-neighborhood of `coords`.
    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }
}

impl Index<Coord2> for MineField {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[nd_index(coords)]
    }
}

impl IndexMut<Coord2> for MineField {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[nd_index(coords)]
    }
}

pub trait MineFieldGenerator {
    fn generate(self, size: Coord, mines: CellCount) -> Result<MineField>;
}

/// Uniform placement over every cell outside the safe tile and its neighbors.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineFieldGenerator {
    seed: u64,
    safe_tile: Coord2,
}

impl RandomMineFieldGenerator {
    pub fn new(seed: u64, safe_tile: Coord2) -> Self {
        Self { seed, safe_tile }
    }
}

impl MineFieldGenerator for RandomMineFieldGenerator {
    fn generate(self, size: Coord, mines: CellCount) -> Result<MineField> {
        use rand::prelude::*;

        let capacity = square_cells(size).saturating_sub(9);
        if mines >= capacity {
            log::warn!(
                "Cannot keep start tile clear, requested {} mines on {}x{} board (limit {})",
                mines,
                size,
                size,
                capacity
            );
            return Err(GameError::TooManyMines);
        }

        let mut field = MineField::empty(size);
        let safe_tile = field.validate_coords(self.safe_tile)?;

        let mut safe_zone: Vec<Coord2> = field.neighbors_of(safe_tile).collect();
        safe_zone.push(safe_tile);

        let eligible: Vec<Coord2> = field
            .iter()
            .map(|(coords, _)| coords)
            .filter(|coords| !safe_zone.contains(coords))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let picks = rand::seq::index::sample(&mut rng, eligible.len(), usize::from(mines));
        field.place_mines(picks.into_iter().map(|i| eligible[i]));
        field.safe_tile = Some(safe_tile);

        log::debug!(
            "Generated {}x{} field with {} mines, safe tile {:?}",
            size,
            size,
            field.mine_count,
            safe_tile
        );
        Ok(field)
    }
}
