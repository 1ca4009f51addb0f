use core::slice;

/// Single coordinate axis, used for rows, columns and the board side.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Number of cells on a square board with the given side.
pub(crate) const fn square_cells(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

/// `ndarray` index of a cell.
pub(crate) fn nd_index((row, col): Coord2) -> [usize; 2] {
    [row.into(), col.into()]
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up to 8 in-bounds neighbors of a cell on a square board.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    offsets: slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            offsets: OFFSETS.iter(),
        }
    }
}

/// `center` moved by `offset`, if that stays on the board.
fn shift(center: Coord2, (d_row, d_col): (i8, i8), size: Coord) -> Option<Coord2> {
    let row = center.0.checked_add_signed(d_row).filter(|&row| row < size)?;
    let col = center.1.checked_add_signed(d_col).filter(|&col| col < size)?;
    Some((row, col))
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, size) = (self.center, self.size);
        self.offsets.find_map(|&offset| shift(center, offset, size))
    }
}
