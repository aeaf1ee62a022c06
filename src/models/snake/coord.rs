//! Board coordinates and the four direction flags.

/// Number of rows on the tracked board.
pub const GRID_ROWS: usize = 15;
/// Number of columns on the tracked board.
pub const GRID_COLS: usize = 17;

/// One cell position on the board. Rows grow southward, columns eastward.
/// Signed so that off-board neighbors and the absent-apple sentinel stay
/// representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell one step away in `direction`.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dr, dc) = direction.value();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Builds a coordinate from grid indices.
    ///
    /// # Panics
    ///
    /// Panics if an index exceeds `i32` range; the grid dimensions keep this
    /// unreachable.
    #[must_use]
    pub fn from_grid(row: usize, col: usize) -> Self {
        Self::new(
            i32::try_from(row).unwrap(),
            i32::try_from(col).unwrap(),
        )
    }

    /// Row and column as grid indices, or `None` when the cell is off the
    /// board.
    #[must_use]
    pub fn grid_index(self) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (row < GRID_ROWS && col < GRID_COLS).then_some((row, col))
    }

    #[must_use]
    pub fn in_board(self) -> bool {
        self.grid_index().is_some()
    }
}

/// Direction a snake can move in, encoded as mutually exclusive bit flags on
/// the wire. "No move" is bitmask 0, not a fifth variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const VARIANTS: &'static [Direction] =
        &[Self::North, Self::South, Self::East, Self::West];

    /// Row/column delta of a single step.
    #[must_use]
    pub const fn value(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Wire flag for this direction.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Direction::North => 1 << 3,
            Direction::South => 1 << 2,
            Direction::East => 1 << 1,
            Direction::West => 1 << 0,
        }
    }

    /// Decodes a bitmask holding exactly one direction flag.
    #[must_use]
    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|d| d.bit() == bits)
    }

    /// The first flagged direction in `VARIANTS` order, if any bit is set.
    #[must_use]
    pub fn first_set(bits: u32) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|d| bits & d.bit() != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_move_one_step() {
        let center = Coord::new(7, 4);
        assert_eq!(center.neighbor(Direction::North), Coord::new(6, 4));
        assert_eq!(center.neighbor(Direction::South), Coord::new(8, 4));
        assert_eq!(center.neighbor(Direction::East), Coord::new(7, 5));
        assert_eq!(center.neighbor(Direction::West), Coord::new(7, 3));
    }

    #[test]
    fn board_bounds() {
        assert!(Coord::new(0, 0).in_board());
        assert!(Coord::new(14, 16).in_board());
        assert!(!Coord::new(-1, 0).in_board());
        assert!(!Coord::new(0, -1).in_board());
        assert!(!Coord::new(15, 0).in_board());
        assert!(!Coord::new(0, 17).in_board());
    }

    #[test]
    fn bits_round_trip() {
        for direction in Direction::VARIANTS {
            assert_eq!(Direction::from_bits(direction.bit()), Some(*direction));
        }
        assert_eq!(Direction::from_bits(0), None);
        // two flags at once is not a decodable move
        assert_eq!(
            Direction::from_bits(Direction::North.bit() | Direction::West.bit()),
            None
        );
    }

    #[test]
    fn first_set_scans_north_first() {
        let bits = Direction::South.bit() | Direction::East.bit();
        assert_eq!(Direction::first_set(bits), Some(Direction::South));
        assert_eq!(Direction::first_set(0xF), Some(Direction::North));
        assert_eq!(Direction::first_set(0), None);
    }
}
