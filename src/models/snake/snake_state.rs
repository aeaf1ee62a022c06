//! Authoritative in-memory model of the tracked snake game.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, warn};

use super::coord::{Coord, Direction, GRID_COLS, GRID_ROWS};

/// Body of the tracked snake at process start, rear first.
const INITIAL_BODY: [Coord; 4] = [
    Coord::new(7, 1),
    Coord::new(7, 2),
    Coord::new(7, 3),
    Coord::new(7, 4),
];

/// Apple position at process start.
const INITIAL_APPLE: Coord = Coord::new(7, 12);

/// Sentinel coordinate meaning "no apple on the board".
pub const APPLE_GONE: Coord = Coord::new(-1, -1);

/// Contents of one board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Body,
    Head,
    Apple,
}

/// Board grid, body sequence, score, apple location and the pending-move
/// bitmask. The body sequence is ordered front (head) to rear; the grid and
/// the sequence always agree.
#[derive(Clone, Debug)]
pub struct SnakeState {
    grid: [[Cell; GRID_COLS]; GRID_ROWS],
    body: VecDeque<Coord>,
    score: i32,
    apple: Coord,
    pending_move: u32,
}

impl SnakeState {
    /// Lays out the fixed initial position: a four-segment snake, the apple
    /// at its reference cell, score 0 and East pending.
    #[must_use]
    pub fn new() -> Self {
        let mut state = Self {
            grid: [[Cell::Empty; GRID_COLS]; GRID_ROWS],
            body: VecDeque::with_capacity(INITIAL_BODY.len()),
            score: 0,
            apple: INITIAL_APPLE,
            pending_move: Direction::East.bit(),
        };
        for segment in INITIAL_BODY {
            state.set_cell(segment, Cell::Body);
            state.body.push_front(segment);
        }
        if let Some(&front) = state.body.front() {
            state.set_cell(front, Cell::Head);
        }
        state.set_cell(INITIAL_APPLE, Cell::Apple);
        state
    }

    /// Commits one inferred move: the rear segment vacates, the old front
    /// becomes plain body, the head advances one cell in `move_bits`.
    /// Landing on the apple cell increments the score and resets the apple
    /// to [`APPLE_GONE`].
    ///
    /// A bitmask with several directions set is logged and resolved to the
    /// first flag in North, South, East, West order. Bitmask 0 still removes
    /// the rear and demotes the front before stopping; callers see that as
    /// the documented no-direction behavior, not as a no-op.
    pub fn advance(&mut self, move_bits: u32) {
        if move_bits.count_ones() > 1 {
            warn!("transition received bitmask {move_bits:#04x} with more than one direction set");
        }

        let Some(rear) = self.body.pop_back() else {
            debug!("transition on an exhausted body");
            return;
        };
        self.set_cell(rear, Cell::Empty);

        let Some(&front) = self.body.front() else {
            debug!("body empty after rear removal; no front to advance");
            return;
        };
        self.set_cell(front, Cell::Body);
        self.pending_move = 0;

        let Some(direction) = Direction::first_set(move_bits) else {
            return;
        };
        let next = front.neighbor(direction);
        if !next.in_board() {
            debug!(
                "head stepped off the board to ({}, {})",
                next.row, next.col
            );
        }
        // apple test must read the destination before the head lands on it
        let ate = self.cell(next) == Some(Cell::Apple);
        self.set_cell(next, Cell::Head);
        if ate {
            self.score += 1;
            self.apple = APPLE_GONE;
        }
        self.body.push_front(next);
    }

    /// Bitmask of the directions whose destination cell is enterable: empty,
    /// apple, or the rear cell that vacates on the next transition.
    #[must_use]
    pub fn possible_moves(&self) -> u32 {
        let (Some(&front), Some(&rear)) = (self.body.front(), self.body.back()) else {
            return 0;
        };
        let mut moves = 0;
        for &direction in Direction::VARIANTS {
            let next = front.neighbor(direction);
            let enterable = match self.cell(next) {
                Some(Cell::Empty | Cell::Apple) => true,
                Some(Cell::Body | Cell::Head) => next == rear,
                None => false,
            };
            if enterable {
                moves |= direction.bit();
            }
        }
        moves
    }

    /// Overwrites the score from an observation.
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Overwrites the apple location from an observation, stamping the cell
    /// on the grid when the apple is present.
    pub fn set_apple(&mut self, apple: Coord) {
        self.apple = apple;
        self.set_cell(apple, Cell::Apple);
    }

    #[must_use]
    pub fn get_score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn get_apple(&self) -> Coord {
        self.apple
    }

    #[must_use]
    pub fn get_pending_move(&self) -> u32 {
        self.pending_move
    }

    /// Body sequence, front (head) first.
    #[must_use]
    pub fn get_body(&self) -> &VecDeque<Coord> {
        &self.body
    }

    #[must_use]
    pub fn get_head(&self) -> Option<Coord> {
        self.body.front().copied()
    }

    #[must_use]
    pub fn get_rear(&self) -> Option<Coord> {
        self.body.back().copied()
    }

    #[must_use]
    pub fn get_grid(&self) -> &[[Cell; GRID_COLS]; GRID_ROWS] {
        &self.grid
    }

    /// Cell contents, or `None` off the board.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        coord
            .grid_index()
            .map(|(row, col)| self.grid[row][col])
    }

    fn set_cell(&mut self, coord: Coord, cell: Cell) {
        if let Some((row, col)) = coord.grid_index() {
            self.grid[row][col] = cell;
        }
    }
}

impl Default for SnakeState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bitmask: {:#04x}", self.pending_move)?;
        writeln!(f, "score: {}", self.score)?;
        writeln!(f, "apple: ({}, {})", self.apple.row, self.apple.col)?;
        for row in &self.grid {
            for cell in row {
                let glyph = match cell {
                    Cell::Empty => '.',
                    Cell::Body => 'S',
                    Cell::Head => 'H',
                    Cell::Apple => 'A',
                };
                write!(f, "{glyph} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "body rear -> front:")?;
        for segment in self.body.iter().rev() {
            write!(f, " ({}, {})", segment.row, segment.col)?;
        }
        Ok(())
    }
}
