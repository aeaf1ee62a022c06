pub mod detector;
pub mod predictor;
pub mod ranker;

use crate::models::snake::coord::{GRID_COLS, GRID_ROWS};

/// Per-cell occupancy weights for one frame.
pub type RatioMatrix = [[f64; GRID_COLS]; GRID_ROWS];
