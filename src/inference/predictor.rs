//! Predictive ratio builder: expected occupancy derived from current state.

use crate::error::TrackerError;
use crate::models::snake::coord::{Coord, Direction};
use crate::models::snake::snake_state::SnakeState;

use super::RatioMatrix;

/// Weight of a cell the head could step into next.
pub const NEIGHBOR_WEIGHT: f64 = 0.25;
/// Weight of a cell the body occupies.
pub const OCCUPIED_WEIGHT: f64 = 1.0;

/// Fills `ratios` with the expected occupancy of the next frame and returns
/// the coordinate that was the head before the most recent transition.
///
/// Every in-board neighbor of the head gets [`NEIGHBOR_WEIGHT`], every body
/// cell [`OCCUPIED_WEIGHT`] (occupied cells dominate a colliding neighbor
/// weight), and the rear is forced back to [`NEIGHBOR_WEIGHT`] because it
/// vacates on the next transition.
///
/// # Errors
///
/// [`TrackerError::BodyTooShort`] when the body has fewer than two segments;
/// the previous head does not exist then.
pub fn build_logic_ratios(
    state: &SnakeState,
    ratios: &mut RatioMatrix,
) -> Result<Coord, TrackerError> {
    let body = state.get_body();
    let (Some(&head), Some(&last_head), Some(&rear)) =
        (body.front(), body.get(1), body.back())
    else {
        return Err(TrackerError::BodyTooShort(body.len()));
    };

    for row in ratios.iter_mut() {
        for weight in row.iter_mut() {
            *weight = 0.0;
        }
    }

    for &direction in Direction::VARIANTS {
        if let Some((row, col)) = head.neighbor(direction).grid_index() {
            ratios[row][col] = NEIGHBOR_WEIGHT;
        }
    }

    for segment in body {
        if let Some((row, col)) = segment.grid_index() {
            ratios[row][col] = OCCUPIED_WEIGHT;
        }
    }

    if let Some((row, col)) = rear.grid_index() {
        ratios[row][col] = NEIGHBOR_WEIGHT;
    }

    Ok(last_head)
}
