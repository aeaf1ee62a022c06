//! Move inference: resolve ranked candidates into one direction.

use log::debug;

use crate::models::snake::coord::{Coord, Direction};
use crate::models::snake::snake_state::SnakeState;

use super::ranker::CandidateHeap;

/// Extra pops granted on top of the score; keeps a long snake from scanning
/// the whole heap.
const POP_MARGIN: i32 = 4;

/// Pops candidates best-first and resolves them against the head's four
/// neighbors. A candidate equal to the current rear zeroes the direction
/// mask for this frame; a candidate equal to a neighbor other than
/// `last_head` decides the move and stops the scan. Returns the direction
/// bitmask, or 0 when nothing decides.
#[must_use]
pub fn determine_move(
    state: &SnakeState,
    candidates: &mut CandidateHeap,
    last_head: Coord,
) -> u32 {
    let (Some(head), Some(rear)) = (state.get_head(), state.get_rear()) else {
        debug!("no body to infer a move for");
        return 0;
    };

    let neighbors = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ]
    .map(|direction| (direction, head.neighbor(direction)));

    let mut detected = 0;
    let mut mask = 0xF;

    for _ in 0..(state.get_score() + POP_MARGIN) {
        let Some((_, candidate)) = candidates.pop() else {
            break;
        };
        if candidate == rear {
            // a ranked rear cell marks this observation as unreliable
            mask = 0;
        }
        if let Some(&(direction, _)) = neighbors
            .iter()
            .find(|&&(_, cell)| cell == candidate && cell != last_head)
        {
            detected = direction.bit();
            break;
        }
    }

    detected & mask
}

#[cfg(test)]
mod tests {
    use crate::inference::predictor::build_logic_ratios;
    use crate::inference::ranker::rank_candidates;
    use crate::models::snake::coord::{GRID_COLS, GRID_ROWS};

    use super::*;

    #[test]
    fn initial_frame_resolves_east() {
        let state = SnakeState::new();
        let mut logic = [[0.0; GRID_COLS]; GRID_ROWS];
        let last_head = build_logic_ratios(&state, &mut logic).unwrap();
        // a sensor that agrees exactly with the prediction
        let sensor = logic;
        let mut candidates = rank_candidates(&sensor, &mut logic);

        let detected = determine_move(&state, &mut candidates, last_head);
        assert_eq!(detected, Direction::East.bit());
    }

    #[test]
    fn empty_heap_resolves_nothing() {
        let state = SnakeState::new();
        let mut candidates = CandidateHeap::new();
        let detected = determine_move(&state, &mut candidates, Coord::new(7, 3));
        assert_eq!(detected, 0);
    }

    #[test]
    fn vacated_cell_is_never_reselected() {
        let state = SnakeState::new();
        let mut candidates = CandidateHeap::new();
        // only the cell the head just left
        candidates.push(1.0, Coord::new(7, 3));
        let detected = determine_move(&state, &mut candidates, Coord::new(7, 3));
        assert_eq!(detected, 0);
    }

    #[test]
    fn ranked_rear_suppresses_a_later_match() {
        let state = SnakeState::new();
        let mut candidates = CandidateHeap::new();
        candidates.push(1.0, Coord::new(7, 1)); // the rear
        candidates.push(0.5, Coord::new(7, 5)); // the east neighbor
        let detected = determine_move(&state, &mut candidates, Coord::new(7, 3));
        assert_eq!(detected, 0);
    }

    #[test]
    fn pops_are_capped_at_score_plus_four() {
        let state = SnakeState::new();
        assert_eq!(state.get_score(), 0);
        let mut candidates = CandidateHeap::new();
        // four loud far-away cells exhaust the cap
        candidates.push(0.9, Coord::new(0, 0));
        candidates.push(0.8, Coord::new(0, 1));
        candidates.push(0.7, Coord::new(0, 2));
        candidates.push(0.6, Coord::new(0, 3));
        candidates.push(0.5, Coord::new(7, 5)); // east neighbor, never reached
        let detected = determine_move(&state, &mut candidates, Coord::new(7, 3));
        assert_eq!(detected, 0);
        assert_eq!(candidates.len(), 1);
    }
}
