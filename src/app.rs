//! The frame loop: one observation in, one move decision out, and the
//! tracked state advanced to match.

use std::io::{Read, Write};

use log::debug;

use crate::error::TrackerError;
use crate::inference::detector::determine_move;
use crate::inference::predictor::build_logic_ratios;
use crate::inference::ranker::rank_candidates;
use crate::inference::RatioMatrix;
use crate::models::snake::coord::{GRID_COLS, GRID_ROWS};
use crate::models::snake::snake_state::SnakeState;
use crate::protocol::frame::{write_response, ObservationFrame};

/// Owns the authoritative game state and the reusable prediction matrix for
/// the life of the process.
pub struct Tracker {
    state: SnakeState,
    logic: RatioMatrix,
}

impl Tracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SnakeState::new(),
            logic: [[0.0; GRID_COLS]; GRID_ROWS],
        }
    }

    #[must_use]
    pub fn get_state(&self) -> &SnakeState {
        &self.state
    }

    /// Runs the pipeline for one observation: predict, rank, infer, and when
    /// a direction was found commit it and take score and apple from the
    /// observation. Returns the direction bitmask that goes on the wire.
    ///
    /// # Errors
    ///
    /// [`TrackerError::BodyTooShort`] when the tracked body can no longer
    /// supply a previous head.
    pub fn process(&mut self, frame: &ObservationFrame) -> Result<u32, TrackerError> {
        let last_head = build_logic_ratios(&self.state, &mut self.logic)?;
        let mut candidates = rank_candidates(&frame.sensor, &mut self.logic);
        let detected = determine_move(&self.state, &mut candidates, last_head);

        if detected != 0 {
            self.state.advance(detected);
            // the observation wins over the locally inferred score and apple
            self.state.set_score(frame.score);
            self.state.set_apple(frame.apple);
            debug!("applied move {detected:#04x}\n{}", self.state);
            debug!("open continuations: {:#06b}", self.state.possible_moves());
        }
        Ok(detected)
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocks on `input` for observation frames and echoes one response per
/// frame. Returns only on error; a closed or truncated channel ends the
/// process.
///
/// # Errors
///
/// Any [`TrackerError`]: framing and I/O failures from the channel, or a
/// pipeline failure from [`Tracker::process`].
pub fn run(input: &mut impl Read, output: &mut impl Write) -> Result<(), TrackerError> {
    let mut tracker = Tracker::new();
    loop {
        let frame = ObservationFrame::read_from(input)?;
        let detected = tracker.process(&frame)?;
        write_response(output, detected)?;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::models::snake::coord::{Coord, Direction};
    use crate::models::snake::snake_state::{Cell, APPLE_GONE};
    use crate::protocol::frame::{encode_frame, FRAME_BYTE_LEN};

    use super::*;

    /// Sensor matrix that agrees exactly with the tracker's own prediction.
    fn echo_sensor(tracker: &Tracker) -> RatioMatrix {
        let mut sensor = [[0.0; GRID_COLS]; GRID_ROWS];
        build_logic_ratios(tracker.get_state(), &mut sensor).unwrap();
        sensor
    }

    #[test]
    fn initial_frame_answers_east() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut tracker = Tracker::new();
        let frame = ObservationFrame {
            sensor: echo_sensor(&tracker),
            apple: Coord::new(7, 12),
            score: 0,
        };

        let detected = tracker.process(&frame).unwrap();

        assert_eq!(detected, Direction::East.bit());
        assert_eq!(tracker.get_state().get_head(), Some(Coord::new(7, 5)));
        assert_eq!(tracker.get_state().get_score(), 0);
        assert_eq!(tracker.get_state().get_apple(), Coord::new(7, 12));
    }

    #[test]
    fn observed_score_and_apple_win() {
        let mut tracker = Tracker::new();
        let frame = ObservationFrame {
            sensor: echo_sensor(&tracker),
            apple: Coord::new(2, 2),
            score: 7,
        };

        tracker.process(&frame).unwrap();

        assert_eq!(tracker.get_state().get_score(), 7);
        assert_eq!(tracker.get_state().get_apple(), Coord::new(2, 2));
        assert_eq!(
            tracker.get_state().cell(Coord::new(2, 2)),
            Some(Cell::Apple)
        );
    }

    #[test]
    fn absent_apple_is_not_stamped() {
        let mut tracker = Tracker::new();
        let frame = ObservationFrame {
            sensor: echo_sensor(&tracker),
            apple: APPLE_GONE,
            score: 0,
        };

        tracker.process(&frame).unwrap();
        assert_eq!(tracker.get_state().get_apple(), APPLE_GONE);
    }

    #[test]
    fn undecided_frame_leaves_the_state_alone() {
        let mut tracker = Tracker::new();
        let frame = ObservationFrame {
            sensor: [[0.0; GRID_COLS]; GRID_ROWS],
            apple: Coord::new(7, 12),
            score: 5,
        };

        let detected = tracker.process(&frame).unwrap();

        assert_eq!(detected, 0);
        assert_eq!(tracker.get_state().get_head(), Some(Coord::new(7, 4)));
        assert_eq!(tracker.get_state().get_score(), 0);
    }

    #[test]
    fn loop_answers_each_frame_then_dies_on_eof() {
        let tracker = Tracker::new();
        let sensor = echo_sensor(&tracker);
        let bytes = encode_frame(&sensor, Coord::new(7, 12), 0);
        let mut input = Cursor::new(bytes);
        let mut output = Vec::new();

        let err = run(&mut input, &mut output).unwrap_err();

        assert_eq!(output, vec![0x02, 0x00, 0x00, 0x00]);
        assert!(matches!(
            err,
            TrackerError::Framing {
                expected: FRAME_BYTE_LEN,
                received: 0,
            }
        ));
    }

    #[test]
    fn truncated_frame_dies_without_a_response() {
        let sensor = [[0.0; GRID_COLS]; GRID_ROWS];
        let mut bytes = encode_frame(&sensor, Coord::new(7, 12), 0);
        bytes.pop(); // one byte short
        let mut input = Cursor::new(bytes);
        let mut output = Vec::new();

        let err = run(&mut input, &mut output).unwrap_err();

        assert!(output.is_empty());
        assert!(matches!(
            err,
            TrackerError::Framing {
                expected: FRAME_BYTE_LEN,
                received,
            } if received == FRAME_BYTE_LEN - 1
        ));
    }
}
