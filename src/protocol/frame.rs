//! Binary codec for the observation channel.
//!
//! Inbound, one frame per cycle: the row-major `f32` sensor matrix followed
//! by apple row, apple column and score as `i32`, all little-endian.
//! Outbound: one `i32` holding the detected direction bitmask.

use std::io::{Read, Write};

use crate::error::TrackerError;
use crate::inference::RatioMatrix;
use crate::models::snake::coord::{Coord, GRID_COLS, GRID_ROWS};

/// Exact byte length of one observation frame.
pub const FRAME_BYTE_LEN: usize = GRID_ROWS * GRID_COLS * 4 + 12;

/// One decoded observation.
#[derive(Clone, Debug)]
pub struct ObservationFrame {
    pub sensor: RatioMatrix,
    pub apple: Coord,
    pub score: i32,
}

impl ObservationFrame {
    /// Blocks until one full frame has arrived.
    ///
    /// # Errors
    ///
    /// [`TrackerError::Framing`] when the channel closes before
    /// [`FRAME_BYTE_LEN`] bytes are delivered, [`TrackerError::Io`] when the
    /// read itself fails. Both are fatal to the caller; there is no partial
    /// recovery.
    pub fn read_from(input: &mut impl Read) -> Result<Self, TrackerError> {
        let mut buffer = [0_u8; FRAME_BYTE_LEN];
        let mut received = 0;
        while received < FRAME_BYTE_LEN {
            let count = input.read(&mut buffer[received..])?;
            if count == 0 {
                return Err(TrackerError::Framing {
                    expected: FRAME_BYTE_LEN,
                    received,
                });
            }
            received += count;
        }
        Ok(Self::decode(&buffer))
    }

    fn decode(buffer: &[u8; FRAME_BYTE_LEN]) -> Self {
        let mut sensor = [[0.0; GRID_COLS]; GRID_ROWS];
        let mut offset = 0;
        for weights in &mut sensor {
            for weight in weights.iter_mut() {
                *weight = f64::from(f32::from_le_bytes([
                    buffer[offset],
                    buffer[offset + 1],
                    buffer[offset + 2],
                    buffer[offset + 3],
                ]));
                offset += 4;
            }
        }
        let apple = Coord::new(read_i32(buffer, offset), read_i32(buffer, offset + 4));
        let score = read_i32(buffer, offset + 8);
        Self {
            sensor,
            apple,
            score,
        }
    }
}

fn read_i32(buffer: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        buffer[offset],
        buffer[offset + 1],
        buffer[offset + 2],
        buffer[offset + 3],
    ])
}

/// Writes the 4-byte move response and flushes it to the peer.
///
/// # Errors
///
/// [`TrackerError::Io`] when the write or flush fails.
///
/// # Panics
///
/// Panics if `move_bits` exceeds `i32` range; direction bitmasks never do.
pub fn write_response(output: &mut impl Write, move_bits: u32) -> Result<(), TrackerError> {
    let response = i32::try_from(move_bits).unwrap();
    output.write_all(&response.to_le_bytes())?;
    output.flush()?;
    Ok(())
}

/// Builds the byte image of one frame; the inverse of the decoder, used by
/// the tests that feed the loop.
#[cfg(test)]
#[must_use]
pub fn encode_frame(sensor: &RatioMatrix, apple: Coord, score: i32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(FRAME_BYTE_LEN);
    for weights in sensor {
        for &weight in weights {
            #[allow(clippy::cast_possible_truncation)]
            let narrowed = weight as f32;
            bytes.extend_from_slice(&narrowed.to_le_bytes());
        }
    }
    bytes.extend_from_slice(&apple.row.to_le_bytes());
    bytes.extend_from_slice(&apple.col.to_le_bytes());
    bytes.extend_from_slice(&score.to_le_bytes());
    bytes
}
