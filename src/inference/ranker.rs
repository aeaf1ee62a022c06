//! Candidate ranking: observed occupancy times predicted occupancy.

use crate::models::snake::coord::Coord;
use crate::models::snake::heap::MaxHeap;

use super::RatioMatrix;

/// Ranked product cells for one frame; discarded once a move is inferred.
pub type CandidateHeap = MaxHeap<Coord>;

/// Initial candidate capacity; the heap grows on its own past this.
const HEAP_CAPACITY: usize = 64;

/// Multiplies the sensor matrix into the logic matrix in place and returns a
/// heap holding a candidate for every cell whose product is nonzero. Cells
/// the sensor never saw, and cells the prediction rules out, both multiply to
/// zero and stay out of the heap.
#[must_use]
pub fn rank_candidates(sensor: &RatioMatrix, logic: &mut RatioMatrix) -> CandidateHeap {
    let mut candidates = CandidateHeap::with_capacity(HEAP_CAPACITY);
    for (row, weights) in logic.iter_mut().enumerate() {
        for (col, weight) in weights.iter_mut().enumerate() {
            let product = sensor[row][col] * *weight;
            *weight = product;
            if product.abs() > 0.0 {
                candidates.push(product, Coord::from_grid(row, col));
            }
        }
    }
    candidates
}
