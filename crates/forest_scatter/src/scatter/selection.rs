//! Selection utilities for accepted candidates.
//!
//! - [pick_uniform]: chooses a [crate::scatter::Kind] from a category's kind set by uniform index.
//! - [random_yaw_degrees]: draws the rotation about the vertical axis.
use rand::RngCore;

use crate::sampling::rand01;
use crate::scatter::Kind;

/// Picks a kind uniformly at random. Returns `None` for an empty slice.
pub fn pick_uniform<'k, R: RngCore>(kinds: &'k [Kind], rng: &mut R) -> Option<&'k Kind> {
    if kinds.is_empty() {
        return None;
    }
    let idx = ((rand01(rng) * kinds.len() as f32) as usize).min(kinds.len() - 1);
    kinds.get(idx)
}

/// Uniform yaw in degrees in `[0, 360)`.
pub fn random_yaw_degrees<R: RngCore>(rng: &mut R) -> f32 {
    (rand01(rng) * 360.0).min(crate::sampling::next_down(360.0))
}
