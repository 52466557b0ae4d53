//! Candidate generation over a terrain footprint.
//!
//! This module defines the [`PositionSampling`] trait used by the scatter pipeline
//! to propose footprint positions `(x, z)` prior to evaluation, and the random
//! helpers shared by the rest of the crate.
use mint::Vector2;
use rand::RngCore;

pub mod uniform_random;

pub use uniform_random::UniformRandomSampling;

/// Trait for position sampling.
///
/// Implementations return footprint positions in `[0, extent.x) × [0, extent.y)`,
/// where `extent` is the terrain's `(width, depth)`.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain. Handles edge cases
/// safely including very small positive values and zero.
#[inline]
pub fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Rng that returns the same word forever.
    pub(crate) struct FixedRng {
        pub(crate) value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    impl FixedRng {
        /// Rng whose [`rand01`] output is approximately `x`.
        pub(crate) fn at(x: f64) -> Self {
            Self {
                value: (x.clamp(0.0, 1.0) * u32::MAX as f64) as u32,
            }
        }
    }

    #[test]
    fn rand01_stays_in_half_open_unit_interval() {
        for value in [0, 1, 1000, u32::MAX / 2, u32::MAX - 1, u32::MAX] {
            let r = rand01(&mut FixedRng { value });
            assert!((0.0..=1.0).contains(&r), "rand01({value}) = {r}");
        }
        assert_eq!(rand01(&mut FixedRng { value: 0 }), 0.0);
        assert!((rand01(&mut FixedRng::at(0.5)) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn next_down_is_strictly_smaller_for_finite_values() {
        assert!(next_down(1.0) < 1.0);
        assert!(next_down(100.0) < 100.0);
        assert!(next_down(-3.0) < -3.0);
        assert_eq!(next_down(0.0), -f32::MIN_POSITIVE);
        assert_eq!(next_down(f32::INFINITY), f32::MAX);
        assert!(next_down(f32::NAN).is_nan());
    }
}
