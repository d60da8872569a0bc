//! Seedable Xorshift64 generator plus the uniform and Gaussian draws the
//! simulation needs.
//!
//! Every stochastic component owns its own generator, derived from a parent
//! with [`Xorshift64::fork`], so a whole simulation is reproducible from one
//! `u64` seed and independent components never share a stream.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is replaced with a fixed non-zero constant, since zero is a
/// fixed point of the recurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in the open interval (0, 1).
    ///
    /// Exact zeros are redrawn so the result is always safe to pass to `ln`.
    pub fn next_open01(&mut self) -> f64 {
        loop {
            let u = self.next_f64();
            if u > 0.0 {
                return u;
            }
        }
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Standard normal draw via the Box–Muller transform.
    ///
    /// Consumes two open-interval uniforms and returns the cosine branch.
    pub fn next_gaussian(&mut self) -> f64 {
        let u = self.next_open01();
        let v = self.next_open01();
        (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
    }

    /// Derives an independent child generator.
    ///
    /// The child seed is the parent's next output passed through a
    /// SplitMix64 finalizer, which decorrelates parent and child streams.
    pub fn fork(&mut self) -> Xorshift64 {
        let mut z = self.next_u64().wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Xorshift64::new(z ^ (z >> 31))
    }
}
