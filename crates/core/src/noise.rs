//! Smoothed Gaussian noise used to drive the mass-center random walks.
//!
//! A [`NoiseProcess`] keeps a sliding window of standard-normal samples and
//! returns their scaled mean: a moving-average filter over white noise. Wider
//! windows give smoother, more strongly correlated output.

use crate::error::EngineError;
use crate::prng::Xorshift64;
use glam::DVec3;
use std::num::NonZeroUsize;

/// Scalar moving-average noise generator.
///
/// The window is always fully populated. Each [`next`](Self::next) call
/// overwrites the oldest sample and returns
/// `sum / window * sqrt(window) / 3`, which has standard deviation 1/3, so
/// typical outputs fall within about [-1, 1].
#[derive(Debug, Clone)]
pub struct NoiseProcess {
    samples: Vec<f64>,
    cursor: usize,
    rng: Xorshift64,
}

impl NoiseProcess {
    /// Creates a process with `window_size` samples, drawing from `rng`.
    ///
    /// Returns `EngineError::InvalidWindowSize` if `window_size` is zero.
    pub fn new(window_size: usize, rng: Xorshift64) -> Result<Self, EngineError> {
        NonZeroUsize::new(window_size)
            .map(|window| Self::with_window(window, rng))
            .ok_or(EngineError::InvalidWindowSize)
    }

    /// Creates a process with an already-validated window size.
    pub fn with_window(window: NonZeroUsize, rng: Xorshift64) -> Self {
        let mut process = Self {
            samples: vec![0.0; window.get()],
            cursor: 0,
            rng,
        };
        process.reinitialize();
        process
    }

    /// Number of samples in the averaging window.
    pub fn window_size(&self) -> usize {
        self.samples.len()
    }

    /// Refills every slot with a fresh draw and rewinds the cursor.
    ///
    /// The generator keeps advancing, so the trajectory after a
    /// reinitialization shares no samples with the one before it.
    pub fn reinitialize(&mut self) {
        for slot in self.samples.iter_mut() {
            *slot = self.rng.next_gaussian();
        }
        self.cursor = 0;
    }

    /// Draws one new sample into the window and returns the smoothed value.
    pub fn next(&mut self) -> f64 {
        let n = self.samples.len();
        self.samples[self.cursor] = self.rng.next_gaussian();
        self.cursor = (self.cursor + 1) % n;
        let mean = self.samples.iter().sum::<f64>() / n as f64;
        mean * (n as f64).sqrt() / 3.0
    }
}

/// Three independent [`NoiseProcess`]es, one per axis.
#[derive(Debug, Clone)]
pub struct VectorNoiseProcess {
    x: NoiseProcess,
    y: NoiseProcess,
    z: NoiseProcess,
}

impl VectorNoiseProcess {
    /// Creates a vector process whose axes each get a generator forked from `rng`.
    pub fn new(window_size: usize, rng: &mut Xorshift64) -> Result<Self, EngineError> {
        NonZeroUsize::new(window_size)
            .map(|window| Self::with_window(window, rng))
            .ok_or(EngineError::InvalidWindowSize)
    }

    /// Infallible constructor for an already-validated window size.
    pub fn with_window(window: NonZeroUsize, rng: &mut Xorshift64) -> Self {
        Self {
            x: NoiseProcess::with_window(window, rng.fork()),
            y: NoiseProcess::with_window(window, rng.fork()),
            z: NoiseProcess::with_window(window, rng.fork()),
        }
    }

    /// Reinitializes all three axes.
    pub fn reinitialize(&mut self) {
        self.x.reinitialize();
        self.y.reinitialize();
        self.z.reinitialize();
    }

    /// Next smoothed noise vector.
    pub fn next(&mut self) -> DVec3 {
        DVec3::new(self.x.next(), self.y.next(), self.z.next())
    }
}
