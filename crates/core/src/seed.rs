//! Reproducible record of a simulation run.
//!
//! A [`Seed`] captures everything needed to replay a run: parameter overrides,
//! PRNG seed, tick count, and the snapshot size it was rendered at.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Everything needed to reproduce a run.
///
/// Two identical `Seed` values fed to the same binary produce bit-identical
/// particle trajectories and snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub params: serde_json::Value,
    pub seed: u64,
    pub steps: usize,
    pub width: usize,
    pub height: usize,
}

impl Seed {
    /// Creates a seed with empty params (`{}`) and zero steps.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            steps: 0,
            width,
            height,
        }
    }

    /// Validates that the snapshot size is non-zero and `width * height` does not overflow.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(())
    }
}
