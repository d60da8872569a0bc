//! One [`SatelliteSwarm`] per mass center.

use crate::options::{clamp_satellites, SwarmOptions};
use crate::satellites::{HueClock, SatelliteSwarm};
use glam::DVec3;
use satswarm_core::{ParticleLayer, Xorshift64};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fans update, reset, and resize out to every swarm.
///
/// Swarms only read the center snapshot and never touch each other, so the
/// `parallel` feature may update them concurrently.
#[derive(Debug, Clone)]
pub struct SwarmCollection {
    swarms: Vec<SatelliteSwarm>,
}

impl SwarmCollection {
    /// Builds one swarm per entry of `centers`, swarm `i` owned by center `i`.
    pub fn new(centers: &[DVec3], options: &SwarmOptions, rng: &mut Xorshift64) -> Self {
        let swarms = (0..centers.len())
            .map(|owner| {
                SatelliteSwarm::new(
                    owner,
                    options.num_satellites,
                    options.satellite_ceiling,
                    centers,
                    options.particle_radius,
                    rng.fork(),
                )
            })
            .collect();
        Self { swarms }
    }

    pub fn swarms(&self) -> &[SatelliteSwarm] {
        &self.swarms
    }

    pub fn len(&self) -> usize {
        self.swarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swarms.is_empty()
    }

    /// Total satellites across all swarms.
    pub fn total_particles(&self) -> usize {
        self.swarms.iter().map(SatelliteSwarm::len).sum()
    }

    /// Advances every swarm against the same center snapshot.
    pub fn update(&mut self, centers: &[DVec3], options: &SwarmOptions, clock: HueClock) {
        #[cfg(feature = "parallel")]
        self.swarms
            .par_iter_mut()
            .for_each(|swarm| swarm.update(centers, options, clock));

        #[cfg(not(feature = "parallel"))]
        for swarm in &mut self.swarms {
            swarm.update(centers, options, clock);
        }
    }

    /// Redraws every swarm's reference offsets.
    pub fn reset(&mut self, centers: &[DVec3], radius: f64) {
        for swarm in &mut self.swarms {
            swarm.reset(centers, radius);
        }
    }

    /// Resizes every swarm; returns the clamped per-swarm count.
    pub fn resize(&mut self, count: usize, ceiling: usize, centers: &[DVec3], radius: f64) -> usize {
        for swarm in &mut self.swarms {
            swarm.resize(count, ceiling, centers, radius);
        }
        clamp_satellites(count, ceiling)
    }

    /// Position/color views of every swarm, in owner order.
    pub fn layers(&self) -> Vec<ParticleLayer<'_>> {
        self.swarms.iter().map(SatelliteSwarm::layer).collect()
    }
}
