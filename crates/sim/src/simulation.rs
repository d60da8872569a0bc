//! Frame-driven orchestrator: advances mass centers, then every swarm.
//!
//! `Simulation` owns the authoritative [`SwarmOptions`] and hands components
//! a reference on every call. Panel edits go through
//! [`set_options`](Simulation::set_options), which decides whether the edit
//! needs a full reset, a resize, or nothing at all.

use crate::collection::SwarmCollection;
use crate::masses::MassCenterSystem;
use crate::options::SwarmOptions;
use crate::satellites::HueClock;
use glam::DVec3;
use satswarm_core::color::wrap_hue;
use satswarm_core::{Engine, EngineError, ParticleLayer, Xorshift64};
use serde_json::Value;

/// Complete simulation state.
#[derive(Debug, Clone)]
pub struct Simulation {
    options: SwarmOptions,
    masses: MassCenterSystem,
    swarms: SwarmCollection,
    centers: Vec<DVec3>,
    clock: HueClock,
    ticks: u64,
    rng: Xorshift64,
}

impl Simulation {
    /// Builds a simulation from `options` (counts are clamped first).
    pub fn new(options: SwarmOptions) -> Result<Self, EngineError> {
        let options = options.sanitized();
        let mut rng = Xorshift64::new(options.seed);
        let masses = MassCenterSystem::new(
            options.num_masses,
            options.scheme,
            options.noise_window,
            options.mass,
            rng.fork(),
        )?;
        let centers = masses.positions();
        let swarms = SwarmCollection::new(&centers, &options, &mut rng);
        log::debug!(
            "simulation built: {} masses x {} satellites, seed {}",
            options.num_masses,
            options.num_satellites,
            options.seed
        );
        Ok(Self {
            options,
            masses,
            swarms,
            centers,
            clock: HueClock::default(),
            ticks: 0,
            rng,
        })
    }

    /// Builds a simulation from a JSON parameter object.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Self::new(SwarmOptions::from_json(params)?)
    }

    pub fn options(&self) -> &SwarmOptions {
        &self.options
    }

    pub fn masses(&self) -> &MassCenterSystem {
        &self.masses
    }

    pub fn swarms(&self) -> &SwarmCollection {
        &self.swarms
    }

    /// Simulation clock in seconds.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed
    }

    /// Number of ticks since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one tick, advancing the clock by `dt` seconds.
    ///
    /// Mass centers move first; every swarm then sees the same snapshot of
    /// their new positions.
    pub fn tick(&mut self, dt: f64) {
        self.clock.elapsed += dt;
        self.masses.advance(self.options.walk_speed);
        self.masses.write_positions(&mut self.centers);
        self.swarms.update(&self.centers, &self.options, self.clock);
        self.ticks += 1;
    }

    /// Applies a new parameter record, rebuilding only what the change requires.
    ///
    /// A change of mass count, scheme, or noise window rebuilds everything. A
    /// change of satellite count or ceiling resizes the swarms; a new particle
    /// radius redraws reference offsets. Other fields apply on the next tick.
    pub fn set_options(&mut self, options: SwarmOptions) -> Result<(), EngineError> {
        let new = options.sanitized();
        let old = std::mem::replace(&mut self.options, new.clone());

        if new.cycle_color != old.cycle_color {
            self.apply_cycle_toggle(&old);
        } else if new.cycle_color && new.base_hue != old.base_hue {
            self.rephase_hue();
        }
        if new.mass != old.mass {
            self.masses.set_mass(new.mass);
        }

        if new.num_masses != old.num_masses
            || new.scheme != old.scheme
            || new.noise_window != old.noise_window
            || new.seed != old.seed
        {
            log::debug!("options changed structurally, rebuilding");
            let clock = self.clock;
            *self = Self::new(self.options.clone())?;
            self.clock = clock;
        } else if new.num_satellites != old.num_satellites
            || new.satellite_ceiling != old.satellite_ceiling
        {
            self.swarms.resize(
                new.num_satellites,
                new.satellite_ceiling,
                &self.centers,
                new.particle_radius,
            );
        } else if new.particle_radius != old.particle_radius {
            self.swarms.reset(&self.centers, new.particle_radius);
        }
        Ok(())
    }

    /// Sets the per-swarm satellite count; returns the clamped value in effect.
    pub fn set_num_satellites(&mut self, count: usize) -> usize {
        let n = self.swarms.resize(
            count,
            self.options.satellite_ceiling,
            &self.centers,
            self.options.particle_radius,
        );
        self.options.num_satellites = n;
        n
    }

    /// Turns hue cycling on or off without a visible jump in color.
    pub fn set_cycle_color(&mut self, on: bool) {
        if on == self.options.cycle_color {
            return;
        }
        let old = self.options.clone();
        self.options.cycle_color = on;
        self.apply_cycle_toggle(&old);
    }

    /// Picks a new base hue; while cycling, the cycle restarts from it.
    pub fn set_base_hue(&mut self, hue: f64) {
        self.options.base_hue = wrap_hue(hue);
        if self.options.cycle_color {
            self.rephase_hue();
        }
    }

    // Turning cycling on starts the cosine at 1, so the shown hue is
    // base + 1 (same hue). Turning it off folds the current cycled hue into base.
    fn apply_cycle_toggle(&mut self, old: &SwarmOptions) {
        if self.options.cycle_color {
            self.rephase_hue();
        } else {
            self.options.base_hue = wrap_hue(self.clock.base_hue(old));
        }
    }

    fn rephase_hue(&mut self) {
        self.clock.phase = -self.options.hue_freq * self.clock.elapsed;
    }
}

impl Engine for Simulation {
    fn step(&mut self) {
        self.tick(self.options.frame_dt);
    }

    /// Reseeds mass centers, noise, and every swarm, keeping current options.
    fn reset(&mut self) {
        self.masses.reset(self.options.num_masses, self.options.mass);
        self.masses.write_positions(&mut self.centers);
        self.swarms = SwarmCollection::new(&self.centers, &self.options, &mut self.rng);
        self.ticks = 0;
        log::debug!("simulation reset");
    }

    fn layers(&self) -> Vec<ParticleLayer<'_>> {
        self.swarms.layers()
    }

    fn attractors(&self) -> Vec<DVec3> {
        self.centers.clone()
    }

    fn params(&self) -> Value {
        self.options.to_json()
    }

    fn param_schema(&self) -> Value {
        SwarmOptions::param_schema()
    }

    fn attractor_radius(&self) -> Option<f64> {
        self.options.render_masses.then_some(self.options.mass_radius)
    }
}
