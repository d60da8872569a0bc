//! The `Engine` trait: the boundary between a simulation and whatever
//! presents it.
//!
//! Presentation code only ever reads plain buffers through this trait, so the
//! simulation never depends on a renderer, window, or control panel.

use crate::color::Hsl;
use glam::DVec3;
use serde_json::Value;

/// Read-only view of one particle group: positions and their parallel colors.
#[derive(Debug, Clone, Copy)]
pub struct ParticleLayer<'a> {
    pub positions: &'a [DVec3],
    pub colors: &'a [Hsl],
}

impl ParticleLayer<'_> {
    /// Number of particles in the layer.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the layer holds no particles.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A frame-driven particle simulation.
///
/// Object-safe, so drivers can hold a `Box<dyn Engine>`.
pub trait Engine {
    /// Advance the simulation by one frame.
    fn step(&mut self);

    /// Reinitialize all stochastic state while keeping current parameters.
    fn reset(&mut self);

    /// Particle groups to draw, in a stable order.
    fn layers(&self) -> Vec<ParticleLayer<'_>>;

    /// Current attractor positions.
    fn attractors(&self) -> Vec<DVec3>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Display radius for attractors, or `None` when they should not be drawn.
    fn attractor_radius(&self) -> Option<f64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// One particle drifting along +x, used to verify object safety.
    struct Drifter {
        positions: Vec<DVec3>,
        colors: Vec<Hsl>,
        steps: usize,
    }

    impl Drifter {
        fn new() -> Self {
            Self {
                positions: vec![DVec3::ZERO],
                colors: vec![Hsl::new(0.0, 1.0, 0.5)],
                steps: 0,
            }
        }
    }

    impl Engine for Drifter {
        fn step(&mut self) {
            self.positions[0].x += 1.0;
            self.steps += 1;
        }

        fn reset(&mut self) {
            self.positions[0] = DVec3::ZERO;
            self.steps = 0;
        }

        fn layers(&self) -> Vec<ParticleLayer<'_>> {
            vec![ParticleLayer {
                positions: &self.positions,
                colors: &self.colors,
            }]
        }

        fn attractors(&self) -> Vec<DVec3> {
            Vec::new()
        }

        fn params(&self) -> Value {
            json!({"steps": self.steps})
        }

        fn param_schema(&self) -> Value {
            json!({"steps": {"type": "integer", "default": 0}})
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let mut engine: Box<dyn Engine> = Box::new(Drifter::new());
        engine.step();
        engine.step();
        assert_eq!(engine.params()["steps"], 2);
        assert_eq!(engine.layers()[0].positions[0], DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut engine = Drifter::new();
        engine.step();
        engine.reset();
        assert_eq!(engine.layers()[0].positions[0], DVec3::ZERO);
        assert_eq!(engine.params()["steps"], 0);
    }

    #[test]
    fn default_attractor_radius_is_none() {
        assert!(Drifter::new().attractor_radius().is_none());
    }

    #[test]
    fn layer_len_matches_positions() {
        let engine = Drifter::new();
        let layers = engine.layers();
        assert_eq!(layers[0].len(), 1);
        assert!(!layers[0].is_empty());
    }
}
