//! The shared parameter record a control panel edits between ticks.
//!
//! `SwarmOptions` is owned by the [`Simulation`](crate::Simulation) and passed
//! by reference into every component call; components never keep their own
//! copy. Counts are clamped rather than rejected so the record always
//! describes a renderable state. Only an unknown motion scheme is an error.

use crate::masses::MotionScheme;
use satswarm_core::params::{param_bool, param_count, param_f64, param_string, param_u64};
use satswarm_core::EngineError;
use serde_json::{json, Value};

/// Default satellite ceiling.
pub const MAX_SATELLITES: usize = 200_000;
/// Largest number of mass centers the panel offers.
pub const MAX_MASSES: usize = 10;

const DEFAULT_NUM_MASSES: usize = 2;
const DEFAULT_MASS: f64 = 0.01;
const DEFAULT_EXPONENT: f64 = 0.05;
const DEFAULT_WALK_SPEED: f64 = 0.01;
const DEFAULT_MASS_RADIUS: f64 = 10.0;
const DEFAULT_PARTICLE_RADIUS: f64 = 20.0;
const DEFAULT_SHELL_RADIUS: f64 = 50.0;
const DEFAULT_NUM_SATELLITES: usize = 50_000;
const DEFAULT_BASE_HUE: f64 = 0.0;
const DEFAULT_HUE_FREQ: f64 = 0.05;
const DEFAULT_K_POS: f64 = 0.003;
const DEFAULT_K_VEL: f64 = 0.001;
const DEFAULT_NOISE_WINDOW: usize = 10;
const DEFAULT_FRAME_DT: f64 = 1.0 / 60.0;
const DEFAULT_SEED: u64 = 42;

/// Every tunable of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmOptions {
    /// Number of mass centers (and swarms). Changing it forces a full reset.
    pub num_masses: usize,
    /// Attractor strength shared by all centers.
    pub mass: f64,
    /// Exponent of the inverse-power attraction law.
    pub exponent: f64,
    /// Angular step scale for the spherical-shell walk.
    pub walk_speed: f64,
    /// Display radius of mass centers.
    pub mass_radius: f64,
    /// Radius of the sphere reference offsets are drawn on.
    pub particle_radius: f64,
    /// Whether presentation should draw the mass centers.
    pub render_masses: bool,
    /// Satellites per swarm, kept within `[1, satellite_ceiling]`.
    pub num_satellites: usize,
    pub satellite_ceiling: usize,
    pub cycle_color: bool,
    /// Base hue in [0, 1).
    pub base_hue: f64,
    pub hue_freq: f64,
    /// Spring position gain.
    pub k_pos: f64,
    /// Spring velocity damping.
    pub k_vel: f64,
    pub scheme: MotionScheme,
    /// Moving-average window of each noise axis.
    pub noise_window: usize,
    /// Seconds added to the simulation clock per step.
    pub frame_dt: f64,
    pub seed: u64,
}

impl Default for SwarmOptions {
    fn default() -> Self {
        Self {
            num_masses: DEFAULT_NUM_MASSES,
            mass: DEFAULT_MASS,
            exponent: DEFAULT_EXPONENT,
            walk_speed: DEFAULT_WALK_SPEED,
            mass_radius: DEFAULT_MASS_RADIUS,
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            render_masses: false,
            num_satellites: DEFAULT_NUM_SATELLITES,
            satellite_ceiling: MAX_SATELLITES,
            cycle_color: false,
            base_hue: DEFAULT_BASE_HUE,
            hue_freq: DEFAULT_HUE_FREQ,
            k_pos: DEFAULT_K_POS,
            k_vel: DEFAULT_K_VEL,
            scheme: MotionScheme::Cartesian,
            noise_window: DEFAULT_NOISE_WINDOW,
            frame_dt: DEFAULT_FRAME_DT,
            seed: DEFAULT_SEED,
        }
    }
}

/// Clamps a requested satellite count into `[1, ceiling]`.
pub fn clamp_satellites(requested: usize, ceiling: usize) -> usize {
    requested.clamp(1, ceiling.max(1))
}

/// Clamps a requested mass-center count into `[1, MAX_MASSES]`.
pub fn clamp_masses(requested: usize) -> usize {
    requested.clamp(1, MAX_MASSES)
}

impl SwarmOptions {
    /// Builds options from a JSON object, falling back to defaults per key.
    ///
    /// Counts may be given as floats; they are rounded and clamped. Returns
    /// `EngineError::UnknownScheme` if `scheme` names no known motion scheme.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        let d = Self::default();
        let shell_radius = param_f64(params, "shell_radius", DEFAULT_SHELL_RADIUS);
        let scheme = MotionScheme::from_name(
            &param_string(params, "scheme", d.scheme.name()),
            shell_radius,
        )?;
        let options = Self {
            num_masses: param_count(params, "num_masses", d.num_masses),
            mass: param_f64(params, "mass", d.mass),
            exponent: param_f64(params, "exponent", d.exponent),
            walk_speed: param_f64(params, "walk_speed", d.walk_speed),
            mass_radius: param_f64(params, "mass_radius", d.mass_radius),
            particle_radius: param_f64(params, "particle_radius", d.particle_radius),
            render_masses: param_bool(params, "render_masses", d.render_masses),
            num_satellites: param_count(params, "num_satellites", d.num_satellites),
            satellite_ceiling: param_count(params, "satellite_ceiling", d.satellite_ceiling),
            cycle_color: param_bool(params, "cycle_color", d.cycle_color),
            base_hue: param_f64(params, "base_hue", d.base_hue),
            hue_freq: param_f64(params, "hue_freq", d.hue_freq),
            k_pos: param_f64(params, "k_pos", d.k_pos),
            k_vel: param_f64(params, "k_vel", d.k_vel),
            scheme,
            noise_window: param_count(params, "noise_window", d.noise_window),
            frame_dt: param_f64(params, "frame_dt", d.frame_dt),
            seed: param_u64(params, "seed", d.seed),
        };
        Ok(options.sanitized())
    }

    /// Returns a copy with every count clamped into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.satellite_ceiling = self.satellite_ceiling.max(1);
        let satellites = clamp_satellites(self.num_satellites, self.satellite_ceiling);
        if satellites != self.num_satellites {
            log::warn!(
                "num_satellites {} clamped to {satellites}",
                self.num_satellites
            );
            self.num_satellites = satellites;
        }
        let masses = clamp_masses(self.num_masses);
        if masses != self.num_masses {
            log::warn!("num_masses {} clamped to {masses}", self.num_masses);
            self.num_masses = masses;
        }
        self.noise_window = self.noise_window.max(1);
        self
    }

    /// Current values as a JSON object, using the same keys as [`from_json`](Self::from_json).
    pub fn to_json(&self) -> Value {
        json!({
            "num_masses": self.num_masses,
            "mass": self.mass,
            "exponent": self.exponent,
            "walk_speed": self.walk_speed,
            "mass_radius": self.mass_radius,
            "particle_radius": self.particle_radius,
            "render_masses": self.render_masses,
            "num_satellites": self.num_satellites,
            "satellite_ceiling": self.satellite_ceiling,
            "cycle_color": self.cycle_color,
            "base_hue": self.base_hue,
            "hue_freq": self.hue_freq,
            "k_pos": self.k_pos,
            "k_vel": self.k_vel,
            "scheme": self.scheme.name(),
            "shell_radius": self.scheme.shell_radius().unwrap_or(DEFAULT_SHELL_RADIUS),
            "noise_window": self.noise_window,
            "frame_dt": self.frame_dt,
            "seed": self.seed,
        })
    }

    /// Schema of every parameter: type, default, range, and description.
    pub fn param_schema() -> Value {
        json!({
            "num_masses": {
                "type": "integer", "default": DEFAULT_NUM_MASSES, "min": 1, "max": MAX_MASSES,
                "description": "Number of mass centers; each owns one satellite swarm"
            },
            "mass": {
                "type": "number", "default": DEFAULT_MASS, "min": 0.0, "max": 1.0,
                "description": "Attraction strength shared by all mass centers"
            },
            "exponent": {
                "type": "number", "default": DEFAULT_EXPONENT, "min": 0.1, "max": 2.0,
                "description": "Exponent of the inverse-power attraction law"
            },
            "walk_speed": {
                "type": "number", "default": DEFAULT_WALK_SPEED, "min": 0.0, "max": 0.1,
                "description": "Angular step scale of the spherical-shell random walk"
            },
            "mass_radius": {
                "type": "number", "default": DEFAULT_MASS_RADIUS, "min": 1.0, "max": 10.0,
                "description": "Display radius of mass centers"
            },
            "particle_radius": {
                "type": "number", "default": DEFAULT_PARTICLE_RADIUS, "min": 1.0, "max": 100.0,
                "description": "Radius of the sphere satellite rest positions are drawn on"
            },
            "render_masses": {
                "type": "boolean", "default": false,
                "description": "Draw mass centers"
            },
            "num_satellites": {
                "type": "integer", "default": DEFAULT_NUM_SATELLITES, "min": 1, "max": MAX_SATELLITES,
                "description": "Satellites per swarm"
            },
            "satellite_ceiling": {
                "type": "integer", "default": MAX_SATELLITES, "min": 1,
                "description": "Upper clamp for num_satellites"
            },
            "cycle_color": {
                "type": "boolean", "default": false,
                "description": "Cycle the base hue over time"
            },
            "base_hue": {
                "type": "number", "default": DEFAULT_BASE_HUE, "min": 0.0, "max": 1.0,
                "description": "Hue of slow satellites"
            },
            "hue_freq": {
                "type": "number", "default": DEFAULT_HUE_FREQ, "min": 0.0, "max": 0.5,
                "description": "Angular frequency of hue cycling (rad/s)"
            },
            "k_pos": {
                "type": "number", "default": DEFAULT_K_POS, "min": 0.0, "max": 0.1,
                "description": "Spring gain pulling satellites toward their rest position"
            },
            "k_vel": {
                "type": "number", "default": DEFAULT_K_VEL, "min": 0.0, "max": 0.1,
                "description": "Spring damping on satellite velocity"
            },
            "scheme": {
                "type": "string", "default": "cartesian", "enum": MotionScheme::NAMES,
                "description": "Mass-center motion: free Cartesian walk or spherical-shell walk"
            },
            "shell_radius": {
                "type": "number", "default": DEFAULT_SHELL_RADIUS, "min": 0.0,
                "description": "Shell radius for the spherical-shell scheme"
            },
            "noise_window": {
                "type": "integer", "default": DEFAULT_NOISE_WINDOW, "min": 1,
                "description": "Moving-average window of the noise driving mass centers"
            },
            "frame_dt": {
                "type": "number", "default": DEFAULT_FRAME_DT, "min": 0.0,
                "description": "Seconds of simulation clock per step"
            },
            "seed": {
                "type": "integer", "default": DEFAULT_SEED,
                "description": "PRNG seed"
            }
        })
    }
}
