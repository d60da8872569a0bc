//! Mass centers ("planets") and their noise-driven motion.
//!
//! Each center owns a [`VectorNoiseProcess`]. The motion scheme is a closed
//! enum chosen at construction and dispatched once per tick; switching
//! schemes means building a new [`MassCenterSystem`].

use glam::DVec3;
use satswarm_core::{EngineError, VectorNoiseProcess, Xorshift64};
use std::f64::consts::{PI, TAU};
use std::num::NonZeroUsize;

/// Half-width of the cube Cartesian centers are scattered in at reset.
const CARTESIAN_SPAWN_HALF_WIDTH: f64 = 50.0;

/// How mass centers move each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionScheme {
    /// Unbounded 3D random walk: the noise vector is the position delta.
    Cartesian,
    /// Random walk in angle on a sphere of fixed `radius` about the origin.
    SphericalShell { radius: f64 },
}

impl MotionScheme {
    /// Names accepted by [`from_name`](Self::from_name).
    pub const NAMES: &'static [&'static str] = &["cartesian", "spherical-shell"];

    /// Parses a scheme name. `shell_radius` is used by the spherical-shell scheme.
    ///
    /// Returns `EngineError::UnknownScheme` for any other name.
    pub fn from_name(name: &str, shell_radius: f64) -> Result<Self, EngineError> {
        match name {
            "cartesian" => Ok(MotionScheme::Cartesian),
            "spherical-shell" => Ok(MotionScheme::SphericalShell {
                radius: shell_radius,
            }),
            other => Err(EngineError::UnknownScheme(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MotionScheme::Cartesian => "cartesian",
            MotionScheme::SphericalShell { .. } => "spherical-shell",
        }
    }

    /// Shell radius, if this scheme has one.
    pub fn shell_radius(&self) -> Option<f64> {
        match self {
            MotionScheme::Cartesian => None,
            MotionScheme::SphericalShell { radius } => Some(*radius),
        }
    }
}

/// Spherical coordinates: radius, polar angle `theta` from +z, azimuth `phi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub r: f64,
    pub theta: f64,
    pub phi: f64,
}

impl Spherical {
    pub fn to_cartesian(self) -> DVec3 {
        spherical_to_cartesian(self.r, self.theta, self.phi)
    }
}

/// Converts spherical coordinates to Cartesian.
///
/// When `floor(theta / pi)` is odd, theta is negated and pi added to phi
/// first. Both forms name the same point, so the result always has norm `r`.
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> DVec3 {
    let (theta, phi) = if ((theta / PI).floor() as i64).rem_euclid(2) == 1 {
        (-theta, phi + PI)
    } else {
        (theta, phi)
    };
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    DVec3::new(r * sin_t * cos_p, r * sin_t * sin_p, r * cos_t)
}

/// One attractor.
#[derive(Debug, Clone)]
pub struct MassCenter {
    pub id: usize,
    pub position: DVec3,
    /// Last step taken: the Cartesian delta, or `(0, dtheta, dphi)` on a shell.
    pub velocity: DVec3,
    pub mass: f64,
    spherical: Option<Spherical>,
    noise: VectorNoiseProcess,
}

impl MassCenter {
    /// Angular state, present only under the spherical-shell scheme.
    pub fn spherical(&self) -> Option<Spherical> {
        self.spherical
    }
}

/// Owns every mass center and advances them together.
#[derive(Debug, Clone)]
pub struct MassCenterSystem {
    centers: Vec<MassCenter>,
    scheme: MotionScheme,
    noise_window: NonZeroUsize,
    rng: Xorshift64,
}

impl MassCenterSystem {
    /// Creates `count` centers with freshly seeded positions and noise.
    ///
    /// Returns `EngineError::InvalidWindowSize` if `noise_window` is zero.
    pub fn new(
        count: usize,
        scheme: MotionScheme,
        noise_window: usize,
        mass: f64,
        rng: Xorshift64,
    ) -> Result<Self, EngineError> {
        let noise_window =
            NonZeroUsize::new(noise_window).ok_or(EngineError::InvalidWindowSize)?;
        let mut system = Self {
            centers: Vec::new(),
            scheme,
            noise_window,
            rng,
        };
        system.reset(count, mass);
        Ok(system)
    }

    pub fn scheme(&self) -> MotionScheme {
        self.scheme
    }

    pub fn centers(&self) -> &[MassCenter] {
        &self.centers
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Copies current positions into `out`, replacing its contents.
    pub fn write_positions(&self, out: &mut Vec<DVec3>) {
        out.clear();
        out.extend(self.centers.iter().map(|c| c.position));
    }

    /// Current positions in center order.
    pub fn positions(&self) -> Vec<DVec3> {
        self.centers.iter().map(|c| c.position).collect()
    }

    /// Advances every center by one tick.
    ///
    /// `walk_speed` scales the angular step of the spherical-shell scheme.
    /// The Cartesian scheme applies the raw noise vector.
    pub fn advance(&mut self, walk_speed: f64) {
        match self.scheme {
            MotionScheme::Cartesian => {
                for center in &mut self.centers {
                    let step = center.noise.next();
                    center.velocity = step;
                    center.position += step;
                }
            }
            MotionScheme::SphericalShell { radius } => {
                for center in &mut self.centers {
                    let n = center.noise.next();
                    center.velocity = DVec3::new(0.0, walk_speed * n.y, walk_speed * n.z);
                    let angles = center.spherical.get_or_insert(Spherical {
                        r: radius,
                        theta: 0.0,
                        phi: 0.0,
                    });
                    angles.theta += center.velocity.y;
                    angles.phi += center.velocity.z;
                    center.position = angles.to_cartesian();
                }
            }
        }
    }

    /// Replaces the whole set with `count` freshly seeded centers.
    pub fn reset(&mut self, count: usize, mass: f64) {
        let scheme = self.scheme;
        let window = self.noise_window;
        let rng = &mut self.rng;
        self.centers = (0..count)
            .map(|id| {
                let (position, spherical) = match scheme {
                    MotionScheme::Cartesian => {
                        let h = CARTESIAN_SPAWN_HALF_WIDTH;
                        let p = DVec3::new(
                            rng.next_range(-h, h),
                            rng.next_range(-h, h),
                            rng.next_range(-h, h),
                        );
                        (p, None)
                    }
                    MotionScheme::SphericalShell { radius } => {
                        let s = Spherical {
                            r: radius,
                            theta: rng.next_range(0.0, PI),
                            phi: rng.next_range(0.0, TAU),
                        };
                        (s.to_cartesian(), Some(s))
                    }
                };
                MassCenter {
                    id,
                    position,
                    velocity: DVec3::ZERO,
                    mass,
                    spherical,
                    noise: VectorNoiseProcess::with_window(window, rng),
                }
            })
            .collect();
        log::debug!(
            "reset {} mass centers ({} scheme)",
            self.centers.len(),
            scheme.name()
        );
    }

    /// Assigns `mass` to every center.
    pub fn set_mass(&mut self, mass: f64) {
        for center in &mut self.centers {
            center.mass = mass;
        }
    }

    /// Reinitializes every center's noise without moving it.
    pub fn reinitialize_noise(&mut self) {
        for center in &mut self.centers {
            center.noise.reinitialize();
        }
    }
}
