//! Spring-tethered satellite swarms.
//!
//! A [`SatelliteSwarm`] is bound to one mass center but is attracted to all
//! of them. Each tick, per particle:
//!
//! 1. sum `normalize(d) * mass / |d|^exponent` over every center,
//! 2. add the damped spring `(anchor + offset - p) * k_pos - v * k_vel`,
//! 3. integrate semi-implicitly (`v += a; p += v`),
//! 4. recolor by speed relative to a running maximum.
//!
//! The acceleration is a local value inside the tick and is never stored.

use crate::options::{clamp_satellites, SwarmOptions};
use glam::DVec3;
use satswarm_core::color::{wrap_hue, Hsl};
use satswarm_core::{ParticleLayer, Xorshift64};
use std::f64::consts::{PI, TAU};

/// Hue span of the slow-to-fast color ramp (red to yellow at base hue 0).
pub const HUE_TRANSITION_WIDTH: f64 = 0.16;
/// Headroom applied to the running max before normalizing speed.
const SPEED_HEADROOM: f64 = 1.1;
/// Starting value of the running max speed.
const INITIAL_MAX_SPEED: f64 = 5.0;
/// EWMA weight kept from the previous running max each tick.
const MAX_SPEED_DECAY: f64 = 0.99;

/// Simulation clock state needed for hue cycling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HueClock {
    /// Seconds since the simulation started.
    pub elapsed: f64,
    /// Phase offset of the hue cosine.
    pub phase: f64,
}

impl HueClock {
    /// Base hue for this tick, before wrapping.
    ///
    /// With cycling on this is `base + 0.5 + 0.5 * cos(freq * t + phase)`.
    pub fn base_hue(&self, options: &SwarmOptions) -> f64 {
        if options.cycle_color {
            options.base_hue
                + 0.5
                + 0.5 * (options.hue_freq * self.elapsed + self.phase).cos()
        } else {
            options.base_hue
        }
    }
}

/// Sum of inverse-power attractions toward every center.
///
/// Centers at the particle's position, or close enough that the power law
/// overflows, contribute nothing.
pub fn attraction(position: DVec3, centers: &[DVec3], mass: f64, exponent: f64) -> DVec3 {
    centers.iter().fold(DVec3::ZERO, |acc, &center| {
        let d = center - position;
        let len = d.length();
        if !(len > 0.0 && len.is_finite()) {
            return acc;
        }
        let denominator = len.powf(exponent);
        let contribution = d / len * (mass / denominator);
        if denominator > 0.0 && contribution.is_finite() {
            acc + contribution
        } else {
            acc
        }
    })
}

/// Damped spring pulling `position` toward `target`.
pub fn spring(position: DVec3, velocity: DVec3, target: DVec3, k_pos: f64, k_vel: f64) -> DVec3 {
    (target - position) * k_pos - velocity * k_vel
}

/// Maps a normalized speed to a display color.
///
/// Below 0.5 the hue ramps across [`HUE_TRANSITION_WIDTH`] at lightness 0.5;
/// above it the hue holds and lightness follows the speed toward white.
pub fn speed_color(speed_scaled: f64, base_hue: f64) -> Hsl {
    if speed_scaled < 0.5 {
        Hsl::new(
            wrap_hue(base_hue + speed_scaled * 2.0 * HUE_TRANSITION_WIDTH),
            1.0,
            0.5,
        )
    } else {
        Hsl::new(wrap_hue(base_hue + HUE_TRANSITION_WIDTH), 1.0, speed_scaled)
    }
}

/// Point on a sphere of `radius` from polar angle `theta` and azimuth `phi`.
fn sphere_point(radius: f64, theta: f64, phi: f64) -> DVec3 {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    DVec3::new(radius * sin_t * cos_p, radius * sin_t * sin_p, radius * cos_t)
}

/// Particles tethered to one mass center.
#[derive(Debug, Clone)]
pub struct SatelliteSwarm {
    owner: usize,
    offsets: Vec<DVec3>,
    positions: Vec<DVec3>,
    velocities: Vec<DVec3>,
    colors: Vec<Hsl>,
    running_max_speed: f64,
    rng: Xorshift64,
}

impl SatelliteSwarm {
    /// Creates `count` satellites (clamped to `[1, ceiling]`) on a sphere of
    /// `radius` around center `owner`.
    pub fn new(
        owner: usize,
        count: usize,
        ceiling: usize,
        centers: &[DVec3],
        radius: f64,
        rng: Xorshift64,
    ) -> Self {
        let mut swarm = Self {
            owner,
            offsets: Vec::new(),
            positions: Vec::new(),
            velocities: Vec::new(),
            colors: Vec::new(),
            running_max_speed: INITIAL_MAX_SPEED,
            rng,
        };
        swarm.resize(count, ceiling, centers, radius);
        swarm
    }

    /// Creates a swarm with explicit reference offsets, at rest on their
    /// targets around `anchor`.
    pub fn with_offsets(owner: usize, offsets: Vec<DVec3>, anchor: DVec3, rng: Xorshift64) -> Self {
        let positions: Vec<DVec3> = offsets.iter().map(|&o| anchor + o).collect();
        let n = offsets.len();
        Self {
            owner,
            offsets,
            positions,
            velocities: vec![DVec3::ZERO; n],
            colors: vec![Hsl::new(0.0, 1.0, 0.0); n],
            running_max_speed: INITIAL_MAX_SPEED,
            rng,
        }
    }

    /// Index of the mass center this swarm is tethered to.
    pub fn owner(&self) -> usize {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[DVec3] {
        &self.velocities
    }

    pub fn offsets(&self) -> &[DVec3] {
        &self.offsets
    }

    pub fn colors(&self) -> &[Hsl] {
        &self.colors
    }

    /// EWMA of the per-tick maximum speed, used to normalize colors.
    pub fn running_max_speed(&self) -> f64 {
        self.running_max_speed
    }

    /// Presentation view of positions and colors.
    pub fn layer(&self) -> ParticleLayer<'_> {
        ParticleLayer {
            positions: &self.positions,
            colors: &self.colors,
        }
    }

    /// Advances every satellite one tick against the given center positions.
    pub fn update(&mut self, centers: &[DVec3], options: &SwarmOptions, clock: HueClock) {
        let anchor = centers.get(self.owner).copied();
        let base_hue = clock.base_hue(options);
        let denom = self.running_max_speed * SPEED_HEADROOM;
        let mut frame_max = 0.0_f64;

        let particles = self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(self.offsets.iter())
            .zip(self.colors.iter_mut());
        for (((position, velocity), &offset), color) in particles {
            let mut acc = attraction(*position, centers, options.mass, options.exponent);
            if let Some(anchor) = anchor {
                acc += spring(
                    *position,
                    *velocity,
                    anchor + offset,
                    options.k_pos,
                    options.k_vel,
                );
            }
            *velocity += acc;
            *position += *velocity;

            let speed = velocity.length();
            let speed_scaled = if denom > 0.0 { speed / denom } else { 0.0 };
            *color = speed_color(speed_scaled, base_hue);
            frame_max = frame_max.max(speed);
        }

        self.running_max_speed =
            MAX_SPEED_DECAY * self.running_max_speed + (1.0 - MAX_SPEED_DECAY) * frame_max;
    }

    /// Redraws every reference offset on a sphere of `radius`, places each
    /// satellite at its rest position, and zeroes velocities.
    pub fn reset(&mut self, centers: &[DVec3], radius: f64) {
        let anchor = centers.get(self.owner).copied().unwrap_or(DVec3::ZERO);
        for ((offset, position), velocity) in self
            .offsets
            .iter_mut()
            .zip(self.positions.iter_mut())
            .zip(self.velocities.iter_mut())
        {
            let phi = self.rng.next_range(0.0, TAU);
            let theta = self.rng.next_range(0.0, PI);
            *offset = sphere_point(radius, theta, phi);
            *position = anchor + *offset;
            *velocity = DVec3::ZERO;
        }
        self.colors.fill(Hsl::new(0.0, 1.0, 0.0));
        self.running_max_speed = INITIAL_MAX_SPEED;
    }

    /// Reallocates to `count` satellites (clamped to `[1, ceiling]`) and reseeds them.
    ///
    /// Returns the count actually used.
    pub fn resize(&mut self, count: usize, ceiling: usize, centers: &[DVec3], radius: f64) -> usize {
        let n = clamp_satellites(count, ceiling);
        if n != count {
            log::warn!("swarm {}: satellite count {count} clamped to {n}", self.owner);
        }
        self.offsets = vec![DVec3::ZERO; n];
        self.positions = vec![DVec3::ZERO; n];
        self.velocities = vec![DVec3::ZERO; n];
        self.colors = vec![Hsl::default(); n];
        self.reset(centers, radius);
        log::debug!("swarm {} resized to {n} satellites", self.owner);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(mass: f64, exponent: f64, k_pos: f64, k_vel: f64) -> SwarmOptions {
        SwarmOptions {
            mass,
            exponent,
            k_pos,
            k_vel,
            ..SwarmOptions::default()
        }
    }

    fn swarm(count: usize, radius: f64, seed: u64) -> SatelliteSwarm {
        SatelliteSwarm::new(0, count, 200_000, &[DVec3::ZERO], radius, Xorshift64::new(seed))
    }

    #[test]
    fn attraction_points_toward_center() {
        let a = attraction(DVec3::new(2.0, 0.0, 0.0), &[DVec3::ZERO], 1.0, 2.0);
        assert!((a - DVec3::new(-0.25, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn underflowing_power_law_contributes_nothing() {
        // 1e-200 squared underflows to zero, so mass / r^2 would be infinite.
        let p = DVec3::new(1e-200, 0.0, 0.0);
        let a = attraction(p, &[DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0)], 1.0, 2.0);
        assert!(a.is_finite());
        assert!((a - DVec3::new(0.0625, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn coincident_center_contributes_nothing() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        let a = attraction(p, &[p], 1.0, 2.0);
        assert_eq!(a, DVec3::ZERO);
    }

    #[test]
    fn symmetric_centers_cancel() {
        let centers = [DVec3::new(-10.0, 0.0, 0.0), DVec3::new(10.0, 0.0, 0.0)];
        let a = attraction(DVec3::ZERO, &centers, 1.0, 2.0);
        assert!(a.length() < 1e-15, "net force {a:?}");
    }

    #[test]
    fn spring_restores_and_damps() {
        let f = spring(DVec3::ZERO, DVec3::new(0.0, 2.0, 0.0), DVec3::X * 10.0, 0.1, 0.5);
        assert!((f - DVec3::new(1.0, -1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn color_law_endpoints() {
        let slow = speed_color(0.0, 0.0);
        assert_eq!(slow.l, 0.5);
        assert_eq!(slow.h, 0.0);
        let fast = speed_color(1.0, 0.0);
        assert_eq!(fast.l, 1.0);
        assert!((fast.h - HUE_TRANSITION_WIDTH).abs() < 1e-12);
    }

    #[test]
    fn color_ramp_hue_grows_below_half() {
        let a = speed_color(0.1, 0.2);
        let b = speed_color(0.4, 0.2);
        assert!(b.h > a.h);
        assert_eq!(a.l, 0.5);
    }

    #[test]
    fn color_hue_wraps() {
        let c = speed_color(0.9, 0.95);
        assert!((0.0..1.0).contains(&c.h));
        assert!((c.h - (0.95 + HUE_TRANSITION_WIDTH - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn hue_clock_without_cycling_uses_base() {
        let o = SwarmOptions {
            base_hue: 0.3,
            ..SwarmOptions::default()
        };
        let clock = HueClock {
            elapsed: 12.0,
            phase: 1.0,
        };
        assert_eq!(clock.base_hue(&o), 0.3);
    }

    #[test]
    fn hue_clock_with_cycling_follows_cosine() {
        let o = SwarmOptions {
            base_hue: 0.1,
            cycle_color: true,
            hue_freq: 0.5,
            ..SwarmOptions::default()
        };
        let clock = HueClock {
            elapsed: 2.0,
            phase: -1.0,
        };
        // cos(0.5 * 2 - 1) = 1
        assert!((clock.base_hue(&o) - 1.1).abs() < 1e-12);
    }

    #[test]
    fn reset_places_offsets_on_sphere() {
        let mut s = swarm(500, 20.0, 4);
        s.reset(&[DVec3::ZERO], 20.0);
        s.reset(&[DVec3::ZERO], 20.0);
        for o in s.offsets() {
            assert!((o.length() - 20.0).abs() < 1e-9);
        }
        assert!(s.velocities().iter().all(|v| *v == DVec3::ZERO));
    }

    #[test]
    fn reset_positions_follow_owner() {
        let anchor = DVec3::new(5.0, -3.0, 1.0);
        let mut s = SatelliteSwarm::new(1, 50, 100, &[DVec3::ZERO, anchor], 7.0, Xorshift64::new(2));
        s.reset(&[DVec3::ZERO, anchor], 7.0);
        for (p, o) in s.positions().iter().zip(s.offsets()) {
            assert!((*p - (anchor + *o)).length() < 1e-12);
        }
    }

    #[test]
    fn resize_clamps_to_bounds() {
        let mut s = swarm(10, 20.0, 1);
        assert_eq!(s.resize(300_000, 200_000, &[DVec3::ZERO], 20.0), 200_000);
        assert_eq!(s.len(), 200_000);
        assert_eq!(s.resize(0, 200_000, &[DVec3::ZERO], 20.0), 1);
        assert_eq!(s.len(), 1);
        assert_eq!(s.colors().len(), 1);
        assert_eq!(s.offsets().len(), 1);
    }

    #[test]
    fn state_changes_only_through_update() {
        let idle = swarm(100, 20.0, 8);
        let mut stepped = swarm(100, 20.0, 8);
        assert_eq!(idle.positions(), stepped.positions());
        assert_eq!(idle.velocities(), stepped.velocities());

        stepped.update(&[DVec3::ZERO], &SwarmOptions::default(), HueClock::default());
        assert_ne!(idle.positions(), stepped.positions());
    }

    #[test]
    fn single_update_matches_hand_integration() {
        let offsets = vec![DVec3::new(10.0, 0.0, 0.0)];
        let mut s = SatelliteSwarm::with_offsets(0, offsets, DVec3::ZERO, Xorshift64::new(1));
        let o = options(1.0, 2.0, 0.01, 0.0);
        s.update(&[DVec3::ZERO], &o, HueClock::default());
        // Spring is at rest; gravity gives -1/100 along x.
        assert!((s.velocities()[0] - DVec3::new(-0.01, 0.0, 0.0)).length() < 1e-12);
        assert!((s.positions()[0] - DVec3::new(9.99, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn spring_keeps_satellite_bounded_near_rest() {
        let rest = DVec3::new(10.0, 0.0, 0.0);
        let mut s = SatelliteSwarm::with_offsets(0, vec![rest], DVec3::ZERO, Xorshift64::new(1));
        let o = options(1.0, 2.0, 0.01, 0.0);
        let mut max_dev = 0.0_f64;
        let mut min_x = f64::MAX;
        for _ in 0..5000 {
            s.update(&[DVec3::ZERO], &o, HueClock::default());
            let p = s.positions()[0];
            assert!(p.is_finite());
            max_dev = max_dev.max((p - rest).length());
            min_x = min_x.min(p.x);
        }
        // Equilibrium sits where k_pos * dx = 1 / x^2, about 1.33 inward, so the
        // undamped swing reaches roughly twice that and no further.
        assert!(max_dev < 4.0, "satellite drifted {max_dev} from rest");
        assert!(min_x < 9.0, "gravity never pulled the satellite inward");
        let p = s.positions()[0];
        assert!(p.y.abs() < 1e-12 && p.z.abs() < 1e-12);
    }

    #[test]
    fn damping_settles_satellite_at_equilibrium() {
        let rest = DVec3::new(10.0, 0.0, 0.0);
        let mut s = SatelliteSwarm::with_offsets(0, vec![rest], DVec3::ZERO, Xorshift64::new(1));
        let o = options(1.0, 2.0, 0.01, 0.05);
        for _ in 0..5000 {
            s.update(&[DVec3::ZERO], &o, HueClock::default());
        }
        let x = s.positions()[0].x;
        // k_pos * (10 - x) = 1 / x^2
        let residual = 0.01 * (10.0 - x) - 1.0 / (x * x);
        assert!(residual.abs() < 1e-6, "x = {x}, residual {residual}");
        assert!(s.velocities()[0].length() < 1e-6);
    }

    #[test]
    fn satellite_between_symmetric_centers_feels_no_attraction() {
        let centers = [DVec3::new(-10.0, 0.0, 0.0), DVec3::new(10.0, 0.0, 0.0)];
        // Owner 0 at (-10,0,0) with offset (10,0,0): rest position is the origin.
        let mut s =
            SatelliteSwarm::with_offsets(0, vec![DVec3::new(10.0, 0.0, 0.0)], centers[0], Xorshift64::new(1));
        let o = options(1.0, 2.0, 0.01, 0.01);
        s.update(&centers, &o, HueClock::default());
        assert!(s.positions()[0].length() < 1e-15);
        assert!(s.velocities()[0].length() < 1e-15);
    }

    #[test]
    fn running_max_is_ewma_of_frame_max() {
        let mut s = SatelliteSwarm::with_offsets(
            0,
            vec![DVec3::new(10.0, 0.0, 0.0)],
            DVec3::ZERO,
            Xorshift64::new(1),
        );
        let o = options(1.0, 2.0, 0.0, 0.0);
        s.update(&[DVec3::ZERO], &o, HueClock::default());
        let speed = s.velocities()[0].length();
        let expected = 0.99 * INITIAL_MAX_SPEED + 0.01 * speed;
        assert!((s.running_max_speed() - expected).abs() < 1e-15);
    }

    #[test]
    fn static_swarm_colors_stay_finite_as_max_decays() {
        let mut s = SatelliteSwarm::with_offsets(0, vec![DVec3::X], DVec3::ZERO, Xorshift64::new(1));
        let o = options(0.0, 2.0, 0.0, 0.0);
        for _ in 0..100_000 {
            s.update(&[DVec3::ZERO], &o, HueClock::default());
        }
        let c = s.colors()[0];
        assert!(c.h.is_finite() && c.l.is_finite());
        assert_eq!(c.l, 0.5);
    }

    #[test]
    fn update_without_owner_center_skips_spring() {
        let mut s = SatelliteSwarm::with_offsets(3, vec![DVec3::X], DVec3::ZERO, Xorshift64::new(1));
        let o = options(0.0, 2.0, 1.0, 1.0);
        s.update(&[DVec3::new(100.0, 0.0, 0.0)], &o, HueClock::default());
        assert_eq!(s.positions()[0], DVec3::X);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offsets_on_sphere_for_any_count(count in 1_usize..2000, radius in 0.1_f64..500.0, seed: u64) {
                let mut s = SatelliteSwarm::new(0, count, 200_000, &[DVec3::ZERO], radius, Xorshift64::new(seed));
                s.reset(&[DVec3::ZERO], radius);
                prop_assert_eq!(s.len(), count);
                for o in s.offsets() {
                    prop_assert!((o.length() - radius).abs() <= 1e-9 * radius);
                }
            }

            #[test]
            fn hue_always_in_unit_interval(speed_scaled in 0.0_f64..10.0, base in -5.0_f64..5.0) {
                let c = speed_color(speed_scaled, base);
                prop_assert!((0.0..1.0).contains(&c.h));
                prop_assert!((0.5..=1.0).contains(&c.l));
            }

            #[test]
            fn updates_stay_finite(seed: u64, k_pos in 0.0_f64..0.05, k_vel in 0.0_f64..0.05) {
                let centers = [DVec3::ZERO, DVec3::new(30.0, 0.0, 0.0)];
                let mut s = SatelliteSwarm::new(0, 64, 200_000, &centers, 20.0, Xorshift64::new(seed));
                let o = options(0.01, 0.05, k_pos, k_vel);
                for t in 0..50 {
                    s.update(&centers, &o, HueClock { elapsed: t as f64, phase: 0.0 });
                }
                for p in s.positions() {
                    prop_assert!(p.is_finite());
                }
            }
        }
    }
}
