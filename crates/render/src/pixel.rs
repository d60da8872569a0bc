//! Orthographic point splatting.
//!
//! The camera sits on the +x axis looking at the origin with +y up, so screen
//! right is world -z and screen up is world +y.

use glam::DVec3;
use satswarm_core::{Engine, EngineError, Srgb};

/// Fill color of mass-center discs.
const ATTRACTOR_GRAY: Srgb = Srgb {
    r: 0.2,
    g: 0.2,
    b: 0.2,
};

/// Output raster and the slice of world space it shows.
#[derive(Debug, Clone, Copy)]
pub struct View {
    width: usize,
    height: usize,
    /// World units from the image center to its top edge.
    extent: f64,
    pub background: Srgb,
}

impl View {
    /// Creates a view with a black background.
    ///
    /// Returns `EngineError::InvalidDimensions` if either side is zero, the
    /// RGBA buffer size would overflow, or `extent` is not a positive number.
    pub fn new(width: usize, height: usize, extent: f64) -> Result<Self, EngineError> {
        if width == 0 || height == 0 || !(extent.is_finite() && extent > 0.0) {
            return Err(EngineError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            extent,
            background: Srgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
            },
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels per world unit.
    fn scale(&self) -> f64 {
        self.height as f64 / (2.0 * self.extent)
    }

    /// Screen coordinates (possibly off-raster) of a world point.
    fn screen(&self, p: DVec3) -> (f64, f64) {
        let s = self.scale();
        (
            self.width as f64 / 2.0 - p.z * s,
            self.height as f64 / 2.0 - p.y * s,
        )
    }

    /// Pixel containing a world point, or `None` if it falls outside the raster.
    pub fn project(&self, p: DVec3) -> Option<(usize, usize)> {
        let (x, y) = self.screen(p);
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }
}

fn put(buf: &mut [u8], view: &View, x: usize, y: usize, c: Srgb) {
    let [r, g, b] = c.to_rgb8();
    let i = (y * view.width + x) * 4;
    buf[i..i + 4].copy_from_slice(&[r, g, b, 255]);
}

fn fill_disc(buf: &mut [u8], view: &View, center: DVec3, radius: f64) {
    let (cx, cy) = view.screen(center);
    let r = radius * view.scale();
    if !(cx.is_finite() && cy.is_finite() && r.is_finite()) {
        return;
    }
    let x0 = (cx - r).floor().max(0.0) as usize;
    let y0 = (cy - r).floor().max(0.0) as usize;
    let x1 = ((cx + r).ceil().max(0.0) as usize).min(view.width);
    let y1 = ((cy + r).ceil().max(0.0) as usize).min(view.height);
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                put(buf, view, x, y, ATTRACTOR_GRAY);
            }
        }
    }
}

/// Renders every particle layer, then the attractors if the engine asks for
/// them, into an RGBA8 buffer of `width * height * 4` bytes.
pub fn splat_rgba(engine: &dyn Engine, view: &View) -> Vec<u8> {
    let [r, g, b] = view.background.to_rgb8();
    let mut buf = [r, g, b, 255].repeat(view.width * view.height);

    for layer in engine.layers() {
        for (&p, &color) in layer.positions.iter().zip(layer.colors) {
            if let Some((x, y)) = view.project(p) {
                put(&mut buf, view, x, y, color.to_srgb());
            }
        }
    }

    if let Some(radius) = engine.attractor_radius() {
        for center in engine.attractors() {
            fill_disc(&mut buf, view, center, radius);
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use satswarm_sim::{Simulation, SwarmOptions};

    fn sim(render_masses: bool) -> Simulation {
        Simulation::new(SwarmOptions {
            num_masses: 2,
            num_satellites: 500,
            render_masses,
            ..SwarmOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn view_rejects_zero_dimensions() {
        assert!(View::new(0, 10, 100.0).is_err());
        assert!(View::new(10, 0, 100.0).is_err());
        assert!(View::new(usize::MAX, 2, 100.0).is_err());
    }

    #[test]
    fn view_rejects_degenerate_extent() {
        assert!(View::new(10, 10, 0.0).is_err());
        assert!(View::new(10, 10, -5.0).is_err());
        assert!(View::new(10, 10, f64::NAN).is_err());
    }

    #[test]
    fn origin_projects_to_center() {
        let v = View::new(100, 80, 50.0).unwrap();
        assert_eq!(v.project(DVec3::ZERO), Some((50, 40)));
    }

    #[test]
    fn projection_looks_down_the_x_axis() {
        let v = View::new(100, 100, 50.0).unwrap();
        // x is depth and does not move the point.
        assert_eq!(v.project(DVec3::new(30.0, 0.0, 0.0)), Some((50, 50)));
        // +y is up, -z is right.
        assert_eq!(v.project(DVec3::new(0.0, 25.0, 0.0)), Some((50, 25)));
        assert_eq!(v.project(DVec3::new(0.0, 0.0, -25.0)), Some((75, 50)));
    }

    #[test]
    fn out_of_view_and_nan_points_are_dropped() {
        let v = View::new(100, 100, 50.0).unwrap();
        assert_eq!(v.project(DVec3::new(0.0, 80.0, 0.0)), None);
        assert_eq!(v.project(DVec3::new(0.0, 0.0, 80.0)), None);
        assert_eq!(v.project(DVec3::new(0.0, f64::NAN, 0.0)), None);
    }

    #[test]
    fn buffer_has_rgba_length_and_opaque_alpha() {
        let v = View::new(32, 16, 100.0).unwrap();
        let buf = splat_rgba(&sim(false), &v);
        assert_eq!(buf.len(), 32 * 16 * 4);
        assert!(buf.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn particles_light_up_pixels() {
        let v = View::new(64, 64, 100.0).unwrap();
        let mut s = sim(false);
        // Freshly spawned satellites have lightness 0.
        s.step();
        let buf = splat_rgba(&s, &v);
        let lit = buf.chunks(4).filter(|px| px[..3] != [0, 0, 0]).count();
        assert!(lit > 0, "no particle was drawn");
    }

    #[test]
    fn background_color_is_used() {
        let mut v = View::new(8, 8, 1e-3).unwrap();
        v.background = Srgb::from_hex("#102030").unwrap();
        // With a tiny extent almost everything is off-raster.
        let buf = splat_rgba(&sim(false), &v);
        assert_eq!(&buf[..4], &[0x10, 0x20, 0x30, 255]);
    }

    #[test]
    fn attractors_drawn_only_when_requested() {
        let v = View::new(128, 128, 100.0).unwrap();
        let gray = |buf: &[u8]| buf.chunks(4).filter(|px| px[..3] == [51, 51, 51]).count();
        let mut hidden = sim(false);
        let mut shown = sim(true);
        hidden.step();
        shown.step();
        assert_eq!(gray(&splat_rgba(&hidden, &v)), 0);
        assert!(gray(&splat_rgba(&shown, &v)) > 0);
    }
}
