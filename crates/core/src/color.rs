//! Color types for particle display: HSL as produced by the speed color map,
//! and sRGB for presentation.
//!
//! All components are `f64` in [0, 1]. Hue is a fraction of a full turn.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Hue/saturation/lightness color, hue in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Wraps a hue into [0, 1) by dropping its integer part (`h - floor(h)`).
///
/// Non-finite input maps to 0.0.
pub fn wrap_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let w = h - h.floor();
    // h - floor(h) rounds up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

impl Hsl {
    /// Builds an HSL color with the hue wrapped and `s`/`l` clamped to [0, 1].
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Converts to sRGB using the standard two-chroma HSL construction.
    pub fn to_srgb(self) -> Srgb {
        let Hsl { h, s, l } = Hsl::new(self.h, self.s, self.l);
        if s == 0.0 {
            return Srgb { r: l, g: l, b: l };
        }
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Srgb {
            r: hue_channel(p, q, h + 1.0 / 3.0),
            g: hue_channel(p, q, h),
            b: hue_channel(p, q, h - 1.0 / 3.0),
        }
    }
}

fn hue_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Formats as `"#rrggbb"`, quantizing to 8 bits.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes to 8-bit channels with clamping.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}
