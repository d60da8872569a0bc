//! PNG export of a rendered frame.
//!
//! Feature-gated behind `png` so WASM or embedded users can use
//! [`crate::pixel`] without pulling in the `image` crate.

use crate::pixel::{splat_rgba, View};
use satswarm_core::{Engine, EngineError};
use std::path::Path;

/// Renders `engine` through `view` and writes the result as a PNG.
///
/// Returns `EngineError::InvalidDimensions` if the view does not fit in
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(engine: &dyn Engine, view: &View, path: &Path) -> Result<(), EngineError> {
    let rgba = splat_rgba(engine, view);
    let w = u32::try_from(view.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(view.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}
