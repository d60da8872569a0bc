#![deny(unsafe_code)]
//! Headless presentation for satswarm engines.
//!
//! [`pixel`] projects an [`Engine`](satswarm_core::Engine)'s particle layers
//! into an RGBA8 buffer and is always available; [`snapshot`] writes that
//! buffer as a PNG and sits behind the `png` feature so embedders can skip
//! the `image` dependency.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::{splat_rgba, View};
