#![deny(unsafe_code)]
//! Core types for the satswarm particle system.
//!
//! Provides the `Engine` trait and `ParticleLayer` view, the smoothed
//! `NoiseProcess`/`VectorNoiseProcess` drivers, the `Xorshift64` PRNG with
//! Gaussian draws, `Hsl`/`Srgb` colors, `Seed`, and parameter helpers.

pub mod color;
pub mod engine;
pub mod error;
pub mod noise;
pub mod params;
pub mod prng;
pub mod seed;

pub use color::{Hsl, Srgb};
pub use engine::{Engine, ParticleLayer};
pub use error::EngineError;
pub use noise::{NoiseProcess, VectorNoiseProcess};
pub use prng::Xorshift64;
pub use seed::Seed;
