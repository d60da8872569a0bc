#![deny(unsafe_code)]
//! Stochastic mass centers and the satellite swarms they attract.
//!
//! A small set of mass centers wander under smoothed noise, either freely in
//! 3D or confined to a spherical shell. Each center owns a swarm of
//! non-interacting satellites that are attracted to every center by a
//! tunable inverse-power law and tethered to a rest shape around their own
//! center by a damped spring. Satellites are colored by speed relative to a
//! running maximum.
//!
//! [`Simulation`] ties the pieces together and implements
//! [`satswarm_core::Engine`].

pub mod collection;
pub mod masses;
pub mod options;
pub mod satellites;
pub mod simulation;

pub use collection::SwarmCollection;
pub use masses::{MassCenter, MassCenterSystem, MotionScheme};
pub use options::SwarmOptions;
pub use satellites::{HueClock, SatelliteSwarm};
pub use simulation::Simulation;
