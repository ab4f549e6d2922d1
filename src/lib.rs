//! Discrete-time 2D N-body engine: softened gravity, elastic contacts and
//! energy-driven fragmentation inside a reflecting box.
//!
//! A driver owns the run loop: it calls [`World::step`] once per frame, reads
//! [`World::snapshot`] to draw, and may inject bodies between frames with
//! [`World::spawn_particle`].

pub mod config;
pub mod core;
pub mod error;
pub mod scene;
pub mod types;

pub use crate::config::{FragmentationConfig, SimConfig};
pub use crate::core::World;
pub use crate::error::{Error, Result};
pub use crate::types::{Color, Particle, ParticleId, ParticleSnapshot, Vec2, WorldStats};
