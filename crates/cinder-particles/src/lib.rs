//! Cinder Particles - the particle fountain simulation
//!
//! CPU simulation only: fixed updates integrate motion, collision
//! resolution bounces particles off the floor, and interpolation
//! projects display-only positions between updates for the renderer.

mod emitter;
mod particle;
mod rand;

pub use emitter::{EmitterConfig, ParticleSystem};
pub use particle::Particle;
pub use rand::ParticleRng;
