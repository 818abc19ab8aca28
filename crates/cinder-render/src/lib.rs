//! Cinder Render - wgpu rendering for the particle demo
//!
//! A deliberately small surface: a render context wrapping the wgpu
//! device/surface pair, and one pipeline that draws particles as
//! GPU-instanced circles in pixel space.

mod context;
mod particle_pipeline;

pub use context::RenderContext;
pub use particle_pipeline::{ParticleInstanceGpu, ParticleRenderer};
