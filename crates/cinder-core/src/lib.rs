//! Cinder Core - Foundational types for the Cinder demo engine
//!
//! This crate provides the types that all other Cinder crates depend on:
//! - `Vec2` - 2D vector for positions and velocities
//! - `Color` - RGBA color
//! - Error types and Result alias

mod error;
mod types;

pub use error::{CinderError, Result};
pub use types::{Color, Vec2};
