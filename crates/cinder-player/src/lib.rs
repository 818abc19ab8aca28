//! Cinder Player - windowed particle demo library
//!
//! Provides the `PlayerApp` application handler that drives the
//! dispatch loop from a winit event loop, plus the on-disk settings.

mod config;
mod game;
mod player_app;

pub use config::PlayerConfig;
pub use game::ParticleGame;
pub use player_app::PlayerApp;
