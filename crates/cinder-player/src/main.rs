//! Cinder Player - windowed particle fountain demo
//!
//! Runs the fixed-timestep dispatch loop against the particle
//! simulation, drawing interpolated frames between updates.
//!
//! Usage:
//!   cinder-player [--config cinder.toml] [--ups 30] [--subdivisions 4]

use anyhow::{Context, Result};
use clap::Parser;
use cinder_player::{PlayerApp, PlayerConfig};
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "cinder-player")]
#[command(about = "Cinder particle demo - fixed-timestep loop with interpolated rendering")]
struct Args {
    /// Path to a TOML settings file
    #[arg(long, default_value = "cinder.toml")]
    config: PathBuf,

    /// Simulation updates per second (clamped to 1-240)
    #[arg(long)]
    ups: Option<u32>,

    /// Render opportunities per update interval (1-4)
    #[arg(long)]
    subdivisions: Option<u32>,

    /// Maximum catch-up updates per dispatch pass
    #[arg(long)]
    max_frame_skip: Option<u32>,

    /// Number of particles in the fountain
    #[arg(long)]
    particles: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = if args.config.exists() {
        PlayerConfig::load(&args.config)
            .with_context(|| format!("Failed to load {}", args.config.display()))?
    } else {
        PlayerConfig::default()
    };

    if let Some(ups) = args.ups {
        config.updates_per_second = ups;
    }
    if let Some(subdivisions) = args.subdivisions {
        config.subdivision_count = subdivisions;
    }
    if let Some(max_frame_skip) = args.max_frame_skip {
        config.max_frame_skip = max_frame_skip;
    }
    if let Some(particles) = args.particles {
        config.particle_count = particles;
    }

    println!("Cinder particle demo");
    println!(
        "  {} particles, {} updates/s target, {} render slot(s) per update",
        config.particle_count, config.updates_per_second, config.subdivision_count
    );
    println!();
    println!("Controls:");
    println!("  Space    - Pause / resume");
    println!("  Escape   - Exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
