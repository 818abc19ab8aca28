//! Glue between the dispatch loop and the particle simulation

use cinder_core::Result;
use cinder_particles::ParticleSystem;
use cinder_runtime::LoopHooks;

/// Drives the particle fountain from the loop callbacks and records
/// what the renderer and the statistics printer need between passes.
pub struct ParticleGame {
    particles: ParticleSystem,
    render_requested: bool,
    stats_header_printed: bool,
    last_delta_s: f64,
    last_fraction: f64,
}

impl ParticleGame {
    pub fn new(particles: ParticleSystem) -> Self {
        Self {
            particles,
            render_requested: false,
            stats_header_printed: false,
            last_delta_s: 0.0,
            last_fraction: 0.0,
        }
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// True once per due render; cleared by the take.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }
}

impl LoopHooks for ParticleGame {
    fn on_update(&mut self, delta_time_s: f64) -> Result<()> {
        self.last_delta_s = delta_time_s;
        self.particles.update(delta_time_s as f32);
        Ok(())
    }

    fn on_collisions(&mut self) -> Result<()> {
        self.particles.collisions();
        Ok(())
    }

    fn on_interpolate(&mut self, delta_time_s: f64, fraction: f64) -> Result<()> {
        self.last_fraction = fraction;
        self.particles.interpolate(delta_time_s as f32, fraction as f32);
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        self.render_requested = true;
        Ok(())
    }

    fn on_stats_tick(&mut self, _elapsed_s: f64, update_count: u32, render_count: u32) -> Result<()> {
        if !self.stats_header_printed {
            println!("updates\tdraws\tdelta\t\tinterpolation");
            self.stats_header_printed = true;
        }
        println!(
            "{update_count}\t{render_count}\t{:.4}\t\t{:.2}",
            self.last_delta_s, self.last_fraction
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_particles::EmitterConfig;
    use cinder_runtime::{GameLoop, LoopConfig, Subdivisions};

    fn small_game() -> ParticleGame {
        let emitter = EmitterConfig {
            count: 10,
            ..Default::default()
        };
        ParticleGame::new(ParticleSystem::new(emitter, 42))
    }

    #[test]
    fn update_pass_moves_particles_and_requests_render() {
        let mut game_loop =
            GameLoop::new(LoopConfig::new(60).with_subdivisions(Subdivisions::Two));
        game_loop.start(0);
        let mut game = small_game();
        let before: Vec<_> = game
            .particles()
            .particles()
            .iter()
            .map(|p| p.position)
            .collect();

        game_loop.advance(17, &mut game).unwrap();

        // One fixed update ran and the interval-start render slot fired.
        assert!(game.take_render_request());
        assert!(!game.take_render_request());
        let moved = game
            .particles()
            .particles()
            .iter()
            .zip(&before)
            .any(|(particle, before)| particle.position != *before);
        assert!(moved);
    }

    #[test]
    fn pass_between_slots_requests_nothing() {
        let mut game_loop =
            GameLoop::new(LoopConfig::new(60).with_subdivisions(Subdivisions::Two));
        game_loop.start(0);
        let mut game = small_game();

        game_loop.advance(17, &mut game).unwrap();
        assert!(game.take_render_request());

        // Still early in the same interval: the 0.5 slot is not due.
        game_loop.advance(18, &mut game).unwrap();
        assert!(!game.take_render_request());
    }
}
