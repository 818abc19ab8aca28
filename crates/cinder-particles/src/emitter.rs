//! The particle fountain: emitter configuration and simulation

use crate::particle::Particle;
use crate::rand::ParticleRng;
use cinder_core::Vec2;

/// Velocity magnitude (per axis) below which a bounced particle is
/// considered drained and goes back to the emitter.
const DRAINED_SPEED: f32 = 50.0;

/// Spawn parameters and world bounds for the fountain.
///
/// Coordinates are y-up pixels: the floor is `y == 0` and particles
/// launch upward from the emitter origin.
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Where particles launch from and respawn to.
    pub origin: Vec2,
    /// How many particles the system keeps alive.
    pub count: usize,
    /// Particle radius range in pixels.
    pub min_radius: f32,
    pub max_radius: f32,
    /// Per-second decay applied to the vertical launch acceleration.
    pub gravity: f32,
    /// Horizontal launch acceleration bound, symmetric around zero.
    pub max_accel_x: f32,
    /// Vertical launch acceleration range.
    pub min_accel_y: f32,
    pub max_accel_y: f32,
    /// Simulation area. The bottom edge bounces; particles leaving the
    /// left or right edge respawn.
    pub bounds: Vec2,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::new(400.0, 50.0),
            count: 750,
            min_radius: 2.5,
            max_radius: 12.5,
            gravity: 750.0,
            max_accel_x: 40.0,
            min_accel_y: 300.0,
            max_accel_y: 750.0,
            bounds: Vec2::new(800.0, 600.0),
        }
    }
}

/// The fountain simulation.
///
/// `update` and `collisions` mutate authoritative particle state;
/// `interpolate` only rewrites display positions.
pub struct ParticleSystem {
    config: EmitterConfig,
    particles: Vec<Particle>,
    rng: ParticleRng,
}

impl ParticleSystem {
    pub fn new(config: EmitterConfig, seed: u32) -> Self {
        let mut system = Self {
            particles: Vec::with_capacity(config.count),
            rng: ParticleRng::new(seed),
            config,
        };
        for _ in 0..system.config.count {
            let particle = system.spawn_particle();
            system.particles.push(particle);
        }
        system
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// A fresh particle at the emitter with a randomized radius and
    /// launch acceleration.
    fn spawn_particle(&mut self) -> Particle {
        let radius = self.rng.range(self.config.min_radius, self.config.max_radius);
        let accel_x = self.rng.range(-self.config.max_accel_x, self.config.max_accel_x);
        let accel_y = self.rng.range(self.config.min_accel_y, self.config.max_accel_y);

        let mut particle = Particle::new(self.config.origin, radius);
        particle.acceleration = Vec2::new(accel_x, accel_y);
        particle
    }

    /// Send a particle back to the emitter, keeping its radius.
    fn relaunch(&mut self, index: usize) {
        let radius = self.particles[index].radius;
        let mut fresh = self.spawn_particle();
        fresh.radius = radius;
        self.particles[index] = fresh;
    }

    /// One fixed update: fold the launch acceleration into velocity,
    /// decay it under gravity, and integrate positions. `dt` is seconds,
    /// so all configured rates are per-second.
    pub fn update(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        for particle in &mut self.particles {
            particle.velocity += particle.acceleration * dt;
            particle.acceleration.y -= gravity * dt;
            particle.position += particle.velocity * dt;
            particle.display_position = particle.position;
        }
    }

    /// Resolve floor bounces and respawn particles that left the area
    /// or ran out of energy. Runs after `update` each fixed step.
    pub fn collisions(&mut self) {
        let bounds_x = self.config.bounds.x;
        for index in 0..self.particles.len() {
            let respawn = {
                let particle = &mut self.particles[index];
                let mut respawn = false;

                // Floor bounce: reflect and damp, respawn once drained.
                if particle.position.y - particle.radius < 0.0 {
                    particle.position.y = particle.radius;
                    particle.velocity.y *= -0.8;
                    particle.velocity.x *= 0.9;
                    if particle.velocity.x.abs() < DRAINED_SPEED
                        && particle.velocity.y.abs() < DRAINED_SPEED
                    {
                        respawn = true;
                    }
                }

                // Fully past the left or right edge.
                if particle.position.x - particle.radius > bounds_x
                    || particle.position.x + particle.radius < 0.0
                {
                    respawn = true;
                }

                particle.display_position = particle.position;
                respawn
            };
            if respawn {
                self.relaunch(index);
            }
        }
    }

    /// Project display positions `fraction` of the way into the current
    /// update interval. Authoritative state is untouched.
    pub fn interpolate(&mut self, dt: f32, fraction: f32) {
        let lead = dt * fraction;
        for particle in &mut self.particles {
            particle.display_position = particle.position + particle.velocity * lead;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One particle with a pinned launch acceleration of (0, 400).
    fn pinned_config() -> EmitterConfig {
        EmitterConfig {
            count: 1,
            max_accel_x: 0.0,
            min_accel_y: 400.0,
            max_accel_y: 400.0,
            ..Default::default()
        }
    }

    #[test]
    fn spawns_configured_count() {
        let system = ParticleSystem::new(EmitterConfig::default(), 1);
        assert_eq!(system.len(), 750);
        for particle in system.particles() {
            assert_eq!(particle.position, system.config().origin);
            assert!(particle.radius >= 2.5 && particle.radius < 12.5);
        }
    }

    #[test]
    fn update_integrates_motion() {
        let mut system = ParticleSystem::new(pinned_config(), 1);
        system.update(0.1);

        let particle = &system.particles()[0];
        // vel = accel * dt = 40 up; pos = origin + vel * dt = 4 up.
        assert!((particle.velocity.y - 40.0).abs() < 1e-3);
        assert!((particle.position.y - 54.0).abs() < 1e-3);
        assert_eq!(particle.display_position, particle.position);
    }

    #[test]
    fn gravity_decays_launch_acceleration() {
        let mut system = ParticleSystem::new(pinned_config(), 1);
        system.update(0.1);
        assert!((system.particles()[0].acceleration.y - (400.0 - 75.0)).abs() < 1e-3);
    }

    #[test]
    fn floor_bounce_reflects_and_damps() {
        let mut system = ParticleSystem::new(pinned_config(), 1);
        {
            let particle = &mut system.particles[0];
            particle.position = Vec2::new(100.0, 0.0);
            particle.velocity = Vec2::new(100.0, -200.0);
        }
        system.collisions();

        let particle = &system.particles()[0];
        assert_eq!(particle.position.y, particle.radius);
        assert!((particle.velocity.y - 160.0).abs() < 1e-3);
        assert!((particle.velocity.x - 90.0).abs() < 1e-3);
    }

    #[test]
    fn drained_bounce_respawns_at_emitter() {
        let mut system = ParticleSystem::new(pinned_config(), 1);
        {
            let particle = &mut system.particles[0];
            particle.position = Vec2::new(100.0, 0.0);
            particle.velocity = Vec2::new(10.0, -10.0);
        }
        system.collisions();

        let particle = &system.particles()[0];
        assert_eq!(particle.position, system.config().origin);
        assert_eq!(particle.velocity, Vec2::ZERO);
    }

    #[test]
    fn leaving_the_sides_respawns() {
        let mut system = ParticleSystem::new(pinned_config(), 1);
        {
            let particle = &mut system.particles[0];
            particle.position = Vec2::new(820.0, 300.0);
        }
        system.collisions();
        assert_eq!(system.particles()[0].position, system.config().origin);
    }

    #[test]
    fn interpolate_only_touches_display_position() {
        let mut system = ParticleSystem::new(pinned_config(), 1);
        {
            let particle = &mut system.particles[0];
            particle.position = Vec2::new(200.0, 100.0);
            particle.velocity = Vec2::new(10.0, 20.0);
        }
        system.interpolate(0.1, 0.5);

        let particle = &system.particles()[0];
        assert_eq!(particle.position, Vec2::new(200.0, 100.0));
        assert!((particle.display_position.x - 200.5).abs() < 1e-3);
        assert!((particle.display_position.y - 101.0).abs() < 1e-3);
    }
}
