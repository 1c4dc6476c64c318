//! Particle emitter: spawning, evolution, and drawing
//!
//! The emitter is the only stateful simulation entity. It owns its slot
//! pool, its PRNG, and the currently bound profile; the scheduler drives it
//! through the world's update/draw calls.

use crate::curves::parabolic_fade;
use crate::particle::ParticlePool;
use crate::rand::EmitterRng;
use crate::settings::{AccelerationMode, EmissionMode, EmitterSettings};
use ember_core::Vec2;
use ember_runtime::{QuadTransform, RenderTarget, Texture, TextureProvider};
use std::f32::consts::TAU;
use std::sync::Arc;

/// Slots preallocated per emitter; the pool grows past this on demand
const INITIAL_POOL_SIZE: usize = 100;

pub struct ParticleEmitter {
    provider: Arc<dyn TextureProvider>,
    settings: EmitterSettings,
    /// None when the profile's texture failed to load; draw degrades to a no-op
    texture: Option<Arc<Texture>>,
    texture_center: Vec2,
    pool: ParticlePool,
    rng: EmitterRng,
    /// Seconds until the next batch of particles is emitted
    time_to_burst: f32,
    /// Location of the previous emission, the segment start for continuous mode
    last_emission: Vec2,
}

impl ParticleEmitter {
    pub fn new(
        provider: Arc<dyn TextureProvider>,
        settings: EmitterSettings,
        rng: EmitterRng,
    ) -> Self {
        let mut emitter = Self {
            provider,
            settings,
            texture: None,
            texture_center: Vec2::ZERO,
            pool: ParticlePool::with_capacity(INITIAL_POOL_SIZE),
            rng,
            time_to_burst: 0.0,
            last_emission: Vec2::ZERO,
        };
        emitter.configure();
        emitter
    }

    /// Bind texture state for the current profile. A load failure leaves the
    /// emitter simulating but not drawing.
    fn configure(&mut self) {
        match self.provider.load_texture(&self.settings.texture) {
            Ok(texture) => {
                self.texture_center = texture.center();
                self.texture = Some(Arc::new(texture));
            }
            Err(err) => {
                log::warn!(
                    "texture '{}' unavailable, emitter will not draw: {err}",
                    self.settings.texture
                );
                self.texture = None;
                self.texture_center = Vec2::ZERO;
            }
        }
    }

    /// Swap the bound profile, recycling every active particle
    pub fn set_settings(&mut self, settings: EmitterSettings) {
        self.settings = settings;
        self.pool.recycle_all();
        self.configure();
    }

    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn free_count(&self) -> usize {
        self.pool.free_count()
    }

    /// Spawn one batch. Burst mode places every particle at `location`;
    /// continuous mode spreads the batch evenly along the segment from
    /// `last_location`, approximating emission between discrete ticks.
    pub fn add_particles(&mut self, location: Vec2, last_location: Vec2) {
        let count = self
            .rng
            .range(self.settings.min_count, self.settings.max_count) as u32;
        if count == 0 {
            return;
        }

        let (mut position, offset) = match self.settings.emission_mode {
            EmissionMode::Burst => (location, Vec2::ZERO),
            EmissionMode::Continuous => (
                last_location,
                (location - last_location) * (1.0 / count as f32),
            ),
        };

        for _ in 0..count {
            let index = self.pool.acquire();

            let direction = self
                .rng
                .direction_deg(self.settings.min_direction_deg, self.settings.max_direction_deg);
            let speed = self.rng.range(self.settings.min_speed, self.settings.max_speed);
            let life_span = self
                .rng
                .range(self.settings.min_life_span, self.settings.max_life_span);
            let orientation = self.rng.range(0.0, TAU);
            let angular_velocity = self
                .rng
                .range(
                    self.settings.min_angular_velocity_deg,
                    self.settings.max_angular_velocity_deg,
                )
                .to_radians();
            let scale = self.rng.range(self.settings.min_scale, self.settings.max_scale);
            let scale_growth = self
                .rng
                .range(self.settings.min_scale_growth, self.settings.max_scale_growth);

            let acceleration = match self.settings.acceleration {
                AccelerationMode::Aligned {
                    min_magnitude,
                    max_magnitude,
                } => direction * self.rng.range(min_magnitude, max_magnitude),
                AccelerationMode::NonAligned {
                    min_direction_deg,
                    max_direction_deg,
                    min_magnitude,
                    max_magnitude,
                } => {
                    let accel_direction = self.rng.direction_deg(min_direction_deg, max_direction_deg);
                    accel_direction * self.rng.range(min_magnitude, max_magnitude)
                }
            };

            self.pool.get_mut(index).init(
                position,
                direction * speed,
                acceleration,
                orientation,
                angular_velocity,
                scale,
                scale_growth,
                life_span,
            );

            position += offset;
        }
    }

    /// Advance the emitter: emit a batch when the burst timer expires, then
    /// step every active particle, recycling the dead.
    pub fn update(&mut self, dt: f32, location: Vec2) {
        if self.time_to_burst > 0.0 {
            self.time_to_burst -= dt;
        } else {
            self.time_to_burst = self
                .rng
                .range(self.settings.min_burst_time, self.settings.max_burst_time);
            let last_emission = self.last_emission;
            self.add_particles(location, last_emission);
            self.last_emission = location;
        }

        let gravity = self.settings.gravity;
        self.pool.update_active(|particle| {
            particle.velocity += gravity;
            particle.update(dt);
        });
    }

    /// Draw every active particle with the parabolic lifetime fade.
    /// A no-op when the profile's texture failed to load.
    pub fn draw(&self, target: &mut dyn RenderTarget, _dt: f32) {
        let Some(texture) = &self.texture else {
            return;
        };

        for particle in self.pool.active_particles() {
            let t = particle.time_since_birth / particle.life_span;
            let alpha = parabolic_fade(t);
            let transform = QuadTransform {
                position: particle.position,
                origin: self.texture_center,
                rotation: particle.orientation,
                scale: particle.scale,
            };
            target.draw_texture(texture, &transform, alpha, self.settings.blend_mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FailingProvider, RecordingTarget, StubProvider};
    use ember_runtime::BlendMode;

    fn burst_settings(count: f32) -> EmitterSettings {
        EmitterSettings {
            emission_mode: EmissionMode::Burst,
            min_count: count,
            max_count: count,
            texture: "img/Test.png".into(),
            ..Default::default()
        }
    }

    fn emitter_with(settings: EmitterSettings, seed: u32) -> ParticleEmitter {
        ParticleEmitter::new(Arc::new(StubProvider), settings, EmitterRng::new(seed))
    }

    #[test]
    fn burst_spawns_every_particle_at_location() {
        let mut emitter = emitter_with(burst_settings(5.0), 42);
        let location = Vec2::new(123.0, 456.0);
        emitter.add_particles(location, Vec2::new(-50.0, -50.0));

        assert_eq!(emitter.active_count(), 5);
        for p in emitter.pool.active_particles() {
            assert_eq!(p.position, location);
        }
    }

    #[test]
    fn continuous_spawns_interpolate_along_movement() {
        let settings = EmitterSettings {
            emission_mode: EmissionMode::Continuous,
            min_count: 5.0,
            max_count: 5.0,
            texture: "img/Test.png".into(),
            ..Default::default()
        };
        let mut emitter = emitter_with(settings, 42);
        emitter.add_particles(Vec2::new(10.0, 0.0), Vec2::ZERO);

        let xs: Vec<f32> = emitter.pool.active_particles().map(|p| p.position.x).collect();
        assert_eq!(xs.len(), 5);
        for (x, expected) in xs.iter().zip([0.0, 2.0, 4.0, 6.0, 8.0]) {
            assert!((x - expected).abs() < 1e-4, "spawn x {x}, expected {expected}");
        }
    }

    #[test]
    fn set_settings_recycles_every_active_particle() {
        let mut emitter = emitter_with(burst_settings(8.0), 42);
        emitter.add_particles(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(emitter.active_count(), 8);
        let total = emitter.active_count() + emitter.free_count();

        emitter.set_settings(EmitterSettings::explosion());
        assert_eq!(emitter.active_count(), 0);
        assert_eq!(emitter.free_count(), total);
    }

    #[test]
    fn pool_grows_past_initial_size_without_error() {
        // 60-particle bursts with 5..7s lifespans outrun the 100-slot pool
        let mut emitter = emitter_with(
            EmitterSettings {
                min_life_span: 100.0,
                max_life_span: 100.0,
                min_burst_time: 0.0,
                max_burst_time: 0.0,
                ..burst_settings(60.0)
            },
            42,
        );
        for _ in 0..4 {
            emitter.update(0.01, Vec2::ZERO);
        }
        assert!(emitter.active_count() > INITIAL_POOL_SIZE);
    }

    #[test]
    fn trajectories_are_deterministic_for_a_fixed_seed() {
        let run = || {
            let mut emitter = emitter_with(EmitterSettings::droplets(), 0xE1_u32);
            let mut location = Vec2::new(100.0, 100.0);
            for step in 0..60 {
                location.x += step as f32; // moving pointer exercises continuous mode
                emitter.update(1.0 / 30.0, location);
            }
            emitter
                .pool
                .active_particles()
                .flat_map(|p| {
                    [
                        p.position.x.to_bits(),
                        p.position.y.to_bits(),
                        p.velocity.x.to_bits(),
                        p.velocity.y.to_bits(),
                        p.orientation.to_bits(),
                        p.scale.to_bits(),
                    ]
                })
                .collect::<Vec<u32>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn dead_particles_return_to_the_free_pool() {
        let mut emitter = emitter_with(
            EmitterSettings {
                min_life_span: 0.1,
                max_life_span: 0.1,
                min_burst_time: 100.0,
                max_burst_time: 100.0,
                ..burst_settings(10.0)
            },
            42,
        );
        emitter.update(0.01, Vec2::ZERO); // first update emits immediately
        assert_eq!(emitter.active_count(), 10);

        emitter.update(0.2, Vec2::ZERO); // everything expires
        assert_eq!(emitter.active_count(), 0);
        assert_eq!(emitter.free_count(), INITIAL_POOL_SIZE);
    }

    #[test]
    fn draw_emits_one_quad_per_active_particle() {
        let mut emitter = emitter_with(burst_settings(6.0), 42);
        emitter.update(0.01, Vec2::new(40.0, 40.0));
        let active = emitter.active_count();

        let mut target = RecordingTarget::default();
        emitter.draw(&mut target, 0.01);

        assert_eq!(target.quads.len(), active);
        for quad in &target.quads {
            // Newly spawned particles are near the start of the fade
            assert!(quad.alpha >= 0.0 && quad.alpha < 0.1);
            assert_eq!(quad.blend, BlendMode::Alpha);
            // Pivot is the stub texture's center
            assert_eq!(quad.transform.origin, Vec2::new(8.0, 8.0));
        }
    }

    #[test]
    fn missing_texture_degrades_draw_to_a_no_op() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut emitter = ParticleEmitter::new(
            Arc::new(FailingProvider),
            burst_settings(5.0),
            EmitterRng::new(42),
        );
        // Simulation continues without a texture
        emitter.update(0.01, Vec2::ZERO);
        assert_eq!(emitter.active_count(), 5);

        let mut target = RecordingTarget::default();
        emitter.draw(&mut target, 0.01);
        assert!(target.quads.is_empty());
    }
}
