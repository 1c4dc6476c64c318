//! World composing one emitter with the preset-cycling "next" control

use crate::emitter::ParticleEmitter;
use crate::rand::EmitterRng;
use crate::settings::Preset;
use ember_core::{Color, Rect, Vec2};
use ember_runtime::{BlendMode, QuadTransform, RenderTarget, Simulation, Texture, TextureProvider};
use std::sync::Arc;

/// Default seed for the emitter's PRNG; tests construct worlds with their own
const DEFAULT_SEED: u32 = 0xDEAD_BEEF;

/// Texture for the "next preset" affordance
const NEXT_TEXTURE: &str = "img/NextArrow.png";
/// Top-left corner of the affordance hot zone
const NEXT_REGION_ORIGIN: f32 = 50.0;
/// Hot-zone size used when the affordance texture is unavailable
const NEXT_REGION_FALLBACK_SIZE: f32 = 96.0;

/// A world containing a single particle system plus the hot-zone control
/// that cycles its presets.
pub struct ParticleWorld {
    emitter: ParticleEmitter,
    preset: Preset,
    /// Edge trigger: armed while the pointer is outside the hot zone, so a
    /// continuous press cycles exactly once
    next_trigger_armed: bool,
    next_region: Rect,
    next_texture: Option<Arc<Texture>>,
}

impl ParticleWorld {
    pub fn new(provider: Arc<dyn TextureProvider>) -> Self {
        Self::with_rng(provider, EmitterRng::new(DEFAULT_SEED))
    }

    pub fn with_rng(provider: Arc<dyn TextureProvider>, rng: EmitterRng) -> Self {
        let preset = Preset::Explosion;
        let emitter = ParticleEmitter::new(provider.clone(), preset.settings(), rng);

        let (next_texture, width, height) = match provider.load_texture(NEXT_TEXTURE) {
            Ok(texture) => {
                let (w, h) = (texture.width as f32, texture.height as f32);
                (Some(Arc::new(texture)), w, h)
            }
            Err(err) => {
                log::warn!("next-preset graphic unavailable: {err}");
                (None, NEXT_REGION_FALLBACK_SIZE, NEXT_REGION_FALLBACK_SIZE)
            }
        };

        Self {
            emitter,
            preset,
            next_trigger_armed: true,
            next_region: Rect::from_origin_size(
                NEXT_REGION_ORIGIN,
                NEXT_REGION_ORIGIN,
                width,
                height,
            ),
            next_texture,
        }
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn emitter(&self) -> &ParticleEmitter {
        &self.emitter
    }

    fn cycle_preset(&mut self) {
        self.preset = self.preset.next();
        self.emitter.set_settings(self.preset.settings());
    }
}

impl Simulation for ParticleWorld {
    fn update(&mut self, dt: f32, pointer: Vec2) {
        let inside = self.next_region.contains(pointer);
        if inside && self.next_trigger_armed {
            self.cycle_preset();
            self.next_trigger_armed = false;
        } else if !inside {
            self.next_trigger_armed = true;
        }

        self.emitter.update(dt, pointer);
    }

    fn draw(&mut self, target: &mut dyn RenderTarget, dt: f32) {
        target.clear(Color::BLACK);
        self.emitter.draw(target, dt);

        if let Some(texture) = &self.next_texture {
            let transform = QuadTransform {
                position: self.next_region.center(),
                origin: texture.center(),
                rotation: 0.0,
                scale: 1.0,
            };
            target.draw_texture(texture, &transform, 1.0, BlendMode::Alpha);
        }
    }
}
