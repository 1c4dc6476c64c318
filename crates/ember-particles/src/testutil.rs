//! Shared test doubles for the emitter and world tests

use ember_core::{Color, EmberError, Result};
use ember_runtime::{BlendMode, QuadTransform, RenderTarget, Texture, TextureProvider};

/// Provider returning a 16x16 white texture for any name
pub struct StubProvider;

impl TextureProvider for StubProvider {
    fn load_texture(&self, name: &str) -> Result<Texture> {
        Ok(Texture::new(name, 16, 16, vec![255; 16 * 16 * 4]))
    }
}

/// Provider that fails every load
pub struct FailingProvider;

impl TextureProvider for FailingProvider {
    fn load_texture(&self, name: &str) -> Result<Texture> {
        Err(EmberError::AssetNotFound(name.to_string()))
    }
}

/// One recorded draw_texture call
pub struct RecordedQuad {
    pub texture: String,
    pub transform: QuadTransform,
    pub alpha: f32,
    pub blend: BlendMode,
}

/// Render target that records every call for inspection
#[derive(Default)]
pub struct RecordingTarget {
    pub clears: Vec<Color>,
    pub quads: Vec<RecordedQuad>,
}

impl RenderTarget for RecordingTarget {
    fn clear(&mut self, color: Color) {
        self.clears.push(color);
    }

    fn draw_texture(
        &mut self,
        texture: &Texture,
        transform: &QuadTransform,
        alpha: f32,
        blend: BlendMode,
    ) {
        self.quads.push(RecordedQuad {
            texture: texture.name.clone(),
            transform: *transform,
            alpha,
            blend,
        });
    }
}
