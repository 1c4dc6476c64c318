//! Contracts between the simulation and its platform collaborators:
//! texture loading and quad rendering.

use ember_core::{Color, Result, Vec2};

/// Blend mode applied when compositing a textured quad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Alpha,
    Additive,
}

/// A decoded RGBA8 texture
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Texture {
    pub fn new(name: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            name: name.into(),
            width,
            height,
            pixels,
        }
    }

    /// Center point, used as the rotation pivot and draw offset
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Supplies decoded textures by name.
///
/// Implemented by the platform's asset layer. A load failure degrades the
/// caller's rendering; it is never fatal to the simulation.
pub trait TextureProvider: Send + Sync {
    fn load_texture(&self, name: &str) -> Result<Texture>;
}

/// Placement of a textured quad: `origin` (in texture pixels) is mapped onto
/// `position`, and rotation/scale are applied about that point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadTransform {
    pub position: Vec2,
    pub origin: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    pub scale: f32,
}

/// Draw calls the simulation issues from within its draw callback
pub trait RenderTarget {
    fn clear(&mut self, color: Color);

    fn draw_texture(
        &mut self,
        texture: &Texture,
        transform: &QuadTransform,
        alpha: f32,
        blend: BlendMode,
    );
}
