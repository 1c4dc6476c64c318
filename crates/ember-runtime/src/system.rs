//! Simulation contract driven by the frame scheduler

use crate::surface::RenderTarget;
use ember_core::Vec2;

/// A world the scheduler can drive.
///
/// The scheduler knows nothing about the simulation beyond this pair:
/// `update` runs on the dedicated update thread, `draw` runs inside the
/// platform's render callback. The draw rendezvous guarantees the two
/// never overlap.
pub trait Simulation: Send {
    /// Advance the world by `dt` seconds using the latest pointer location
    fn update(&mut self, dt: f32, pointer: Vec2);

    /// Render the world. `dt` is the elapsed time of the step being drawn.
    fn draw(&mut self, target: &mut dyn RenderTarget, dt: f32);
}
