//! Ember Runtime - Frame scheduling infrastructure
//!
//! Provides the building blocks that pace and host a simulation:
//! - `FrameTimer` — fixed-period pacing with oversleep correction
//! - `GameLoop` — single-threaded update/draw loop
//! - `SurfaceLoop` / `RenderHandle` — update thread plus platform-driven
//!   draw callback, synchronized by a draw rendezvous
//! - `Simulation` — the update/draw contract the scheduler drives
//! - `RenderTarget` / `TextureProvider` / `PointerState` — platform contracts

mod clock;
mod game_loop;
mod input;
mod surface;
mod surface_loop;
mod system;

pub use clock::FrameTimer;
pub use game_loop::{GameLoop, StepHandler};
pub use input::PointerState;
pub use surface::{BlendMode, QuadTransform, RenderTarget, Texture, TextureProvider};
pub use surface_loop::{RenderHandle, SurfaceLoop};
pub use system::Simulation;
