//! Ember Particles - Pooled 2D particle simulation
//!
//! Provides per-emitter particle simulation with:
//! - Slot-pool recycling (allocation-free steady state)
//! - Burst and continuous emission from declarative profiles
//! - Parabolic lifetime fade to avoid pop-in/pop-out
//! - A world implementing the scheduler's `Simulation` contract

pub mod curves;
pub mod emitter;
pub mod particle;
pub mod rand;
pub mod settings;
pub mod world;

#[cfg(test)]
mod testutil;

pub use emitter::ParticleEmitter;
pub use particle::{Particle, ParticlePool};
pub use rand::EmitterRng;
pub use settings::{AccelerationMode, EmissionMode, EmitterSettings, Preset};
pub use world::ParticleWorld;
