//! Ember Core - Foundational types for the Ember engine
//!
//! This crate provides the core types that all other Ember crates depend on:
//! - `Vec2`, `Rect`, `Color` - Spatial and color types
//! - Error types and Result alias

mod error;
mod types;

pub use error::{EmberError, Result};
pub use types::{Color, Rect, Vec2};
