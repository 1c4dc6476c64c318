//! Pointer input tracking
//!
//! The simulation only needs the latest known pointer location, not event
//! granularity. The platform's input callback writes it; the update thread
//! reads it once per step.

use ember_core::Vec2;
use std::sync::{Mutex, PoisonError};

/// Latest-known pointer location, shared between the platform input callback
/// and the scheduler's update thread.
pub struct PointerState {
    position: Mutex<Vec2>,
}

impl PointerState {
    pub fn new(initial: Vec2) -> Self {
        Self {
            position: Mutex::new(initial),
        }
    }

    /// Record a new pointer location (called from the platform thread)
    pub fn set(&self, location: Vec2) {
        *self
            .position
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = location;
    }

    /// Latest recorded location
    pub fn latest(&self) -> Vec2 {
        *self
            .position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_latest() {
        let pointer = PointerState::new(Vec2::new(300.0, 300.0));
        assert_eq!(pointer.latest(), Vec2::new(300.0, 300.0));

        pointer.set(Vec2::new(12.0, 34.0));
        assert_eq!(pointer.latest(), Vec2::new(12.0, 34.0));
    }

    #[test]
    fn shared_across_threads() {
        use std::sync::Arc;

        let pointer = Arc::new(PointerState::default());
        let writer = pointer.clone();
        std::thread::spawn(move || writer.set(Vec2::new(5.0, 6.0)))
            .join()
            .unwrap();
        assert_eq!(pointer.latest(), Vec2::new(5.0, 6.0));
    }
}
