//! Lightweight seedable xorshift32 PRNG — no external crate needed
//!
//! Every random draw the emitter makes goes through one of these, so a
//! fixed seed reproduces a particle system bit-for-bit.

use ember_core::Vec2;

pub struct EmitterRng {
    state: u32,
}

impl EmitterRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }

    /// Returns a float in [min, max). A reversed range (min > max) draws
    /// from (max, min] instead; some emission profiles rely on this.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Unit vector for an angle drawn uniformly from [min_deg, max_deg].
    /// Profile angles are in degrees; the conversion to radians happens here.
    pub fn direction_deg(&mut self, min_deg: f32, max_deg: f32) -> Vec2 {
        Vec2::from_angle(self.range(min_deg, max_deg).to_radians())
    }
}
