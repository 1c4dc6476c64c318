//! Particle state, integration, and the slot pool

use ember_core::Vec2;

/// A single simulated particle.
///
/// All runtime angles are radians; profile values are converted at spawn.
#[derive(Clone, Debug, Default)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Orientation in radians
    pub orientation: f32,
    /// Angular velocity in radians/second
    pub angular_velocity: f32,
    pub scale: f32,
    pub scale_growth: f32,
    /// Length of time this particle remains alive, in seconds
    pub life_span: f32,
    pub time_since_birth: f32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.time_since_birth < self.life_span
    }

    /// Reset all state for a fresh spawn. Pure assignment, no allocation.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        acceleration: Vec2,
        orientation: f32,
        angular_velocity: f32,
        scale: f32,
        scale_growth: f32,
        life_span: f32,
    ) {
        self.position = position;
        self.velocity = velocity;
        self.acceleration = acceleration;
        self.orientation = orientation;
        self.angular_velocity = angular_velocity;
        self.scale = scale;
        self.scale_growth = scale_growth;
        self.life_span = life_span;
        self.time_since_birth = 0.0;
    }

    /// Semi-implicit Euler step. Velocity integrates before position; the
    /// order is observable in trajectories and must not change.
    pub fn update(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.orientation += self.angular_velocity * dt;
        self.scale += self.scale_growth * dt;
        self.time_since_birth += dt;
    }
}

/// Arena of particle slots with an explicit free-index stack.
///
/// Spawning pops an index, death pushes it back; slots are reinitialized in
/// place and never dropped, so steady-state operation performs no heap
/// allocation. The arena grows only when the free stack is exhausted.
pub struct ParticlePool {
    slots: Vec<Particle>,
    /// Indices of live particles, in insertion order
    active: Vec<usize>,
    /// Indices of recyclable slots (LIFO)
    free: Vec<usize>,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            active: Vec::with_capacity(capacity),
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Claim a slot for a new particle, growing the arena if none are free.
    /// Growth is the fallback path, not an error.
    pub fn acquire(&mut self) -> usize {
        let index = self.free.pop().unwrap_or_else(|| {
            self.slots.push(Particle::default());
            self.slots.len() - 1
        });
        self.active.push(index);
        index
    }

    pub fn get(&self, index: usize) -> &Particle {
        &self.slots[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.slots[index]
    }

    /// Return every active particle to the free stack
    pub fn recycle_all(&mut self) {
        self.free.extend(self.active.drain(..));
    }

    /// Visit every active particle exactly once; any particle dead after its
    /// visit is recycled in-traversal with no skips or double-visits.
    pub fn update_active(&mut self, mut visit: impl FnMut(&mut Particle)) {
        let mut i = 0;
        while i < self.active.len() {
            let index = self.active[i];
            let particle = &mut self.slots[index];
            visit(particle);
            if particle.is_alive() {
                i += 1;
            } else {
                self.active.swap_remove(i);
                self.free.push(index);
                // The swapped-in index is examined on the next pass of the
                // caller, not re-visited now
            }
        }
    }

    /// Iterate live particles in active-list order
    pub fn active_particles(&self) -> impl Iterator<Item = &Particle> {
        self.active.iter().map(|&index| &self.slots[index])
    }
}
