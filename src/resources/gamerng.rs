//! Seeded random source for the simulation.
//!
//! Systems draw from the shared [`GameRng`] resource instead of a
//! thread-local generator so that a run is reproducible from its seed.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub Rng);

impl GameRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(Rng::with_seed(seed))
    }

    /// Bernoulli trial with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        p > 0.0 && self.0.f32() < p
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(Rng::new())
    }
}
