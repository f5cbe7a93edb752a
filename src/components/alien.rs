//! Swarm components.
//!
//! A swarm is one [`AlienMaster`] plus any number of [`Alien`] entities. The
//! master owns no geometry; it decides each tick which translation every
//! alien applies (see [`crate::systems::alien`]).

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::BoxCollider;

/// Marker for the hostile side (aliens and their bullets).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Enemy;

/// One member of the swarm.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub width: f32,
    pub height: f32,
    /// Offset applied by `move_alien` this tick, written by the master.
    pub translation: Vec2,
}

impl Alien {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            translation: Vec2::ZERO,
        }
    }

    pub fn collider(&self) -> BoxCollider {
        BoxCollider::new(self.width, self.height)
    }
}

/// Shared sweep state of the swarm.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlienMaster {
    /// Signed horizontal speed in field units per tick. Positive moves right.
    pub direction: f32,
    /// Set on the tick the swarm reaches an edge; the drop happens next tick.
    pub descend: bool,
    /// Number of aliens the wave started with, used to scale the speed.
    pub swarm_size: usize,
}

impl AlienMaster {
    pub fn new(direction: f32, swarm_size: usize) -> Self {
        Self {
            direction,
            descend: false,
            swarm_size,
        }
    }

    /// Horizontal speed for a swarm with `remaining` members left.
    ///
    /// The speed grows linearly with the fraction of the wave already
    /// destroyed; `acceleration` is the extra multiplier reached when a
    /// single alien is left.
    pub fn scaled_speed(&self, base_speed: f32, acceleration: f32, remaining: usize) -> f32 {
        if self.swarm_size <= 1 || remaining == 0 {
            return base_speed;
        }
        let destroyed = self.swarm_size.saturating_sub(remaining) as f32;
        let span = (self.swarm_size - 1) as f32;
        base_speed * (1.0 + acceleration * destroyed / span)
    }
}
