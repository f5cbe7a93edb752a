//! Projectile component.
//!
//! Which side fired a bullet is expressed by composition: player bullets
//! carry [`Player`](super::player::Player), enemy bullets carry
//! [`Enemy`](super::alien::Enemy).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::BoxCollider;

#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub width: f32,
    pub height: f32,
    /// Signed vertical speed in field units per tick. Negative moves up.
    pub velocity: f32,
    /// Hits this bullet can still absorb before it is consumed.
    pub health: u32,
}

impl Bullet {
    pub fn new(width: f32, height: f32, velocity: f32) -> Self {
        Self {
            width,
            height,
            velocity,
            health: 0,
        }
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    pub fn collider(&self) -> BoxCollider {
        BoxCollider::new(self.width, self.height)
    }

    /// Register one hit. Returns `true` when the bullet is used up.
    pub fn absorb_hit(&mut self) -> bool {
        if self.health > 0 {
            self.health -= 1;
            false
        } else {
            true
        }
    }
}
