//! Player-side components.
//!
//! The ship is the entity carrying both [`Player`] and [`Controllable`].
//! Bullets fired by the ship carry [`Player`] too, which is how the
//! collision system tells the two sides apart.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::BoxCollider;

/// Marker for the user-controlled side (ship and its bullets).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Movement bounds of an input-driven entity.
///
/// The ship's x position is clamped so that the whole `width` stays inside
/// the play-field.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Controllable {
    pub width: f32,
    pub height: f32,
}

impl Controllable {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn collider(&self) -> BoxCollider {
        BoxCollider::new(self.width, self.height)
    }
}

/// Baseline marker. Aliens whose bottom edge reaches this entity's y
/// have invaded the player's row.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PlayerLine;
