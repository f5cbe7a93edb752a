//! Axis-aligned bounding boxes.
//!
//! Components that carry a width and height ([`Controllable`], [`Alien`],
//! [`Bullet`], [`Bunker`]) expose a [`BoxCollider`] built from those
//! dimensions. The collision and life systems combine it with the entity's
//! [`MapPosition`](super::mapposition::MapPosition) to test overlaps.
//!
//! [`Controllable`]: super::player::Controllable
//! [`Alien`]: super::alien::Alien
//! [`Bullet`]: super::bullet::Bullet
//! [`Bunker`]: super::bunker::Bunker

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub size: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p1 = position + self.size;
        (position.min(p1), position.max(p1))
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    /// Touching edges do not count as an overlap.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}
