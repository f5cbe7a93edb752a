//! Destructible bunker component.
//!
//! A bunker's health is not a number but the set of pixels still standing.
//! Pixels are square cells of `pixel_size` field units laid out in a
//! `cols` × `rows` grid starting at the entity's
//! [`MapPosition`](super::mapposition::MapPosition). Cells are only ever
//! cleared, never restored.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::BoxCollider;

#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bunker {
    pub pixel_size: f32,
    pub cols: usize,
    pub rows: usize,
    /// Row-major grid; `true` means the pixel is still standing.
    pixels: Vec<bool>,
}

impl Bunker {
    /// A solid rectangular bunker.
    pub fn new(cols: usize, rows: usize, pixel_size: f32) -> Self {
        Self {
            pixel_size,
            cols,
            rows,
            pixels: vec![true; cols * rows],
        }
    }

    /// The classic arch shape: chamfered top corners and a notch cut out of
    /// the bottom middle third.
    pub fn arch(cols: usize, rows: usize, pixel_size: f32) -> Self {
        let mut bunker = Self::new(cols, rows, pixel_size);
        let chamfer = (rows / 4).min(cols / 2);
        for row in 0..chamfer {
            let cut = chamfer - row;
            for col in 0..cut {
                bunker.clear(col, row);
                bunker.clear(cols - 1 - col, row);
            }
        }
        let notch_start = cols / 3;
        let notch_end = cols - cols / 3;
        for row in rows - rows / 3..rows {
            for col in notch_start..notch_end {
                bunker.clear(col, row);
            }
        }
        bunker
    }

    pub fn width(&self) -> f32 {
        self.cols as f32 * self.pixel_size
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.pixel_size
    }

    /// Bounding box of the whole grid, standing pixels or not.
    pub fn collider(&self) -> BoxCollider {
        BoxCollider::new(self.width(), self.height())
    }

    pub fn is_standing(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && self.pixels[row * self.cols + col]
    }

    /// Number of pixels still standing.
    pub fn remaining(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    pub fn is_destroyed(&self) -> bool {
        self.remaining() == 0
    }

    fn clear(&mut self, col: usize, row: usize) {
        if col < self.cols && row < self.rows {
            self.pixels[row * self.cols + col] = false;
        }
    }

    /// Clear every standing pixel overlapped by `other` placed at
    /// `other_position`, with the bunker placed at `position`.
    ///
    /// Returns how many pixels were removed. Zero means `other` only touched
    /// holes (or missed entirely) and should not count as a hit.
    pub fn erase_region(&mut self, position: Vec2, other: &BoxCollider, other_position: Vec2) -> usize {
        if !self.collider().overlaps(position, other, other_position) {
            return 0;
        }
        let (min, max) = other.aabb(other_position);
        let local_min = (min - position) / self.pixel_size;
        let local_max = (max - position) / self.pixel_size;

        let col_start = local_min.x.floor().max(0.0) as usize;
        let row_start = local_min.y.floor().max(0.0) as usize;
        let col_end = (local_max.x.ceil().max(0.0) as usize).min(self.cols);
        let row_end = (local_max.y.ceil().max(0.0) as usize).min(self.rows);

        let mut removed = 0;
        for row in row_start..row_end {
            for col in col_start..col_end {
                if self.is_standing(col, row) {
                    self.clear(col, row);
                    removed += 1;
                }
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bunker_is_solid() {
        let bunker = Bunker::new(4, 3, 2.0);
        assert_eq!(bunker.remaining(), 12);
        assert_eq!(bunker.width(), 8.0);
        assert_eq!(bunker.height(), 6.0);
    }

    #[test]
    fn arch_has_holes() {
        let bunker = Bunker::arch(12, 8, 2.0);
        assert!(bunker.remaining() < 12 * 8);
        assert!(!bunker.is_standing(0, 0));
        assert!(!bunker.is_standing(6, 7));
        assert!(bunker.is_standing(6, 3));
    }

    #[test]
    fn erase_region_clears_only_overlapped_cells() {
        let mut bunker = Bunker::new(4, 4, 2.0);
        let bullet = BoxCollider::new(1.0, 1.0);
        // Bullet inside cell (1, 1)
        let removed = bunker.erase_region(Vec2::ZERO, &bullet, Vec2::new(2.5, 2.5));
        assert_eq!(removed, 1);
        assert!(!bunker.is_standing(1, 1));
        assert_eq!(bunker.remaining(), 15);
    }

    #[test]
    fn erase_region_spanning_cells() {
        let mut bunker = Bunker::new(4, 4, 2.0);
        let bullet = BoxCollider::new(2.0, 2.0);
        let removed = bunker.erase_region(Vec2::ZERO, &bullet, Vec2::new(1.0, 1.0));
        assert_eq!(removed, 4);
    }

    #[test]
    fn erasing_a_hole_removes_nothing() {
        let mut bunker = Bunker::new(4, 4, 2.0);
        let bullet = BoxCollider::new(1.0, 1.0);
        assert_eq!(bunker.erase_region(Vec2::ZERO, &bullet, Vec2::new(0.5, 0.5)), 1);
        assert_eq!(bunker.erase_region(Vec2::ZERO, &bullet, Vec2::new(0.5, 0.5)), 0);
    }

    #[test]
    fn miss_removes_nothing() {
        let mut bunker = Bunker::new(4, 4, 2.0);
        let bullet = BoxCollider::new(1.0, 1.0);
        assert_eq!(bunker.erase_region(Vec2::ZERO, &bullet, Vec2::new(20.0, 0.0)), 0);
        assert_eq!(bunker.remaining(), 16);
    }
}
