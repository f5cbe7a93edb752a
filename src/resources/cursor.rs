//! Mouse cursor visibility.
//!
//! The platform layer owns the real cursor; states only request a
//! visibility change when they are entered or left (hidden during gameplay,
//! visible otherwise). The frontend reads [`Cursor::visible`] each frame.

use bevy_ecs::prelude::*;
use log::debug;

#[derive(Resource, Debug, Clone, Copy)]
pub struct Cursor {
    visible: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl Cursor {
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            debug!("Cursor visible: {}", visible);
        }
        self.visible = visible;
    }
}

/// Toggle the cursor, inserting the resource on first use.
pub fn set_cursor_visible(world: &mut World, visible: bool) {
    world.get_resource_or_insert_with(Cursor::default).set_visible(visible);
}
