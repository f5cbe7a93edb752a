//! Menu presentation components.
//!
//! Menu states spawn one [`MenuItem`] entity per entry and one
//! [`MenuCursor`] per entry. The shared
//! [`update_menu`](crate::systems::menu::update_menu) helper keeps exactly
//! the cursor of the current selection visible.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Debug)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: String,
    pub position: Vec2,
}

impl MenuItem {
    pub fn new(id: &'static str, label: impl Into<String>, position: Vec2) -> Self {
        Self {
            id,
            label: label.into(),
            position,
        }
    }
}

#[derive(Component, Clone, Debug)]
pub struct MenuCursor {
    pub id: &'static str,
    pub visible: bool,
}

impl MenuCursor {
    pub fn new(id: &'static str) -> Self {
        Self { id, visible: false }
    }
}

/// Static text shown by a screen that is not a menu (title, death notice,
/// score readout).
#[derive(Component, Clone, Debug)]
pub struct Label {
    pub text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
