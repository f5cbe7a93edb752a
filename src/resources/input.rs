//! Per-frame input resource.
//!
//! Raw polling belongs to the platform layer. Once per frame the frontend
//! hands an [`InputSource`] to
//! [`capture_input`](crate::systems::input::capture_input), which snapshots the
//! keys the game cares about into [`InputState`]. Every system and state in
//! that frame reads the same snapshot.
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Keys the game reacts to, independent of any windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Null,
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
}

/// Frame-delivered key queries, implemented by the platform layer.
pub trait InputSource {
    /// Whether `key` is held down this frame.
    fn is_pressed(&self, key: Key) -> bool;
    /// Whether `key` went down this frame.
    fn is_just_pressed(&self, key: Key) -> bool;
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated key binding.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,

    /// The key bound to this action.
    pub key_binding: Key,
}

impl BoolState {
    fn bound_to(key_binding: Key) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding,
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(Key::Null)
    }
}

/// Resource capturing the per-frame key state relevant to the game.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_left: BoolState,
    pub move_right: BoolState,
    pub menu_up: BoolState,
    pub menu_down: BoolState,
    pub fire: BoolState,
    pub confirm: BoolState,
    pub back: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_left: BoolState::bound_to(Key::Left),
            move_right: BoolState::bound_to(Key::Right),
            menu_up: BoolState::bound_to(Key::Up),
            menu_down: BoolState::bound_to(Key::Down),
            fire: BoolState::bound_to(Key::Space),
            confirm: BoolState::bound_to(Key::Enter),
            back: BoolState::bound_to(Key::Escape),
        }
    }
}

impl InputState {
    pub fn actions_mut(&mut self) -> [&mut BoolState; 7] {
        [
            &mut self.move_left,
            &mut self.move_right,
            &mut self.menu_up,
            &mut self.menu_down,
            &mut self.fire,
            &mut self.confirm,
            &mut self.back,
        ]
    }
}
