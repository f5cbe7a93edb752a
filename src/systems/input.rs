use bevy_ecs::prelude::*;

use crate::resources::input::{InputSource, InputState};

/// Snapshot `source` into the [`InputState`] resource, inserting it if
/// missing.
///
/// Called once per frame before the state stack updates.
pub fn capture_input<S: InputSource + ?Sized>(world: &mut World, source: &S) {
    let mut input = world.get_resource_or_insert_with(InputState::default);
    for action in input.actions_mut() {
        action.active = source.is_pressed(action.key_binding);
        action.just_pressed = source.is_just_pressed(action.key_binding);
    }
}
