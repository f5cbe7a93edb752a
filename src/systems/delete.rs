use bevy_ecs::prelude::*;
use log::debug;

use crate::components::deleted::Deleted;

/// Despawn every entity carrying the [`Deleted`] tombstone.
///
/// Last system of the gameplay pipeline; nothing else removes entities
/// during a frame.
pub fn delete(mut commands: Commands, query: Query<Entity, With<Deleted>>) {
    let mut count = 0;
    for entity in query.iter() {
        commands.entity(entity).despawn();
        count += 1;
    }
    if count > 0 {
        debug!("Deleted {} entities", count);
    }
}
