//! Tombstone marker component.
//!
//! Systems never despawn entities directly. They insert [`Deleted`] instead,
//! every later query in the frame filters it out with `Without<Deleted>`, and
//! [`delete`](crate::systems::delete::delete) physically removes the entity at
//! the end of the pipeline.

use bevy_ecs::prelude::Component;

/// Entity is logically removed and will be despawned at the end of the frame.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Deleted;
