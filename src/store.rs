//! Entity store contract.
//!
//! The store is a plain [`bevy_ecs::world::World`]: generational entity ids,
//! per-type component storage and conjunctive queries come from the ECS.
//! [`EntityStore`] pins down the handful of operations the game relies on,
//! including the tombstone rule: everything marked [`Deleted`] is invisible
//! to [`EntityStore::query_ids`].

use bevy_ecs::prelude::*;
use bevy_ecs::query::QueryFilter;

use crate::components::deleted::Deleted;
use crate::error::CoreError;

pub trait EntityStore {
    /// Create an entity with no components.
    fn create(&mut self) -> Entity;

    /// Attach components to an existing entity, replacing kinds it already has.
    fn attach<B: Bundle>(&mut self, id: Entity, bundle: B) -> Result<(), CoreError>;

    /// Remove the component kinds in `B`. Kinds the entity lacks are ignored.
    fn detach<B: Bundle>(&mut self, id: Entity) -> Result<(), CoreError>;

    /// Snapshot of the live entities matching filter `F`.
    ///
    /// Entities carrying [`Deleted`] never match. The returned list is not
    /// affected by later spawns or despawns.
    fn query_ids<F: QueryFilter + 'static>(&mut self) -> Vec<Entity>;

    /// Flag an entity for removal at the end of the frame.
    fn mark_deleted(&mut self, id: Entity) -> Result<(), CoreError> {
        self.attach(id, Deleted)
    }

    /// Despawn a batch of entities. Ids that no longer exist are skipped.
    fn delete(&mut self, ids: &[Entity]);

    /// Despawn every entity. Only used on state teardown.
    fn delete_all(&mut self);
}

impl EntityStore for World {
    fn create(&mut self) -> Entity {
        self.spawn_empty().id()
    }

    fn attach<B: Bundle>(&mut self, id: Entity, bundle: B) -> Result<(), CoreError> {
        let mut entity = self
            .get_entity_mut(id)
            .map_err(|_| CoreError::UnknownEntity(id))?;
        entity.insert(bundle);
        Ok(())
    }

    fn detach<B: Bundle>(&mut self, id: Entity) -> Result<(), CoreError> {
        let mut entity = self
            .get_entity_mut(id)
            .map_err(|_| CoreError::UnknownEntity(id))?;
        entity.remove::<B>();
        Ok(())
    }

    fn query_ids<F: QueryFilter + 'static>(&mut self) -> Vec<Entity> {
        let mut query = self.query_filtered::<Entity, (F, Without<Deleted>)>();
        query.iter(self).collect()
    }

    fn delete(&mut self, ids: &[Entity]) {
        for &id in ids {
            if let Ok(entity) = self.get_entity_mut(id) {
                entity.despawn();
            }
        }
    }

    fn delete_all(&mut self) {
        let ids: Vec<Entity> = self.query::<Entity>().iter(self).collect();
        for id in ids {
            self.despawn(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::alien::{Alien, Enemy};
    use crate::components::player::Player;

    #[test]
    fn attach_and_query_by_conjunction() {
        let mut world = World::new();
        let a = world.create();
        let b = world.create();
        world.attach(a, (Enemy, Alien::new(8.0, 8.0))).unwrap();
        world.attach(b, Enemy).unwrap();

        let both = world.query_ids::<(With<Enemy>, With<Alien>)>();
        assert_eq!(both, vec![a]);
        let enemies = world.query_ids::<With<Enemy>>();
        assert_eq!(enemies.len(), 2);
    }

    #[test]
    fn detach_is_idempotent() {
        let mut world = World::new();
        let a = world.create();
        world.attach(a, Player).unwrap();
        world.detach::<Player>(a).unwrap();
        world.detach::<Player>(a).unwrap();
        assert!(world.query_ids::<With<Player>>().is_empty());
    }

    #[test]
    fn attach_to_despawned_entity_fails() {
        let mut world = World::new();
        let a = world.create();
        world.delete(&[a]);
        assert_eq!(world.attach(a, Player), Err(CoreError::UnknownEntity(a)));
    }

    #[test]
    fn stale_id_does_not_alias_new_entity() {
        let mut world = World::new();
        let a = world.create();
        world.delete(&[a]);
        let b = world.create();
        assert_ne!(a, b);
        assert!(world.attach(a, Player).is_err());
        assert!(world.attach(b, Player).is_ok());
    }

    #[test]
    fn deleted_entities_are_hidden_from_queries() {
        let mut world = World::new();
        let a = world.create();
        let b = world.create();
        world.attach(a, Enemy).unwrap();
        world.attach(b, Enemy).unwrap();
        world.mark_deleted(a).unwrap();
        assert_eq!(world.query_ids::<With<Enemy>>(), vec![b]);
    }

    #[test]
    fn delete_all_empties_the_store() {
        let mut world = World::new();
        for _ in 0..5 {
            let e = world.create();
            world.attach(e, Enemy).unwrap();
        }
        world.delete_all();
        assert!(world.query_ids::<With<Enemy>>().is_empty());
        assert_eq!(world.query::<Entity>().iter(&world).count(), 0);
    }
}
