use bevy_ecs::prelude::*;

use super::{State, Transition};
use crate::error::CoreError;
use crate::game::{Descriptor, spawn_from_descriptor};
use crate::resources::input::InputState;
use crate::store::EntityStore;

/// Pushed over gameplay after a lost life; confirm or fire goes back.
#[derive(Debug, Default)]
pub struct DeathState {
    entities: Vec<Entity>,
}

impl State for DeathState {
    fn on_start(&mut self, world: &mut World) {
        self.entities = spawn_from_descriptor(world, Descriptor::Death);
    }

    fn on_stop(&mut self, world: &mut World) {
        world.delete(&self.entities);
        self.entities.clear();
    }

    fn update<F: ?Sized>(
        &mut self,
        world: &mut World,
        _frame: &mut F,
    ) -> Result<Transition, CoreError> {
        let proceed = world
            .get_resource::<InputState>()
            .is_some_and(|input| input.confirm.just_pressed || input.fire.just_pressed);
        Ok(if proceed {
            Transition::Pop
        } else {
            Transition::None
        })
    }
}
