use bevy_ecs::prelude::*;
use log::debug;

use super::{MainMenuState, State, Transition};
use crate::error::CoreError;
use crate::game::{Descriptor, spawn_from_descriptor};
use crate::resources::cursor::set_cursor_visible;
use crate::resources::input::InputState;
use crate::store::EntityStore;
use crate::systems::menu::{Menu, update_menu};

/// Menu pushed over gameplay. Escape resumes like the first item.
#[derive(Debug, Default)]
pub struct PauseMenuState {
    entities: Vec<Entity>,
    selection: usize,
}

impl Menu for PauseMenuState {
    fn selection(&self) -> usize {
        self.selection
    }

    fn set_selection(&mut self, selection: usize) {
        self.selection = selection;
    }

    fn confirm_selection(&self) -> Result<Transition, CoreError> {
        match self.selection {
            0 => Ok(Transition::Pop),
            1 => Ok(Transition::replace(MainMenuState::default())),
            2 => Ok(Transition::Quit),
            other => Err(CoreError::InvalidSelection(other)),
        }
    }

    fn menu_ids(&self) -> &'static [&'static str] {
        &["resume", "main_menu", "exit"]
    }

    fn cursor_menu_ids(&self) -> &'static [&'static str] {
        &["cursor_resume", "cursor_main_menu", "cursor_exit"]
    }
}

impl State for PauseMenuState {
    fn on_start(&mut self, world: &mut World) {
        self.selection = 0;
        self.entities = spawn_from_descriptor(world, Descriptor::PauseMenu);
        set_cursor_visible(world, true);
    }

    fn on_stop(&mut self, world: &mut World) {
        debug!("Pause menu: deleting {} entities", self.entities.len());
        world.delete(&self.entities);
        self.entities.clear();
    }

    fn update<F: ?Sized>(
        &mut self,
        world: &mut World,
        _frame: &mut F,
    ) -> Result<Transition, CoreError> {
        if world
            .get_resource::<InputState>()
            .is_some_and(|input| input.back.just_pressed)
        {
            return Ok(Transition::Pop);
        }
        update_menu(self, world)
    }
}
