use bevy_ecs::prelude::*;
use log::debug;

use super::{GameplayState, State, Transition};
use crate::error::CoreError;
use crate::game::{Descriptor, spawn_from_descriptor};
use crate::resources::cursor::set_cursor_visible;
use crate::resources::input::InputState;
use crate::store::EntityStore;
use crate::systems::menu::{Menu, update_menu};

/// Title menu: start a game or exit.
#[derive(Debug, Default)]
pub struct MainMenuState {
    entities: Vec<Entity>,
    selection: usize,
}

impl Menu for MainMenuState {
    fn selection(&self) -> usize {
        self.selection
    }

    fn set_selection(&mut self, selection: usize) {
        self.selection = selection;
    }

    fn confirm_selection(&self) -> Result<Transition, CoreError> {
        match self.selection {
            0 => Ok(Transition::switch(GameplayState::default())),
            1 => Ok(Transition::Quit),
            other => Err(CoreError::InvalidSelection(other)),
        }
    }

    fn menu_ids(&self) -> &'static [&'static str] {
        &["new_game", "exit"]
    }

    fn cursor_menu_ids(&self) -> &'static [&'static str] {
        &["cursor_new_game", "cursor_exit"]
    }
}

impl State for MainMenuState {
    fn on_start(&mut self, world: &mut World) {
        self.selection = 0;
        self.entities = spawn_from_descriptor(world, Descriptor::MainMenu);
        set_cursor_visible(world, true);
    }

    fn on_stop(&mut self, world: &mut World) {
        debug!("Main menu: deleting {} entities", self.entities.len());
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
            return Ok(Transition::Quit);
        }
        update_menu(self, world)
    }
}
