use bevy_ecs::prelude::*;
use log::debug;

use super::{GameplayState, MainMenuState, State, Transition};
use crate::error::CoreError;
use crate::game::{Descriptor, spawn_from_descriptor};
use crate::resources::cursor::set_cursor_visible;
use crate::store::EntityStore;
use crate::systems::menu::{Menu, update_menu};

/// Menu shown over the finished game. Both "new game" and "main menu" tear
/// the finished run down first.
#[derive(Debug, Default)]
pub struct GameOverState {
    entities: Vec<Entity>,
    selection: usize,
}

impl Menu for GameOverState {
    fn selection(&self) -> usize {
        self.selection
    }

    fn set_selection(&mut self, selection: usize) {
        self.selection = selection;
    }

    fn confirm_selection(&self) -> Result<Transition, CoreError> {
        match self.selection {
            0 => Ok(Transition::replace(GameplayState::default())),
            1 => Ok(Transition::replace(MainMenuState::default())),
            2 => Ok(Transition::Quit),
            other => Err(CoreError::InvalidSelection(other)),
        }
    }

    fn menu_ids(&self) -> &'static [&'static str] {
        &["new_game", "main_menu", "exit"]
    }

    fn cursor_menu_ids(&self) -> &'static [&'static str] {
        &["cursor_new_game", "cursor_main_menu", "cursor_exit"]
    }
}

impl State for GameOverState {
    fn on_start(&mut self, world: &mut World) {
        self.selection = 0;
        self.entities = spawn_from_descriptor(world, Descriptor::GameOver);
        set_cursor_visible(world, true);
    }

    fn on_stop(&mut self, world: &mut World) {
        debug!("Game over: deleting {} entities", self.entities.len());
        world.delete(&self.entities);
        self.entities.clear();
    }

    fn update<F: ?Sized>(
        &mut self,
        world: &mut World,
        _frame: &mut F,
    ) -> Result<Transition, CoreError> {
        update_menu(self, world)
    }
}
