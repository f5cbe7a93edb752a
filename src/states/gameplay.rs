//! The playing state.
//!
//! On start it spawns the level, the ship and the bunkers, inserts a fresh
//! [`GameResources`] and builds the gameplay pipeline. Each update runs the
//! pipeline once and turns Escape or the consumed state event into a push.
//!
//! Pausing (a menu or the death screen pushed on top) freezes the pipeline
//! because only the top state updates. Animations keep being driven by the
//! engine pass, so `on_pause` parks every running or about-to-start one and
//! `on_resume` restarts exactly those.

use std::fmt;

use bevy_ecs::prelude::*;
use log::{debug, info};

use super::{DeathState, GameOverState, PauseMenuState, State, Transition};
use crate::components::alien::AlienMaster;
use crate::components::animation::{AnimationCommand, AnimationControl};
use crate::components::deleted::Deleted;
use crate::error::CoreError;
use crate::game::{Descriptor, spawn_from_descriptor};
use crate::resources::cursor::set_cursor_visible;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamerng::GameRng;
use crate::resources::gameresources::{GameResources, StateEvent};
use crate::resources::input::InputState;
use crate::store::EntityStore;
use crate::systems::pipeline::gameplay_schedule;

#[derive(Default)]
pub struct GameplayState {
    pipeline: Option<Schedule>,
    /// Animations parked by the last `on_pause`, with the command that
    /// brings each one back.
    paused_animations: Vec<(Entity, AnimationCommand)>,
}

impl fmt::Debug for GameplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameplayState")
            .field("pipeline", &self.pipeline.is_some())
            .field("paused_animations", &self.paused_animations)
            .finish()
    }
}

impl State for GameplayState {
    fn on_start(&mut self, world: &mut World) {
        let config = world.get_resource_or_insert_with(GameConfig::new).clone();
        if !world.contains_resource::<GameRng>() {
            world.insert_resource(GameRng::with_seed(config.seed));
        }
        world.init_resource::<InputState>();

        for descriptor in [Descriptor::Level, Descriptor::Player, Descriptor::Bunkers] {
            spawn_from_descriptor(world, descriptor);
        }
        world.insert_resource(GameResources::new(config.player_lives));

        self.pipeline = Some(gameplay_schedule());
        self.paused_animations.clear();
        set_cursor_visible(world, false);
        info!("Gameplay started with {} lives", config.player_lives);
    }

    fn on_pause(&mut self, world: &mut World) {
        self.paused_animations.clear();
        let mut query = world.query::<(Entity, &mut AnimationControl)>();
        for (entity, mut control) in query.iter_mut(world) {
            // a start queued this frame counts as running
            let resume = match control.command {
                Some(command @ (AnimationCommand::Start | AnimationCommand::Restart)) => command,
                _ if control.is_running() => AnimationCommand::Start,
                _ => continue,
            };
            control.command = Some(AnimationCommand::Pause);
            self.paused_animations.push((entity, resume));
        }
        debug!("Gameplay paused, parked {} animations", self.paused_animations.len());
        set_cursor_visible(world, true);
    }

    fn on_resume(&mut self, world: &mut World) {
        for (entity, command) in self.paused_animations.drain(..) {
            // the entity may have been torn down in between
            if let Some(mut control) = world.get_mut::<AnimationControl>(entity) {
                control.command = Some(command);
            }
        }
        debug!("Gameplay resumed");
        set_cursor_visible(world, false);
    }

    fn on_stop(&mut self, world: &mut World) {
        if let Some(game) = world.remove_resource::<GameResources>() {
            info!("Gameplay stopped, score {} wave {}", game.score, game.wave);
        }
        world.delete_all();
        self.pipeline = None;
        self.paused_animations.clear();
        set_cursor_visible(world, true);
    }

    fn update<F: ?Sized>(
        &mut self,
        world: &mut World,
        _frame: &mut F,
    ) -> Result<Transition, CoreError> {
        let masters = world
            .query_filtered::<(), (With<AlienMaster>, Without<Deleted>)>()
            .iter(world)
            .count();
        if masters > 1 {
            return Err(CoreError::MultipleAlienMasters(masters));
        }

        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.run(world);
        }

        if world
            .get_resource::<InputState>()
            .is_some_and(|input| input.back.just_pressed)
        {
            return Ok(Transition::push(PauseMenuState::default()));
        }

        let event = world
            .get_resource_mut::<GameResources>()
            .map(|mut game| game.take_state_event())
            .unwrap_or_default();
        Ok(match event {
            StateEvent::None => Transition::None,
            StateEvent::Death => Transition::push(DeathState::default()),
            StateEvent::GameOver => Transition::push(GameOverState::default()),
        })
    }
}
