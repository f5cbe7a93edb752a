//! Per-run game resources.
//!
//! [`GameResources`] holds the state of a gameplay run that does not belong
//! to any single entity. It is inserted by the gameplay state's start hook
//! and removed by its stop hook, so it only exists while a run is alive.

use bevy_ecs::prelude::Resource;
use log::debug;

/// Pending high-level event raised by the pipeline for the gameplay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateEvent {
    #[default]
    None,
    Death,
    GameOver,
}

#[derive(Resource, Debug, Clone)]
pub struct GameResources {
    pub score: u32,
    pub lives: u32,
    /// Waves cleared so far.
    pub wave: u32,
    state_event: StateEvent,
    /// `GameOver` has already been raised for this run.
    game_over_raised: bool,
}

impl GameResources {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            wave: 0,
            state_event: StateEvent::None,
            game_over_raised: false,
        }
    }

    /// Read the pending event without consuming it.
    pub fn state_event(&self) -> StateEvent {
        self.state_event
    }

    /// Raise `event` unless another event is already pending.
    ///
    /// Returns whether the write took effect. A dropped write is not an
    /// error: the first event raised in a frame wins.
    pub fn set_state_event(&mut self, event: StateEvent) -> bool {
        if self.state_event != StateEvent::None {
            debug!(
                "Dropping state event {:?}, {:?} already pending",
                event, self.state_event
            );
            return false;
        }
        self.state_event = event;
        true
    }

    /// Consume the pending event, resetting it to [`StateEvent::None`].
    pub fn take_state_event(&mut self) -> StateEvent {
        std::mem::take(&mut self.state_event)
    }

    /// Remove one life. Returns the lives left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Raise `GameOver` the first time it is called with no lives left.
    pub fn raise_game_over(&mut self) -> bool {
        if self.lives > 0 || self.game_over_raised {
            return false;
        }
        if self.set_state_event(StateEvent::GameOver) {
            self.game_over_raised = true;
            return true;
        }
        false
    }

    pub fn game_over_raised(&self) -> bool {
        self.game_over_raised
    }
}
