//! Animation playback control.
//!
//! Drawing sprites is not part of the simulation, but the objects that
//! control playback live in the store so that game states can pause and
//! resume them. A state writes a [`AnimationCommand`] into
//! [`AnimationControl::command`]; the
//! [`animation_playback`](crate::systems::animation::animation_playback)
//! system applies it on the next engine pass and advances running
//! animations one tick at a time.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlState {
    /// Never started, or stopped and rewound.
    Idle,
    Running,
    Paused,
    /// A non-looping animation reached its last frame.
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationCommand {
    Start,
    Pause,
    Stop,
    Restart,
}

#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct AnimationControl {
    pub animation_key: String,
    pub state: ControlState,
    /// Pending command, consumed by the playback system.
    pub command: Option<AnimationCommand>,
    pub frame_index: usize,
    pub frame_count: usize,
    /// Ticks each frame stays on screen.
    pub ticks_per_frame: u32,
    pub elapsed_ticks: u32,
    pub looped: bool,
}

impl AnimationControl {
    /// An idle, looping animation.
    pub fn new(animation_key: impl Into<String>, frame_count: usize, ticks_per_frame: u32) -> Self {
        Self {
            animation_key: animation_key.into(),
            state: ControlState::Idle,
            command: None,
            frame_index: 0,
            frame_count: frame_count.max(1),
            ticks_per_frame: ticks_per_frame.max(1),
            elapsed_ticks: 0,
            looped: true,
        }
    }

    /// Builder: start playing as soon as the entity is spawned.
    pub fn running(mut self) -> Self {
        self.state = ControlState::Running;
        self
    }

    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn is_running(&self) -> bool {
        self.state == ControlState::Running
    }

    /// Apply the pending command, if any.
    pub fn apply_command(&mut self) {
        let Some(command) = self.command.take() else {
            return;
        };
        match command {
            AnimationCommand::Start => {
                if self.state != ControlState::Ended {
                    self.state = ControlState::Running;
                }
            }
            AnimationCommand::Pause => {
                if self.state == ControlState::Running {
                    self.state = ControlState::Paused;
                }
            }
            AnimationCommand::Stop => {
                self.state = ControlState::Idle;
                self.frame_index = 0;
                self.elapsed_ticks = 0;
            }
            AnimationCommand::Restart => {
                self.state = ControlState::Running;
                self.frame_index = 0;
                self.elapsed_ticks = 0;
            }
        }
    }

    /// Advance a running animation by one tick.
    pub fn tick(&mut self) {
        if self.state != ControlState::Running {
            return;
        }
        self.elapsed_ticks += 1;
        if self.elapsed_ticks < self.ticks_per_frame {
            return;
        }
        self.elapsed_ticks = 0;
        self.frame_index += 1;
        if self.frame_index >= self.frame_count {
            if self.looped {
                self.frame_index = 0;
            } else {
                self.frame_index = self.frame_count - 1; // stay on last frame
                self.state = ControlState::Ended;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_only_affects_running() {
        let mut idle = AnimationControl::new("explode", 4, 2);
        idle.command = Some(AnimationCommand::Pause);
        idle.apply_command();
        assert_eq!(idle.state, ControlState::Idle);

        let mut running = AnimationControl::new("walk", 2, 2).running();
        running.command = Some(AnimationCommand::Pause);
        running.apply_command();
        assert_eq!(running.state, ControlState::Paused);
        assert!(running.command.is_none());
    }

    #[test]
    fn tick_advances_and_loops() {
        let mut anim = AnimationControl::new("walk", 2, 2).running();
        anim.tick();
        assert_eq!(anim.frame_index, 0);
        anim.tick();
        assert_eq!(anim.frame_index, 1);
        anim.tick();
        anim.tick();
        assert_eq!(anim.frame_index, 0);
        assert!(anim.is_running());
    }

    #[test]
    fn non_looping_animation_ends_on_last_frame() {
        let mut anim = AnimationControl::new("explode", 2, 1).running().with_looped(false);
        anim.tick();
        anim.tick();
        assert_eq!(anim.frame_index, 1);
        assert_eq!(anim.state, ControlState::Ended);
        anim.command = Some(AnimationCommand::Start);
        anim.apply_command();
        assert_eq!(anim.state, ControlState::Ended);
    }

    #[test]
    fn paused_animation_does_not_advance() {
        let mut anim = AnimationControl::new("walk", 2, 1).running();
        anim.command = Some(AnimationCommand::Pause);
        anim.apply_command();
        anim.tick();
        anim.tick();
        assert_eq!(anim.frame_index, 0);
    }
}
