//! Stack-based state driver.
//!
//! Per frame, [`StateMachine::update`]:
//! 1. updates the top state
//! 2. applies the transition it returned
//! 3. advances [`WorldTime`] and runs the engine-level animation pass
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::{debug, info};
use smallvec::smallvec;

use super::{GameState, State, StateKind, StateList, Transition};
use crate::error::CoreError;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_playback;

pub struct StateMachine {
    stack: Vec<GameState>,
    engine: Schedule,
    running: bool,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// An empty, not yet running machine.
    pub fn new() -> Self {
        let mut engine = Schedule::default();
        engine.set_executor_kind(ExecutorKind::SingleThreaded);
        engine.add_systems(animation_playback);
        StateMachine {
            stack: Vec::new(),
            engine,
            running: false,
        }
    }

    /// Push and start the first state.
    pub fn start(&mut self, world: &mut World, initial: impl Into<GameState>) {
        world.init_resource::<WorldTime>();
        self.running = true;
        self.push_all(world, smallvec![initial.into()], false);
    }

    /// `false` once a `Quit` was applied or the stack ran empty.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn top(&self) -> Option<StateKind> {
        self.stack.last().map(GameState::kind)
    }

    /// Kinds on the stack, bottom first.
    pub fn stack(&self) -> Vec<StateKind> {
        self.stack.iter().map(GameState::kind).collect()
    }

    /// Run one frame. Does nothing once the machine stopped.
    ///
    /// An error leaves the stack as it was before the failing update; the
    /// caller is expected to end the run.
    pub fn update<F: ?Sized>(&mut self, world: &mut World, frame: &mut F) -> Result<(), CoreError> {
        if !self.running {
            return Ok(());
        }
        let Some(top) = self.stack.last_mut() else {
            self.running = false;
            return Ok(());
        };

        let transition = top.update(world, frame)?;
        self.apply(world, transition);

        world.get_resource_or_insert_with(WorldTime::default).advance();
        self.engine.run(world);
        Ok(())
    }

    fn apply(&mut self, world: &mut World, transition: Transition) {
        if transition != Transition::None {
            info!("Transition {:?} from {:?}", transition, self.stack());
        }
        match transition {
            Transition::None => {}
            Transition::Push(states) => {
                self.push_all(world, states, true);
            }
            Transition::Switch(states) => {
                self.pop(world);
                if states.is_empty() {
                    self.resume_top(world);
                } else {
                    self.push_all(world, states, false);
                }
            }
            Transition::Pop => {
                self.pop(world);
                self.resume_top(world);
            }
            Transition::Replace(states) => {
                self.stop_all(world);
                self.push_all(world, states, false);
            }
            Transition::Quit => {
                self.stop_all(world);
                self.running = false;
            }
        }
        if self.stack.is_empty() {
            self.running = false;
        }
    }

    /// Start `states` in order on top of the stack. Each state but the first
    /// pauses the one it lands on; `pause_first` extends that to the first.
    fn push_all(&mut self, world: &mut World, states: StateList, pause_first: bool) {
        for (i, mut state) in states.into_iter().enumerate() {
            if i > 0 || pause_first {
                if let Some(top) = self.stack.last_mut() {
                    debug!("Pausing {:?}", top.kind());
                    top.on_pause(world);
                }
            }
            debug!("Starting {:?}", state.kind());
            state.on_start(world);
            self.stack.push(state);
        }
    }

    fn pop(&mut self, world: &mut World) {
        if let Some(mut state) = self.stack.pop() {
            debug!("Stopping {:?}", state.kind());
            state.on_stop(world);
        }
    }

    fn resume_top(&mut self, world: &mut World) {
        if let Some(top) = self.stack.last_mut() {
            debug!("Resuming {:?}", top.kind());
            top.on_resume(world);
        }
    }

    fn stop_all(&mut self, world: &mut World) {
        while !self.stack.is_empty() {
            self.pop(world);
        }
    }
}
