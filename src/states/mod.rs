//! Game states and the stack that drives them.
//!
//! Each state owns one game mode and exposes the lifecycle hooks of
//! [`State`]. The [`machine::StateMachine`] keeps them on a stack, updates
//! only the top one and applies the [`Transition`] it returns.
//!
//! Submodules overview:
//! - [`machine`] – the stack driver and the engine-level animation pass
//! - [`mainmenu`] – title menu
//! - [`gameplay`] – runs the gameplay pipeline
//! - [`pausemenu`] – menu pushed over gameplay on Escape
//! - [`death`] – screen shown after losing a life
//! - [`gameover`] – menu shown once the last life is gone

use std::fmt;

use bevy_ecs::prelude::*;
use smallvec::{SmallVec, smallvec};

use crate::error::CoreError;

pub mod death;
pub mod gameover;
pub mod gameplay;
pub mod machine;
pub mod mainmenu;
pub mod pausemenu;

pub use death::DeathState;
pub use gameover::GameOverState;
pub use gameplay::GameplayState;
pub use mainmenu::MainMenuState;
pub use pausemenu::PauseMenuState;

/// States pushed by a single transition, started in order.
pub type StateList = SmallVec<[GameState; 1]>;

/// Stack change requested by a state's update.
pub enum Transition {
    /// Keep the stack as it is.
    None,
    /// Pause the top state and start each new one on top of it.
    Push(StateList),
    /// Stop and pop the top state, then push the new ones.
    Switch(StateList),
    /// Stop the top state and resume the one below.
    Pop,
    /// Stop every state, top-down, then push the new ones.
    Replace(StateList),
    /// Stop every state and end the run.
    Quit,
}

impl Transition {
    pub fn push(state: impl Into<GameState>) -> Self {
        Transition::Push(smallvec![state.into()])
    }

    pub fn switch(state: impl Into<GameState>) -> Self {
        Transition::Switch(smallvec![state.into()])
    }

    pub fn replace(state: impl Into<GameState>) -> Self {
        Transition::Replace(smallvec![state.into()])
    }

    fn kinds(states: &StateList) -> SmallVec<[StateKind; 1]> {
        states.iter().map(GameState::kind).collect()
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::None => write!(f, "None"),
            Transition::Push(states) => write!(f, "Push({:?})", Self::kinds(states).as_slice()),
            Transition::Switch(states) => write!(f, "Switch({:?})", Self::kinds(states).as_slice()),
            Transition::Pop => write!(f, "Pop"),
            Transition::Replace(states) => {
                write!(f, "Replace({:?})", Self::kinds(states).as_slice())
            }
            Transition::Quit => write!(f, "Quit"),
        }
    }
}

/// Two transitions are equal when they request the same change with the same
/// kinds of states, whatever those states hold internally.
impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Transition::None, Transition::None)
            | (Transition::Pop, Transition::Pop)
            | (Transition::Quit, Transition::Quit) => true,
            (Transition::Push(a), Transition::Push(b))
            | (Transition::Switch(a), Transition::Switch(b))
            | (Transition::Replace(a), Transition::Replace(b)) => {
                Self::kinds(a) == Self::kinds(b)
            }
            _ => false,
        }
    }
}

/// Lifecycle hooks every game state provides.
pub trait State {
    /// Called once when the state enters the stack.
    fn on_start(&mut self, world: &mut World);
    /// Another state was pushed on top of this one.
    fn on_pause(&mut self, _world: &mut World) {}
    /// This state is the top of the stack again.
    fn on_resume(&mut self, _world: &mut World) {}
    /// Called once when the state leaves the stack.
    fn on_stop(&mut self, world: &mut World);
    /// One frame of the top state. `frame` is the render target handle,
    /// passed along untouched.
    fn update<F: ?Sized>(&mut self, world: &mut World, frame: &mut F)
    -> Result<Transition, CoreError>;
}

/// Discriminant of a [`GameState`], for logs and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    MainMenu,
    Gameplay,
    PauseMenu,
    Death,
    GameOver,
}

/// The closed set of game states.
#[derive(Debug)]
pub enum GameState {
    MainMenu(MainMenuState),
    Gameplay(GameplayState),
    PauseMenu(PauseMenuState),
    Death(DeathState),
    GameOver(GameOverState),
}

impl GameState {
    pub fn kind(&self) -> StateKind {
        match self {
            GameState::MainMenu(_) => StateKind::MainMenu,
            GameState::Gameplay(_) => StateKind::Gameplay,
            GameState::PauseMenu(_) => StateKind::PauseMenu,
            GameState::Death(_) => StateKind::Death,
            GameState::GameOver(_) => StateKind::GameOver,
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $state:ident => $call:expr) => {
        match $self {
            GameState::MainMenu($state) => $call,
            GameState::Gameplay($state) => $call,
            GameState::PauseMenu($state) => $call,
            GameState::Death($state) => $call,
            GameState::GameOver($state) => $call,
        }
    };
}

impl State for GameState {
    fn on_start(&mut self, world: &mut World) {
        dispatch!(self, state => state.on_start(world))
    }

    fn on_pause(&mut self, world: &mut World) {
        dispatch!(self, state => state.on_pause(world))
    }

    fn on_resume(&mut self, world: &mut World) {
        dispatch!(self, state => state.on_resume(world))
    }

    fn on_stop(&mut self, world: &mut World) {
        dispatch!(self, state => state.on_stop(world))
    }

    fn update<F: ?Sized>(
        &mut self,
        world: &mut World,
        frame: &mut F,
    ) -> Result<Transition, CoreError> {
        dispatch!(self, state => state.update(world, frame))
    }
}

impl From<MainMenuState> for GameState {
    fn from(state: MainMenuState) -> Self {
        GameState::MainMenu(state)
    }
}

impl From<GameplayState> for GameState {
    fn from(state: GameplayState) -> Self {
        GameState::Gameplay(state)
    }
}

impl From<PauseMenuState> for GameState {
    fn from(state: PauseMenuState) -> Self {
        GameState::PauseMenu(state)
    }
}

impl From<DeathState> for GameState {
    fn from(state: DeathState) -> Self {
        GameState::Death(state)
    }
}

impl From<GameOverState> for GameState {
    fn from(state: GameOverState) -> Self {
        GameState::GameOver(state)
    }
}
