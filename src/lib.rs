//! Invaders simulation core.
//!
//! An entity store on `bevy_ecs`, the ordered gameplay pipeline that mutates
//! it every tick, and the state stack deciding which mode runs. Rendering,
//! audio and raw input polling live outside; the core only reads an
//! [`resources::input::InputSource`] and passes a render handle through.

pub mod components;
pub mod error;
pub mod game;
pub mod resources;
pub mod states;
pub mod store;
pub mod systems;
