//! Game systems.
//!
//! Submodules overview
//! - [`player`] – ship movement and firing
//! - [`alien`] – swarm spawning, sweeping and enemy fire
//! - [`bullet`] – bullet travel and leaving the field
//! - [`collision`] – bullet hits, bunker erosion and scoring
//! - [`life`] – invasion, wave clear and game over
//! - [`delete`] – end-of-frame purge of tombstoned entities
//! - [`pipeline`] – the ordered gameplay schedule built from the above
//! - [`animation`] – engine-level animation playback
//! - [`input`] – snapshot an [`InputSource`](crate::resources::input::InputSource)
//! - [`menu`] – shared menu navigation

pub mod alien;
pub mod animation;
pub mod bullet;
pub mod collision;
pub mod delete;
pub mod input;
pub mod life;
pub mod menu;
pub mod pipeline;
pub mod player;
