//! ECS components for entities.
//!
//! Submodules overview:
//! - [`alien`] – swarm members, the swarm master and the `Enemy` marker
//! - [`animation`] – playback control object paused and resumed by gameplay
//! - [`boxcollider`] – axis-aligned box used by every overlap test
//! - [`bullet`] – projectiles with velocity and hit-absorbing health
//! - [`bunker`] – destructible pixel-grid barriers
//! - [`deleted`] – tombstone purged at the end of the frame
//! - [`mapposition`] – world-space top-left position
//! - [`menu`] – menu items, cursors and labels
//! - [`player`] – the ship, its movement bounds and the player line

pub mod alien;
pub mod animation;
pub mod boxcollider;
pub mod bullet;
pub mod bunker;
pub mod deleted;
pub mod mapposition;
pub mod menu;
pub mod player;
