//! ECS resources made available to systems and states.
//!
//! Overview
//! - `cursor` – requested mouse cursor visibility
//! - `gameconfig` – INI-backed tunables for field, swarm, bullets and bunkers
//! - `gameresources` – score, lives, wave and the pending state event of a run
//! - `gamerng` – seeded random source for enemy fire
//! - `input` – per-frame snapshot of the keys the game reads
//! - `worldtime` – frame counter
pub mod cursor;
pub mod gameconfig;
pub mod gameresources;
pub mod gamerng;
pub mod input;
pub mod worldtime;
