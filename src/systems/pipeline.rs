use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

use crate::systems::alien::{move_alien, move_alien_master, shoot_enemy_bullet, spawn_alien_master};
use crate::systems::bullet::move_bullet;
use crate::systems::collision::collision;
use crate::systems::delete::delete;
use crate::systems::life::life;
use crate::systems::player::{move_player, shoot_player_bullet};

/// Build the gameplay pipeline.
///
/// Systems run chained, in this exact order, on the single-threaded executor.
/// Commands issued by one system (spawns, `Deleted` markers) are applied
/// before the next one runs. Needs the `InputState`, `GameConfig`,
/// `GameResources` and `GameRng` resources.
pub fn gameplay_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            move_player,
            spawn_alien_master,
            move_alien_master,
            move_alien,
            shoot_player_bullet,
            shoot_enemy_bullet,
            move_bullet,
            collision,
            life,
            delete,
        )
            .chain(),
    );
    schedule
}
