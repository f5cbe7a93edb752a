//! Ship systems: steering and firing.
//!
//! - [`move_player`] translates the ship from held direction keys.
//! - [`shoot_player_bullet`] fires on a fresh press, one bullet in flight at
//!   most.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::bullet::Bullet;
use crate::components::deleted::Deleted;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Controllable, Player};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

/// Move every `Player` + `Controllable` entity horizontally, clamped so the
/// whole ship stays inside the field.
pub fn move_player(
    mut query: Query<(&mut MapPosition, &Controllable), (With<Player>, Without<Deleted>)>,
    input: Res<InputState>,
    config: Res<GameConfig>,
) {
    let mut dx = 0.0;
    if input.move_left.active {
        dx -= config.player_speed;
    }
    if input.move_right.active {
        dx += config.player_speed;
    }

    for (mut position, controllable) in query.iter_mut() {
        let max_x = (config.field_width - controllable.width).max(0.0);
        position.pos.x = (position.pos.x + dx).clamp(0.0, max_x);
    }
}

/// Spawn an upward bullet centred above the ship.
///
/// Does nothing unless fire was just pressed and no player bullet is alive.
pub fn shoot_player_bullet(
    mut commands: Commands,
    ships: Query<(&MapPosition, &Controllable), (With<Player>, Without<Deleted>)>,
    bullets: Query<(), (With<Bullet>, With<Player>, Without<Deleted>)>,
    input: Res<InputState>,
    config: Res<GameConfig>,
) {
    if !input.fire.just_pressed || !bullets.is_empty() {
        return;
    }
    let Ok((ship_pos, ship)) = ships.single() else {
        return;
    };

    let x = ship_pos.x() + (ship.width - config.bullet_width) * 0.5;
    let y = ship_pos.y() - config.bullet_height;
    let bullet = commands
        .spawn((
            Player,
            Bullet::new(
                config.bullet_width,
                config.bullet_height,
                -config.player_bullet_speed,
            ),
            MapPosition::new(x, y),
        ))
        .id();
    debug!("Player fired {:?} at ({}, {})", bullet, x, y);
}
