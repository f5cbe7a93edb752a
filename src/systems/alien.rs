//! Swarm systems.
//!
//! Run in this order every gameplay tick:
//! 1. [`spawn_alien_master`] – start a new wave when the previous one is gone
//! 2. [`move_alien_master`] – decide this tick's translation for the swarm
//! 3. [`move_alien`] – apply it to every alien
//!
//! [`shoot_enemy_bullet`] runs later, after the player has fired.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::components::alien::{Alien, AlienMaster, Enemy};
use crate::components::bullet::Bullet;
use crate::components::deleted::Deleted;
use crate::components::mapposition::MapPosition;
use crate::game::swarm_layout;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamerng::GameRng;
use crate::resources::gameresources::GameResources;

/// Spawn a master and a fresh swarm when neither a master nor any alien is
/// left.
pub fn spawn_alien_master(
    mut commands: Commands,
    masters: Query<(), (With<AlienMaster>, Without<Deleted>)>,
    aliens: Query<(), (With<Alien>, Without<Deleted>)>,
    config: Res<GameConfig>,
    game: Res<GameResources>,
) {
    if !masters.is_empty() || !aliens.is_empty() {
        return;
    }
    let (master, swarm) = swarm_layout(&config, game.wave);
    if swarm.is_empty() {
        return;
    }
    info!("Wave {}: spawning {} aliens", game.wave + 1, swarm.len());
    commands.spawn(master);
    commands.spawn_batch(swarm);
}

/// Compute the translation every alien applies this tick.
///
/// The swarm sweeps horizontally at a speed that grows as it shrinks. When
/// the next step would push any alien past a field edge, the swarm moves
/// exactly up to the edge, the direction flips, and on the following tick
/// the whole swarm drops by `alien_drop`.
pub fn move_alien_master(
    mut masters: Query<&mut AlienMaster, Without<Deleted>>,
    mut aliens: Query<(&MapPosition, &mut Alien), Without<Deleted>>,
    config: Res<GameConfig>,
) {
    let Ok(mut master) = masters.single_mut() else {
        return;
    };
    let remaining = aliens.iter().count();
    if remaining == 0 {
        return;
    }

    let translation = if master.descend {
        master.descend = false;
        Vec2::new(0.0, config.alien_drop)
    } else {
        let speed = master.scaled_speed(config.alien_speed, config.alien_acceleration, remaining);
        let step = master.direction.signum() * speed;
        let overshoot = aliens
            .iter()
            .map(|(position, alien)| {
                if step > 0.0 {
                    position.x() + alien.width + step - config.field_width
                } else {
                    -(position.x() + step)
                }
            })
            .fold(0.0_f32, f32::max);

        if overshoot > 0.0 {
            master.direction = -step;
            master.descend = true;
            debug!("Swarm reached an edge, reversing to {}", master.direction);
            // never further than the step, even for a swarm wider than the field
            let shift = (step.abs() - overshoot).max(0.0);
            Vec2::new(step.signum() * shift, 0.0)
        } else {
            master.direction = step;
            Vec2::new(step, 0.0)
        }
    };

    for (_, mut alien) in aliens.iter_mut() {
        alien.translation = translation;
    }
}

/// Apply each alien's translation to its position.
pub fn move_alien(mut aliens: Query<(&mut MapPosition, &Alien), Without<Deleted>>) {
    for (mut position, alien) in aliens.iter_mut() {
        position.pos += alien.translation;
    }
}

/// Let eligible aliens fire downward bullets at random.
///
/// Each eligible alien draws once per tick against
/// `enemy_fire_probability`. With `enemy_fire_front_row_only`, only the
/// lowest alien of each column is eligible. Nothing fires once
/// `enemy_max_bullets` enemy bullets are in flight.
pub fn shoot_enemy_bullet(
    mut commands: Commands,
    aliens: Query<(&MapPosition, &Alien), (With<Enemy>, Without<Deleted>)>,
    bullets: Query<(), (With<Bullet>, With<Enemy>, Without<Deleted>)>,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
) {
    let in_flight = bullets.iter().count();
    let mut budget = (config.enemy_max_bullets as usize).saturating_sub(in_flight);
    if budget == 0 || config.enemy_fire_probability <= 0.0 {
        return;
    }

    let shooters: Vec<(MapPosition, Alien)> = if config.enemy_fire_front_row_only {
        front_row(&aliens)
    } else {
        aliens.iter().map(|(p, a)| (*p, *a)).collect()
    };

    for (position, alien) in shooters {
        if budget == 0 {
            break;
        }
        if !rng.chance(config.enemy_fire_probability) {
            continue;
        }
        let x = position.x() + (alien.width - config.bullet_width) * 0.5;
        let y = position.y() + alien.height;
        commands.spawn((
            Enemy,
            Bullet::new(
                config.bullet_width,
                config.bullet_height,
                config.enemy_bullet_speed,
            )
            .with_health(config.enemy_bullet_health),
            MapPosition::new(x, y),
        ));
        budget -= 1;
    }
}

/// Lowest alien of each column, ordered left to right.
///
/// Aliens of a column share the exact same x because every alien receives
/// the same translation.
fn front_row(
    aliens: &Query<(&MapPosition, &Alien), (With<Enemy>, Without<Deleted>)>,
) -> Vec<(MapPosition, Alien)> {
    let mut columns: FxHashMap<u32, (MapPosition, Alien)> = FxHashMap::default();
    for (position, alien) in aliens.iter() {
        columns
            .entry(position.x().to_bits())
            .and_modify(|lowest| {
                if position.y() > lowest.0.y() {
                    *lowest = (*position, *alien);
                }
            })
            .or_insert((*position, *alien));
    }
    let mut row: Vec<_> = columns.into_values().collect();
    row.sort_by(|a, b| a.0.x().total_cmp(&b.0.x()));
    row
}
