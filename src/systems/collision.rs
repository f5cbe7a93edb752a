use bevy_ecs::prelude::*;
use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::components::alien::Alien;
use crate::components::animation::{AnimationCommand, AnimationControl};
use crate::components::bullet::Bullet;
use crate::components::bunker::Bunker;
use crate::components::deleted::Deleted;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Controllable, Player};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gameresources::{GameResources, StateEvent};

/// What a bullet ran into this frame.
enum Target {
    Alien(Entity),
    Player,
    Bunker,
}

/// Resolve every overlap involving bullets, then let aliens erode bunkers.
/// Bunkers with no pixel left are removed.
///
/// Bullets are first tested pairwise: a player bullet meeting an enemy bullet
/// costs each one a hit. Every bullet not engaged there checks its targets in
/// order, aliens (player bullets) or the ship (enemy bullets) first and
/// bunkers second; the first match wins and a bullet hits at most one target
/// per frame. A bunker only counts as hit when pixels were actually removed.
pub fn collision(
    mut commands: Commands,
    mut bullets: Query<(Entity, &MapPosition, &mut Bullet, Has<Player>), Without<Deleted>>,
    aliens: Query<(Entity, &MapPosition, &Alien), Without<Deleted>>,
    mut bunkers: Query<(Entity, &MapPosition, &mut Bunker), Without<Deleted>>,
    mut ships: Query<
        (&MapPosition, &Controllable, Option<&mut AnimationControl>),
        (With<Player>, Without<Deleted>),
    >,
    config: Res<GameConfig>,
    mut game: ResMut<GameResources>,
) {
    // entities to tombstone once every overlap is resolved
    let mut consumed: FxHashSet<Entity> = FxHashSet::default();
    // bullets that already hit something this frame
    let mut engaged: FxHashSet<Entity> = FxHashSet::default();

    let mut combos = bullets.iter_combinations_mut();
    while let Some(
        [
            (entity_a, position_a, mut bullet_a, player_a),
            (entity_b, position_b, mut bullet_b, player_b),
        ],
    ) = combos.fetch_next()
    {
        if player_a == player_b || engaged.contains(&entity_a) || engaged.contains(&entity_b) {
            continue;
        }
        if !bullet_a
            .collider()
            .overlaps(position_a.pos, &bullet_b.collider(), position_b.pos)
        {
            continue;
        }
        debug!("Bullets {:?} and {:?} collided", entity_a, entity_b);
        engaged.insert(entity_a);
        engaged.insert(entity_b);
        if bullet_a.absorb_hit() {
            consumed.insert(entity_a);
        }
        if bullet_b.absorb_hit() {
            consumed.insert(entity_b);
        }
    }

    let mut ship_hit = false;
    for (entity, position, mut bullet, from_player) in bullets.iter_mut() {
        if engaged.contains(&entity) {
            continue;
        }
        let collider = bullet.collider();

        let target = if from_player {
            aliens
                .iter()
                .find(|(alien_entity, alien_pos, alien)| {
                    !consumed.contains(alien_entity)
                        && collider.overlaps(position.pos, &alien.collider(), alien_pos.pos)
                })
                .map(|(alien_entity, _, _)| Target::Alien(alien_entity))
        } else {
            let mut hit = None;
            for (ship_pos, ship, animation) in ships.iter_mut() {
                if collider.overlaps(position.pos, &ship.collider(), ship_pos.pos) {
                    if let Some(mut animation) = animation {
                        animation.command = Some(AnimationCommand::Restart);
                    }
                    hit = Some(Target::Player);
                    break;
                }
            }
            hit
        };
        let target = target.or_else(|| {
            bunkers.iter_mut().find_map(|(_, bunker_pos, mut bunker)| {
                (bunker.erase_region(bunker_pos.pos, &collider, position.pos) > 0)
                    .then_some(Target::Bunker)
            })
        });

        let Some(target) = target else {
            continue;
        };
        engaged.insert(entity);
        match target {
            Target::Alien(alien) => {
                consumed.insert(alien);
                game.score += config.alien_score;
                debug!("Alien {:?} destroyed, score {}", alien, game.score);
            }
            Target::Player => {
                // several bullets landing together still cost one life
                if !ship_hit {
                    ship_hit = true;
                    let lives = game.lose_life();
                    if lives > 0 {
                        game.set_state_event(StateEvent::Death);
                    }
                    info!("Player hit, {} lives left", lives);
                }
            }
            Target::Bunker => {}
        }
        if bullet.absorb_hit() {
            consumed.insert(entity);
        }
    }

    // aliens wear bunkers down as they pass through them
    for (alien_entity, alien_pos, alien) in aliens.iter() {
        if consumed.contains(&alien_entity) {
            continue;
        }
        for (_, bunker_pos, mut bunker) in bunkers.iter_mut() {
            bunker.erase_region(bunker_pos.pos, &alien.collider(), alien_pos.pos);
        }
    }

    for (bunker_entity, _, bunker) in bunkers.iter() {
        if bunker.is_destroyed() {
            debug!("Bunker {:?} destroyed", bunker_entity);
            consumed.insert(bunker_entity);
        }
    }

    for entity in consumed {
        commands.entity(entity).try_insert(Deleted);
    }
}
