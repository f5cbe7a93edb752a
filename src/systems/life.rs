use bevy_ecs::prelude::*;
use log::info;

use crate::components::alien::{Alien, AlienMaster};
use crate::components::deleted::Deleted;
use crate::components::mapposition::MapPosition;
use crate::components::player::PlayerLine;
use crate::resources::gameresources::{GameResources, StateEvent};

/// Check invasion, wave clear and game over.
///
/// - Any alien whose bottom edge reaches the player line removes the whole
///   swarm with its master and costs a life. The same wave comes back next
///   frame.
/// - A master with no aliens left is retired and the wave counter advances,
///   so the next frame spawns a lower, fresh swarm.
/// - With no lives left `GameOver` is raised, once per run.
pub fn life(
    mut commands: Commands,
    aliens: Query<(Entity, &MapPosition, &Alien), Without<Deleted>>,
    masters: Query<Entity, (With<AlienMaster>, Without<Deleted>)>,
    lines: Query<&MapPosition, (With<PlayerLine>, Without<Deleted>)>,
    mut game: ResMut<GameResources>,
) {
    let line_y = lines.iter().map(|line| line.y()).reduce(f32::min);
    let invaded = line_y.is_some_and(|line_y| {
        aliens
            .iter()
            .any(|(_, position, alien)| position.y() + alien.height >= line_y)
    });

    if invaded {
        for (entity, _, _) in aliens.iter() {
            commands.entity(entity).try_insert(Deleted);
        }
        for entity in masters.iter() {
            commands.entity(entity).try_insert(Deleted);
        }
        let lives = game.lose_life();
        if lives > 0 {
            game.set_state_event(StateEvent::Death);
        }
        info!("Swarm reached the player line, {} lives left", lives);
    } else if aliens.is_empty() && !masters.is_empty() {
        for entity in masters.iter() {
            commands.entity(entity).try_insert(Deleted);
        }
        game.wave += 1;
        info!("Wave {} cleared, score {}", game.wave, game.score);
    }

    if game.raise_game_over() {
        info!("Game over, final score {}", game.score);
    }
}
