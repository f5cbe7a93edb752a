//! Entity batches spawned by the game states.
//!
//! [`spawn_from_descriptor`] is the single entry point states use in their
//! start hooks: it creates a known batch of entities and hands back their
//! ids so the state can delete exactly that batch later. The swarm is not a
//! descriptor because it is spawned mid-run by
//! [`spawn_alien_master`](crate::systems::alien::spawn_alien_master);
//! [`swarm_layout`] is shared by both paths.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::alien::{Alien, AlienMaster, Enemy};
use crate::components::animation::AnimationControl;
use crate::components::bunker::Bunker;
use crate::components::mapposition::MapPosition;
use crate::components::menu::{Label, MenuCursor, MenuItem};
use crate::components::player::{Controllable, Player, PlayerLine};
use crate::resources::gameconfig::GameConfig;

/// Ticks each alien walk frame stays on screen.
const ALIEN_TICKS_PER_FRAME: u32 = 30;
const MENU_ITEM_SPACING: f32 = 32.0;
const CURSOR_OFFSET: f32 = 24.0;

/// Named batches of entities a state can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Descriptor {
    /// Player line and HUD labels.
    Level,
    Player,
    Bunkers,
    MainMenu,
    PauseMenu,
    Death,
    GameOver,
}

/// Spawn the batch described by `descriptor` and return the created ids.
///
/// Geometry comes from the [`GameConfig`] resource, or the defaults when
/// none is inserted.
pub fn spawn_from_descriptor(world: &mut World, descriptor: Descriptor) -> Vec<Entity> {
    let config = world.get_resource::<GameConfig>().cloned().unwrap_or_default();
    let ids = match descriptor {
        Descriptor::Level => spawn_level(world, &config),
        Descriptor::Player => spawn_player(world, &config),
        Descriptor::Bunkers => spawn_bunkers(world, &config),
        Descriptor::MainMenu => spawn_menu(
            world,
            &config,
            "SPACE INVADERS",
            &[("new_game", "New game"), ("exit", "Exit")],
        ),
        Descriptor::PauseMenu => spawn_menu(
            world,
            &config,
            "PAUSED",
            &[("resume", "Resume"), ("main_menu", "Main menu"), ("exit", "Exit")],
        ),
        Descriptor::Death => spawn_labels(world, &config, &["You died", "Press ENTER to continue"]),
        Descriptor::GameOver => spawn_menu(
            world,
            &config,
            "GAME OVER",
            &[("new_game", "New game"), ("main_menu", "Main menu"), ("exit", "Exit")],
        ),
    };
    debug!("Spawned {:?}: {} entities", descriptor, ids.len());
    ids
}

fn spawn_level(world: &mut World, config: &GameConfig) -> Vec<Entity> {
    vec![
        world
            .spawn((PlayerLine, MapPosition::new(0.0, config.player_y())))
            .id(),
        world
            .spawn((Label::new("SCORE"), MapPosition::new(16.0, 16.0)))
            .id(),
        world
            .spawn((
                Label::new("LIVES"),
                MapPosition::new(config.field_width - 96.0, 16.0),
            ))
            .id(),
    ]
}

fn spawn_player(world: &mut World, config: &GameConfig) -> Vec<Entity> {
    let x = (config.field_width - config.player_width) * 0.5;
    let ship = world
        .spawn((
            Player,
            Controllable::new(config.player_width, config.player_height),
            MapPosition::new(x, config.player_y()),
            AnimationControl::new("ship_explode", 4, 8).with_looped(false),
        ))
        .id();
    vec![ship]
}

fn spawn_bunkers(world: &mut World, config: &GameConfig) -> Vec<Entity> {
    let count = config.bunker_count as usize;
    if count == 0 {
        return Vec::new();
    }
    let template = Bunker::arch(
        config.bunker_cols as usize,
        config.bunker_rows as usize,
        config.bunker_pixel_size,
    );
    // Evenly spaced: equal gaps between bunkers and at both field edges.
    let gap = (config.field_width - template.width() * count as f32) / (count as f32 + 1.0);
    (0..count)
        .map(|i| {
            let x = gap + i as f32 * (template.width() + gap);
            world
                .spawn((template.clone(), MapPosition::new(x, config.bunker_y)))
                .id()
        })
        .collect()
}

fn spawn_labels(world: &mut World, config: &GameConfig, lines: &[&str]) -> Vec<Entity> {
    let center_x = config.field_width * 0.5;
    let top = config.field_height * 0.3;
    lines
        .iter()
        .enumerate()
        .map(|(i, text)| {
            world
                .spawn((
                    Label::new(*text),
                    MapPosition::new(center_x, top + i as f32 * MENU_ITEM_SPACING),
                ))
                .id()
        })
        .collect()
}

fn spawn_menu(
    world: &mut World,
    config: &GameConfig,
    title: &str,
    items: &[(&'static str, &str)], // (id, label)
) -> Vec<Entity> {
    let mut ids = spawn_labels(world, config, &[title]);
    let origin = Vec2::new(
        config.field_width * 0.5,
        config.field_height * 0.3 + 2.0 * MENU_ITEM_SPACING,
    );
    for (i, &(id, label)) in items.iter().enumerate() {
        let position = origin + Vec2::new(0.0, i as f32 * MENU_ITEM_SPACING);
        ids.push(
            world
                .spawn((MenuItem::new(id, label, position), MapPosition::from_vec(position)))
                .id(),
        );
        let mut cursor = MenuCursor::new(cursor_id(id));
        cursor.visible = i == 0;
        ids.push(
            world
                .spawn((
                    cursor,
                    MapPosition::from_vec(position - Vec2::new(CURSOR_OFFSET, 0.0)),
                ))
                .id(),
        );
    }
    ids
}

/// Cursor id paired with a menu item id.
fn cursor_id(item_id: &'static str) -> &'static str {
    match item_id {
        "new_game" => "cursor_new_game",
        "resume" => "cursor_resume",
        "main_menu" => "cursor_main_menu",
        "exit" => "cursor_exit",
        _ => "cursor",
    }
}

/// Initial layout of one wave: the master and every alien's components.
///
/// Each wave starts `wave_step` lower than the previous one, up to
/// `max_wave_offset`.
pub fn swarm_layout(
    config: &GameConfig,
    wave: u32,
) -> (AlienMaster, Vec<(Enemy, Alien, MapPosition, AnimationControl)>) {
    let cols = config.alien_cols as usize;
    let rows = config.alien_rows as usize;
    let block_width = cols.saturating_sub(1) as f32 * config.alien_spacing_x + config.alien_width;
    let left = ((config.field_width - block_width) * 0.5).max(0.0);
    let top = config.alien_top + (wave as f32 * config.wave_step).min(config.max_wave_offset);

    let aliens: Vec<_> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .map(|(row, col)| {
            let key = match row {
                0 => "squid",
                1 | 2 => "crab",
                _ => "octopus",
            };
            (
                Enemy,
                Alien::new(config.alien_width, config.alien_height),
                MapPosition::new(
                    left + col as f32 * config.alien_spacing_x,
                    top + row as f32 * config.alien_spacing_y,
                ),
                AnimationControl::new(key, 2, ALIEN_TICKS_PER_FRAME).running(),
            )
        })
        .collect();

    let master = AlienMaster::new(config.alien_speed, aliens.len());
    (master, aliens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EntityStore;

    #[test]
    fn level_spawns_a_single_player_line() {
        let mut world = World::new();
        let ids = spawn_from_descriptor(&mut world, Descriptor::Level);
        assert_eq!(ids.len(), 3);
        assert_eq!(world.query_ids::<With<PlayerLine>>().len(), 1);
    }

    #[test]
    fn player_spawns_centered_on_the_player_row() {
        let mut world = World::new();
        let config = GameConfig::new();
        world.insert_resource(config.clone());
        let ids = spawn_from_descriptor(&mut world, Descriptor::Player);
        let pos = world.get::<MapPosition>(ids[0]).unwrap();
        assert_eq!(pos.y(), config.player_y());
        assert_eq!(pos.x() * 2.0 + config.player_width, config.field_width);
    }

    #[test]
    fn bunkers_fit_in_the_field() {
        let mut world = World::new();
        let config = GameConfig::new();
        let ids = spawn_from_descriptor(&mut world, Descriptor::Bunkers);
        assert_eq!(ids.len(), config.bunker_count as usize);
        for id in ids {
            let pos = world.get::<MapPosition>(id).unwrap();
            let bunker = world.get::<Bunker>(id).unwrap();
            assert!(pos.x() >= 0.0);
            assert!(pos.x() + bunker.width() <= config.field_width);
        }
    }

    #[test]
    fn menu_has_one_cursor_per_item() {
        let mut world = World::new();
        spawn_from_descriptor(&mut world, Descriptor::PauseMenu);
        assert_eq!(world.query_ids::<With<MenuItem>>().len(), 3);
        assert_eq!(world.query_ids::<With<MenuCursor>>().len(), 3);
    }

    #[test]
    fn swarm_layout_is_centered_and_sized() {
        let config = GameConfig::new();
        let (master, aliens) = swarm_layout(&config, 0);
        assert_eq!(aliens.len(), config.swarm_size());
        assert_eq!(master.swarm_size, aliens.len());
        let min_x = aliens.iter().map(|(_, _, p, _)| p.x()).fold(f32::MAX, f32::min);
        let max_x = aliens
            .iter()
            .map(|(_, a, p, _)| p.x() + a.width)
            .fold(f32::MIN, f32::max);
        assert!((min_x - (config.field_width - max_x)).abs() < 1e-3);
    }

    #[test]
    fn later_waves_start_lower_up_to_a_cap() {
        let config = GameConfig::new();
        let top = |wave| {
            swarm_layout(&config, wave)
                .1
                .iter()
                .map(|(_, _, p, _)| p.y())
                .fold(f32::MAX, f32::min)
        };
        assert_eq!(top(1), top(0) + config.wave_step);
        assert_eq!(top(100), top(0) + config.max_wave_offset);
    }
}
