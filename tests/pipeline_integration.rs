//! Gameplay pipeline integration tests: bullets, collisions, swarm movement,
//! life bookkeeping and the end-of-frame purge.

use bevy_ecs::prelude::*;
use bevy_ecs::query::QueryFilter;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::ScheduleSystem;
use glam::Vec2;

use invaders::components::alien::{Alien, AlienMaster, Enemy};
use invaders::components::boxcollider::BoxCollider;
use invaders::components::bullet::Bullet;
use invaders::components::bunker::Bunker;
use invaders::components::deleted::Deleted;
use invaders::components::mapposition::MapPosition;
use invaders::components::player::{Controllable, Player, PlayerLine};
use invaders::game::{Descriptor, spawn_from_descriptor};
use invaders::resources::gameconfig::GameConfig;
use invaders::resources::gamerng::GameRng;
use invaders::resources::gameresources::{GameResources, StateEvent};
use invaders::resources::input::InputState;
use invaders::systems::alien::{move_alien, move_alien_master};
use invaders::systems::bullet::move_bullet;
use invaders::systems::collision::collision;
use invaders::systems::delete::delete;
use invaders::systems::life::life;
use invaders::systems::pipeline::gameplay_schedule;

fn make_world(config: GameConfig, lives: u32) -> World {
    let mut world = World::new();
    world.insert_resource(GameRng::with_seed(config.seed));
    world.insert_resource(config);
    world.insert_resource(GameResources::new(lives));
    world.insert_resource(InputState::default());
    world
}

fn run_once<M>(world: &mut World, systems: impl IntoScheduleConfigs<ScheduleSystem, M>) {
    let mut schedule = Schedule::default();
    schedule.add_systems(systems);
    schedule.run(world);
}

fn total_bunker_pixels(world: &mut World) -> usize {
    let mut query = world.query::<&Bunker>();
    query.iter(world).map(Bunker::remaining).sum()
}

fn count<F: QueryFilter + 'static>(world: &mut World) -> usize {
    let mut query = world.query_filtered::<(), F>();
    query.iter(world).count()
}

// ==================== BULLETS ====================

#[test]
fn player_bullet_travels_up_then_leaves_the_field() {
    let mut world = make_world(GameConfig::new(), 3);
    let bullet = world
        .spawn((Player, Bullet::new(2.0, 8.0, -10.0), MapPosition::new(50.0, 40.0)))
        .id();

    for frame in 1..=4 {
        run_once(&mut world, move_bullet);
        let y = world.get::<MapPosition>(bullet).unwrap().y();
        assert_eq!(y, 40.0 - 10.0 * frame as f32);
        assert!(world.get::<Deleted>(bullet).is_none());
    }

    run_once(&mut world, move_bullet);
    assert!(world.get::<Deleted>(bullet).is_some());

    run_once(&mut world, delete);
    assert!(world.get_entity(bullet).is_err());
}

#[test]
fn enemy_bullet_leaves_through_the_bottom() {
    let mut config = GameConfig::new();
    config.field_height = 100.0;
    let mut world = make_world(config, 3);
    let bullet = world
        .spawn((Enemy, Bullet::new(2.0, 8.0, 4.0), MapPosition::new(10.0, 98.0)))
        .id();

    run_once(&mut world, move_bullet);
    assert!(world.get::<Deleted>(bullet).is_some());
}

#[test]
fn bullet_leaving_the_field_is_ignored_by_later_systems() {
    let mut config = GameConfig::new();
    config.field_height = 100.0;
    let mut world = make_world(config, 3);
    world.spawn((Player, Controllable::new(26.0, 16.0), MapPosition::new(100.0, 95.0)));
    let bullet = world
        .spawn((Enemy, Bullet::new(2.0, 8.0, 4.0), MapPosition::new(110.0, 98.0)))
        .id();

    run_once(&mut world, (move_bullet, collision, life, delete).chain());

    let game = world.resource::<GameResources>();
    assert_eq!(game.lives, 3);
    assert_eq!(game.state_event(), StateEvent::None);
    assert!(world.get_entity(bullet).is_err());
}

// ==================== COLLISION ====================

#[test]
fn alien_wins_over_bunker_when_both_overlap() {
    let config = GameConfig::new();
    let score = config.alien_score;
    let mut world = make_world(config, 3);

    let alien = world
        .spawn((Enemy, Alien::new(24.0, 16.0), MapPosition::new(10.0, 10.0)))
        .id();
    let bunker = world
        .spawn((Bunker::new(10, 10, 2.0), MapPosition::new(10.0, 20.0)))
        .id();
    let bullet = world
        .spawn((Player, Bullet::new(2.0, 8.0, -8.0), MapPosition::new(15.0, 22.0)))
        .id();

    run_once(&mut world, collision);

    assert!(world.get::<Deleted>(alien).is_some());
    assert!(world.get::<Deleted>(bullet).is_some());
    assert_eq!(world.get::<Bunker>(bunker).unwrap().remaining(), 100);
    assert_eq!(world.resource::<GameResources>().score, score);
}

#[test]
fn bullet_erodes_bunker_pixels() {
    let mut world = make_world(GameConfig::new(), 3);
    let bunker = world
        .spawn((Bunker::new(10, 10, 2.0), MapPosition::new(0.0, 0.0)))
        .id();
    let bullet = world
        .spawn((Enemy, Bullet::new(2.0, 2.0, 4.0), MapPosition::new(4.0, 4.0)))
        .id();

    run_once(&mut world, collision);

    assert_eq!(world.get::<Bunker>(bunker).unwrap().remaining(), 99);
    assert!(world.get::<Deleted>(bullet).is_some());
}

#[test]
fn bunker_with_no_pixels_left_is_removed() {
    let mut world = make_world(GameConfig::new(), 3);
    let bunker = world
        .spawn((Bunker::new(1, 1, 2.0), MapPosition::new(0.0, 0.0)))
        .id();
    world.spawn((Enemy, Bullet::new(2.0, 2.0, 4.0), MapPosition::new(0.0, 0.0)));

    run_once(&mut world, (collision, delete).chain());

    assert!(world.get_entity(bunker).is_err());
    assert_eq!(total_bunker_pixels(&mut world), 0);
}

#[test]
fn bullet_over_bunker_holes_is_not_a_hit() {
    let mut world = make_world(GameConfig::new(), 3);
    let mut bunker = Bunker::new(10, 10, 2.0);
    let hole = BoxCollider::new(4.0, 4.0);
    bunker.erase_region(Vec2::ZERO, &hole, Vec2::new(4.0, 4.0));
    let remaining = bunker.remaining();
    world.spawn((bunker, MapPosition::new(0.0, 0.0)));
    let bullet = world
        .spawn((Enemy, Bullet::new(2.0, 2.0, 4.0), MapPosition::new(5.0, 5.0)))
        .id();

    run_once(&mut world, collision);

    assert!(world.get::<Deleted>(bullet).is_none());
    assert_eq!(total_bunker_pixels(&mut world), remaining);
}

#[test]
fn bullet_health_absorbs_a_hit() {
    let mut world = make_world(GameConfig::new(), 3);
    let player_bullet = world
        .spawn((Player, Bullet::new(2.0, 8.0, -8.0), MapPosition::new(10.0, 10.0)))
        .id();
    let enemy_bullet = world
        .spawn((
            Enemy,
            Bullet::new(2.0, 8.0, 4.0).with_health(1),
            MapPosition::new(10.0, 12.0),
        ))
        .id();

    run_once(&mut world, collision);

    assert!(world.get::<Deleted>(player_bullet).is_some());
    assert!(world.get::<Deleted>(enemy_bullet).is_none());
    assert_eq!(world.get::<Bullet>(enemy_bullet).unwrap().health, 0);
}

#[test]
fn enemy_bullet_on_ship_costs_a_life_and_raises_death() {
    let mut world = make_world(GameConfig::new(), 3);
    world.spawn((Player, Controllable::new(26.0, 16.0), MapPosition::new(100.0, 400.0)));
    world.spawn((Enemy, Bullet::new(2.0, 8.0, 4.0), MapPosition::new(110.0, 402.0)));

    run_once(&mut world, collision);

    let game = world.resource::<GameResources>();
    assert_eq!(game.lives, 2);
    assert_eq!(game.state_event(), StateEvent::Death);
}

#[test]
fn last_life_raises_game_over_exactly_once() {
    let mut world = make_world(GameConfig::new(), 1);
    world.spawn((Player, Controllable::new(26.0, 16.0), MapPosition::new(100.0, 400.0)));

    for _ in 0..3 {
        world.spawn((Enemy, Bullet::new(2.0, 8.0, 0.0), MapPosition::new(110.0, 402.0)));
        run_once(&mut world, (collision, life, delete).chain());
    }

    let mut game = world.resource_mut::<GameResources>();
    assert_eq!(game.lives, 0);
    assert!(game.game_over_raised());
    assert_eq!(game.take_state_event(), StateEvent::GameOver);
}

#[test]
fn game_over_is_not_raised_again_after_being_consumed() {
    let mut world = make_world(GameConfig::new(), 1);
    world.spawn((Player, Controllable::new(26.0, 16.0), MapPosition::new(100.0, 400.0)));
    world.spawn((Enemy, Bullet::new(2.0, 8.0, 0.0), MapPosition::new(110.0, 402.0)));

    run_once(&mut world, (collision, life, delete).chain());
    let first = world.resource_mut::<GameResources>().take_state_event();
    assert_eq!(first, StateEvent::GameOver);

    world.spawn((Enemy, Bullet::new(2.0, 8.0, 0.0), MapPosition::new(110.0, 402.0)));
    run_once(&mut world, (collision, life, delete).chain());
    assert_eq!(world.resource::<GameResources>().state_event(), StateEvent::None);
}

// ==================== SWARM ====================

#[test]
fn swarm_stops_at_the_edge_then_drops_then_reverses() {
    let mut config = GameConfig::new();
    config.field_width = 100.0;
    config.alien_speed = 5.0;
    config.alien_acceleration = 0.0;
    let drop = config.alien_drop;
    let mut world = make_world(config, 3);
    world.spawn(AlienMaster::new(5.0, 1));
    let alien = world
        .spawn((Enemy, Alien::new(10.0, 10.0), MapPosition::new(85.0, 50.0)))
        .id();

    let tick = |world: &mut World| {
        run_once(world, (move_alien_master, move_alien).chain());
        world.get::<MapPosition>(alien).unwrap().pos
    };

    let pos = tick(&mut world);
    assert_eq!((pos.x, pos.y), (90.0, 50.0));
    let pos = tick(&mut world);
    assert_eq!((pos.x, pos.y), (90.0, 50.0));
    let pos = tick(&mut world);
    assert_eq!((pos.x, pos.y), (90.0, 50.0 + drop));
    let pos = tick(&mut world);
    assert_eq!((pos.x, pos.y), (85.0, 50.0 + drop));
}

#[test]
fn swarm_wider_than_the_field_never_steps_backwards() {
    let mut config = GameConfig::new();
    config.field_width = 20.0;
    config.alien_speed = 5.0;
    config.alien_acceleration = 0.0;
    let drop = config.alien_drop;
    let mut world = make_world(config, 3);
    world.spawn(AlienMaster::new(5.0, 1));
    let alien = world
        .spawn((Enemy, Alien::new(30.0, 10.0), MapPosition::new(0.0, 50.0)))
        .id();

    run_once(&mut world, (move_alien_master, move_alien).chain());
    let pos = world.get::<MapPosition>(alien).unwrap().pos;
    assert_eq!((pos.x, pos.y), (0.0, 50.0));

    run_once(&mut world, (move_alien_master, move_alien).chain());
    let pos = world.get::<MapPosition>(alien).unwrap().pos;
    assert_eq!((pos.x, pos.y), (0.0, 50.0 + drop));
}

#[test]
fn swarm_speeds_up_as_it_shrinks() {
    let master = AlienMaster::new(1.0, 5);
    assert!(master.scaled_speed(1.0, 3.0, 1) > master.scaled_speed(1.0, 3.0, 4));
}

#[test]
fn invasion_removes_the_swarm_and_costs_a_life() {
    let mut world = make_world(GameConfig::new(), 3);
    world.spawn((PlayerLine, MapPosition::new(0.0, 400.0)));
    world.spawn(AlienMaster::new(1.0, 2));
    world.spawn((Enemy, Alien::new(24.0, 16.0), MapPosition::new(10.0, 390.0)));
    world.spawn((Enemy, Alien::new(24.0, 16.0), MapPosition::new(50.0, 100.0)));

    run_once(&mut world, (life, delete).chain());

    assert_eq!(count::<With<Alien>>(&mut world), 0);
    assert_eq!(count::<With<AlienMaster>>(&mut world), 0);
    let game = world.resource::<GameResources>();
    assert_eq!(game.lives, 2);
    assert_eq!(game.state_event(), StateEvent::Death);
}

#[test]
fn cleared_wave_respawns_lower_on_the_next_frame() {
    let config = GameConfig::new();
    let expected_top = config.alien_top + config.wave_step;
    let swarm_size = config.swarm_size();
    let mut world = make_world(config, 3);
    spawn_from_descriptor(&mut world, Descriptor::Level);
    world.spawn(AlienMaster::new(1.0, swarm_size));

    let mut pipeline = gameplay_schedule();
    pipeline.run(&mut world);
    assert_eq!(world.resource::<GameResources>().wave, 1);
    assert_eq!(count::<With<AlienMaster>>(&mut world), 0);

    pipeline.run(&mut world);
    assert_eq!(count::<With<AlienMaster>>(&mut world), 1);
    assert_eq!(count::<With<Alien>>(&mut world), swarm_size);
    let mut query = world.query_filtered::<&MapPosition, With<Alien>>();
    let top = query.iter(&world).map(|p| p.y()).fold(f32::MAX, f32::min);
    assert_eq!(top, expected_top);
}

// ==================== FULL PIPELINE ====================

fn full_game_world(enemy_fire_probability: f32) -> World {
    let mut config = GameConfig::new();
    config.enemy_fire_probability = enemy_fire_probability;
    config.enemy_fire_front_row_only = false;
    config.enemy_max_bullets = 20;
    let lives = config.player_lives;
    let mut world = make_world(config, lives);
    for descriptor in [Descriptor::Level, Descriptor::Player, Descriptor::Bunkers] {
        spawn_from_descriptor(&mut world, descriptor);
    }
    world
}

fn press_fire(world: &mut World, frame: u32) {
    let mut input = world.resource_mut::<InputState>();
    input.fire.active = true;
    input.fire.just_pressed = frame % 2 == 0;
    input.move_left.active = frame % 200 < 100;
    input.move_right.active = frame % 200 >= 100;
}

#[test]
fn at_most_one_player_bullet_in_flight() {
    let mut world = full_game_world(0.0);
    let mut pipeline = gameplay_schedule();

    for frame in 0..300 {
        press_fire(&mut world, frame);
        pipeline.run(&mut world);
        assert!(count::<(With<Player>, With<Bullet>)>(&mut world) <= 1);
    }
}

#[test]
fn deleted_entities_never_survive_a_frame() {
    let mut world = full_game_world(0.05);
    let mut pipeline = gameplay_schedule();

    for frame in 0..400 {
        press_fire(&mut world, frame);
        pipeline.run(&mut world);
        assert_eq!(count::<With<Deleted>>(&mut world), 0);
    }
}

#[test]
fn bunker_pixels_never_grow() {
    let mut world = full_game_world(0.05);
    let mut pipeline = gameplay_schedule();
    let mut previous = total_bunker_pixels(&mut world);

    for frame in 0..600 {
        press_fire(&mut world, frame);
        pipeline.run(&mut world);
        let now = total_bunker_pixels(&mut world);
        assert!(now <= previous);
        previous = now;
    }
}

#[test]
fn enemy_fire_respects_the_cap() {
    let mut config = GameConfig::new();
    config.enemy_fire_probability = 1.0;
    config.enemy_max_bullets = 2;
    let mut world = make_world(config, 3);
    spawn_from_descriptor(&mut world, Descriptor::Level);
    let mut pipeline = gameplay_schedule();

    for _ in 0..10 {
        pipeline.run(&mut world);
        assert!(count::<(With<Enemy>, With<Bullet>)>(&mut world) <= 2);
    }
}
