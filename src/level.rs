//! Demo level: a walled room with a ground sensor, the mage and a few enemies.
//!
//! Every entity spawned here (and every effect spawned during play) carries
//! [`LevelEntity`], so a reload is "despawn all `LevelEntity`, spawn again".

use crate::config::MageConfig;
use crate::enemy::{scatter_positions, spawn_bug, spawn_spiker};
use crate::host::{HitTarget, HostOutbox};
use crate::player::spawn_mage;
use crate::player::state::{LevelEntity, ReloadLevel, SpellPath, Tile};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

/// Half extent of the walkable floor.
pub const ROOM_HALF_EXTENT: Vec2 = Vec2::new(8.0, 6.0);
const WALL_THICKNESS: f32 = 0.5;
const WALL_HEIGHT: f32 = 1.0;
const BUG_COUNT: usize = 3;
const SPIKER_COUNT: usize = 2;
/// Enemies never spawn this close to the mage.
const ENEMY_KEEP_OUT: f32 = 3.0;

/// Interior pillars, as (center, half size).
const PILLARS: [(Vec2, Vec2); 2] = [
    (Vec2::new(-4.0, 2.0), Vec2::new(0.5, 0.5)),
    (Vec2::new(4.0, -2.5), Vec2::new(1.0, 0.5)),
];

fn spawn_wall(commands: &mut Commands, center: Vec2, half_size: Vec2) {
    commands.spawn((
        Tile {
            height: WALL_HEIGHT,
        },
        RigidBody::Fixed,
        Collider::cuboid(half_size.x, half_size.y),
        Transform::from_translation(center.extend(0.0)),
        LevelEntity,
    ));
}

/// Spawn the floor, walls, mage and enemies.  The mage starts at the origin.
pub fn spawn_level(commands: &mut Commands, config: &MageConfig, rng: &mut impl Rng) {
    // Floor: a sensor so it never pushes bodies, but point queries still hit it.
    commands.spawn((
        Tile { height: 0.0 },
        HitTarget::Ground,
        Collider::cuboid(ROOM_HALF_EXTENT.x, ROOM_HALF_EXTENT.y),
        Sensor,
        Transform::from_translation(Vec3::ZERO),
        LevelEntity,
    ));

    let outer = ROOM_HALF_EXTENT + Vec2::splat(WALL_THICKNESS);
    let half_t = WALL_THICKNESS * 0.5;
    let walls = [
        (Vec2::new(0.0, outer.y - half_t), Vec2::new(outer.x, half_t)),
        (Vec2::new(0.0, -outer.y + half_t), Vec2::new(outer.x, half_t)),
        (Vec2::new(outer.x - half_t, 0.0), Vec2::new(half_t, outer.y)),
        (Vec2::new(-outer.x + half_t, 0.0), Vec2::new(half_t, outer.y)),
    ];
    for (center, half_size) in walls.into_iter().chain(PILLARS) {
        spawn_wall(commands, center, half_size);
    }

    spawn_mage(commands, config, Vec3::ZERO);

    let inner = ROOM_HALF_EXTENT - Vec2::splat(1.0);
    for position in scatter_positions(rng, BUG_COUNT, inner, Vec2::ZERO, ENEMY_KEEP_OUT) {
        spawn_bug(commands, position);
    }
    for position in scatter_positions(rng, SPIKER_COUNT, inner, Vec2::ZERO, ENEMY_KEEP_OUT) {
        spawn_spiker(commands, position);
    }

    info!(
        "[level] spawned room {:.0}x{:.0} with {} bugs and {} spikers",
        ROOM_HALF_EXTENT.x * 2.0,
        ROOM_HALF_EXTENT.y * 2.0,
        BUG_COUNT,
        SPIKER_COUNT
    );
}

/// Startup system: build the first level.
pub fn setup_level(mut commands: Commands, config: Res<MageConfig>) {
    spawn_level(&mut commands, &config, &mut rand::thread_rng());
}

/// Tear down and rebuild the level when a [`ReloadLevel`] arrives.
pub fn reload_level_system(
    mut commands: Commands,
    mut reloads: MessageReader<ReloadLevel>,
    q_level: Query<Entity, With<LevelEntity>>,
    config: Res<MageConfig>,
    mut outbox: ResMut<HostOutbox>,
    mut path: ResMut<SpellPath>,
) {
    if reloads.read().count() == 0 {
        return;
    }
    for entity in q_level.iter() {
        commands.entity(entity).despawn();
    }
    outbox.clear();
    *path = SpellPath::default();
    info!("[level] reloading");
    spawn_level(&mut commands, &config, &mut rand::thread_rng());
}
