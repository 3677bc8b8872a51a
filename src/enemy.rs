//! Demo enemies: a bug that chases the mage and a static spiker hazard.
//!
//! Both carry [`EnemyTouch`] so the mage's collision system can read the
//! damage they deal, and [`HitTarget::Enemy`] so taps on them are swallowed.

use crate::host::HitTarget;
use crate::player::state::{LevelEntity, Mage};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

const BUG_SPEED: f32 = 1.2;
/// Bugs only notice the mage inside this radius.
const BUG_SIGHT_RADIUS: f32 = 6.0;
const BUG_RADIUS: f32 = 0.3;
const BUG_TOUCH_DAMAGE: f32 = 1.0;
const SPIKER_HALF_SIZE: f32 = 0.35;
const SPIKER_TOUCH_DAMAGE: f32 = 1.0;

/// Damage dealt to the mage on contact.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EnemyTouch {
    pub touch_damage: f32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyBug {
    pub speed: f32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct EnemySpiker;

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (bug_chase_system, enemy_gizmo_system));
    }
}

pub fn spawn_bug(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            EnemyBug { speed: BUG_SPEED },
            EnemyTouch {
                touch_damage: BUG_TOUCH_DAMAGE,
            },
            HitTarget::Enemy,
            RigidBody::Dynamic,
            Collider::ball(BUG_RADIUS),
            Velocity::zero(),
            LockedAxes::ROTATION_LOCKED,
            Transform::from_translation(position.extend(0.0)),
            Visibility::default(),
            LevelEntity,
        ))
        .id()
}

/// Static hazard; a sensor so the mage passes over it and takes damage.
pub fn spawn_spiker(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            EnemySpiker,
            EnemyTouch {
                touch_damage: SPIKER_TOUCH_DAMAGE,
            },
            HitTarget::Enemy,
            Collider::cuboid(SPIKER_HALF_SIZE, SPIKER_HALF_SIZE),
            Sensor,
            Transform::from_translation(position.extend(0.0)),
            Visibility::default(),
            LevelEntity,
        ))
        .id()
}

/// `count` random points inside `±half_extent` that stay at least
/// `keep_out` away from `avoid`.
///
/// Gives up on a point after a bounded number of rejections, so the result
/// may hold fewer than `count` points when the area is too crowded.
pub fn scatter_positions(
    rng: &mut impl Rng,
    count: usize,
    half_extent: Vec2,
    avoid: Vec2,
    keep_out: f32,
) -> Vec<Vec2> {
    const MAX_TRIES: usize = 32;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        for _ in 0..MAX_TRIES {
            let candidate = Vec2::new(
                rng.gen_range(-half_extent.x..=half_extent.x),
                rng.gen_range(-half_extent.y..=half_extent.y),
            );
            if candidate.distance(avoid) >= keep_out {
                out.push(candidate);
                break;
            }
        }
    }
    out
}

/// Steer each bug straight at the mage while it is in sight; idle otherwise.
pub fn bug_chase_system(
    q_mage: Query<&Transform, With<Mage>>,
    mut q_bugs: Query<(&Transform, &EnemyBug, &mut Velocity), Without<Mage>>,
) {
    let Ok(mage_transform) = q_mage.single() else {
        return;
    };
    let mage_pos = mage_transform.translation.truncate();

    for (transform, bug, mut velocity) in q_bugs.iter_mut() {
        let to_mage = mage_pos - transform.translation.truncate();
        velocity.linvel = if to_mage.length() <= BUG_SIGHT_RADIUS {
            to_mage.normalize_or_zero() * bug.speed
        } else {
            Vec2::ZERO
        };
    }
}

pub fn enemy_gizmo_system(
    mut gizmos: Gizmos,
    q_bugs: Query<&Transform, With<EnemyBug>>,
    q_spikers: Query<&Transform, With<EnemySpiker>>,
) {
    for transform in q_bugs.iter() {
        gizmos.circle_2d(
            transform.translation.truncate(),
            BUG_RADIUS,
            Color::srgb(0.6, 0.9, 0.2),
        );
    }
    for transform in q_spikers.iter() {
        let pos = transform.translation.truncate();
        let color = Color::srgb(0.9, 0.2, 0.3);
        // An X inside the collider square.
        let a = Vec2::splat(SPIKER_HALF_SIZE);
        let b = Vec2::new(SPIKER_HALF_SIZE, -SPIKER_HALF_SIZE);
        gizmos.line_2d(pos - a, pos + a, color);
        gizmos.line_2d(pos - b, pos + b, color);
    }
}
