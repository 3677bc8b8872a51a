//! Player module: the mage entity and the Bevy systems that host its controller.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Mage`, `CharacterView`, `Tile`, effect components), `SpellPath`, `ReloadLevel` |
//! | [`control`] | Pointer sampling, hotkeys, controller tick / fixed step, outbox apply |
//! | [`combat`] | Rapier collision events → controller contacts |
//! | [`rendering`] | Body, health bar, spell path, orbit, effect gizmos; camera follow |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::player::*` imports.

pub mod combat;
pub mod control;
pub mod rendering;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use combat::mage_collision_system;
pub use control::{
    apply_mage_commands_system, element_hotkey_system, mage_fixed_step_system, mage_tick_system,
    pointer_input_system, spawn_effect, sync_mage_config_system,
};
pub use rendering::{
    camera_follow_system, element_orbit_gizmo_system, ground_spell_gizmo_system,
    ground_spell_lifetime_system, mage_gizmo_system, spell_path_gizmo_system,
    tap_indicator_gizmo_system, tap_indicator_lifetime_system,
};
pub use state::{
    CharacterView, GroundSpell, LevelEntity, Mage, ReloadLevel, SpellPath, TapIndicator, Tile,
};

use crate::config::{load_mage_config, MageConfig};
use crate::controller::MageController;
use crate::enemy::EnemyPlugin;
use crate::gesture::PointerInput;
use crate::host::{HitTarget, HostOutbox};
use crate::level::{reload_level_system, setup_level};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

const MAGE_COLLIDER_RADIUS: f32 = 0.3;

// ── Mage spawn ────────────────────────────────────────────────────────────────

/// Spawn the mage body at `position` with its `CharacterView` child.
///
/// The body is a rotation-locked dynamic ball; facing lives on the child so
/// turning never fights the physics solver.
pub fn spawn_mage(commands: &mut Commands, config: &MageConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            Mage,
            MageController::new(config.clone()),
            HitTarget::Mage,
            // Physics
            RigidBody::Dynamic,
            Collider::ball(MAGE_COLLIDER_RADIUS),
            Velocity::zero(),
            LockedAxes::ROTATION_LOCKED,
            ActiveEvents::COLLISION_EVENTS,
            // Transform / visibility
            Transform::from_translation(position),
            Visibility::default(),
            LevelEntity,
        ))
        .with_children(|parent| {
            parent.spawn((CharacterView, Transform::default(), Visibility::Inherited));
        })
        .id()
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Mage gameplay: config load, level, input, controller, contacts, rendering.
///
/// Expects `RapierPhysicsPlugin` to be added by the app.
pub struct MagePlugin;

impl Plugin for MagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MageConfig>()
            .init_resource::<PointerInput>()
            .init_resource::<HostOutbox>()
            .init_resource::<SpellPath>()
            .add_message::<ReloadLevel>()
            .add_plugins(EnemyPlugin)
            .add_systems(
                Startup,
                (load_mage_config, setup_level.after(load_mage_config)),
            )
            .add_systems(
                Update,
                (
                    sync_mage_config_system,
                    pointer_input_system,
                    element_hotkey_system,
                    mage_tick_system,
                    mage_collision_system,
                    apply_mage_commands_system,
                    reload_level_system,
                    tap_indicator_lifetime_system,
                    ground_spell_lifetime_system,
                    camera_follow_system,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    mage_gizmo_system,
                    element_orbit_gizmo_system,
                    spell_path_gizmo_system,
                    tap_indicator_gizmo_system,
                    ground_spell_gizmo_system,
                )
                    .after(camera_follow_system),
            )
            .add_systems(
                FixedUpdate,
                (mage_fixed_step_system, apply_mage_commands_system).chain(),
            );
    }
}
