//! Mage input and movement systems.
//!
//! ## Pipeline (every `Update` frame, in order)
//!
//! 1. [`pointer_input_system`]: samples the mouse into [`PointerInput`].
//! 2. [`element_hotkey_system`]: number keys select / clear elements.
//! 3. [`mage_tick_system`]: advances the controller against a Rapier point query.
//! 4. [`apply_mage_commands_system`]: drains [`HostOutbox`] into ECS state.
//!
//! [`mage_fixed_step_system`] runs in `FixedUpdate`, followed by a second
//! [`apply_mage_commands_system`] pass so knockback velocity lands the same step.
//!
//! The controller never sees the ECS: it writes [`HostCommand`]s into the
//! outbox, so tests can populate the outbox directly and run only the apply
//! step.

use super::state::{CharacterView, GroundSpell, LevelEntity, Mage, ReloadLevel, SpellPath, TapIndicator};
use crate::config::MageConfig;
use crate::controller::MageController;
use crate::element::ElementKind;
use crate::gesture::PointerInput;
use crate::host::{EffectKind, HitTarget, HostCommand, HostOutbox, RayHit};
use crate::tap_indicator::TapIndicatorCurve;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

// ── Step 1: Pointer sampling ──────────────────────────────────────────────────

/// Copy the left mouse button and cursor into [`PointerInput`].
///
/// The cursor ray and ground point keep their last value while the cursor is
/// outside the window.
pub fn pointer_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform)>,
    time: Res<Time>,
    mut pointer: ResMut<PointerInput>,
) {
    pointer.pressed = buttons.just_pressed(MouseButton::Left);
    pointer.released = buttons.just_released(MouseButton::Left);
    pointer.time = time.elapsed_secs();

    let Ok(window) = windows.single() else {
        return;
    };
    pointer.screen_width = window.width();
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    pointer.screen = cursor;

    let Ok((camera, camera_transform)) = q_camera.single() else {
        return;
    };
    if let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) {
        pointer.ray = ray;
    }
    if let Ok(ground) = camera.viewport_to_world_2d(camera_transform, cursor) {
        pointer.ground = ground.extend(0.0);
    }
}

// ── Step 2: Hotkeys ───────────────────────────────────────────────────────────

/// `1`..`5` select earth, water, air, fire, aether; `0` clears.
pub fn element_hotkey_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut q_mage: Query<&mut MageController, With<Mage>>,
    mut outbox: ResMut<HostOutbox>,
) {
    let Ok(mut controller) = q_mage.single_mut() else {
        return;
    };
    const SLOTS: [(KeyCode, ElementKind); 5] = [
        (KeyCode::Digit1, ElementKind::Earth),
        (KeyCode::Digit2, ElementKind::Water),
        (KeyCode::Digit3, ElementKind::Air),
        (KeyCode::Digit4, ElementKind::Fire),
        (KeyCode::Digit5, ElementKind::Aether),
    ];
    for (key, kind) in SLOTS {
        if keys.just_pressed(key) {
            controller.select_element(Some(kind), &mut *outbox);
            debug!("[spell] selected {}", kind.name());
        }
    }
    if keys.just_pressed(KeyCode::Digit0) {
        controller.select_element(None, &mut *outbox);
        debug!("[spell] selection cleared");
    }
}

/// Push a changed [`MageConfig`] into the controller.
pub fn sync_mage_config_system(
    config: Res<MageConfig>,
    mut q_mage: Query<&mut MageController, With<Mage>>,
) {
    if !config.is_changed() {
        return;
    }
    for mut controller in q_mage.iter_mut() {
        if let Err(e) = controller.set_config(config.clone()) {
            warn!("[config] {e}; keeping the previous mage config");
        }
    }
}

// ── Step 3: Controller tick ───────────────────────────────────────────────────

/// Rank used when several colliders sit under the pointer.
fn target_priority(target: Option<HitTarget>) -> u8 {
    match target {
        Some(HitTarget::Mage) => 3,
        Some(HitTarget::Enemy) => 2,
        Some(HitTarget::Ground) => 1,
        None => 0,
    }
}

/// Tag on `entity` or its nearest tagged ancestor.
fn tagged_ancestor(
    mut entity: Entity,
    q_targets: &Query<&HitTarget>,
    q_parents: &Query<&ChildOf>,
) -> Option<HitTarget> {
    loop {
        if let Ok(target) = q_targets.get(entity) {
            return Some(*target);
        }
        entity = q_parents.get(entity).ok()?.parent();
    }
}

/// Best-ranked collider under `point`, if any.
fn pick_target(
    rapier: &RapierContext<'_>,
    point: Vec2,
    q_targets: &Query<&HitTarget>,
    q_parents: &Query<&ChildOf>,
) -> Option<RayHit> {
    let mut best: Option<Option<HitTarget>> = None;
    rapier.intersect_point(point, QueryFilter::default(), |entity| {
        let target = tagged_ancestor(entity, q_targets, q_parents);
        let better = best.is_none_or(|current| target_priority(target) > target_priority(current));
        if better {
            best = Some(target);
        }
        true
    });
    best.map(|target| RayHit {
        point: point.extend(0.0),
        target,
    })
}

pub fn mage_tick_system(
    mut q_mage: Query<(&mut MageController, &Transform), With<Mage>>,
    pointer: Res<PointerInput>,
    rapier_context: ReadRapierContext,
    q_targets: Query<&HitTarget>,
    q_parents: Query<&ChildOf>,
    mut outbox: ResMut<HostOutbox>,
) {
    let Ok((mut controller, transform)) = q_mage.single_mut() else {
        return;
    };
    let Ok(rapier) = rapier_context.single() else {
        return;
    };
    // Orthographic top-down view: the ray origin is the point under the cursor.
    let mut world =
        |ray: Ray3d| pick_target(&rapier, ray.origin.truncate(), &q_targets, &q_parents);
    controller.tick(&pointer, transform.translation, &mut world, &mut *outbox);
}

/// Blink, knockback and walking, once per fixed step.
pub fn mage_fixed_step_system(
    mut q_mage: Query<(&mut MageController, &Transform), With<Mage>>,
    time: Res<Time>,
    mut outbox: ResMut<HostOutbox>,
) {
    let Ok((mut controller, transform)) = q_mage.single_mut() else {
        return;
    };
    controller.fixed_step(
        time.elapsed_secs(),
        time.delta_secs(),
        transform.translation,
        &mut *outbox,
    );
}

// ── Step 4: Apply ─────────────────────────────────────────────────────────────

/// Spawn the visual for one [`EffectKind`].
pub fn spawn_effect(commands: &mut Commands, effect: EffectKind, position: Vec3, config: &MageConfig) {
    match effect {
        EffectKind::TapIndicator => {
            commands.spawn((
                TapIndicator {
                    age: 0.0,
                    curve: TapIndicatorCurve::from_config(config),
                },
                Transform::from_translation(position),
                LevelEntity,
            ));
        }
        EffectKind::GroundSpell(kind) => {
            commands.spawn((
                GroundSpell {
                    kind,
                    age: 0.0,
                    lifetime: config.ground_spell_lifetime,
                },
                Transform::from_translation(position),
                LevelEntity,
            ));
        }
    }
}

/// Drain [`HostOutbox`] into transforms, velocity, the spell path and effects.
#[allow(clippy::too_many_arguments)]
pub fn apply_mage_commands_system(
    mut commands: Commands,
    mut outbox: ResMut<HostOutbox>,
    mut q_mage: Query<(&mut Transform, &mut Velocity), (With<Mage>, Without<CharacterView>)>,
    mut q_view: Query<(&mut Transform, &mut Visibility), (With<CharacterView>, Without<Mage>)>,
    mut path: ResMut<SpellPath>,
    mut reloads: MessageWriter<ReloadLevel>,
    config: Res<MageConfig>,
) {
    if outbox.commands().is_empty() {
        return;
    }
    for command in outbox.drain() {
        match command {
            HostCommand::Face(angle) => {
                for (mut transform, _) in q_view.iter_mut() {
                    transform.rotation = Quat::from_rotation_z(angle);
                }
            }
            HostCommand::SetVelocity(linvel) => {
                if let Ok((_, mut velocity)) = q_mage.single_mut() {
                    velocity.linvel = linvel;
                }
            }
            HostCommand::Teleport(position) => {
                if let Ok((mut transform, _)) = q_mage.single_mut() {
                    transform.translation = position;
                }
            }
            HostCommand::SetPath { points, color } => {
                path.points = points;
                path.color = color;
            }
            HostCommand::SetPathEnabled(enabled) => path.enabled = enabled,
            HostCommand::Spawn { effect, position } => {
                spawn_effect(&mut commands, effect, position, &config);
            }
            HostCommand::SetBodyVisible(visible) => {
                for (_, mut visibility) in q_view.iter_mut() {
                    *visibility = if visible {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    };
                }
            }
            HostCommand::Reload => {
                reloads.write(ReloadLevel);
            }
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
