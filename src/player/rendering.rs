//! Mage rendering: body, facing, health bar, spell path, orbiting elements,
//! tap indicators, ground spell markers, and the camera follow system.
//!
//! ## Layer model
//!
//! | Layer               | Technology | Visible when                        |
//! |---------------------|------------|-------------------------------------|
//! | Mage body + facing  | Gizmos     | `CharacterView` not hidden (blink)  |
//! | Health bar          | Gizmos     | always                              |
//! | Spell path          | Gizmos     | `SpellPath::enabled`                |
//! | Orbiting elements   | Gizmos     | selection non-empty                 |
//! | Tap indicator       | Gizmos     | until its curve expires             |
//! | Ground spell pieces | Gizmos     | until `ground_spell_lifetime`       |
//!
//! Lifetime bookkeeping lives in separate systems from drawing so it can be
//! tested without a gizmo context.

use super::state::{CharacterView, GroundSpell, Mage, SpellPath, TapIndicator};
use crate::config::MageConfig;
use crate::controller::MageController;
use bevy::prelude::*;

const BODY_RADIUS: f32 = 0.3;
const ELEMENT_RADIUS: f32 = 0.1;
const GROUND_SPELL_RADIUS: f32 = 0.15;

// ── Lifetimes ─────────────────────────────────────────────────────────────────

/// Age tap indicators and despawn them once their curve has run out.
pub fn tap_indicator_lifetime_system(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut TapIndicator)>,
) {
    let dt = time.delta_secs();
    for (entity, mut indicator) in q.iter_mut() {
        indicator.age += dt;
        if indicator.curve.sample(indicator.age).is_none() {
            commands.entity(entity).despawn();
        }
    }
}

pub fn ground_spell_lifetime_system(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut GroundSpell)>,
) {
    let dt = time.delta_secs();
    for (entity, mut spell) in q.iter_mut() {
        spell.age += dt;
        if spell.age >= spell.lifetime {
            commands.entity(entity).despawn();
        }
    }
}

// ── Gizmo rendering ───────────────────────────────────────────────────────────

/// Body circle, facing tick and health bar.
pub fn mage_gizmo_system(
    mut gizmos: Gizmos,
    q_mage: Query<(Entity, &Transform, &MageController), With<Mage>>,
    q_view: Query<(&Transform, &Visibility, &ChildOf), With<CharacterView>>,
) {
    let Ok((mage_entity, transform, controller)) = q_mage.single() else {
        return;
    };
    let pos = transform.translation.truncate();

    if let Some((view_transform, visibility, _)) = q_view
        .iter()
        .find(|(_, _, child_of)| child_of.parent() == mage_entity)
    {
        if *visibility != Visibility::Hidden {
            let body_color = Color::srgb(0.55, 0.45, 0.95);
            gizmos.circle_2d(pos, BODY_RADIUS, body_color);
            let facing = (view_transform.rotation * Vec3::X).truncate();
            gizmos.line_2d(pos, pos + facing * BODY_RADIUS * 1.6, Color::WHITE);
        }
    }

    // ── Health bar (always shown) ─────────────────────────────────────────────
    let max_hp = controller.config().max_health.max(controller.health());
    let hp_frac = if max_hp > 0.0 {
        (controller.health() / max_hp).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let bar_half = 0.4;
    let bar_y_offset = 0.5;
    let bar_start = pos + Vec2::new(-bar_half, bar_y_offset);
    let bar_end_full = pos + Vec2::new(bar_half, bar_y_offset);
    let bar_end_hp = bar_start + Vec2::new(bar_half * 2.0 * hp_frac, 0.0);
    gizmos.line_2d(bar_start, bar_end_full, Color::srgba(0.4, 0.0, 0.0, 0.8));
    if hp_frac > 0.0 {
        gizmos.line_2d(bar_start, bar_end_hp, Color::srgb(1.0 - hp_frac, hp_frac, 0.0));
    }
}

/// Selected elements circling the mage.
pub fn element_orbit_gizmo_system(
    mut gizmos: Gizmos,
    time: Res<Time>,
    q_mage: Query<(&Transform, &MageController), With<Mage>>,
) {
    let Ok((transform, controller)) = q_mage.single() else {
        return;
    };
    let center = transform.translation.truncate();
    for (kind, offset) in controller.orbit_offsets(time.elapsed_secs()) {
        let color = controller.config().element_color(kind);
        gizmos.circle_2d(center + offset.truncate(), ELEMENT_RADIUS, color);
    }
}

pub fn spell_path_gizmo_system(mut gizmos: Gizmos, path: Res<SpellPath>) {
    if !path.enabled {
        return;
    }
    for pair in path.points.windows(2) {
        gizmos.line_2d(pair[0].truncate(), pair[1].truncate(), path.color);
    }
}

pub fn tap_indicator_gizmo_system(mut gizmos: Gizmos, q: Query<(&Transform, &TapIndicator)>) {
    for (transform, indicator) in q.iter() {
        if let Some((scale, color)) = indicator.curve.sample(indicator.age) {
            gizmos.circle_2d(transform.translation.truncate(), scale, color);
        }
    }
}

/// Ground spell pieces fade out over their lifetime.
pub fn ground_spell_gizmo_system(
    mut gizmos: Gizmos,
    config: Res<MageConfig>,
    q: Query<(&Transform, &GroundSpell)>,
) {
    for (transform, spell) in q.iter() {
        let remaining = if spell.lifetime > 0.0 {
            (1.0 - spell.age / spell.lifetime).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let color = config.element_color(spell.kind).with_alpha(remaining);
        gizmos.circle_2d(transform.translation.truncate(), GROUND_SPELL_RADIUS, color);
    }
}

// ── Camera ─────────────────────────────────────────────────────────────────────

/// Keep the camera centred on the mage.  Camera Z is preserved.
pub fn camera_follow_system(
    q_mage: Query<&Transform, With<Mage>>,
    mut q_camera: Query<&mut Transform, (With<Camera>, Without<Mage>)>,
) {
    let Ok(mage_transform) = q_mage.single() else {
        return;
    };
    let Ok(mut cam) = q_camera.single_mut() else {
        return;
    };
    cam.translation.x = mage_transform.translation.x;
    cam.translation.y = mage_transform.translation.y;
}
