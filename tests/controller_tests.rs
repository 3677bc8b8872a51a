//! Scripted gesture scenarios against [`MageController`].
//!
//! Each test drives the controller frame by frame with synthetic pointer
//! input and a fixed world-query answer, then asserts on the recorded
//! [`HostOutbox`] commands.  No Bevy app, window or physics is involved.
//!
//! Covered scenarios:
//! 1. Taps: ground walk + indicator, press/release across frames, no-hit and
//!    off-area presses, self taps that change nothing.
//! 2. Walking drags without a selection.
//! 3. Spell drags: path growth, cast on release, origin gating, length cap.
//! 4. Interruptions: damage mid-drag, selection cleared mid-drag, rejected
//!    tuning values.
//! 5. Death reported once.

use bevy::prelude::*;
use mage::config::MageConfig;
use mage::controller::{Contact, MageController};
use mage::element::ElementKind;
use mage::gesture::{GestureState, PointerInput};
use mage::host::{EffectKind, HitTarget, HostCommand, HostOutbox, RayHit};
use mage::vitals::DamageOutcome;

// ── Helpers ───────────────────────────────────────────────────────────────────

const SCREEN_WIDTH: f32 = 100.0;

/// What the world query reports under the pointer.
#[derive(Clone, Copy)]
enum Under {
    Nothing,
    Untagged,
    Target(HitTarget),
}

struct Rig {
    mage: MageController,
    out: HostOutbox,
    position: Vec3,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(MageConfig::default())
    }

    fn with_config(config: MageConfig) -> Self {
        Self {
            mage: MageController::new(config),
            out: HostOutbox::default(),
            position: Vec3::ZERO,
        }
    }

    fn frame(
        &mut self,
        time: f32,
        pressed: bool,
        released: bool,
        screen_x: f32,
        ground: Vec2,
        under: Under,
    ) {
        let input = PointerInput {
            pressed,
            released,
            screen: Vec2::new(screen_x, 10.0),
            screen_width: SCREEN_WIDTH,
            ground: ground.extend(0.0),
            time,
            ..Default::default()
        };
        let hit = match under {
            Under::Nothing => None,
            Under::Untagged => Some(RayHit {
                point: ground.extend(0.0),
                target: None,
            }),
            Under::Target(target) => Some(RayHit {
                point: ground.extend(0.0),
                target: Some(target),
            }),
        };
        let mut world = move |_ray: Ray3d| hit;
        self.mage
            .tick(&input, self.position, &mut world, &mut self.out);
    }

    fn select(&mut self, kind: ElementKind) {
        self.mage.select_element(Some(kind), &mut self.out);
    }

    fn count(&self, command: &HostCommand) -> usize {
        self.out.commands().iter().filter(|c| *c == command).count()
    }
}

const GROUND: Under = Under::Target(HitTarget::Ground);

// ── Taps ──────────────────────────────────────────────────────────────────────

#[test]
fn ground_tap_walks_to_the_point_and_marks_it() {
    let mut rig = Rig::new();
    rig.frame(0.0, true, false, 10.0, Vec2::new(2.0, 0.0), GROUND);
    assert_eq!(rig.mage.gesture_state(), GestureState::Pressed);
    rig.frame(0.05, false, true, 10.0, Vec2::new(2.0, 0.0), GROUND);

    assert_eq!(rig.mage.gesture_state(), GestureState::Idle);
    assert!(rig.mage.is_walking());
    assert_eq!(rig.mage.walk_target(), Vec3::new(2.0, 0.0, 0.0));
    let markers = rig.out.spawned(EffectKind::TapIndicator);
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].truncate(), Vec2::new(2.0, 0.0));
    assert!(rig.mage.gesture_history().is_empty());
}

#[test]
fn press_with_nothing_under_the_pointer_is_ignored() {
    let mut rig = Rig::new();
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, Under::Nothing);
    assert_eq!(rig.mage.gesture_state(), GestureState::Idle);
    rig.frame(0.05, false, true, 10.0, Vec2::ZERO, Under::Nothing);
    assert!(rig.out.commands().is_empty());
}

#[test]
fn tap_on_untagged_collider_does_nothing() {
    let mut rig = Rig::new();
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, Under::Untagged);
    assert_eq!(rig.mage.gesture_state(), GestureState::Pressed);
    assert_eq!(rig.mage.action_origin(), None);
    rig.frame(0.05, false, true, 10.0, Vec2::ZERO, Under::Untagged);
    assert_eq!(rig.mage.gesture_state(), GestureState::Idle);
    assert!(rig.out.commands().is_empty());
}

#[test]
fn press_outside_the_active_area_is_ignored() {
    let config = MageConfig {
        active_screen_width: 0.5,
        ..Default::default()
    };
    let mut rig = Rig::with_config(config);
    rig.frame(0.0, true, false, 80.0, Vec2::ZERO, GROUND);
    assert_eq!(rig.mage.gesture_state(), GestureState::Idle);
    rig.frame(0.0, true, false, 20.0, Vec2::ZERO, GROUND);
    assert_eq!(rig.mage.gesture_state(), GestureState::Pressed);
}

#[test]
fn held_still_press_with_selection_stays_a_tap() {
    let mut rig = Rig::new();
    rig.select(ElementKind::Air);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, Under::Target(HitTarget::Mage));
    // Well past the tap window but without moving: still pressed.
    rig.frame(0.5, false, false, 11.0, Vec2::ZERO, Under::Target(HitTarget::Mage));
    assert_eq!(rig.mage.gesture_state(), GestureState::Pressed);
    rig.frame(0.6, false, true, 11.0, Vec2::ZERO, Under::Target(HitTarget::Mage));

    assert!(rig.mage.is_invincible());
    assert!(rig.mage.selection().is_empty());
}

#[test]
fn self_tap_with_water_keeps_the_selection() {
    let mut rig = Rig::new();
    rig.select(ElementKind::Water);
    let on_mage = Under::Target(HitTarget::Mage);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, on_mage);
    rig.frame(0.05, false, true, 10.0, Vec2::ZERO, on_mage);

    assert_eq!(rig.mage.selection().primary(), Some(ElementKind::Water));
    assert!(!rig.mage.is_invincible());
    assert!(rig.out.commands().is_empty());
}

#[test]
fn self_tap_without_selection_does_nothing() {
    let mut rig = Rig::new();
    let on_mage = Under::Target(HitTarget::Mage);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, on_mage);
    rig.frame(0.05, false, true, 10.0, Vec2::ZERO, on_mage);

    assert_eq!(rig.mage.gesture_state(), GestureState::Idle);
    assert!(rig.mage.selection().is_empty());
    assert!(!rig.mage.is_invincible());
    assert!(!rig.mage.is_walking());
    assert!(rig.out.commands().is_empty());
}

// ── Walking drags ─────────────────────────────────────────────────────────────

#[test]
fn drag_without_selection_follows_the_pointer_then_stops() {
    let mut rig = Rig::new();
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, GROUND);
    rig.frame(0.2, false, false, 10.0, Vec2::new(1.0, 0.0), GROUND);
    assert_eq!(rig.mage.gesture_state(), GestureState::Dragging);
    assert_eq!(rig.mage.walk_target(), Vec3::new(1.0, 0.0, 0.0));

    rig.frame(0.3, false, false, 12.0, Vec2::new(1.0, 3.0), GROUND);
    assert_eq!(rig.mage.walk_target(), Vec3::new(1.0, 3.0, 0.0));

    assert_eq!(rig.mage.gesture_history().len(), 3);
    rig.frame(0.4, false, true, 12.0, Vec2::new(1.0, 3.0), GROUND);
    assert!(rig.mage.gesture_history().is_empty());
    assert!(!rig.mage.is_walking());
    assert_eq!(rig.out.last_velocity(), Some(Vec2::ZERO));
    assert!(rig.mage.path_points().is_empty());
}

#[test]
fn drag_from_the_mage_does_not_walk() {
    let mut rig = Rig::new();
    let on_mage = Under::Target(HitTarget::Mage);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, on_mage);
    rig.frame(0.2, false, false, 40.0, Vec2::new(2.0, 0.0), on_mage);
    assert_eq!(rig.mage.gesture_state(), GestureState::Dragging);
    rig.frame(0.3, false, true, 40.0, Vec2::new(2.0, 0.0), on_mage);
    assert!(!rig.mage.is_walking());
    assert!(rig.out.commands().is_empty());
}

// ── Spell drags ───────────────────────────────────────────────────────────────

/// Press at the origin, drag right past the drag threshold, and return the rig
/// while still dragging with a three-point path.
fn fire_drag() -> Rig {
    let mut rig = Rig::new();
    rig.select(ElementKind::Fire);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, GROUND);
    rig.frame(0.2, false, false, 30.0, Vec2::new(0.3, 0.0), GROUND);
    assert_eq!(rig.mage.gesture_state(), GestureState::Dragging);
    rig.frame(0.3, false, false, 50.0, Vec2::new(1.2, 0.0), GROUND);
    rig
}

#[test]
fn spell_drag_builds_a_subdivided_path() {
    let rig = fire_drag();
    let points: Vec<Vec2> = rig.mage.path_points().iter().map(|p| p.truncate()).collect();
    let expected = [Vec2::new(0.3, 0.0), Vec2::new(0.75, 0.0), Vec2::new(1.2, 0.0)];
    assert_eq!(points.len(), expected.len());
    for (got, want) in points.iter().zip(expected) {
        assert!(got.distance(want) < 1e-5, "got {got:?}, want {want:?}");
    }
    assert!(rig.mage.path_points().iter().all(|p| p.z == -0.1));
    assert!(rig.count(&HostCommand::SetPathEnabled(true)) >= 1);
    assert!(!rig.mage.is_walking());
}

#[test]
fn release_casts_one_spell_piece_per_path_point() {
    let mut rig = fire_drag();
    let path: Vec<Vec3> = rig.mage.path_points().to_vec();
    rig.frame(0.4, false, true, 50.0, Vec2::new(1.2, 0.0), GROUND);

    assert_eq!(rig.out.spawned(EffectKind::GroundSpell(ElementKind::Fire)), path);
    assert!(rig.mage.selection().is_empty());
    assert!(rig.mage.path_points().is_empty());
    assert_eq!(
        rig.out.commands().last(),
        Some(&HostCommand::SetPathEnabled(false))
    );
}

#[test]
fn air_ground_spell_also_shields() {
    let mut rig = Rig::new();
    rig.select(ElementKind::Air);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, GROUND);
    rig.frame(0.2, false, false, 30.0, Vec2::new(0.3, 0.0), GROUND);
    rig.frame(0.3, false, false, 50.0, Vec2::new(0.6, 0.0), GROUND);
    rig.frame(0.4, false, true, 50.0, Vec2::new(0.6, 0.0), GROUND);

    assert!(rig.mage.is_invincible());
    assert_eq!(rig.out.spawned(EffectKind::GroundSpell(ElementKind::Air)).len(), 2);
}

#[test]
fn aether_ground_spell_spawns_nothing_but_spends_the_selection() {
    let mut rig = Rig::new();
    rig.select(ElementKind::Aether);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, GROUND);
    rig.frame(0.2, false, false, 30.0, Vec2::new(0.3, 0.0), GROUND);
    rig.frame(0.3, false, false, 50.0, Vec2::new(0.6, 0.0), GROUND);
    assert_eq!(rig.mage.path_points().len(), 2);
    rig.frame(0.4, false, true, 50.0, Vec2::new(0.6, 0.0), GROUND);

    assert!(rig.out.spawned(EffectKind::GroundSpell(ElementKind::Aether)).is_empty());
    assert!(rig.mage.selection().is_empty());
    assert!(rig.mage.path_points().is_empty());
    assert!(!rig.mage.is_invincible());
}

#[test]
fn spell_drag_from_an_enemy_draws_nothing() {
    let mut rig = Rig::new();
    rig.select(ElementKind::Water);
    let on_enemy = Under::Target(HitTarget::Enemy);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, on_enemy);
    rig.frame(0.2, false, false, 30.0, Vec2::new(1.0, 0.0), on_enemy);
    rig.frame(0.3, false, false, 50.0, Vec2::new(2.0, 0.0), on_enemy);
    rig.frame(0.4, false, true, 50.0, Vec2::new(2.0, 0.0), on_enemy);

    assert!(rig.mage.path_points().is_empty());
    assert_eq!(rig.mage.selection().primary(), Some(ElementKind::Water));
    assert!(rig.out.spawned(EffectKind::GroundSpell(ElementKind::Water)).is_empty());
}

#[test]
fn path_length_stops_growing_at_the_cap() {
    let mut rig = Rig::new();
    rig.select(ElementKind::Earth);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, GROUND);
    let max_length = rig.mage.config().line_max_length;
    let mut t = 0.2;
    for i in 1..=40 {
        rig.frame(t, false, false, 30.0, Vec2::new(i as f32 * 0.4, 0.0), GROUND);
        t += 0.02;
    }
    let capped_len = rig.mage.path_points().len();
    let capped_length = rig.mage.path_length();
    assert!(capped_length > max_length);
    assert!(capped_length <= max_length + 0.5);

    rig.frame(t, false, false, 30.0, Vec2::new(30.0, 0.0), GROUND);
    assert_eq!(rig.mage.path_points().len(), capped_len);
    assert_eq!(rig.mage.path_length(), capped_length);
}

// ── Interruptions ─────────────────────────────────────────────────────────────

#[test]
fn damage_mid_drag_discards_the_path_without_casting() {
    let mut rig = fire_drag();
    let outcome = rig.mage.on_collision(
        Contact::Enemy {
            touch_damage: 1.0,
            position: Vec2::new(-1.0, 0.0),
        },
        0.35,
        Vec3::ZERO,
        &mut rig.out,
    );
    assert_eq!(outcome, DamageOutcome::Hurt);
    assert_eq!(rig.mage.gesture_state(), GestureState::Idle);
    assert!(rig.mage.gesture_history().is_empty());
    assert!(rig.mage.path_points().is_empty());
    assert_eq!(rig.mage.selection().primary(), Some(ElementKind::Fire));

    // The release that follows belongs to the abandoned gesture.
    rig.frame(0.4, false, true, 50.0, Vec2::new(1.2, 0.0), GROUND);
    assert!(rig.out.spawned(EffectKind::GroundSpell(ElementKind::Fire)).is_empty());
}

#[test]
fn clearing_the_selection_mid_drag_discards_the_path() {
    let mut rig = fire_drag();
    rig.out.clear();
    rig.mage.select_element(None, &mut rig.out);
    assert!(rig.mage.path_points().is_empty());
    assert_eq!(rig.out.commands(), &[HostCommand::SetPathEnabled(false)]);

    // Still dragging from the ground, now without a selection: walk instead.
    rig.frame(0.4, false, false, 60.0, Vec2::new(2.0, 0.0), GROUND);
    assert!(rig.mage.is_walking());
}

#[test]
fn wall_contact_stops_a_walk() {
    let mut rig = Rig::new();
    rig.frame(0.0, true, true, 10.0, Vec2::new(5.0, 0.0), GROUND);
    assert!(rig.mage.is_walking());
    rig.mage
        .on_collision(Contact::Tile { height: 1.0 }, 0.5, Vec3::ZERO, &mut rig.out);
    assert!(!rig.mage.is_walking());
}

#[test]
fn invalid_line_spacing_falls_back_to_defaults() {
    let config = MageConfig {
        line_max_delta: 0.0,
        ..Default::default()
    };
    let mut rig = Rig::with_config(config);
    assert_eq!(rig.mage.config().line_max_delta, MageConfig::default().line_max_delta);

    rig.select(ElementKind::Fire);
    rig.frame(0.0, true, false, 10.0, Vec2::ZERO, GROUND);
    rig.frame(0.2, false, false, 30.0, Vec2::new(0.3, 0.0), GROUND);
    rig.frame(0.3, false, false, 50.0, Vec2::new(1.2, 0.0), GROUND);
    assert_eq!(rig.mage.path_points().len(), 3);
}

// ── Death ─────────────────────────────────────────────────────────────────────

#[test]
fn death_requests_exactly_one_reload() {
    let mut rig = Rig::new();
    let lethal = Contact::Enemy {
        touch_damage: 10.0,
        position: Vec2::X,
    };
    assert_eq!(
        rig.mage.on_collision(lethal, 0.0, Vec3::ZERO, &mut rig.out),
        DamageOutcome::Died
    );
    assert_eq!(
        rig.mage.on_collision(lethal, 2.0, Vec3::ZERO, &mut rig.out),
        DamageOutcome::Ignored
    );
    assert_eq!(rig.count(&HostCommand::Reload), 1);
}
