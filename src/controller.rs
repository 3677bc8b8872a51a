//! The mage controller: gesture dispatch, spell casting, movement and damage.
//!
//! ## Entry points (called by the host)
//!
//! | Method                          | Cadence          | Purpose                                   |
//! |---------------------------------|------------------|-------------------------------------------|
//! | [`MageController::tick`]        | every frame      | gesture advance → action dispatch → path  |
//! | [`MageController::fixed_step`]  | every physics step | blink, knockback, walking velocity      |
//! | [`MageController::on_collision`]| per contact      | tile stop, enemy damage                   |
//! | [`MageController::select_element`] | on UI input   | inventory changes                         |
//!
//! ## Gesture dispatch
//!
//! | Action        | Origin  | Selection | Effect                                         |
//! |---------------|---------|-----------|------------------------------------------------|
//! | Tap           | Mage    | air       | shield, selection consumed                      |
//! | Tap           | Mage    | earth     | heal, selection consumed                        |
//! | Tap           | Ground  | any       | walk to point, tap indicator                    |
//! | Drag          | Ground  | none      | walk toward pointer every tick                  |
//! | Drag          | Ground  | some      | extend spell path                               |
//! | DragRelease   | Ground  | none      | stop walking                                    |
//! | DragRelease   | Ground  | some      | cast ground spell along path, clear path        |
//! | DragRelease   | Ground  | aether    | nothing spawned, selection consumed             |
//!
//! Everything else is a no-op.  The spell path is only ever non-empty while
//! dragging from the ground with a selection; any interruption discards it.

use crate::config::MageConfig;
use crate::element::{ElementKind, Selection};
use crate::error::MageResult;
use crate::gesture::{
    GestureAction, GestureHistory, GestureLimits, GestureMachine, GestureState, PointerInput,
};
use crate::host::{EffectKind, HitTarget, MageHost, WorldQuery};
use crate::locomotion::Locomotion;
use crate::orbit::orbit_offset;
use crate::polyline::{PathUpdate, PolylineBuilder};
use crate::vitals::{DamageOutcome, Vitals};
use bevy::prelude::*;

/// Something the mage's body touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Level tile; anything taller than the floor blocks walking.
    Tile { height: f32 },
    /// Enemy body or hazard.
    Enemy { touch_damage: f32, position: Vec2 },
}

#[derive(Component, Debug, Clone)]
pub struct MageController {
    config: MageConfig,
    gesture: GestureMachine,
    path: PolylineBuilder,
    selection: Selection,
    locomotion: Locomotion,
    vitals: Vitals,
}

impl MageController {
    /// Build a controller; a config that fails validation is replaced by the
    /// compiled defaults.
    pub fn new(config: MageConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("[config] {e}; mage uses defaults");
                MageConfig::default()
            }
        };
        Self {
            gesture: GestureMachine::new(config.gesture_history_capacity),
            path: PolylineBuilder::new(
                config.line_min_delta,
                config.line_max_delta,
                config.line_max_length,
                config.line_z,
            ),
            selection: Selection::default(),
            locomotion: Locomotion::default(),
            vitals: Vitals::new(config.max_health),
            config,
        }
    }

    /// Swap in new tuning values.  Health and in-flight state are kept.
    ///
    /// An invalid config is rejected and the current one stays in effect.
    pub fn set_config(&mut self, config: MageConfig) -> MageResult<()> {
        config.validate()?;
        self.gesture
            .set_history_capacity(config.gesture_history_capacity);
        self.path.set_limits(
            config.line_min_delta,
            config.line_max_delta,
            config.line_max_length,
            config.line_z,
        );
        self.config = config;
        Ok(())
    }

    // ── Per-frame input ──────────────────────────────────────────────────────

    /// Advance the gesture machine and dispatch whatever it emits.
    pub fn tick(
        &mut self,
        input: &PointerInput,
        position: Vec3,
        world: &mut impl WorldQuery,
        host: &mut impl MageHost,
    ) {
        if self.vitals.is_dead() {
            return;
        }
        let limits = GestureLimits {
            tap_time: self.config.tap_time,
            drag_distance: self.config.drag_distance,
            active_screen_width: self.config.active_screen_width,
        };
        let has_selection = !self.selection.is_empty();

        match self.gesture.advance(input, world, has_selection, limits) {
            GestureAction::None => {}
            GestureAction::Tap { origin, at } => self.on_tap(origin, at, position, input.time, host),
            GestureAction::Drag { origin, at } => self.on_drag(origin, at, position, host),
            GestureAction::DragRelease { origin } => self.on_drag_release(origin, input.time, host),
        }
    }

    fn on_tap(
        &mut self,
        origin: Option<HitTarget>,
        at: Vec3,
        position: Vec3,
        now: f32,
        host: &mut impl MageHost,
    ) {
        match origin {
            Some(HitTarget::Mage) => self.apply_self_effect(now, host),
            Some(HitTarget::Ground) => {
                self.locomotion.walk_to(at, position, host);
                host.spawn(EffectKind::TapIndicator, at.with_z(self.config.line_z));
            }
            Some(HitTarget::Enemy) | None => {}
        }
    }

    fn on_drag(&mut self, origin: Option<HitTarget>, at: Vec3, position: Vec3, host: &mut impl MageHost) {
        if origin != Some(HitTarget::Ground) {
            return;
        }
        let Some(kind) = self.selection.primary() else {
            // Continuous follow: re-target every tick.
            self.locomotion.walk_to(at, position, host);
            return;
        };
        if let PathUpdate::Extended { .. } = self.path.add_point(at) {
            host.set_vertices(self.path.points(), self.config.element_color(kind));
            host.set_enabled(true);
        }
    }

    fn on_drag_release(&mut self, origin: Option<HitTarget>, now: f32, host: &mut impl MageHost) {
        if origin != Some(HitTarget::Ground) {
            return;
        }
        if self.selection.is_empty() {
            self.locomotion.stop(host);
        } else {
            self.cast_ground_spell(now, host);
        }
    }

    /// Tap on the mage: air shields, earth heals; both consume the selection.
    fn apply_self_effect(&mut self, now: f32, host: &mut impl MageHost) {
        match self.selection.primary() {
            Some(ElementKind::Air) => {
                self.vitals.shield(now);
                info!("[spell] air shield");
                self.clear_elements(host);
            }
            Some(ElementKind::Earth) => {
                self.vitals.heal(self.config.heal_health);
                info!("[spell] earth heal → {:.1} hp", self.vitals.health());
                self.clear_elements(host);
            }
            _ => {}
        }
    }

    /// Spawn one spell piece per path point, then consume the selection
    /// (which also clears the path).
    fn cast_ground_spell(&mut self, now: f32, host: &mut impl MageHost) {
        let Some(kind) = self.selection.primary() else {
            return;
        };
        match kind {
            ElementKind::Air => self.vitals.shield(now),
            ElementKind::Earth => self.vitals.heal(self.config.heal_health),
            ElementKind::Fire | ElementKind::Water | ElementKind::Aether => {}
        }
        // Aether has no ground form; the drag only spends the selection.
        if kind != ElementKind::Aether {
            for &point in self.path.points() {
                host.spawn(EffectKind::GroundSpell(kind), point);
            }
        }
        info!(
            "[spell] {} ground spell along {} points ({:.2} units drawn)",
            kind.name(),
            self.path.points().len(),
            self.path.running_length()
        );
        self.clear_elements(host);
    }

    // ── Inventory ────────────────────────────────────────────────────────────

    /// Select `kind`, or clear the selection with `None`.
    pub fn select_element(&mut self, kind: Option<ElementKind>, host: &mut impl MageHost) {
        self.selection
            .select(kind, self.config.max_selected_elements);
        if self.selection.is_empty() {
            self.discard_path(host);
        }
    }

    pub fn clear_elements(&mut self, host: &mut impl MageHost) {
        self.selection.clear();
        self.discard_path(host);
    }

    fn clear_path(&mut self, host: &mut impl MageHost) {
        self.path.clear();
        host.set_enabled(false);
    }

    fn discard_path(&mut self, host: &mut impl MageHost) {
        if !self.path.is_empty() {
            self.clear_path(host);
        }
    }

    /// Drop the current gesture and its path without casting.
    pub fn interrupt_input(&mut self, host: &mut impl MageHost) {
        self.gesture.interrupt();
        self.discard_path(host);
    }

    // ── Physics step ─────────────────────────────────────────────────────────

    /// Blink, knockback and walking for one fixed step.
    pub fn fixed_step(&mut self, now: f32, dt: f32, position: Vec3, host: &mut impl MageHost) {
        if self.vitals.is_dead() {
            return;
        }
        let step = self.vitals.step(now, &self.config);
        if let Some(visible) = step.visible {
            host.set_body_visible(visible);
        }
        if let Some(velocity) = step.knockback {
            host.set_velocity(velocity);
            return;
        }
        self.locomotion
            .step(position, self.config.walk_speed, dt, host);
    }

    // ── Contacts ─────────────────────────────────────────────────────────────

    pub fn on_collision(
        &mut self,
        contact: Contact,
        now: f32,
        position: Vec3,
        host: &mut impl MageHost,
    ) -> DamageOutcome {
        match contact {
            Contact::Tile { height } => {
                if height > 0.0 {
                    self.locomotion.stop(host);
                }
                DamageOutcome::Ignored
            }
            Contact::Enemy {
                touch_damage,
                position: source,
            } => self.take_damage(touch_damage, source, now, position, host),
        }
    }

    /// Apply a hit.  Death is reported to the host exactly once.
    pub fn take_damage(
        &mut self,
        amount: f32,
        source: Vec2,
        now: f32,
        position: Vec3,
        host: &mut impl MageHost,
    ) -> DamageOutcome {
        if self.vitals.is_dead() || self.vitals.is_invincible() {
            return DamageOutcome::Ignored;
        }
        self.locomotion.stop(host);
        self.interrupt_input(host);

        let outcome = self
            .vitals
            .take_damage(amount, source, position.truncate(), now);
        match outcome {
            DamageOutcome::Died => {
                info!("[vitals] mage died; reloading level");
                host.reload();
            }
            DamageOutcome::Hurt => {
                info!(
                    "[vitals] took {:.1} damage, {:.1} hp left",
                    amount,
                    self.vitals.health()
                );
            }
            DamageOutcome::Ignored => {}
        }
        outcome
    }

    // ── Read-only views ──────────────────────────────────────────────────────

    /// Orbit offsets of the selected elements at time `t`.
    pub fn orbit_offsets(&self, t: f32) -> impl Iterator<Item = (ElementKind, Vec3)> + '_ {
        let count = self.selection.len();
        self.selection
            .as_slice()
            .iter()
            .enumerate()
            .map(move |(i, &kind)| {
                let offset = orbit_offset(
                    self.config.element_rot_speed,
                    self.config.element_rot_dist,
                    self.config.element_orbit_z,
                    t,
                    i,
                    count,
                );
                (kind, offset)
            })
    }

    #[inline]
    pub fn config(&self) -> &MageConfig {
        &self.config
    }

    #[inline]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    #[inline]
    pub fn action_origin(&self) -> Option<HitTarget> {
        self.gesture.origin()
    }

    pub fn gesture_history(&self) -> &GestureHistory {
        self.gesture.history()
    }

    #[inline]
    pub fn path_points(&self) -> &[Vec3] {
        self.path.points()
    }

    #[inline]
    pub fn path_length(&self) -> f32 {
        self.path.running_length()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.vitals.health()
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.vitals.is_invincible()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.vitals.is_dead()
    }

    #[inline]
    pub fn is_walking(&self) -> bool {
        self.locomotion.is_walking()
    }

    #[inline]
    pub fn walk_target(&self) -> Vec3 {
        self.locomotion.target()
    }
}
