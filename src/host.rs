//! Collaborator seams between the controller and the host engine.
//!
//! The controller never touches ECS state directly.  It reads the world
//! through [`WorldQuery`] and writes through the output traits:
//!
//! | Trait             | Host responsibility                              |
//! |-------------------|--------------------------------------------------|
//! | [`WorldQuery`]    | ray/point query returning the hit target         |
//! | [`Mover`]         | facing, velocity, teleport of the rigid body     |
//! | [`PathRenderer`]  | spell path polyline                              |
//! | [`EffectSpawner`] | fire-and-forget visuals at a world position      |
//! | [`Lifecycle`]     | body visibility (invincibility blink), reload    |
//!
//! [`HostOutbox`] implements every output trait by recording a
//! [`HostCommand`] list.  The Bevy adapter drains it once per frame in
//! `apply_mage_commands_system`, and tests assert on it directly.

use crate::element::ElementKind;
use bevy::prelude::*;

/// Category of the object under the pointer.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// The mage itself.
    Mage,
    Ground,
    Enemy,
}

/// Result of a successful world query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// `None` when the hit collider (and its ancestors) carry no [`HitTarget`].
    pub target: Option<HitTarget>,
}

/// Ray query against the host world.
pub trait WorldQuery {
    fn raycast(&mut self, ray: Ray3d) -> Option<RayHit>;
}

impl<F> WorldQuery for F
where
    F: FnMut(Ray3d) -> Option<RayHit>,
{
    fn raycast(&mut self, ray: Ray3d) -> Option<RayHit> {
        self(ray)
    }
}

/// Rigid-body movement.  "Stop" is `set_velocity(Vec2::ZERO)`.
pub trait Mover {
    /// Rotate the character view to `angle` radians (0 = +X).
    fn face(&mut self, angle: f32);
    fn set_velocity(&mut self, velocity: Vec2);
    fn teleport(&mut self, position: Vec3);
}

/// Spell path polyline primitive.
pub trait PathRenderer {
    fn set_vertices(&mut self, points: &[Vec3], color: Color);
    fn set_enabled(&mut self, enabled: bool);
}

/// Kind of visual effect spawned through [`EffectSpawner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Short-lived marker where the player tapped the ground.
    TapIndicator,
    /// One piece of a ground spell footprint.
    GroundSpell(ElementKind),
}

pub trait EffectSpawner {
    fn spawn(&mut self, effect: EffectKind, position: Vec3);
}

pub trait Lifecycle {
    fn set_body_visible(&mut self, visible: bool);
    /// Health reached zero; restart the level.
    fn reload(&mut self);
}

/// Every output collaborator the controller talks to.
pub trait MageHost: Mover + PathRenderer + EffectSpawner + Lifecycle {}

impl<T> MageHost for T where T: Mover + PathRenderer + EffectSpawner + Lifecycle {}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Face(f32),
    SetVelocity(Vec2),
    Teleport(Vec3),
    SetPath { points: Vec<Vec3>, color: Color },
    SetPathEnabled(bool),
    Spawn { effect: EffectKind, position: Vec3 },
    SetBodyVisible(bool),
    Reload,
}

/// Command buffer implementing [`MageHost`].
#[derive(Resource, Debug, Default, Clone)]
pub struct HostOutbox {
    commands: Vec<HostCommand>,
}

impl HostOutbox {
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    pub fn push(&mut self, command: HostCommand) {
        self.commands.push(command);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, HostCommand> {
        self.commands.drain(..)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Positions of every spawned effect of `effect` kind, in spawn order.
    pub fn spawned(&self, effect: EffectKind) -> Vec<Vec3> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                HostCommand::Spawn {
                    effect: e,
                    position,
                } if *e == effect => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// The most recent velocity command, if any.
    pub fn last_velocity(&self) -> Option<Vec2> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::SetVelocity(v) => Some(*v),
            _ => None,
        })
    }
}

impl Mover for HostOutbox {
    fn face(&mut self, angle: f32) {
        self.commands.push(HostCommand::Face(angle));
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.commands.push(HostCommand::SetVelocity(velocity));
    }

    fn teleport(&mut self, position: Vec3) {
        self.commands.push(HostCommand::Teleport(position));
    }
}

impl PathRenderer for HostOutbox {
    fn set_vertices(&mut self, points: &[Vec3], color: Color) {
        self.commands.push(HostCommand::SetPath {
            points: points.to_vec(),
            color,
        });
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.commands.push(HostCommand::SetPathEnabled(enabled));
    }
}

impl EffectSpawner for HostOutbox {
    fn spawn(&mut self, effect: EffectKind, position: Vec3) {
        self.commands.push(HostCommand::Spawn { effect, position });
    }
}

impl Lifecycle for HostOutbox {
    fn set_body_visible(&mut self, visible: bool) {
        self.commands.push(HostCommand::SetBodyVisible(visible));
    }

    fn reload(&mut self) {
        self.commands.push(HostCommand::Reload);
    }
}
