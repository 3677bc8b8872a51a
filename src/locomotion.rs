//! Walk-to-point movement.
//!
//! The controller stores a single walk target.  Each fixed step the body
//! either heads straight for it at `walk_speed` or, when it would overshoot
//! this step, snaps onto it and stops.

use crate::host::Mover;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Locomotion {
    walking: bool,
    target: Vec3,
}

/// Heading (radians, 0 = +X) from `from` toward `to` on the ground plane.
#[inline]
pub fn facing_angle(from: Vec3, to: Vec3) -> f32 {
    let delta = to.truncate() - from.truncate();
    delta.y.atan2(delta.x)
}

impl Locomotion {
    /// Start (or re-target) walking toward `target` on the ground plane.
    pub fn walk_to(&mut self, target: Vec3, position: Vec3, mover: &mut impl Mover) {
        self.target = target.with_z(0.0);
        self.walking = true;
        mover.face(facing_angle(position, self.target));
    }

    pub fn stop(&mut self, mover: &mut impl Mover) {
        self.walking = false;
        mover.set_velocity(Vec2::ZERO);
    }

    /// Advance one physics step.
    pub fn step(&mut self, position: Vec3, speed: f32, dt: f32, mover: &mut impl Mover) {
        if !self.walking {
            mover.set_velocity(Vec2::ZERO);
            return;
        }
        let to_target = self.target.truncate() - position.truncate();
        if to_target.length() < speed * dt {
            mover.teleport(self.target.truncate().extend(position.z));
            self.stop(mover);
        } else {
            mover.set_velocity(to_target.normalize_or_zero() * speed);
        }
    }

    #[inline]
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }
}
