//! Orbit positions for selected element spheres.
//!
//! Pure function of elapsed time and ordinal index; nothing is persisted
//! between frames, so recomputing with the same inputs always yields the same
//! offsets.

use bevy::prelude::*;
use std::f32::consts::TAU;

/// Orbit angle (radians) of element `index` out of `count` at time `t`.
///
/// `theta = rot_speed * t * TAU + index * TAU / count`
#[inline]
pub fn orbit_angle(rot_speed: f32, t: f32, index: usize, count: usize) -> f32 {
    let per_element = TAU / count.max(1) as f32;
    rot_speed * t * TAU + index as f32 * per_element
}

/// Local-space offset of element `index` around the mage.
pub fn orbit_offset(
    rot_speed: f32,
    radius: f32,
    height: f32,
    t: f32,
    index: usize,
    count: usize,
) -> Vec3 {
    let theta = orbit_angle(rot_speed, t, index, count);
    Vec3::new(theta.cos() * radius, theta.sin() * radius, height)
}
