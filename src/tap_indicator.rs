//! Tap indicator animation curve.
//!
//! The indicator grows and fades along a Bezier curve through the configured
//! scale and colour keys, then expires.

use bevy::prelude::*;

/// Evaluate a Bezier curve through `keys` at `u` (De Casteljau).
///
/// An empty key list yields `None`; a single key is constant.
pub fn bezier<T>(keys: &[T], u: f32) -> Option<T>
where
    T: Copy + std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
{
    let mut points: Vec<T> = keys.to_vec();
    if points.is_empty() {
        return None;
    }
    let u = u.clamp(0.0, 1.0);
    while points.len() > 1 {
        for i in 0..points.len() - 1 {
            points[i] = points[i] * (1.0 - u) + points[i + 1] * u;
        }
        points.pop();
    }
    points.first().copied()
}

/// Lifetime, scale keys and colour keys of one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct TapIndicatorCurve {
    pub lifetime: f32,
    pub scales: Vec<f32>,
    pub colors: Vec<Vec4>,
}

impl TapIndicatorCurve {
    pub fn from_config(config: &crate::config::MageConfig) -> Self {
        Self {
            lifetime: config.tap_indicator_lifetime,
            scales: config.tap_indicator_scales.clone(),
            colors: config
                .tap_indicator_colors
                .iter()
                .map(|&c| Vec4::from_array(c))
                .collect(),
        }
    }

    /// Scale and colour at `age` seconds, or `None` once expired.
    pub fn sample(&self, age: f32) -> Option<(f32, Color)> {
        if age >= self.lifetime {
            return None;
        }
        let u = age / self.lifetime;
        let scale = bezier(&self.scales, u).unwrap_or(1.0);
        let color = bezier(&self.colors, u)
            .map(|c| Color::srgba(c.x, c.y, c.z, c.w))
            .unwrap_or(Color::WHITE);
        Some((scale, color))
    }
}
