//! Adaptive polyline builder for the ground spell footprint.
//!
//! Points arrive once per tick while the player drags with an element
//! selected.  The builder keeps the path evenly dense:
//!
//! | Incoming delta            | Result                                          |
//! |---------------------------|-------------------------------------------------|
//! | first point               | stored, running length reset                    |
//! | running length > cap      | ignored                                         |
//! | `< min_segment`           | rejected (still counted in the running length)  |
//! | `min_segment..=max_segment` | appended                                      |
//! | `> max_segment`           | `ceil(delta / max) - 1` interpolated points, then appended |
//!
//! Every stored point has its `z` snapped to `line_z`.  A non-positive
//! `max_segment` turns subdivision off.

use bevy::prelude::*;

/// What happened to a point passed to [`PolylineBuilder::add_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathUpdate {
    /// First point of a new path; nothing visible yet.
    Started,
    /// The running length already exceeded the cap.
    Capped,
    /// Too close to the previous point.
    Rejected,
    /// The path grew by `added` points (interpolated points included).
    Extended { added: usize },
}

/// Resampled list of world points plus the running length used for the cap.
#[derive(Debug, Clone)]
pub struct PolylineBuilder {
    points: Vec<Vec3>,
    running_length: f32,
    min_segment: f32,
    max_segment: f32,
    max_length: f32,
    line_z: f32,
}

impl PolylineBuilder {
    pub fn new(min_segment: f32, max_segment: f32, max_length: f32, line_z: f32) -> Self {
        Self {
            points: Vec::new(),
            running_length: 0.0,
            min_segment,
            max_segment,
            max_length,
            line_z,
        }
    }

    /// Replace the tuning values without touching the current path.
    pub fn set_limits(&mut self, min_segment: f32, max_segment: f32, max_length: f32, line_z: f32) {
        self.min_segment = min_segment;
        self.max_segment = max_segment;
        self.max_length = max_length;
        self.line_z = line_z;
    }

    /// Feed one world point into the path.
    pub fn add_point(&mut self, mut point: Vec3) -> PathUpdate {
        point.z = self.line_z;

        let Some(&last) = self.points.last() else {
            self.points.push(point);
            self.running_length = 0.0;
            return PathUpdate::Started;
        };

        if self.running_length > self.max_length {
            return PathUpdate::Capped;
        }

        let offset = point - last;
        let delta = offset.length();
        // Counted before the min-distance check: rejected jitter still
        // consumes the length budget.
        self.running_length += delta;

        if delta < self.min_segment {
            return PathUpdate::Rejected;
        }

        let mut added = 0;
        if self.max_segment > 0.0 && delta > self.max_segment {
            let pieces = (delta / self.max_segment).ceil() as usize;
            let step = offset / pieces as f32;
            for i in 1..pieces {
                self.points.push(last + step * i as f32);
                added += 1;
            }
        }
        self.points.push(point);
        added += 1;

        PathUpdate::Extended { added }
    }

    /// Drop every point and zero the running length.
    pub fn clear(&mut self) {
        self.points.clear();
        self.running_length = 0.0;
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn running_length(&self) -> f32 {
        self.running_length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
