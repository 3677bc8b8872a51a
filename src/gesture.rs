//! Pointer gesture state machine: tap vs. drag classification.
//!
//! ## States
//!
//! ```text
//!   Idle ──press on something──▶ Pressed ──release──▶ Idle   (Tap)
//!                                   │
//!                 held > tap_time and (moved ≥ drag_distance or no selection)
//!                                   ▼
//!                               Dragging ──release──▶ Idle   (DragRelease)
//!                                   └─ every other tick ─▶ Drag
//! ```
//!
//! The three phase blocks run in order inside one [`GestureMachine::advance`]
//! call, so a press and release in the same tick yields a tap, and a
//! `Pressed → Dragging` transition also emits its first `Drag` that tick.

use crate::host::{HitTarget, RayHit, WorldQuery};
use bevy::prelude::*;
use std::collections::VecDeque;

/// Pointer state supplied by the host once per tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Pointer went down this tick.
    pub pressed: bool,
    /// Pointer went up this tick.
    pub released: bool,
    /// Pointer position in screen pixels.
    pub screen: Vec2,
    /// Width of the screen the pointer lives on, in pixels.
    pub screen_width: f32,
    /// World ray under the pointer.
    pub ray: Ray3d,
    /// Pointer projected onto the ground plane.
    pub ground: Vec3,
    /// Simulation time of this tick (s).
    pub time: f32,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self {
            pressed: false,
            released: false,
            screen: Vec2::ZERO,
            screen_width: 1.0,
            ray: Ray3d {
                origin: Vec3::ZERO,
                direction: Dir3::NEG_Z,
            },
            ground: Vec3::ZERO,
            time: 0.0,
        }
    }
}

impl PointerInput {
    /// `true` when the pointer lies inside the left `fraction` of the screen.
    #[inline]
    pub fn in_active_area(&self, fraction: f32) -> bool {
        self.screen_width > 0.0 && self.screen.x / self.screen_width < fraction
    }
}

/// One recorded pointer observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub world_point: Vec3,
    pub screen_point: Vec2,
    pub ray: Ray3d,
    pub time: f32,
    /// What the ray hit, if anything.
    pub hit: Option<RayHit>,
}

impl PointerSample {
    /// Record the pointer, querying the world once for the hit.
    pub fn capture(input: &PointerInput, world: &mut impl WorldQuery) -> Self {
        Self {
            world_point: input.ground,
            screen_point: input.screen,
            ray: input.ray,
            time: input.time,
            hit: world.raycast(input.ray),
        }
    }
}

/// Time-ordered samples of the current gesture.
///
/// At most one sample per distinct timestamp.  When full, the oldest sample
/// after the press sample is dropped; the press sample always stays first.
#[derive(Debug, Clone)]
pub struct GestureHistory {
    samples: VecDeque<PointerSample>,
    capacity: usize,
}

impl GestureHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.min(64)),
            capacity: capacity.max(2),
        }
    }

    /// Start a new gesture with `first` as its press sample.
    pub fn reset(&mut self, first: PointerSample) {
        self.samples.clear();
        self.samples.push_back(first);
    }

    /// Append `sample` unless the last sample has the same timestamp.
    ///
    /// Returns `true` if the sample was recorded.
    pub fn record(&mut self, sample: PointerSample) -> bool {
        if let Some(last) = self.samples.back() {
            if last.time == sample.time {
                return false;
            }
        }
        if self.samples.len() >= self.capacity {
            self.samples.remove(1);
        }
        self.samples.push_back(sample);
        true
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(2);
    }

    #[inline]
    pub fn first(&self) -> Option<&PointerSample> {
        self.samples.front()
    }

    #[inline]
    pub fn last(&self) -> Option<&PointerSample> {
        self.samples.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Phase of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Pressed,
    Dragging,
}

/// Semantic result of one [`GestureMachine::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    None,
    /// Released while still pressed.  `at` is the last sampled ground point.
    Tap {
        origin: Option<HitTarget>,
        at: Vec3,
    },
    /// Still dragging; `at` is the latest ground point.
    Drag {
        origin: Option<HitTarget>,
        at: Vec3,
    },
    /// Released while dragging.
    DragRelease { origin: Option<HitTarget> },
}

/// Thresholds read from [`crate::config::MageConfig`] each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureLimits {
    pub tap_time: f32,
    pub drag_distance: f32,
    pub active_screen_width: f32,
}

/// Idle / Pressed / Dragging classifier.
#[derive(Debug, Clone)]
pub struct GestureMachine {
    state: GestureState,
    origin: Option<HitTarget>,
    history: GestureHistory,
}

impl GestureMachine {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            state: GestureState::Idle,
            origin: None,
            history: GestureHistory::new(history_capacity),
        }
    }

    /// Run one tick of the state machine.
    pub fn advance(
        &mut self,
        input: &PointerInput,
        world: &mut impl WorldQuery,
        has_selection: bool,
        limits: GestureLimits,
    ) -> GestureAction {
        if self.state == GestureState::Idle && !input.pressed {
            return GestureAction::None;
        }
        let sample = PointerSample::capture(input, world);
        let mut action = GestureAction::None;

        if self.state == GestureState::Idle
            && input.pressed
            && input.in_active_area(limits.active_screen_width)
        {
            if let Some(hit) = sample.hit {
                self.history.reset(sample);
                self.origin = hit.target;
                self.state = GestureState::Pressed;
                debug!("[gesture] press on {:?}", self.origin);
            }
        }

        if self.state == GestureState::Pressed {
            self.history.record(sample);
            if input.released {
                self.state = GestureState::Idle;
                action = GestureAction::Tap {
                    origin: self.origin,
                    at: self.latest_point(),
                };
                self.history.clear();
                debug!("[gesture] tap on {:?}", self.origin);
            } else if let Some(first) = self.history.first() {
                if input.time - first.time > limits.tap_time {
                    let moved = self
                        .history
                        .last()
                        .map_or(0.0, |last| last.screen_point.distance(first.screen_point));
                    // No selection: start walking as soon as the tap window closes.
                    if moved >= limits.drag_distance || !has_selection {
                        self.state = GestureState::Dragging;
                        debug!("[gesture] drag from {:?}", self.origin);
                    }
                }
            }
        }

        if self.state == GestureState::Dragging {
            self.history.record(sample);
            if input.released {
                self.state = GestureState::Idle;
                action = GestureAction::DragRelease {
                    origin: self.origin,
                };
                self.history.clear();
                debug!("[gesture] drag release on {:?}", self.origin);
            } else {
                action = GestureAction::Drag {
                    origin: self.origin,
                    at: self.latest_point(),
                };
            }
        }

        action
    }

    /// Abandon the current gesture without emitting anything.
    pub fn interrupt(&mut self) {
        self.state = GestureState::Idle;
        self.history.clear();
    }

    fn latest_point(&self) -> Vec3 {
        self.history.last().map_or(Vec3::ZERO, |s| s.world_point)
    }

    #[inline]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Target category captured at press time.
    #[inline]
    pub fn origin(&self) -> Option<HitTarget> {
        self.origin
    }

    pub fn history(&self) -> &GestureHistory {
        &self.history
    }

    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.history.set_capacity(capacity);
    }
}
