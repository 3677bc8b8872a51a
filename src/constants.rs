//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::MageConfig::default`] mirrors every value below; override
//! them at runtime through `assets/mage.toml`.
//!
//! World units are metres.  The demo camera renders roughly 48 px per unit.

// ── Input: Gesture ────────────────────────────────────────────────────────────

/// Seconds a press must be held before it can turn into a drag.
///
/// Releasing earlier always produces a tap.  Raising this makes quick swipes
/// register as taps; lowering it below a frame (~0.016 s) makes every press
/// a drag when no element is selected.
pub const TAP_TIME: f32 = 0.1;

/// Screen-space distance (pixels) the pointer must travel from the press
/// position before a press with an active selection becomes a drag.
pub const DRAG_DISTANCE: f32 = 5.0;

/// Fraction of the window width (from the left edge) that accepts presses.
///
/// `1.0` accepts the whole window.  Values below 1.0 reserve a strip on the
/// right for inventory UI.
pub const ACTIVE_SCREEN_WIDTH: f32 = 1.0;

/// Maximum number of pointer samples kept per gesture.
///
/// The press sample is never evicted; the oldest later sample is dropped
/// once the history is full.
pub const GESTURE_HISTORY_CAPACITY: usize = 256;

// ── Movement ──────────────────────────────────────────────────────────────────

/// Walking speed (units/s).
pub const WALK_SPEED: f32 = 2.0;

// ── Elements ──────────────────────────────────────────────────────────────────

/// Radius of the orbit traced by selected element spheres (units).
pub const ELEMENT_ROT_DIST: f32 = 0.5;

/// Orbit revolutions per second.
pub const ELEMENT_ROT_SPEED: f32 = 0.5;

/// Height offset of orbiting element spheres ("waist height").
pub const ELEMENT_ORBIT_Z: f32 = -0.5;

/// Maximum number of elements that can be selected at once.
///
/// With a value of 1, selecting a new element replaces the current one.
pub const MAX_SELECTED_ELEMENTS: usize = 1;

/// Per-element colours in `ElementKind` ordinal order:
/// earth, water, air, fire, aether.  Linear sRGBA.
pub const ELEMENT_COLORS: [[f32; 4]; 5] = [
    [0.55, 0.40, 0.15, 1.0],
    [0.20, 0.45, 1.00, 1.0],
    [0.85, 0.95, 1.00, 1.0],
    [1.00, 0.35, 0.05, 1.0],
    [0.75, 0.30, 0.95, 1.0],
];

// ── Spell path ────────────────────────────────────────────────────────────────

/// Points closer than this to the previous path point are rejected (units).
pub const LINE_MIN_DELTA: f32 = 0.1;

/// Segments longer than this are subdivided with interpolated points (units).
pub const LINE_MAX_DELTA: f32 = 0.5;

/// Total drawn length after which further points are ignored (units).
///
/// Rejected points count toward this length, so jittery input reaches the
/// cap at the same pace as smooth input.
pub const LINE_MAX_LENGTH: f32 = 8.0;

/// Depth assigned to every path point and tap indicator so they draw just
/// above the ground.
pub const LINE_Z: f32 = -0.1;

/// Seconds a ground spell marker stays in the world.
pub const GROUND_SPELL_LIFETIME: f32 = 3.0;

// ── Health ────────────────────────────────────────────────────────────────────

/// Starting hit points.
pub const MAX_HEALTH: f32 = 4.0;

/// Hit points restored by an earth heal.  Deliberately above `MAX_HEALTH`.
pub const HEAL_HEALTH: f32 = 5.0;

/// Distance travelled backwards after a hit (units).
pub const KNOCKBACK_DIST: f32 = 1.0;

/// Duration of the knockback slide (s).
pub const KNOCKBACK_DUR: f32 = 0.5;

/// Invincibility window after a hit or shield (s).
pub const INVINCIBLE_DUR: f32 = 0.5;

/// Number of visibility blinks during one invincibility window.
pub const INV_TIMES_TO_BLINK: u32 = 4;

// ── Tap indicator ─────────────────────────────────────────────────────────────

/// Lifetime of the tap indicator animation (s).
pub const TAP_INDICATOR_LIFETIME: f32 = 0.4;

/// Scale keys interpolated over the tap indicator's life.
pub const TAP_INDICATOR_SCALES: [f32; 3] = [0.1, 0.5, 0.3];

/// Colour keys interpolated over the tap indicator's life (sRGBA).
pub const TAP_INDICATOR_COLORS: [[f32; 4]; 3] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 0.6, 0.8],
    [1.0, 1.0, 0.6, 0.0],
];
