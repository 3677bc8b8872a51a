//! Runtime controller configuration loaded from `assets/mage.toml`.
//!
//! [`MageConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_mage_config`] reads
//! `assets/mage.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<MageConfig>` to any system parameter list and read values
//! with `config.tap_time`, `config.line_max_length`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `MageConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_fraction, validate_non_negative, validate_positive, validate_range, MageError,
    MageResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/mage.toml";

/// Runtime-tunable input, movement, spell and health configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MageConfig {
    // ── Input: Gesture ────────────────────────────────────────────────────────
    pub tap_time: f32,
    pub drag_distance: f32,
    pub active_screen_width: f32,
    pub gesture_history_capacity: usize,

    // ── Movement ──────────────────────────────────────────────────────────────
    pub walk_speed: f32,

    // ── Elements ──────────────────────────────────────────────────────────────
    pub element_rot_dist: f32,
    pub element_rot_speed: f32,
    pub element_orbit_z: f32,
    pub max_selected_elements: usize,
    pub element_colors: [[f32; 4]; 5],

    // ── Spell path ────────────────────────────────────────────────────────────
    pub line_min_delta: f32,
    pub line_max_delta: f32,
    pub line_max_length: f32,
    pub line_z: f32,
    pub ground_spell_lifetime: f32,

    // ── Health ────────────────────────────────────────────────────────────────
    pub max_health: f32,
    pub heal_health: f32,
    pub knockback_dist: f32,
    pub knockback_dur: f32,
    pub invincible_dur: f32,
    pub inv_times_to_blink: u32,

    // ── Tap indicator ─────────────────────────────────────────────────────────
    pub tap_indicator_lifetime: f32,
    pub tap_indicator_scales: Vec<f32>,
    pub tap_indicator_colors: Vec<[f32; 4]>,
}

impl Default for MageConfig {
    fn default() -> Self {
        Self {
            // Input: Gesture
            tap_time: TAP_TIME,
            drag_distance: DRAG_DISTANCE,
            active_screen_width: ACTIVE_SCREEN_WIDTH,
            gesture_history_capacity: GESTURE_HISTORY_CAPACITY,
            // Movement
            walk_speed: WALK_SPEED,
            // Elements
            element_rot_dist: ELEMENT_ROT_DIST,
            element_rot_speed: ELEMENT_ROT_SPEED,
            element_orbit_z: ELEMENT_ORBIT_Z,
            max_selected_elements: MAX_SELECTED_ELEMENTS,
            element_colors: ELEMENT_COLORS,
            // Spell path
            line_min_delta: LINE_MIN_DELTA,
            line_max_delta: LINE_MAX_DELTA,
            line_max_length: LINE_MAX_LENGTH,
            line_z: LINE_Z,
            ground_spell_lifetime: GROUND_SPELL_LIFETIME,
            // Health
            max_health: MAX_HEALTH,
            heal_health: HEAL_HEALTH,
            knockback_dist: KNOCKBACK_DIST,
            knockback_dur: KNOCKBACK_DUR,
            invincible_dur: INVINCIBLE_DUR,
            inv_times_to_blink: INV_TIMES_TO_BLINK,
            // Tap indicator
            tap_indicator_lifetime: TAP_INDICATOR_LIFETIME,
            tap_indicator_scales: TAP_INDICATOR_SCALES.to_vec(),
            tap_indicator_colors: TAP_INDICATOR_COLORS.to_vec(),
        }
    }
}

impl MageConfig {
    /// Parse a TOML document and validate the result.
    ///
    /// `label` is only used in error messages (usually the file path).
    pub fn from_toml_str(label: &str, contents: &str) -> MageResult<Self> {
        let config: MageConfig =
            toml::from_str(contents).map_err(|e| MageError::ConfigParse {
                path: label.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the controller divides by or compares against.
    pub fn validate(&self) -> MageResult<()> {
        validate_non_negative("tap_time", self.tap_time)?;
        validate_non_negative("drag_distance", self.drag_distance)?;
        validate_fraction("active_screen_width", self.active_screen_width)?;
        if self.gesture_history_capacity < 2 {
            return Err(MageError::UnsafeConstant {
                name: "gesture_history_capacity",
                value: self.gesture_history_capacity as f32,
                safe_range: "[2, ∞)",
            });
        }
        validate_positive("walk_speed", self.walk_speed)?;
        if self.max_selected_elements == 0 {
            return Err(MageError::UnsafeConstant {
                name: "max_selected_elements",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        validate_non_negative("line_min_delta", self.line_min_delta)?;
        validate_positive("line_max_delta", self.line_max_delta)?;
        validate_range(
            "line_min_delta..line_max_delta",
            self.line_min_delta,
            self.line_max_delta,
        )?;
        validate_positive("line_max_length", self.line_max_length)?;
        validate_positive("knockback_dur", self.knockback_dur)?;
        validate_positive("invincible_dur", self.invincible_dur)?;
        validate_positive("tap_indicator_lifetime", self.tap_indicator_lifetime)?;
        Ok(())
    }

    /// Colour assigned to `kind` for path lines, orbit spheres and spell markers.
    pub fn element_color(&self, kind: crate::element::ElementKind) -> Color {
        let [r, g, b, a] = self.element_colors[kind.index()];
        Color::srgba(r, g, b, a)
    }
}

/// Startup system: attempt to load `assets/mage.toml` and overwrite the
/// `MageConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged but do not abort the game.  A missing file is not an error.
pub fn load_mage_config(mut config: ResMut<MageConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match MageConfig::from_toml_str(CONFIG_PATH, &contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("[config] Loaded mage config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("[config] {e}; using defaults");
            }
        },
        Err(_) => {
            info!("[config] No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
