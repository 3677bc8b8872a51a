//! ECS components, resources and messages for the mage entity.

use crate::element::ElementKind;
use crate::tap_indicator::TapIndicatorCurve;
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Marker for the mage's rigid body.  The body also carries the
/// [`MageController`](crate::controller::MageController).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Mage;

/// Child of the mage that carries its facing rotation and blink visibility.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CharacterView;

/// Level tile.  `height > 0` blocks walking on contact.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub height: f32,
}

/// Everything that belongs to the current level; despawned on reload.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;

/// Ground marker spawned by a tap on the ground.
#[derive(Component, Debug, Clone)]
pub struct TapIndicator {
    pub age: f32,
    pub curve: TapIndicatorCurve,
}

/// One piece of a cast ground spell.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GroundSpell {
    pub kind: ElementKind,
    pub age: f32,
    pub lifetime: f32,
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Spell path polyline as last set by the controller.
#[derive(Resource, Debug, Clone)]
pub struct SpellPath {
    pub points: Vec<Vec3>,
    pub color: Color,
    pub enabled: bool,
}

impl Default for SpellPath {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            color: Color::WHITE,
            enabled: false,
        }
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// Request to tear down and rebuild the level (sent when the mage dies).
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ReloadLevel;
