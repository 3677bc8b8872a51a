//! Health, knockback, invincibility and death.
//!
//! A hit starts two timers measured from `damage_time`:
//! - **knockback** (`knockback_dur`): the body slides away from the source at
//!   `knockback_dist / knockback_dur`, overriding walking.
//! - **invincibility** (`invincible_dur`): further hits are ignored and the
//!   body blinks `inv_times_to_blink` times.
//!
//! A shield reuses the invincibility window without the knockback.

use crate::config::MageConfig;
use bevy::prelude::*;

/// `damage_time` before any hit, far enough in the past that no timer is live.
const NEVER_DAMAGED: f32 = -100.0;

/// Result of [`Vitals::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible or already dead.
    Ignored,
    Hurt,
    /// Health reached zero on this hit.  Reported exactly once.
    Died,
}

/// Output of one fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VitalsStep {
    /// New body visibility, when the blink logic has an opinion this step.
    pub visible: Option<bool>,
    /// Knockback velocity overriding walking this step.
    pub knockback: Option<Vec2>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vitals {
    health: f32,
    damage_time: f32,
    invincible: bool,
    knocked_back: bool,
    knockback_dir: Vec2,
    dead: bool,
}

impl Vitals {
    pub fn new(health: f32) -> Self {
        Self {
            health,
            damage_time: NEVER_DAMAGED,
            invincible: false,
            knocked_back: false,
            knockback_dir: Vec2::ZERO,
            dead: false,
        }
    }

    /// Apply `amount` damage from a source at `source`.
    pub fn take_damage(&mut self, amount: f32, source: Vec2, position: Vec2, now: f32) -> DamageOutcome {
        if self.dead || self.invincible {
            return DamageOutcome::Ignored;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.dead = true;
            return DamageOutcome::Died;
        }
        self.damage_time = now;
        self.knocked_back = true;
        self.knockback_dir = (position - source).normalize_or_zero();
        self.invincible = true;
        DamageOutcome::Hurt
    }

    /// Start an invincibility window at `now` without knockback.
    pub fn shield(&mut self, now: f32) {
        if self.dead {
            return;
        }
        self.damage_time = now;
        self.invincible = true;
    }

    pub fn heal(&mut self, to: f32) {
        if !self.dead {
            self.health = to;
        }
    }

    /// Advance blink and knockback timers.
    pub fn step(&mut self, now: f32, config: &MageConfig) -> VitalsStep {
        let mut out = VitalsStep::default();
        let elapsed = now - self.damage_time;

        if self.invincible {
            let blink = (elapsed / config.invincible_dur * config.inv_times_to_blink as f32) % 1.0;
            let mut visible = blink > 0.5;
            if elapsed > config.invincible_dur {
                self.invincible = false;
                visible = true;
            }
            out.visible = Some(visible);
        }

        if self.knocked_back {
            if elapsed > config.knockback_dur {
                self.knocked_back = false;
            }
            // The final step still slides; walking resumes next step.
            out.knockback = Some(self.knockback_dir * (config.knockback_dist / config.knockback_dur));
        }

        out
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }
}
