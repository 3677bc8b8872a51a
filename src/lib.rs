//! Mage controller library
//!
//! A top-down mage that walks where the player taps and casts elemental
//! spells along paths the player draws.  The gameplay core (`controller` and
//! the modules it composes) is engine-agnostic behind the traits in `host`;
//! `player`, `level`, `enemy` and `graphics` host it inside Bevy + Rapier2D.

pub mod config;
pub mod constants;
pub mod controller;
pub mod element;
pub mod enemy;
pub mod error;
pub mod gesture;
pub mod graphics;
pub mod host;
pub mod level;
pub mod locomotion;
pub mod orbit;
pub mod player;
pub mod polyline;
pub mod tap_indicator;
pub mod vitals;
