//! Controller error types.
//!
//! Gameplay never fails: an unhit press, an untagged target or a capped spell
//! path are silent no-ops.  The only real failures are bad configuration
//! values, reported through [`MageError`] so the loader can fall back to the
//! compiled defaults instead of panicking.
//!
//! ## Usage
//!
//! ```rust
//! use mage::error::{validate_positive, MageResult};
//!
//! fn check(speed: f32) -> MageResult<()> {
//!     validate_positive("walk_speed", speed)?;
//!     Ok(())
//! }
//! assert!(check(2.0).is_ok());
//! assert!(check(0.0).is_err());
//! ```

use std::fmt;

/// Top-level error enum for the mage controller.
#[derive(Debug, Clone, PartialEq)]
pub enum MageError {
    /// The configuration file exists but is not valid TOML for [`crate::config::MageConfig`].
    ConfigParse {
        /// Path (or other label) of the rejected source.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A tuning value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A lower/upper bound pair is inverted.
    InvalidRange {
        /// Name of the pair, e.g. `line_min_delta..line_max_delta`.
        name: &'static str,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for MageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MageError::ConfigParse { path, message } => {
                write!(f, "failed to parse '{}': {}", path, message)
            }
            MageError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            MageError::InvalidRange { name, min, max } => write!(
                f,
                "range '{}' is inverted: min {} > max {}",
                name, min, max
            ),
        }
    }
}

impl std::error::Error for MageError {}

/// Convenience alias: a `Result` using `MageError` as the error type.
pub type MageResult<T> = Result<T, MageError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> MageResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(MageError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if `value` is negative (zero is allowed).
pub fn validate_non_negative(name: &'static str, value: f32) -> MageResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(MageError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` lies in `(0.0, 1.0]`.
pub fn validate_fraction(name: &'static str, value: f32) -> MageResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MageError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, 1.0]",
        })
    }
}

/// Returns an error if `min > max`.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> MageResult<()> {
    if min <= max {
        Ok(())
    } else {
        Err(MageError::InvalidRange { name, min, max })
    }
}
