//! Application configuration.
//!
//! The configuration is loaded from a JSON file whose path is passed on the
//! command line (`--config <path>`).  The top-level schema uses a `"tween"`
//! key so the file can be extended with additional sections later without
//! breaking backward compatibility.
//!
//! # Example
//!
//! ```json
//! {
//!   "tween": {
//!     "initial": 0.0,
//!     "bounds": { "min": 0.0, "max": 100.0 },
//!     "rate": { "speed": 25.0 },
//!     "curve": "InOutQuad"
//!   }
//! }
//! ```

use crate::interpolator::{Bounds, Rate, ValueInterpolator};
use crate::shaping::Curve;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional: a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Initial state and behaviour of the interpolator.
    #[serde(default)]
    pub tween: TweenConfig,
}

/// Construction parameters for a [`ValueInterpolator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Starting value (clamped into `bounds`).  Default: `0.0`.
    pub initial: f64,
    /// Optional clamp.  Default: unbounded.
    pub bounds: Bounds,
    /// Duration or speed of each motion.  Default: `{"duration": 1.0}`.
    pub rate: Rate,
    /// Shaping strategy.  Default: `"Linear"`.
    pub curve: Curve,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            initial: 0.0,
            bounds: Bounds::UNLIMITED,
            rate: Rate::default(),
            curve: Curve::default(),
        }
    }
}

impl TweenConfig {
    /// Reject values the interpolator would accept but misbehave on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial.is_finite() {
            return Err(ConfigError(format!("initial must be finite, got {}", self.initial)));
        }
        if let (Some(min), Some(max)) = (self.bounds.min, self.bounds.max) {
            if min > max {
                return Err(ConfigError(format!(
                    "bounds min ({}) is greater than max ({})",
                    min, max
                )));
            }
        }
        match self.rate {
            Rate::Duration(d) if !(d >= 0.0) || d.is_infinite() => Err(ConfigError(format!(
                "duration must be a non-negative finite number, got {}",
                d
            ))),
            Rate::Speed(s) if !(s > 0.0) || s.is_infinite() => Err(ConfigError(format!(
                "speed must be a positive finite number, got {}",
                s
            ))),
            _ => Ok(()),
        }
    }

    /// Validate and build an interpolator.
    pub fn build(&self) -> Result<ValueInterpolator, ConfigError> {
        self.validate()?;
        Ok(ValueInterpolator::new(
            self.initial,
            self.bounds,
            self.rate,
            self.curve,
        ))
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        config
            .tween
            .validate()
            .map_err(|e| ConfigError(format!("invalid {}: {}", path.display(), e.0)))?;
        Ok(config)
    }
}

/// Error from loading, parsing or validating a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
