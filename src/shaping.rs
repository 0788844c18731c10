//! Shaping strategies injected into a
//! [`ValueInterpolator`](crate::interpolator::ValueInterpolator).
//!
//! Most strategies are stateless [`Easing`] curves that only need elapsed
//! time.  Smooth damping carries velocity between ticks, so it gets its own
//! variant instead of being squeezed into the stateless shape.

use crate::bezier::CubicBezier;
use crate::damp::SmoothDamp;
use crate::easing;
use crate::traits::Easing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an interpolator turns elapsed time into a value.
pub enum Shaping {
    /// A pure `(t, b, c, d)` curve.
    Eased(Box<dyn Easing>),
    /// Critically damped smoothing; `d` is used as the smoothing time.
    Damped(SmoothDamp),
}

impl Shaping {
    /// Wrap any [`Easing`] (curve struct, closure, fn pointer).
    pub fn eased(easing: impl Easing + 'static) -> Self {
        Self::Eased(Box::new(easing))
    }

    /// Smooth damping starting at rest.
    pub fn damped() -> Self {
        Self::Damped(SmoothDamp::new())
    }

    /// Whether this strategy keeps state between ticks.
    pub fn is_stateful(&self) -> bool {
        matches!(self, Self::Damped(_))
    }

    /// Drop any per-motion state.  Called whenever a motion starts or the
    /// value is set immediately.
    pub(crate) fn restart(&mut self) {
        if let Self::Damped(damp) = self {
            damp.reset();
        }
    }

    /// Compute the next value of a motion from `start` to `end`.
    ///
    /// `elapsed` already includes `dt`.
    pub(crate) fn advance(
        &mut self,
        current: f64,
        elapsed: f64,
        start: f64,
        end: f64,
        duration: f64,
        dt: f64,
    ) -> f64 {
        match self {
            Self::Eased(easing) => easing.ease(elapsed, start, end - start, duration),
            Self::Damped(damp) => damp.step(current, end, duration, dt),
        }
    }
}

impl Default for Shaping {
    fn default() -> Self {
        Curve::default().into()
    }
}

impl fmt::Debug for Shaping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eased(_) => f.write_str("Eased(..)"),
            Self::Damped(damp) => f.debug_tuple("Damped").field(damp).finish(),
        }
    }
}

/// Built-in strategies, selectable by name from configuration.
///
/// Serialised with serde's external tagging: unit variants are plain
/// strings (`"InOutQuad"`), Bézier curves are objects
/// (`{"CubicBezier": {"x1": 0.4, "y1": 0, "x2": 0.2, "y2": 1}}`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Curve {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    SmoothStep,
    /// CSS `ease`.
    Ease,
    CubicBezier(CubicBezier),
    Damped,
}

impl From<Curve> for Shaping {
    fn from(curve: Curve) -> Self {
        match curve {
            Curve::Linear => Shaping::eased(easing::linear),
            Curve::InQuad => Shaping::eased(easing::quad_in),
            Curve::OutQuad => Shaping::eased(easing::quad_out),
            Curve::InOutQuad => Shaping::eased(easing::quad_in_out),
            Curve::InCubic => Shaping::eased(easing::cubic_in),
            Curve::OutCubic => Shaping::eased(easing::cubic_out),
            Curve::InOutCubic => Shaping::eased(easing::cubic_in_out),
            Curve::SmoothStep => Shaping::eased(easing::smooth_step),
            Curve::Ease => Shaping::eased(CubicBezier::EASE),
            Curve::CubicBezier(bezier) => Shaping::eased(bezier),
            Curve::Damped => Shaping::damped(),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Linear => write!(f, "linear"),
            Curve::InQuad => write!(f, "in-quad"),
            Curve::OutQuad => write!(f, "out-quad"),
            Curve::InOutQuad => write!(f, "in-out-quad"),
            Curve::InCubic => write!(f, "in-cubic"),
            Curve::OutCubic => write!(f, "out-cubic"),
            Curve::InOutCubic => write!(f, "in-out-cubic"),
            Curve::SmoothStep => write!(f, "smooth-step"),
            Curve::Ease => write!(f, "ease"),
            Curve::CubicBezier(b) => {
                write!(f, "cubic-bezier({}, {}, {}, {})", b.x1, b.y1, b.x2, b.y2)
            }
            Curve::Damped => write!(f, "damped"),
        }
    }
}

/// Error from parsing a curve name.
#[derive(Debug, thiserror::Error)]
#[error("unknown curve: {0:?}")]
pub struct ParseCurveError(String);

impl FromStr for Curve {
    type Err = ParseCurveError;

    /// Parse a curve name (case-insensitive; accepts "in-out-quad",
    /// "InOutQuad", "in_out_quad", etc.).  Bézier curves are only available
    /// through configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();
        match normalized.as_str() {
            "linear" | "lerp" => Ok(Curve::Linear),
            "inquad" => Ok(Curve::InQuad),
            "outquad" => Ok(Curve::OutQuad),
            "inoutquad" => Ok(Curve::InOutQuad),
            "incubic" => Ok(Curve::InCubic),
            "outcubic" => Ok(Curve::OutCubic),
            "inoutcubic" => Ok(Curve::InOutCubic),
            "smoothstep" => Ok(Curve::SmoothStep),
            "ease" => Ok(Curve::Ease),
            "damped" | "smoothdamp" => Ok(Curve::Damped),
            _ => Err(ParseCurveError(s.to_string())),
        }
    }
}
