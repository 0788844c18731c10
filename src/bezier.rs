//! CSS-like cubic Bézier easing.

use crate::easing::progress;
use crate::traits::Easing;
use serde::{Deserialize, Serialize};

/// A `cubic-bezier(x1, y1, x2, y2)` timing curve.
///
/// Control points are (0,0), (x1,y1), (x2,y2), (1,1).  `x1` and `x2` should
/// lie in `[0, 1]` so that the curve is a function of time; `y1`/`y2` may
/// leave that range to produce anticipation or overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// CSS `ease` == cubic-bezier(0.25, 0.1, 0.25, 1.0)
    pub const EASE: Self = Self::new(0.25, 0.10, 0.25, 1.00);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for normalised time `u` in [0,1].
    pub fn sample(&self, u: f64) -> f64 {
        // Polynomial coefficients for x(t) and y(t) with endpoints fixed at
        // (0,0) and (1,1):  B(t) = ((a*t + b)*t + c)*t
        let cx = 3.0 * self.x1;
        let bx = 3.0 * (self.x2 - self.x1) - cx;
        let ax = 1.0 - cx - bx;

        let cy = 3.0 * self.y1;
        let by = 3.0 * (self.y2 - self.y1) - cy;
        let ay = 1.0 - cy - by;

        let u = u.clamp(0.0, 1.0);
        let t = solve_t_for_x(u, ax, bx, cx);
        sample_curve(ay, by, cy, t)
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::EASE
    }
}

impl Easing for CubicBezier {
    fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        let u = progress(t, d);
        if u >= 1.0 {
            return b + c;
        }
        b + c * self.sample(u)
    }
}

#[inline]
fn sample_curve(a: f64, b: f64, c: f64, t: f64) -> f64 {
    ((a * t + b) * t + c) * t
}

/// Solve x(t) = u for t in [0,1].
fn solve_t_for_x(u: f64, ax: f64, bx: f64, cx: f64) -> f64 {
    // Newton-Raphson
    let mut t = u; // good initial guess
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - u;
        if x.abs() < 1e-9 {
            return t;
        }
        let dx = (3.0 * ax * t + 2.0 * bx) * t + cx;
        if dx.abs() < 1e-9 {
            break; // fallback to bisection
        }
        t -= x / dx;
        if !(0.0..=1.0).contains(&t) {
            break; // fallback to bisection
        }
    }

    // Bisection fallback (robust)
    let mut lo = 0.0;
    let mut hi = 1.0;
    t = u;

    for _ in 0..48 {
        let x = sample_curve(ax, bx, cx, t);
        if (x - u).abs() < 1e-10 {
            return t;
        }
        if x < u {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}
