//! Penner-style easing equations.
//!
//! Every function here has the [`Easing`](crate::traits::Easing) signature
//! `(t, b, c, d) -> value` and can be handed to a
//! [`ValueInterpolator`](crate::interpolator::ValueInterpolator) directly.
//!
//! Unlike the classic equations, time is clamped: once `t >= d` the result
//! is exactly `b + c`, so a tick that overshoots the duration never
//! overshoots the target.

/// Normalised progress `t / d`, clamped to `[0, 1]`.
///
/// A zero (or negative) duration means the motion is instantaneous.
#[inline]
pub fn progress(t: f64, d: f64) -> f64 {
    if d <= 0.0 {
        return 1.0;
    }
    (t / d).clamp(0.0, 1.0)
}

#[inline]
fn apply(t: f64, b: f64, c: f64, d: f64, shape: impl Fn(f64) -> f64) -> f64 {
    let p = progress(t, d);
    // Pin the endpoints so the contract holds exactly, not just within
    // rounding error.
    if p >= 1.0 {
        b + c
    } else if p <= 0.0 {
        b
    } else {
        b + c * shape(p)
    }
}

/// Constant speed.
pub fn linear(t: f64, b: f64, c: f64, d: f64) -> f64 {
    apply(t, b, c, d, |p| p)
}

/// Quadratic ease-in: starts slow, accelerates.
pub fn quad_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    apply(t, b, c, d, |p| p * p)
}

/// Quadratic ease-out: starts fast, decelerates.
pub fn quad_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    apply(t, b, c, d, |p| -p * (p - 2.0))
}

/// Quadratic ease-in/out.
pub fn quad_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    apply(t, b, c, d, |p| {
        if p < 0.5 {
            2.0 * p * p
        } else {
            1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
        }
    })
}

/// Cubic ease-in.
pub fn cubic_in(t: f64, b: f64, c: f64, d: f64) -> f64 {
    apply(t, b, c, d, |p| p * p * p)
}

/// Cubic ease-out.
pub fn cubic_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    apply(t, b, c, d, |p| 1.0 - (1.0 - p).powi(3))
}

/// Cubic ease-in/out.
pub fn cubic_in_out(t: f64, b: f64, c: f64, d: f64) -> f64 {
    apply(t, b, c, d, |p| {
        if p < 0.5 {
            4.0 * p * p * p
        } else {
            1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
        }
    })
}

/// Hermite smoothstep (`3p² - 2p³`), zero slope at both ends.
pub fn smooth_step(t: f64, b: f64, c: f64, d: f64) -> f64 {
    apply(t, b, c, d, |p| p * p * (3.0 - 2.0 * p))
}
