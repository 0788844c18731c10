//! The value-interpolation state machine.
//!
//! A [`ValueInterpolator`] owns one scalar and moves it toward declared
//! targets as the caller pushes time in through
//! [`update`](ValueInterpolator::update).  It is either *settled*
//! (`value == end`) or *moving*:
//!
//! | Operation                 | Resulting state                                  |
//! |---------------------------|--------------------------------------------------|
//! | construction              | settled at `sanitize(initial)`                   |
//! | `set_value`               | settled, any motion cancelled                    |
//! | `set_target`/`set_range`  | moving, even if the target equals the value      |
//! | `update` while moving     | moving until within [`EPSILON`] of the end       |
//! | `update` within tolerance | snaps exactly onto the end, elapsed reset to 0   |
//!
//! Bounds are applied whenever an endpoint is declared, never to in-flight
//! values produced by the shaping strategy.

use crate::command::Command;
use crate::shaping::Shaping;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Distance below which the value counts as having reached its target.
pub const EPSILON: f64 = 1e-4;

/// Whether `a` and `b` are equal within [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Optional inclusive clamp.  Each side is independent; `None` means
/// unconstrained on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    /// No constraint on either side.
    pub const UNLIMITED: Self = Self {
        min: None,
        max: None,
    };

    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Both sides set.
    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Clamp `f` into the bounds.  An unset side never constrains.
    pub fn sanitize(&self, f: f64) -> f64 {
        match (self.min, self.max) {
            (Some(min), _) if f < min => min,
            (_, Some(max)) if f > max => max,
            _ => f,
        }
    }

    /// Whether `f` lies within the bounds.
    pub fn contains(&self, f: f64) -> bool {
        self.min.map_or(true, |min| f >= min) && self.max.map_or(true, |max| f <= max)
    }
}

/// How the caller's rate turns into a motion duration.
///
/// Serialised as `{"duration": 2.0}` or `{"speed": 5.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rate {
    /// Every motion lasts exactly this long, regardless of distance.
    Duration(f64),
    /// Motions travel at this many value units per time unit; the duration
    /// is `|end - start| / speed`.
    ///
    /// A speed of zero with a non-zero distance yields an infinite duration,
    /// so the value never leaves its start.  This is a caller error and is
    /// not corrected here.
    Speed(f64),
}

impl Rate {
    /// Duration of a motion from `start` to `end` at this rate.
    pub fn duration_between(&self, start: f64, end: f64) -> f64 {
        match *self {
            Rate::Duration(d) => d,
            Rate::Speed(speed) => (end - start).abs() / speed,
        }
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::Duration(1.0)
    }
}

/// A consistent view of an interpolator at one instant.
///
/// JSON has no representation for infinities or NaN: serde_json writes a
/// non-finite `value` as `null`, which does not deserialize back into a
/// `Snapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub value: f64,
    pub time: f64,
    pub settled: bool,
}

#[derive(Debug)]
struct State {
    current: f64,
    start: f64,
    end: f64,
    elapsed: f64,
    duration: f64,
    rate: Rate,
    bounds: Bounds,
    shaping: Shaping,
}

impl State {
    fn set_immediate(&mut self, value: f64, relative: bool) {
        let raw = if relative { self.current + value } else { value };
        self.current = self.bounds.sanitize(raw);
        self.start = self.current;
        self.end = self.current;
        self.elapsed = 0.0;
        self.shaping.restart();
    }

    /// Immediate set requested by the caller, as opposed to the snap at the
    /// end of a motion.
    fn jump(&mut self, value: f64, relative: bool) {
        self.set_immediate(value, relative);
        debug!("value set to {}", self.current);
    }

    fn set_interpolation(&mut self, target: f64, relative: bool) {
        self.start = self.current;
        self.elapsed = 0.0;
        let raw = if relative { self.end + target } else { target };
        self.end = self.bounds.sanitize(raw);
        self.duration = self.rate.duration_between(self.current, self.end);
        self.shaping.restart();
        debug!(
            "motion {} -> {} over {} ({:?})",
            self.start, self.end, self.duration, self.rate
        );
    }

    fn set_interpolation_from(&mut self, target: f64, origin: f64, relative: bool) {
        // The origin is always absolute; only the target honours `relative`.
        self.current = self.bounds.sanitize(origin);
        self.set_interpolation(target, relative);
    }

    fn update(&mut self, dt: f64) {
        if approx_eq(self.current, self.end) {
            if self.current != self.end || self.elapsed != 0.0 {
                debug!("settled at {}", self.end);
            }
            self.set_immediate(self.end, false);
            return;
        }

        // Nothing is written until the shaping strategy has returned, so a
        // panicking easing leaves the previous tick intact.
        let elapsed = self.elapsed + dt;
        let next = self.shaping.advance(
            self.current,
            elapsed,
            self.start,
            self.end,
            self.duration,
            dt,
        );
        self.elapsed = elapsed;
        self.current = next;
        trace!("t={} value={}", self.elapsed, self.current);
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            value: self.current,
            time: self.elapsed,
            settled: approx_eq(self.current, self.end),
        }
    }
}

/// A scalar that glides toward its targets.
///
/// All operations take `&self` and run under one internal lock, so an
/// interpolator can be shared between threads (e.g. through an
/// [`Arc`](std::sync::Arc)); an `update` can never observe half of a
/// concurrent `set_target`.
///
/// # Typical usage
///
/// ```
/// use glide::interpolator::{Bounds, Rate, ValueInterpolator};
/// use glide::shaping::Curve;
///
/// let v = ValueInterpolator::new(0.0, Bounds::UNLIMITED, Rate::Duration(2.0), Curve::Linear);
/// v.set_target(10.0, false);
/// v.update(1.0);
/// assert!((v.value() - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct ValueInterpolator {
    state: Mutex<State>,
}

impl ValueInterpolator {
    /// Create a settled interpolator at `bounds.sanitize(initial)`.
    pub fn new(initial: f64, bounds: Bounds, rate: Rate, shaping: impl Into<Shaping>) -> Self {
        let mut state = State {
            current: 0.0,
            start: 0.0,
            end: 0.0,
            elapsed: 0.0,
            duration: 0.0,
            rate,
            bounds,
            shaping: shaping.into(),
        };
        state.set_immediate(initial, false);
        Self {
            state: Mutex::new(state),
        }
    }

    /// Shorthand for an interpolator without bounds.
    pub fn unbounded(initial: f64, rate: Rate, shaping: impl Into<Shaping>) -> Self {
        Self::new(initial, Bounds::UNLIMITED, rate, shaping)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Every operation computes before it writes, and the only foreign
        // code run under the lock is the shaping strategy, called before any
        // field of the tick is updated.  A panic in another holder therefore
        // leaves the state as it was after the last completed operation.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    //  Accessors

    /// The current value.
    pub fn value(&self) -> f64 {
        self.lock().current
    }

    /// Time elapsed in the current motion.  Zero when settled.
    pub fn time(&self) -> f64 {
        self.lock().elapsed
    }

    /// Duration of the current motion, as derived from the rate when it
    /// started.
    pub fn duration(&self) -> f64 {
        self.lock().duration
    }

    /// `(start, end)` of the current motion.
    pub fn range(&self) -> (f64, f64) {
        let state = self.lock();
        (state.start, state.end)
    }

    /// Whether the value is within [`EPSILON`] of its target.
    pub fn is_settled(&self) -> bool {
        let state = self.lock();
        approx_eq(state.current, state.end)
    }

    /// Value, time and settled flag read under a single lock.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Clamp `f` into the current bounds.
    pub fn sanitize(&self, f: f64) -> f64 {
        self.lock().bounds.sanitize(f)
    }

    //  Mutation

    /// Jump to `value` (or by `value` if `relative`), cancelling any motion.
    pub fn set_value(&self, value: f64, relative: bool) {
        self.lock().jump(value, relative);
    }

    /// Start moving from the current value toward `target`.
    ///
    /// With `relative`, the new end is the previous end plus `target`, so
    /// repeated relative calls accumulate even while a motion is running.
    pub fn set_target(&self, target: f64, relative: bool) {
        self.lock().set_interpolation(target, relative);
    }

    /// Like [`set_target`](Self::set_target), but first replace the stored
    /// rate.
    pub fn set_target_with_rate(&self, target: f64, rate: Rate, relative: bool) {
        let mut state = self.lock();
        state.rate = rate;
        state.set_interpolation(target, relative);
    }

    /// Jump to `origin`, then start moving toward `target`.
    ///
    /// `origin` is always absolute (and clamped); `relative` only applies to
    /// `target`.
    pub fn set_range(&self, target: f64, origin: f64, relative: bool) {
        self.lock().set_interpolation_from(target, origin, relative);
    }

    /// Like [`set_range`](Self::set_range), but first replace the stored
    /// rate.
    pub fn set_range_with_rate(&self, target: f64, origin: f64, rate: Rate, relative: bool) {
        let mut state = self.lock();
        state.rate = rate;
        state.set_interpolation_from(target, origin, relative);
    }

    /// Advance the current motion by `dt`.
    ///
    /// Once the value is within [`EPSILON`] of its target, the next call
    /// snaps it exactly onto the target and resets the elapsed time.
    pub fn update(&self, dt: f64) {
        self.lock().update(dt);
    }

    //  Rate

    pub fn rate(&self) -> Rate {
        self.lock().rate
    }

    /// Replace the rate.  Takes effect at the next declared target.
    pub fn set_rate(&self, rate: Rate) {
        self.lock().rate = rate;
    }

    //  Bounds
    //
    // Changing the bounds does not re-clamp the current value or a running
    // motion; the new bounds apply from the next declared endpoint.

    pub fn bounds(&self) -> Bounds {
        self.lock().bounds
    }

    pub fn set_bounds(&self, bounds: Bounds) {
        self.lock().bounds = bounds;
    }

    pub fn set_min(&self, min: Option<f64>) {
        self.lock().bounds.min = min;
    }

    pub fn set_max(&self, max: Option<f64>) {
        self.lock().bounds.max = max;
    }

    pub fn unset_bounds(&self) {
        self.set_bounds(Bounds::UNLIMITED);
    }

    /// Dispatch a [`Command`] and return the resulting state.
    pub fn apply(&self, cmd: Command) -> Snapshot {
        let mut state = self.lock();
        match cmd {
            Command::SetValue { value, relative } => state.jump(value, relative),
            Command::SetTarget {
                target,
                relative,
                rate,
            } => {
                if let Some(rate) = rate {
                    state.rate = rate;
                }
                state.set_interpolation(target, relative);
            }
            Command::SetRange {
                target,
                origin,
                relative,
                rate,
            } => {
                if let Some(rate) = rate {
                    state.rate = rate;
                }
                state.set_interpolation_from(target, origin, relative);
            }
            Command::Update(tick) => state.update(tick.dt),
            Command::SetRate(rate) => state.rate = rate,
            Command::SetBounds(bounds) => state.bounds = bounds,
            Command::Snapshot => {}
        }
        state.snapshot()
    }
}
