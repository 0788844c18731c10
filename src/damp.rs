//! Critically damped smoothing toward a moving target.
//!
//! This is the one shaping strategy that is not a pure function of elapsed
//! time: each step depends on the current value and on the velocity left
//! over from the previous step.  The smoothing time plays the role of the
//! duration in the `(t, b, c, d)` contract, roughly the time it takes to
//! cover most of the distance.

/// Smallest smoothing time accepted; anything shorter is treated as this.
pub const MIN_SMOOTH_TIME: f64 = 1e-4;

/// Velocity state for a critically damped spring.
///
/// Call [`step`](SmoothDamp::step) once per tick and
/// [`reset`](SmoothDamp::reset) whenever the motion is restarted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothDamp {
    velocity: f64,
}

impl SmoothDamp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current velocity in value units per time unit.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Forget any accumulated velocity.
    pub fn reset(&mut self) {
        self.velocity = 0.0;
    }

    /// Advance `current` toward `target` by `dt` and return the new value.
    ///
    /// Uses the usual cubic approximation of `exp(-ω·dt)` with
    /// `ω = 2 / smooth_time`.  The result never passes `target`; when a step
    /// would cross it, the value lands on `target` and velocity drops to zero.
    pub fn step(&mut self, current: f64, target: f64, smooth_time: f64, dt: f64) -> f64 {
        let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
        let omega = 2.0 / smooth_time;
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = current - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut output = target + (change + temp) * decay;

        if (target - current > 0.0) == (output > target) {
            output = target;
            self.velocity = 0.0;
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(damp: &mut SmoothDamp, mut v: f64, target: f64, smooth: f64, dt: f64, steps: usize) -> f64 {
        for _ in 0..steps {
            v = damp.step(v, target, smooth, dt);
        }
        v
    }

    #[test]
    fn converges_on_target() {
        let mut damp = SmoothDamp::new();
        let v = run(&mut damp, 0.0, 10.0, 0.3, 1.0 / 60.0, 600);
        assert!((v - 10.0).abs() < 1e-4, "v = {v}");
        assert!(damp.velocity().abs() < 1e-3);
    }

    #[test]
    fn never_overshoots() {
        for &(from, to) in &[(0.0, 10.0), (10.0, -5.0)] {
            let mut damp = SmoothDamp::new();
            let mut v = from;
            for _ in 0..300 {
                v = damp.step(v, to, 0.1, 0.05);
                if to > from {
                    assert!(v <= to, "overshot: {v}");
                } else {
                    assert!(v >= to, "overshot: {v}");
                }
            }
        }
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut damp = SmoothDamp::new();
        assert_eq!(damp.step(3.0, 10.0, 0.5, 0.0), 3.0);
        assert_eq!(damp.velocity(), 0.0);
    }

    #[test]
    fn longer_smoothing_is_slower() {
        let mut fast = SmoothDamp::new();
        let mut slow = SmoothDamp::new();
        let f = run(&mut fast, 0.0, 1.0, 0.1, 0.01, 10);
        let s = run(&mut slow, 0.0, 1.0, 1.0, 0.01, 10);
        assert!(f > s);
    }

    #[test]
    fn reset_clears_velocity() {
        let mut damp = SmoothDamp::new();
        damp.step(0.0, 10.0, 0.5, 0.1);
        assert!(damp.velocity() > 0.0);
        damp.reset();
        assert_eq!(damp.velocity(), 0.0);
    }

    #[test]
    fn tiny_smooth_time_is_clamped() {
        let mut damp = SmoothDamp::new();
        let v = damp.step(0.0, 1.0, 0.0, 0.1);
        assert!(v.is_finite());
        assert!((v - 1.0).abs() < 1e-5, "v = {v}");
    }
}
