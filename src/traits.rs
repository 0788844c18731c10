//! The shaping contract shared by every stateless easing curve.
//!
//! [`ValueInterpolator`](crate::interpolator::ValueInterpolator) never
//! computes in-flight values itself; it asks an [`Easing`] for them.  Any
//! concrete curve (the Penner-style functions in [`easing`](crate::easing),
//! the [`CubicBezier`](crate::bezier::CubicBezier), a user closure, …)
//! implements this trait.

/// A pure function mapping elapsed time onto a value.
///
/// The parameters follow Penner's `(t, b, c, d)` convention:
///
/// * `t`: time elapsed since the motion began,
/// * `b`: value at the beginning of the motion,
/// * `c`: total change (`end - b`),
/// * `d`: duration of the motion.
///
/// # Contract
///
/// For every `d > 0`, `ease(0, b, c, d) == b` and `ease(d, b, c, d) == b + c`
/// (within floating point tolerance).  Implementations must not keep state
/// between calls; strategies that need memory (velocity, …) belong in
/// [`Shaping::Damped`](crate::shaping::Shaping::Damped) instead.
pub trait Easing: Send {
    /// Value at time `t` of a motion from `b` to `b + c` lasting `d`.
    fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64;
}

impl<F> Easing for F
where
    F: Fn(f64, f64, f64, f64) -> f64 + Send,
{
    fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
        self(t, b, c, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    //  Mock Easing

    /// A test double that records every call and answers linearly.
    #[derive(Debug, Default, Clone)]
    struct MockEasing {
        calls: Arc<Mutex<Vec<(f64, f64, f64, f64)>>>,
    }

    impl Easing for MockEasing {
        fn ease(&self, t: f64, b: f64, c: f64, d: f64) -> f64 {
            self.calls.lock().unwrap().push((t, b, c, d));
            b + c * (t / d)
        }
    }

    #[test]
    fn mock_easing_records_calls() {
        let easing = MockEasing::default();
        assert_eq!(easing.ease(1.0, 0.0, 10.0, 2.0), 5.0);
        let calls = easing.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (1.0, 0.0, 10.0, 2.0));
    }

    #[test]
    fn closures_are_easings() {
        let step = |t: f64, b: f64, c: f64, d: f64| if t < d { b } else { b + c };
        assert_eq!(step.ease(0.5, 1.0, 2.0, 1.0), 1.0);
        assert_eq!(step.ease(1.0, 1.0, 2.0, 1.0), 3.0);
    }

    #[test]
    fn fn_pointers_are_easings() {
        fn constant(_: f64, b: f64, _: f64, _: f64) -> f64 {
            b
        }
        let boxed: Box<dyn Easing> = Box::new(constant as fn(f64, f64, f64, f64) -> f64);
        assert_eq!(boxed.ease(3.0, 7.0, 1.0, 1.0), 7.0);
    }
}
