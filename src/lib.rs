//! **glide**: scalar values that move smoothly instead of jumping.
//!
//! A [`ValueInterpolator`](interpolator::ValueInterpolator) owns a single
//! `f64`.  The caller declares intent (jump to a value, glide toward a
//! target, glide across a range) and then pushes elapsed time in once per
//! tick; the interpolator never schedules anything on its own.
//!
//! # Architecture
//!
//! The crate is organised around one seam:
//!
//! * [`traits::Easing`]: the `(t, b, c, d)` shaping contract, so the state
//!   machine is not coupled to any particular curve.
//!
//! Concrete curves live in [`easing`] (Penner-style polynomials) and
//! [`bezier`] (CSS cubic-bezier).  [`damp`] provides velocity-carrying
//! smoothing, which is not a pure function of time and is therefore
//! modelled as its own [`shaping::Shaping`] variant rather than an `Easing`.
//!
//! [`command`] and [`script`] let an interpolator be driven from JSON, and
//! [`config`] builds one from a configuration file.

pub mod bezier;
pub mod command;
pub mod config;
pub mod damp;
pub mod easing;
pub mod interpolator;
pub mod script;
pub mod shaping;
pub mod traits;
