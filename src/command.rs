//! Commands accepted by a [`ValueInterpolator`](crate::interpolator::ValueInterpolator).
//!
//! [`Command`] mirrors the interpolator's public operations one-to-one so
//! that a tween can be driven from data (a script, a socket, a test
//! fixture) instead of direct calls.  Every command is a JSON value:
//!
//! ```json
//! {"SetValue":{"value":3.0}}
//! {"SetValue":{"value":-1.0,"relative":true}}
//! {"SetTarget":{"target":10.0,"rate":{"speed":5.0}}}
//! {"SetRange":{"target":10.0,"origin":2.0}}
//! {"Update":0.016}
//! {"Update":{"dt":0.016}}
//! {"SetRate":{"duration":2.0}}
//! {"SetBounds":{"min":0.0}}
//! "Snapshot"
//! ```

use crate::interpolator::{Bounds, Rate};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One operation on an interpolator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Jump immediately, cancelling any motion.
    SetValue {
        value: f64,
        #[serde(default)]
        relative: bool,
    },
    /// Start moving toward `target`, optionally replacing the rate first.
    SetTarget {
        target: f64,
        #[serde(default)]
        relative: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rate: Option<Rate>,
    },
    /// Jump to `origin`, then start moving toward `target`.
    SetRange {
        target: f64,
        origin: f64,
        #[serde(default)]
        relative: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rate: Option<Rate>,
    },
    /// Advance time.
    Update(Tick),
    /// Replace the rate used by subsequent targets.
    SetRate(Rate),
    /// Replace the bounds used by subsequent writes.
    SetBounds(Bounds),
    /// Change nothing; report the current state.
    Snapshot,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = |relative: &bool| if *relative { "+" } else { "" };
        match self {
            Command::SetValue { value, relative } => write!(f, "set {}{}", sign(relative), value),
            Command::SetTarget {
                target, relative, ..
            } => write!(f, "target {}{}", sign(relative), target),
            Command::SetRange {
                target,
                origin,
                relative,
                ..
            } => write!(f, "range {} -> {}{}", origin, sign(relative), target),
            Command::Update(tick) => write!(f, "update {}", tick.dt),
            Command::SetRate(rate) => write!(f, "rate {:?}", rate),
            Command::SetBounds(bounds) => write!(f, "bounds {:?}..{:?}", bounds.min, bounds.max),
            Command::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// Wire format for Update: accepts a bare number `0.016` or `{"dt": 0.016}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    pub dt: f64,
}

impl Tick {
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }
}

impl<'de> Deserialize<'de> for Tick {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Tick;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a non-negative number or object {{dt}}")
            }
            fn visit_map<A>(self, mut map: A) -> Result<Tick, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut dt = None;
                while let Some(k) = map.next_key::<String>()? {
                    match k.as_str() {
                        "dt" => dt = Some(map.next_value::<f64>()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                let dt = dt.ok_or_else(|| DeError::missing_field("dt"))?;
                self.visit_f64(dt)
            }
            fn visit_f64<E>(self, dt: f64) -> Result<Tick, E>
            where
                E: DeError,
            {
                if dt.is_nan() || dt < 0.0 {
                    return Err(DeError::custom(format!(
                        "Update: dt must be a non-negative number, got {}",
                        dt
                    )));
                }
                Ok(Tick { dt })
            }
            fn visit_u64<E>(self, dt: u64) -> Result<Tick, E>
            where
                E: DeError,
            {
                Ok(Tick { dt: dt as f64 })
            }
            fn visit_i64<E>(self, dt: i64) -> Result<Tick, E>
            where
                E: DeError,
            {
                self.visit_f64(dt as f64)
            }
        }
        deserializer.deserialize_any(V)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Command {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserialize_set_value_defaults_to_absolute() {
        assert_eq!(
            parse(r#"{"SetValue":{"value":3.5}}"#),
            Command::SetValue {
                value: 3.5,
                relative: false
            }
        );
        assert_eq!(
            parse(r#"{"SetValue":{"value":-1,"relative":true}}"#),
            Command::SetValue {
                value: -1.0,
                relative: true
            }
        );
    }

    #[test]
    fn deserialize_set_target_with_rate() {
        assert_eq!(
            parse(r#"{"SetTarget":{"target":10,"rate":{"speed":5}}}"#),
            Command::SetTarget {
                target: 10.0,
                relative: false,
                rate: Some(Rate::Speed(5.0)),
            }
        );
    }

    #[test]
    fn deserialize_set_range() {
        assert_eq!(
            parse(r#"{"SetRange":{"target":10,"origin":2,"relative":true}}"#),
            Command::SetRange {
                target: 10.0,
                origin: 2.0,
                relative: true,
                rate: None,
            }
        );
    }

    #[test]
    fn deserialize_update_number_or_object() {
        assert_eq!(parse(r#"{"Update":0.5}"#), Command::Update(Tick::new(0.5)));
        assert_eq!(parse(r#"{"Update":2}"#), Command::Update(Tick::new(2.0)));
        assert_eq!(
            parse(r#"{"Update":{"dt":0.25,"note":"ignored"}}"#),
            Command::Update(Tick::new(0.25))
        );
    }

    #[test]
    fn deserialize_update_rejects_negative_dt() {
        assert!(serde_json::from_str::<Command>(r#"{"Update":-1}"#).is_err());
        assert!(serde_json::from_str::<Command>(r#"{"Update":{"dt":-0.5}}"#).is_err());
        assert!(serde_json::from_str::<Command>(r#"{"Update":{}}"#).is_err());
    }

    #[test]
    fn deserialize_rate_and_bounds() {
        assert_eq!(
            parse(r#"{"SetRate":{"duration":2}}"#),
            Command::SetRate(Rate::Duration(2.0))
        );
        assert_eq!(
            parse(r#"{"SetBounds":{"max":1}}"#),
            Command::SetBounds(Bounds::new(None, Some(1.0)))
        );
        assert_eq!(parse(r#""Snapshot""#), Command::Snapshot);
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(serde_json::from_str::<Command>(r#"{"Explode":1}"#).is_err());
    }

    #[test]
    fn display() {
        let cmd = Command::SetTarget {
            target: 4.0,
            relative: true,
            rate: None,
        };
        assert_eq!(cmd.to_string(), "target +4");
        assert_eq!(Command::Update(Tick::new(0.5)).to_string(), "update 0.5");
    }
}
