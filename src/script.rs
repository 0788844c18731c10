//! Drive an interpolator from a stream of JSON commands.
//!
//! Each non-empty input line is parsed as a [`Command`] (see
//! [`command`](crate::command) for the wire format), applied, and answered
//! with one line of JSON holding the resulting [`Snapshot`]:
//!
//! ```text
//! > {"SetTarget":{"target":10.0}}
//! < {"value":0.0,"time":0.0,"settled":false}
//! > {"Update":1.0}
//! < {"value":5.0,"time":1.0,"settled":false}
//! ```
//!
//! Lines starting with `#` are comments.

use crate::command::Command;
use crate::interpolator::{Snapshot, ValueInterpolator};
use log::{debug, error, warn};
use std::io::{BufRead, Write};

/// Errors produced while running a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid utf-8: {source}")]
    Utf8 {
        line: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("line {line}: json parse error: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Feeds commands from a reader into a [`ValueInterpolator`].
///
/// By default a malformed line is logged and skipped; with
/// [`strict`](ScriptRunner::strict) it aborts the run instead.
pub struct ScriptRunner<'a> {
    target: &'a ValueInterpolator,
    strict: bool,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(target: &'a ValueInterpolator) -> Self {
        Self {
            target,
            strict: false,
        }
    }

    /// Fail on the first malformed line instead of skipping it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse one line.  `Ok(None)` for blank lines and comments.
    pub fn parse_line(line: &str) -> Result<Option<Command>, serde_json::Error> {
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }
        serde_json::from_str(text).map(Some)
    }

    /// Run every command from `input`, writing one snapshot per applied
    /// command to `output`.  Returns the number of commands applied.
    ///
    /// Lines that are not valid UTF-8 count as malformed, like bad JSON.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<usize, ScriptError> {
        let mut applied = 0;
        let mut buf = Vec::new();
        let mut number = 0;
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            number += 1;
            let line = match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) => line,
                Err(source) if self.strict => {
                    return Err(ScriptError::Utf8 {
                        line: number,
                        source,
                    })
                }
                Err(e) => {
                    error!("bad command on line {}: {}", number, e);
                    continue;
                }
            };
            let cmd = match Self::parse_line(&line) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(source) if self.strict => {
                    return Err(ScriptError::Json {
                        line: number,
                        source,
                    })
                }
                Err(e) => {
                    error!("bad command on line {}: {} ({})", number, line.trim(), e);
                    continue;
                }
            };
            debug!("applying {}", cmd);
            let snapshot = self.target.apply(cmd);
            write_snapshot(&mut output, &snapshot)?;
            applied += 1;
        }
        output.flush()?;
        Ok(applied)
    }
}

fn write_snapshot<W: Write>(output: &mut W, snapshot: &Snapshot) -> Result<(), ScriptError> {
    if !snapshot.value.is_finite() {
        warn!("value {} is not finite and is written as null", snapshot.value);
    }
    serde_json::to_writer(&mut *output, snapshot).map_err(std::io::Error::from)?;
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolator::Rate;
    use crate::shaping::Curve;

    fn run(script: &str, strict: bool) -> (Result<usize, ScriptError>, Vec<Snapshot>) {
        let v = ValueInterpolator::unbounded(0.0, Rate::Duration(2.0), Curve::Linear);
        let mut out = Vec::new();
        let result = ScriptRunner::new(&v).strict(strict).run(script.as_bytes(), &mut out);
        let snapshots = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (result, snapshots)
    }

    #[test]
    fn drives_a_linear_motion() {
        let script = r#"
            # move 0 -> 10 over two seconds
            {"SetTarget":{"target":10.0}}
            {"Update":1.0}
            {"Update":{"dt":1.0}}
            {"Update":1.0}
        "#;
        let (result, snaps) = run(script, true);
        assert_eq!(result.unwrap(), 4);
        assert_eq!(snaps.len(), 4);
        assert_eq!(snaps[0].value, 0.0);
        assert!(!snaps[0].settled);
        assert!((snaps[1].value - 5.0).abs() < 1e-9);
        assert!((snaps[2].value - 10.0).abs() < 1e-9);
        assert_eq!(snaps[3].value, 10.0);
        assert_eq!(snaps[3].time, 0.0);
        assert!(snaps[3].settled);
    }

    #[test]
    fn malformed_line_is_skipped_by_default() {
        let script = "not json at all\n{\"SetValue\":{\"value\":3}}\n";
        let (result, snaps) = run(script, false);
        // Only the valid command should have been applied.
        assert_eq!(result.unwrap(), 1);
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].value, 3.0);
    }

    #[test]
    fn malformed_line_aborts_in_strict_mode() {
        let script = "\"Snapshot\"\n{\"Update\":-1}\n\"Snapshot\"\n";
        let (result, snaps) = run(script, true);
        match result {
            Err(ScriptError::Json { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected json error, got {:?}", other),
        }
        assert_eq!(snaps.len(), 1);
    }

    #[test]
    fn invalid_utf8_line_is_skipped_by_default() {
        let v = ValueInterpolator::unbounded(0.0, Rate::Duration(1.0), Curve::Linear);
        let mut input = b"{\"SetValue\":{\"value\":1}}\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"{\"SetValue\":{\"value\":3}}\n");
        let mut out = Vec::new();
        let applied = ScriptRunner::new(&v).run(input.as_slice(), &mut out).unwrap();
        assert_eq!(applied, 2);
        assert_eq!(v.value(), 3.0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn invalid_utf8_line_aborts_in_strict_mode() {
        let v = ValueInterpolator::unbounded(0.0, Rate::Duration(1.0), Curve::Linear);
        let mut input = b"\"Snapshot\"\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"{\"SetValue\":{\"value\":3}}\n");
        let result = ScriptRunner::new(&v).strict(true).run(input.as_slice(), Vec::new());
        match result {
            Err(ScriptError::Utf8 { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected utf-8 error, got {:?}", other),
        }
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn last_line_without_newline_is_applied() {
        let (result, snaps) = run("{\"SetValue\":{\"value\":2}}", true);
        assert_eq!(result.unwrap(), 1);
        assert_eq!(snaps[0].value, 2.0);
    }

    #[test]
    fn non_finite_value_is_written_as_null() {
        let v = ValueInterpolator::unbounded(0.0, Rate::Duration(1.0), Curve::Linear);
        let script = "{\"SetValue\":{\"value\":1.7e308}}\n{\"SetValue\":{\"value\":1.7e308,\"relative\":true}}\n";
        let mut out = Vec::new();
        let applied = ScriptRunner::new(&v).run(script.as_bytes(), &mut out).unwrap();
        assert_eq!(applied, 2);
        assert!(v.value().is_infinite());
        let text = String::from_utf8(out).unwrap();
        let last: serde_json::Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
        assert!(last["value"].is_null());
        assert_eq!(last["settled"], serde_json::Value::Bool(false));
    }

    #[test]
    fn blank_and_comment_lines_are_ignored() {
        assert!(ScriptRunner::parse_line("   ").unwrap().is_none());
        assert!(ScriptRunner::parse_line("# hello").unwrap().is_none());
        assert_eq!(
            ScriptRunner::parse_line(r#" "Snapshot" "#).unwrap(),
            Some(Command::Snapshot)
        );
    }
}
