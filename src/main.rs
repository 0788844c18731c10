//! Entry point for the **glide** command-line driver.
//!
//! Builds a [`ValueInterpolator`](glide::interpolator::ValueInterpolator)
//! from the configuration file, then reads newline-delimited JSON commands
//! from stdin and prints one JSON snapshot per command to stdout.
//!
//! ```text
//! glide [--config <path>] [--curve <name>] [--strict]
//! ```

use glide::config::Config;
use glide::script::ScriptRunner;
use glide::shaping::Curve;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// Resolve the config directory (`$XDG_CONFIG_HOME/glide`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("glide")
}

/// Command-line options.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    curve: Option<Curve>,
    strict: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or("--config requires a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--curve" => {
                    let name = args.next().ok_or("--curve requires a name")?;
                    parsed.curve = Some(name.parse().map_err(|e| format!("{}", e))?);
                }
                "--strict" => parsed.strict = true,
                other => return Err(format!("unexpected argument: {}", other)),
            }
        }
        Ok(parsed)
    }
}

/// Load the config from `--config`, or from
/// `$XDG_CONFIG_HOME/glide/config.json` falling back to compiled-in
/// defaults.  An explicitly requested file must load.
fn load_config(explicit: Option<PathBuf>) -> Option<Config> {
    match explicit {
        Some(path) => match Config::load(&path) {
            Ok(cfg) => {
                info!("loaded config from {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                error!("{}", e);
                None
            }
        },
        None => {
            let path = config_dir().join("config.json");
            match Config::load(&path) {
                Ok(cfg) => {
                    info!("loaded config from {}", path.display());
                    Some(cfg)
                }
                Err(e) => {
                    info!("no usable config file ({}), using defaults", e);
                    Some(Config::default())
                }
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            error!("{}", e);
            eprintln!("usage: glide [--config <path>] [--curve <name>] [--strict]");
            return ExitCode::FAILURE;
        }
    };

    let Some(mut config) = load_config(args.config) else {
        return ExitCode::FAILURE;
    };
    if let Some(curve) = args.curve {
        config.tween.curve = curve;
    }

    let tween = match config.tween.build() {
        Ok(tween) => tween,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "glide running: initial={} rate={:?} curve={}",
        tween.value(),
        config.tween.rate,
        config.tween.curve
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match ScriptRunner::new(&tween)
        .strict(args.strict)
        .run(stdin.lock(), stdout.lock())
    {
        Ok(0) => {
            warn!("no commands received");
            ExitCode::SUCCESS
        }
        Ok(n) => {
            info!("applied {} command(s), exiting", n);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parse_all_flags() {
        let parsed = args(&["--config", "/tmp/c.json", "--curve", "in-out-cubic", "--strict"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/c.json")));
        assert_eq!(parsed.curve, Some(Curve::InOutCubic));
        assert!(parsed.strict);
    }

    #[test]
    fn parse_rejects_unknown_and_incomplete() {
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--curve", "wobbly"]).is_err());
    }

    #[test]
    fn parse_empty_uses_defaults() {
        let parsed = args(&[]).unwrap();
        assert!(parsed.config.is_none());
        assert!(parsed.curve.is_none());
        assert!(!parsed.strict);
    }
}
