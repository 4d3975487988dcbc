use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::models::ViewSettings;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_OUTPUT_DIR: &str = "charts";
const DEFAULT_WIDTH: u32 = 1024;
const DEFAULT_HEIGHT: u32 = 768;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub session_cookie: Option<String>,
    pub output_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub timeout: Duration,
    pub view: ViewSettings,
    /// Dashboard refresh interval; `None` renders once
    pub watch: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_cookie: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            chart_width: DEFAULT_WIDTH,
            chart_height: DEFAULT_HEIGHT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            view: ViewSettings::default(),
            watch: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value for {}: '{}'", name, raw);
            default
        }),
        Err(_) => default,
    }
}

impl AppConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: std::env::var("ANALYTICS_BASE_URL").unwrap_or(defaults.base_url),
            session_cookie: std::env::var("ANALYTICS_SESSION")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            output_dir: std::env::var("ANALYTICS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            chart_width: parse_var("ANALYTICS_CHART_WIDTH", defaults.chart_width),
            chart_height: parse_var("ANALYTICS_CHART_HEIGHT", defaults.chart_height),
            timeout: Duration::from_secs(parse_var("ANALYTICS_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            view: defaults.view,
            watch: None,
        }
    }

    /// Apply `--period`, `--forecast`, `--type` and `--out` flags.
    /// Returns the remaining positional arguments.
    pub fn apply_flags<'a>(&mut self, args: &[&'a str]) -> Result<Vec<&'a str>, String> {
        let mut positional = Vec::new();
        let mut iter = args.iter();

        while let Some(&arg) = iter.next() {
            match arg {
                "--forecast" | "-f" => self.view.include_forecast = true,
                "--period" | "-p" => {
                    let value = iter.next().ok_or("❌ --period needs a value")?;
                    self.view.period = value.parse()?;
                }
                "--type" | "-t" => {
                    let value = iter.next().ok_or("❌ --type needs a value")?;
                    self.view.chart_kind = value.parse()?;
                }
                "--watch" | "-w" => {
                    let value = iter.next().ok_or("❌ --watch needs an interval in seconds")?;
                    let secs: u64 = value
                        .parse()
                        .ok()
                        .filter(|s| *s > 0)
                        .ok_or_else(|| format!("❌ Invalid watch interval: '{}'", value))?;
                    self.watch = Some(Duration::from_secs(secs));
                }
                "--out" | "-o" => {
                    let value = iter.next().ok_or("❌ --out needs a directory")?;
                    self.output_dir = PathBuf::from(*value);
                }
                _ if arg.starts_with("--") => {
                    return Err(format!("❌ Unknown option: {}", arg));
                }
                _ => positional.push(arg),
            }
        }

        Ok(positional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChartKind, Period};

    #[test]
    fn test_apply_flags() {
        let mut config = AppConfig::default();
        let rest = config
            .apply_flags(&["7", "--period", "quarterly", "--forecast", "-t", "bar", "--out", "/tmp/x"])
            .unwrap();

        assert_eq!(rest, vec!["7"]);
        assert_eq!(config.view.period, Period::Quarterly);
        assert!(config.view.include_forecast);
        assert_eq!(config.view.chart_kind, ChartKind::Bar);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_apply_flags_rejects_unknown() {
        let mut config = AppConfig::default();
        assert!(config.apply_flags(&["--nope"]).is_err());
        assert!(config.apply_flags(&["--period"]).is_err());
        assert!(config.apply_flags(&["--period", "weekly"]).is_err());
    }

    #[test]
    fn test_watch_flag() {
        let mut config = AppConfig::default();
        assert!(config.watch.is_none());

        let rest = config.apply_flags(&["dashboard", "3", "-w", "30"]).unwrap();
        assert_eq!(rest, vec!["dashboard", "3"]);
        assert_eq!(config.watch, Some(Duration::from_secs(30)));

        assert!(config.apply_flags(&["--watch", "0"]).is_err());
        assert!(config.apply_flags(&["--watch"]).is_err());
    }
}
