//! Service configuration loading from environment variables.
//!
//! All values come from `SIMCAT_*` environment variables with sensible
//! defaults. Invalid values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `SIMCAT_MODEL_DIR` | `models` | Root directory scanned for store files |
//! | `SIMCAT_MODEL_LOG_DIR` | (empty) | Run-log directory; empty disables run logs |
//! | `SIMCAT_REFRESH_INTERVAL` | 0 | Periodic refresh interval in seconds (0 = off) |
//! | `SIMCAT_LOG_FORMAT` | `json` | Log output format: `json` or `pretty` |
//! | `SIMCAT_LOG_LEVEL` | `info` | Tracing filter directives |
//! | `SIMCAT_LOG_FILE` | (empty) | Log file path; empty logs to stderr |

use std::path::PathBuf;
use std::time::Duration;

use crate::telemetry::{LogConfig, LogFormat};

/// All service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub model_dir: PathBuf,
    pub model_log_dir: PathBuf,
    /// Zero disables the background refresh task.
    pub refresh_interval: Duration,
    pub log: LogConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            model_log_dir: PathBuf::new(),
            refresh_interval: Duration::ZERO,
            log: LogConfig::default(),
        }
    }
}

/// Effective configuration summary for display.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub model_dir: String,
    pub model_log_dir: String,
    pub refresh_interval_secs: u64,
    pub log_format: LogFormat,
    pub log_level: String,
    pub log_file: String,
}

/// Read an env var, returning `default` when missing or empty.
fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(val) if !val.is_empty() => val,
        _ => default.to_string(),
    }
}

/// Parse a `u64` env var, returning `default` on missing or invalid.
fn parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(val) => val.parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    let model_dir = PathBuf::from(env_or("SIMCAT_MODEL_DIR", "models"));
    let model_log_dir = PathBuf::from(env_or("SIMCAT_MODEL_LOG_DIR", ""));
    let refresh_secs = parse_u64("SIMCAT_REFRESH_INTERVAL", 0);

    let log_file = env_or("SIMCAT_LOG_FILE", "");
    let log = LogConfig {
        format: LogFormat::parse(&env_or("SIMCAT_LOG_FORMAT", "json")),
        level: env_or("SIMCAT_LOG_LEVEL", "info"),
        output_path: if log_file.is_empty() {
            None
        } else {
            Some(PathBuf::from(log_file))
        },
    };

    EnvConfig {
        model_dir,
        model_log_dir,
        refresh_interval: Duration::from_secs(refresh_secs),
        log,
    }
}

impl EnvConfig {
    /// Return a display summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            model_dir: self.model_dir.display().to_string(),
            model_log_dir: self.model_log_dir.display().to_string(),
            refresh_interval_secs: self.refresh_interval.as_secs(),
            log_format: self.log.format,
            log_level: self.log.level.clone(),
            log_file: self
                .log
                .output_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }
}
