//! Runtime configuration.
//!
//! Everything is read from environment variables with development defaults,
//! so a plain `cargo run` crawls with sane settings and tests can build a
//! `Config` explicitly without touching the environment.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Public so tests can refer to them.
pub const ENV_OUTPUT_FILE: &str = "PLACESCOUT_OUTPUT";
pub const ENV_IMAGES_DIR: &str = "PLACESCOUT_IMAGES_DIR";
pub const ENV_DELAY_MIN_MS: &str = "PLACESCOUT_DELAY_MIN_MS";
pub const ENV_DELAY_MAX_MS: &str = "PLACESCOUT_DELAY_MAX_MS";
pub const ENV_LINK_CAP: &str = "PLACESCOUT_LINK_CAP";

const DEFAULT_OUTPUT_FILE: &str = "all_places.json";
const DEFAULT_IMAGES_DIR: &str = "place_images";
/// Bounds for the random pause between successive detail-page fetches.
const DEFAULT_DELAY_MIN_MS: u64 = 2000;
const DEFAULT_DELAY_MAX_MS: u64 = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    output_file: String,
    images_dir: String,
    delay_min_ms: u64,
    delay_max_ms: u64,
    link_cap: Option<usize>,
}

impl Config {
    pub fn new(
        output_file: impl Into<String>,
        images_dir: impl Into<String>,
        delay_min_ms: u64,
        delay_max_ms: u64,
        link_cap: Option<usize>,
    ) -> Self {
        Self {
            output_file: output_file.into(),
            images_dir: images_dir.into(),
            // An inverted range would panic in the pause sampler; clamp the
            // lower bound. `from_env` rejects inverted bounds instead.
            delay_min_ms: delay_min_ms.min(delay_max_ms),
            delay_max_ms,
            link_cap,
        }
    }

    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let output_file =
            env::var(ENV_OUTPUT_FILE).unwrap_or_else(|_| DEFAULT_OUTPUT_FILE.to_string());
        let images_dir =
            env::var(ENV_IMAGES_DIR).unwrap_or_else(|_| DEFAULT_IMAGES_DIR.to_string());
        let delay_min_ms = parse_env_u64(ENV_DELAY_MIN_MS, DEFAULT_DELAY_MIN_MS)?;
        let delay_max_ms = parse_env_u64(ENV_DELAY_MAX_MS, DEFAULT_DELAY_MAX_MS)?;
        let link_cap = match env::var(ENV_LINK_CAP) {
            Ok(raw) => Some(raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_LINK_CAP,
                reason: format!("'{raw}' is not a count"),
            })?),
            Err(_) => None,
        };

        if delay_min_ms > delay_max_ms {
            return Err(ConfigError::InvalidValue {
                field: ENV_DELAY_MIN_MS,
                reason: format!("minimum delay {delay_min_ms}ms exceeds maximum {delay_max_ms}ms"),
            });
        }

        Ok(Self {
            output_file,
            images_dir,
            delay_min_ms,
            delay_max_ms,
            link_cap,
        })
    }

    /// Path of the JSON file the run writes.
    pub fn output_file(&self) -> &str {
        &self.output_file
    }
    /// Directory downloaded images land in.
    pub fn images_dir(&self) -> &str {
        &self.images_dir
    }
    /// Lower bound of the pause between detail-page fetches.
    pub fn delay_min_ms(&self) -> u64 {
        self.delay_min_ms
    }
    /// Upper bound of the pause between detail-page fetches.
    pub fn delay_max_ms(&self) -> u64 {
        self.delay_max_ms
    }
    /// Optional override of the per-site detail-link cap.
    pub fn link_cap(&self) -> Option<usize> {
        self.link_cap
    }
}

fn parse_env_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            field: key,
            reason: format!("'{raw}' is not a duration in milliseconds"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_OUTPUT_FILE,
            ENV_IMAGES_DIR,
            ENV_DELAY_MIN_MS,
            ENV_DELAY_MAX_MS,
            ENV_LINK_CAP,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_when_env_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.output_file(), DEFAULT_OUTPUT_FILE);
        assert_eq!(cfg.images_dir(), DEFAULT_IMAGES_DIR);
        assert_eq!(cfg.delay_min_ms(), DEFAULT_DELAY_MIN_MS);
        assert_eq!(cfg.delay_max_ms(), DEFAULT_DELAY_MAX_MS);
        assert_eq!(cfg.link_cap(), None);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_OUTPUT_FILE, "out.json");
            env::set_var(ENV_DELAY_MIN_MS, "0");
            env::set_var(ENV_DELAY_MAX_MS, "10");
            env::set_var(ENV_LINK_CAP, "1");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.output_file(), "out.json");
        assert_eq!(cfg.delay_min_ms(), 0);
        assert_eq!(cfg.delay_max_ms(), 10);
        assert_eq!(cfg.link_cap(), Some(1));
        clear_env();
    }

    #[test]
    fn new_clamps_inverted_delay_bounds() {
        let cfg = Config::new("out.json", "imgs", 500, 100, None);
        assert_eq!(cfg.delay_min_ms(), 100);
        assert_eq!(cfg.delay_max_ms(), 100);
        assert!(cfg.delay_min_ms() <= cfg.delay_max_ms());
    }

    #[test]
    fn rejects_inverted_delay_bounds() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_DELAY_MIN_MS, "500");
            env::set_var(ENV_DELAY_MAX_MS, "100");
        }
        assert!(Config::from_env().is_err());
        clear_env();
    }
}
