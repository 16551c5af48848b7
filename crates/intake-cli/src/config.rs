//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use intake_store::RecordStore;
use serde::{Deserialize, Serialize};

/// Time zone "today" is resolved in unless configured otherwise.
pub const DEFAULT_TIMEZONE: &str = "US/Eastern";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the store file. The lock file sits next to it.
    pub data_path: PathBuf,
    /// IANA time zone used to decide which calendar day it is.
    pub timezone: String,
    /// How long to wait for another process to release the store lock.
    pub lock_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_path: data_dir.join("intake.json"),
            timezone: DEFAULT_TIMEZONE.to_string(),
            lock_timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (INTAKE_*)
        figment = figment.merge(Env::prefixed("INTAKE_"));

        figment.extract()
    }

    /// Parses the configured time zone.
    pub fn tz(&self) -> anyhow::Result<Tz> {
        crate::clock::parse_timezone(&self.timezone)
    }

    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    /// Store handle for the configured data path.
    pub fn record_store(&self) -> RecordStore {
        RecordStore::new(&self.data_path).with_lock_timeout(self.lock_timeout())
    }
}

/// Returns the platform-specific config directory for intake.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("intake"))
}

/// Returns the platform-specific data directory for intake.
///
/// On Linux: `~/.local/share/intake`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("intake"))
}
