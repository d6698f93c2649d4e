//! Haunting configuration with precedence and validation
use hauntfs_core::{
    Error, Result, DEFAULT_LRU_PERIOD, DEFAULT_REAPER_EXPIRY, DEFAULT_REAPER_PERIOD,
    HAUNTFS_BASE_DIR_VAR, HAUNTFS_LRU_MAX_ITEMS_VAR, HAUNTFS_LRU_MAX_SIZE_VAR,
    HAUNTFS_LRU_PERIOD_VAR, HAUNTFS_REAPER_EXPIRY_VAR, HAUNTFS_REAPER_PERIOD_VAR,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Settings for the time-driven reaper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaperConfig {
    /// Seconds an entry may go unread before it is reaped
    pub expiry_secs: u64,
    /// Seconds between reaper passes
    pub period_secs: u64,
}

impl ReaperConfig {
    pub fn expiry(&self) -> Duration {
        Duration::from_secs(self.expiry_secs)
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            expiry_secs: DEFAULT_REAPER_EXPIRY.as_secs(),
            period_secs: DEFAULT_REAPER_PERIOD.as_secs(),
        }
    }
}

/// Settings for the capacity-driven LRU haunter
///
/// A zero limit is disabled; at least one limit must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LruConfig {
    /// Maximum number of idle entries
    pub max_items: usize,
    /// Maximum combined size of idle entries in bytes
    pub max_size: u64,
    /// Seconds between LRU passes
    pub period_secs: u64,
}

impl LruConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

impl Default for LruConfig {
    fn default() -> Self {
        Self {
            max_items: 0,
            max_size: 0,
            period_secs: DEFAULT_LRU_PERIOD.as_secs(),
        }
    }
}

/// One configured haunting strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaunterConfig {
    Reaper(ReaperConfig),
    Lru(LruConfig),
}

impl HaunterConfig {
    /// Reject settings that would make a strategy spin or do nothing
    pub fn validate(&self) -> Result<()> {
        match self {
            HaunterConfig::Reaper(reaper) => {
                if reaper.period_secs == 0 {
                    return Err(Error::configuration("reaper period must be at least one second"));
                }
                if reaper.expiry_secs == 0 {
                    return Err(Error::configuration("reaper expiry must be at least one second"));
                }
            }
            HaunterConfig::Lru(lru) => {
                if lru.period_secs == 0 {
                    return Err(Error::configuration("LRU period must be at least one second"));
                }
                if lru.max_items == 0 && lru.max_size == 0 {
                    return Err(Error::configuration(
                        "LRU haunter needs max_items or max_size",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Complete haunting configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HauntConfig {
    /// Base directory of the cache being haunted
    pub base_dir: Option<PathBuf>,
    /// Time-driven eviction, if enabled
    pub reaper: Option<ReaperConfig>,
    /// Capacity-driven eviction, if enabled
    pub lru: Option<LruConfig>,
}

impl HauntConfig {
    /// Configured strategies, reaper first
    pub fn haunters(&self) -> Vec<HaunterConfig> {
        let mut haunters = Vec::new();
        if let Some(reaper) = &self.reaper {
            haunters.push(HaunterConfig::Reaper(reaper.clone()));
        }
        if let Some(lru) = &self.lru {
            haunters.push(HaunterConfig::Lru(lru.clone()));
        }
        haunters
    }

    pub fn validate(&self) -> Result<()> {
        self.haunters().iter().try_for_each(HaunterConfig::validate)
    }
}

/// Builder for creating haunting configurations
pub struct HauntConfigBuilder {
    config: HauntConfig,
}

impl HauntConfigBuilder {
    /// Create a new builder with nothing enabled
    pub fn new() -> Self {
        Self {
            config: HauntConfig::default(),
        }
    }

    /// Set the cache base directory
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = Some(base_dir.into());
        self
    }

    /// Enable the reaper
    pub fn with_reaper(mut self, expiry: Duration, period: Duration) -> Self {
        self.config.reaper = Some(ReaperConfig {
            expiry_secs: whole_secs(expiry),
            period_secs: whole_secs(period),
        });
        self
    }

    /// Enable the LRU haunter
    pub fn with_lru(mut self, max_items: usize, max_size: u64, period: Duration) -> Self {
        self.config.lru = Some(LruConfig {
            max_items,
            max_size,
            period_secs: whole_secs(period),
        });
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<HauntConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Seconds in `duration`, rounding any fraction up
fn whole_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs
    }
}

impl Default for HauntConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration loader that handles precedence
///
/// Defaults, then the JSON config file, then `HAUNTFS_*` environment
/// variables.
pub struct HauntConfigLoader;

impl HauntConfigLoader {
    /// Load configuration with full precedence handling
    pub fn load(config_file: Option<&Path>) -> Result<HauntConfig> {
        let mut config = HauntConfig::default();

        if let Some(path) = config_file {
            if path.exists() {
                config = Self::load_from_file(path)?;
            } else {
                tracing::debug!("No haunt config file at {}", path.display());
            }
        }

        let config = Self::apply_env(config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<HauntConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read config file", e))?;

        serde_json::from_str(&content).map_err(|e| Error::Json {
            message: format!("Failed to parse haunt config {}", path.display()),
            source: e,
        })
    }

    /// Load configuration from environment variables alone
    ///
    /// Returns `None` when no `HAUNTFS_*` variable is set.
    pub fn load_from_env() -> Result<Option<HauntConfig>> {
        let defaults = HauntConfig::default();
        let config = Self::apply_env(defaults.clone())?;
        if config == defaults {
            Ok(None)
        } else {
            Ok(Some(config))
        }
    }

    /// Override `config` with any `HAUNTFS_*` variables that are set
    fn apply_env(mut config: HauntConfig) -> Result<HauntConfig> {
        if let Ok(base_dir) = std::env::var(HAUNTFS_BASE_DIR_VAR) {
            config.base_dir = Some(PathBuf::from(base_dir));
        }

        if let Some(expiry) = Self::env_number::<u64>(HAUNTFS_REAPER_EXPIRY_VAR)? {
            config.reaper.get_or_insert_with(ReaperConfig::default).expiry_secs = expiry;
        }
        if let Some(period) = Self::env_number::<u64>(HAUNTFS_REAPER_PERIOD_VAR)? {
            config.reaper.get_or_insert_with(ReaperConfig::default).period_secs = period;
        }

        if let Some(max_items) = Self::env_number::<usize>(HAUNTFS_LRU_MAX_ITEMS_VAR)? {
            config.lru.get_or_insert_with(LruConfig::default).max_items = max_items;
        }
        if let Some(max_size) = Self::env_number::<u64>(HAUNTFS_LRU_MAX_SIZE_VAR)? {
            config.lru.get_or_insert_with(LruConfig::default).max_size = max_size;
        }
        if let Some(period) = Self::env_number::<u64>(HAUNTFS_LRU_PERIOD_VAR)? {
            config.lru.get_or_insert_with(LruConfig::default).period_secs = period;
        }

        Ok(config)
    }

    fn env_number<T: FromStr>(var: &str) -> Result<Option<T>> {
        match std::env::var(var) {
            Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
                Error::configuration(format!("{var} must be a non-negative integer, got '{value}'"))
            }),
            Err(_) => Ok(None),
        }
    }
}
