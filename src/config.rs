//! TOML configuration loading (`spec.md` §6's `agent/*` keys).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_METRIC_TTL_SECS: i64 = 720;
const DEFAULT_POLLER_TIMEOUT_SECS: i64 = 180;
const DEFAULT_RESYNC_PERIOD_SECS: i64 = 43_200;

/// Top-level document shape: a single `[agent]` table holding the three
/// keys the core consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    agent: AgentSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AgentSection {
    #[serde(default = "default_metric_ttl")]
    metric_ttl: i64,
    #[serde(default = "default_poller_timeout")]
    poller_timeout: i64,
    #[serde(default = "default_resync_period")]
    resync_period: i64,
}

fn default_metric_ttl() -> i64 {
    DEFAULT_METRIC_TTL_SECS
}

fn default_poller_timeout() -> i64 {
    DEFAULT_POLLER_TIMEOUT_SECS
}

fn default_resync_period() -> i64 {
    DEFAULT_RESYNC_PERIOD_SECS
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            metric_ttl: DEFAULT_METRIC_TTL_SECS,
            poller_timeout: DEFAULT_POLLER_TIMEOUT_SECS,
            resync_period: DEFAULT_RESYNC_PERIOD_SECS,
        }
    }
}

/// Runtime configuration for one actor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub metric_ttl_secs: i64,
    pub poller_timeout_secs: i64,
    pub resync_period_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metric_ttl_secs: DEFAULT_METRIC_TTL_SECS,
            poller_timeout_secs: DEFAULT_POLLER_TIMEOUT_SECS,
            resync_period_secs: DEFAULT_RESYNC_PERIOD_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file, falling back to defaults for
    /// any key that's absent. Malformed TOML or an unreadable path is a
    /// fatal startup error (`spec.md` §7: bus/config failures at startup
    /// are non-recoverable).
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("cannot read {}: {err}", path.display())))?;
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Result<Self, AppError> {
        let file: ConfigFile =
            toml::from_str(raw).map_err(|err| AppError::Config(format!("invalid config: {err}")))?;
        let config = Self {
            metric_ttl_secs: file.agent.metric_ttl,
            poller_timeout_secs: file.agent.poller_timeout,
            resync_period_secs: file.agent.resync_period,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.metric_ttl_secs <= 0 {
            return Err(AppError::Config("agent/metric_ttl must be positive".to_string()));
        }
        if self.poller_timeout_secs <= 0 {
            return Err(AppError::Config("agent/poller_timeout must be positive".to_string()));
        }
        if self.resync_period_secs <= 0 {
            return Err(AppError::Config("agent/resync_period must be positive".to_string()));
        }
        Ok(())
    }
}
