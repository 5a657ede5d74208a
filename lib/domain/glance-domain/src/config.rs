use std::path::Path;

use anyhow::{Context, Result, ensure};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlanceConfig {
    pub api: ApiConfig,
    pub metrics: MetricsConfig,
}

impl GlanceConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`GlanceConfig::load_from_path`], but a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.metrics.window_hours > 0, "metrics.window_hours must be positive");
        ensure!(self.metrics.step_minutes > 0, "metrics.step_minutes must be positive");
        ensure!(self.api.timeout_secs > 0, "api.timeout_secs must be positive");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub platform_url: String,
    pub favorites_url: String,
    pub metrics_url: String,
    pub notifications_url: String,
    pub accept: String,
    pub timeout_secs: u64,
    /// Fallback when `GLANCE_API_TOKEN` is unset.
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            platform_url: "https://api.heroku.com".into(),
            favorites_url: "https://longboard.heroku.com".into(),
            metrics_url: "https://api.metrics.herokai.com".into(),
            notifications_url: "https://telex.heroku.com".into(),
            accept: "application/vnd.heroku+json; version=3".into(),
            timeout_secs: 30,
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub window_hours: u32,
    pub step_minutes: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            step_minutes: 60,
        }
    }
}

impl MetricsConfig {
    pub fn window(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.window_hours))
    }

    pub fn step(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.step_minutes))
    }
}
