use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENDPOINT_ENV: &str = "HEATMAP_ENDPOINT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub heatmap: HeatmapConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/ohlcv".to_string(),
            poll_interval_ms: 5_000,
            request_timeout_ms: 10_000,
        }
    }
}

impl FeedConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Visual tunables for block sizing, coloring and smoothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Weight kept from the previous display value on each update.
    pub smoothing: f64,
    /// Percent-change scale for block alpha: alpha is `0.5 + |change| / color_domain_pct`,
    /// so color saturates at half this value.
    pub color_domain_pct: f64,
    pub min_px: f64,
    pub max_px: f64,
    /// Block size used when every block has the same smoothed size.
    pub degenerate_px: f64,
    pub clear_on_empty: bool,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.7,
            color_domain_pct: 10.0,
            min_px: 50.0,
            max_px: 250.0,
            degenerate_px: 150.0,
            clear_on_empty: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "crypto-heatmap.log".to_string(),
        }
    }
}

impl Config {
    /// Built-in defaults, overlaid by `config/default.toml` when present and
    /// by `HEATMAP_ENDPOINT` from `.env` or the environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::from_path(Path::new(DEFAULT_CONFIG_PATH))?;
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.feed.endpoint = endpoint.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.feed.endpoint)
            .with_context(|| format!("feed.endpoint '{}' is not a valid URL", self.feed.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!(
                "feed.endpoint '{}': unsupported scheme '{}', expected http or https",
                self.feed.endpoint,
                endpoint.scheme()
            );
        }
        if self.feed.poll_interval_ms == 0 {
            bail!("feed.poll_interval_ms must be > 0");
        }
        if self.feed.request_timeout_ms == 0 {
            bail!("feed.request_timeout_ms must be > 0");
        }
        if self.ui.refresh_rate_ms == 0 {
            bail!("ui.refresh_rate_ms must be > 0");
        }

        let hm = &self.heatmap;
        if !(0.0..1.0).contains(&hm.smoothing) {
            bail!("heatmap.smoothing must be in [0, 1), got {}", hm.smoothing);
        }
        if !(hm.color_domain_pct.is_finite() && hm.color_domain_pct > 0.0) {
            bail!(
                "heatmap.color_domain_pct must be a positive number, got {}",
                hm.color_domain_pct
            );
        }
        if !(hm.min_px.is_finite() && hm.max_px.is_finite() && hm.min_px < hm.max_px) {
            bail!(
                "heatmap.min_px ({}) must be below heatmap.max_px ({})",
                hm.min_px,
                hm.max_px
            );
        }
        if !(hm.min_px..=hm.max_px).contains(&hm.degenerate_px) {
            bail!(
                "heatmap.degenerate_px ({}) must lie within [{}, {}]",
                hm.degenerate_px,
                hm.min_px,
                hm.max_px
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_toml_keeps_defaults() {
        let toml_str = r#"
[feed]
endpoint = "https://example.com/ohlcv"

[heatmap]
clear_on_empty = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.feed.endpoint, "https://example.com/ohlcv");
        assert_eq!(config.feed.poll_interval_ms, 5_000);
        assert!(config.heatmap.clear_on_empty);
        assert!((config.heatmap.smoothing - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.ui.refresh_rate_ms, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::from_path(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.feed.poll_interval(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }
}
