use crate::i18n::Locale;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Reporting service connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt; 0 disables retrying.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// The n-th retry waits up to `2^n * retry_base_delay_ms` (jittered).
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Presentation defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: Locale,
}

/// Refresh cadence for `watch`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "https://api.chainsignal.solutions".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> usize {
    2
}
fn default_retry_base_delay_ms() -> u64 {
    500
}
fn default_user_agent() -> String {
    concat!("chainsignal/", env!("CARGO_PKG_VERSION")).to_string()
}
// Upstream responses are cached for about a minute; polling faster is pointless.
fn default_interval_secs() -> u64 {
    60
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("CHAINSIGNAL").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|e| {
            warn!("Invalid configuration ({}), using defaults", e);
            AppConfig::default()
        });
        Ok(app_cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_sections_fill_defaults() {
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[display]\nlocale = \"pl\"\n[upstream]\nmax_retries = 0\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.display.locale, Locale::Pl);
        assert_eq!(cfg.upstream.max_retries, 0);
        assert_eq!(cfg.upstream.base_url, default_base_url());
        assert_eq!(cfg.polling.interval_secs, 60);
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.display.locale, Locale::En);
        assert_eq!(cfg.upstream.timeout_secs, 30);
        assert_eq!(cfg.upstream.retry_base_delay_ms, 500);
        assert!(cfg.upstream.user_agent.starts_with("chainsignal/"));
    }

    #[test]
    fn test_retry_delay_reads_documented_key() {
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[upstream]\nretry_base_delay_ms = 1200\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.upstream.retry_base_delay_ms, 1200);
    }

    #[test]
    fn test_shipped_default_file_matches_code_defaults() {
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let defaults = UpstreamConfig::default();
        assert_eq!(cfg.upstream.retry_base_delay_ms, defaults.retry_base_delay_ms);
        assert_eq!(cfg.upstream.max_retries, defaults.max_retries);
        assert_eq!(cfg.upstream.timeout_secs, defaults.timeout_secs);
    }
}
