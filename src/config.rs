//! Radar configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Analysis thresholds are collected into
//! an [`AnalysisConfig`] that the service threads into every run.

use std::net::SocketAddr;

use crate::analysis::{AnalysisConfig, DEFAULT_NOVELTY_THRESHOLD, DEFAULT_SWING_THRESHOLD_PCT};

/// Top-level radar configuration.
///
/// Loaded once at startup via [`RadarConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RadarConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Thresholds used by every analysis run.
    pub analysis: AnalysisConfig,

    /// Number of entries returned by the ranking when no limit is given.
    pub ranking_default_limit: usize,

    /// Seconds before an HTTP request is aborted.
    pub request_timeout_secs: u64,
}

impl RadarConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set or invalid.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let novelty_threshold = parse_env("NOVELTY_THRESHOLD", DEFAULT_NOVELTY_THRESHOLD);
        let swing_threshold_pct = parse_env("SWING_THRESHOLD_PCT", DEFAULT_SWING_THRESHOLD_PCT);
        let swing_threshold_pct = if swing_threshold_pct.is_finite() && swing_threshold_pct >= 0.0
        {
            swing_threshold_pct
        } else {
            DEFAULT_SWING_THRESHOLD_PCT
        };

        let ranking_default_limit = parse_env("RANKING_DEFAULT_LIMIT", 10_usize).max(1);
        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", 30);

        Ok(Self {
            listen_addr,
            analysis: AnalysisConfig {
                novelty_threshold,
                swing_threshold_pct,
            },
            ranking_default_limit,
            request_timeout_secs,
        })
    }
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            analysis: AnalysisConfig::default(),
            ranking_default_limit: 10,
            request_timeout_secs: 30,
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_uses_default() {
        let value: usize = parse_env("RADAR_TEST_SURELY_UNSET_VARIABLE", 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn default_config_uses_default_thresholds() {
        let config = RadarConfig::default();
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert_eq!(config.ranking_default_limit, 10);
        assert_eq!(config.listen_addr.port(), 3000);
    }
}
