//! Process-wide defaults for the query builder.
//!
//! Everything here is overridable through environment variables so embedders
//! can retarget the engine at streams whose time column is not `_timestamp`.

use once_cell::sync::Lazy;

static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

/// Resolved configuration. Read once on first access.
pub fn get_config() -> &'static Config {
    &CONFIG
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Column used for histogram bucketing and the fallback field pair.
    pub timestamp_column: String,
    /// Interval applied when a caller asks for a histogram without one.
    pub default_histogram_interval: String,
}

impl Config {
    fn from_env() -> Self {
        Self {
            timestamp_column: std::env::var("SQLMIRROR_TIMESTAMP_COL")
                .unwrap_or_else(|_| "_timestamp".to_string()),
            default_histogram_interval: std::env::var("SQLMIRROR_DEFAULT_HISTOGRAM_INTERVAL")
                .unwrap_or_else(|_| "1 hour".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
