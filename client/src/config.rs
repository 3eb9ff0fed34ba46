//! Client configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the Calculation Service
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Calculation Service configuration
    pub service: ServiceConfig,
    /// Plot output configuration
    pub plot: PlotConfig,
    /// Whether requests are validated before they are sent
    pub validate_locally: bool,
}

/// Calculation Service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Base URL, without the `/calculate` path
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

/// Plot output configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Directory rendered plot pages are written to
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: DEFAULT_SERVICE_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            plot: PlotConfig {
                output_dir: default_output_dir(),
            },
            validate_locally: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service: ServiceConfig {
                base_url: env::var("CALC_SERVICE_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .map(|url| url.trim().trim_end_matches('/').to_string())
                    .unwrap_or(defaults.service.base_url),
                timeout_secs: env::var("CALC_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .filter(|t| *t > 0)
                    .unwrap_or(defaults.service.timeout_secs),
            },
            plot: PlotConfig {
                output_dir: env::var_os("PLOT_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.plot.output_dir),
            },
            validate_locally: env::var("CALC_VALIDATE_LOCALLY")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.validate_locally),
        }
    }

    /// Full URL of the calculate endpoint
    pub fn calculate_url(&self) -> String {
        format!("{}/calculate", self.service.base_url.trim_end_matches('/'))
    }

    /// HTTP timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }
}

fn default_output_dir() -> PathBuf {
    env::temp_dir().join("surface-viewer")
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
