//! Configuration for the Vahan CLI
//!
//! Stores configuration in ~/.vahan/config.yaml. The `VAHAN_API_URL`
//! environment variable overrides the configured API URL.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = ".vahan";
const CONFIG_FILE: &str = "config.yaml";

pub const API_URL_ENV: &str = "VAHAN_API_URL";

/// Vahan CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VahanConfig {
    /// Prediction service URL (default: http://localhost:5000)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout for the prediction service
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Artificial delay before showing demo results
    #[serde(default = "default_demo_latency_ms")]
    pub demo_latency_ms: u64,
}

impl Default for VahanConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            demo_latency_ms: default_demo_latency_ms(),
        }
    }
}

impl VahanConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn demo_latency(&self) -> Duration {
        Duration::from_millis(self.demo_latency_ms)
    }

    /// Pick the API URL: explicit flag, then environment, then config file.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(API_URL_ENV).ok();
        pick_api_url(flag, env.as_deref(), &self.api_url)
    }
}

fn pick_api_url(flag: Option<&str>, env: Option<&str>, configured: &str) -> String {
    flag.or(env.filter(|v| !v.trim().is_empty()))
        .unwrap_or(configured)
        .trim_end_matches('/')
        .to_string()
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_demo_latency_ms() -> u64 {
    1500
}

/// Get the path to the vahan config directory (~/.vahan/)
pub fn config_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().context("failed to determine home directory")?;
    Ok(base_dirs.home_dir().join(CONFIG_DIR))
}

/// Get the path to the config file (~/.vahan/config.yaml)
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Load configuration from the default location
pub fn load_config() -> Result<VahanConfig> {
    load_config_from(&config_file_path()?)
}

/// Load configuration from a file, using defaults when it does not exist
pub fn load_config_from(path: &Path) -> Result<VahanConfig> {
    if !path.exists() {
        return Ok(VahanConfig::default());
    }

    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    serde_yaml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}
