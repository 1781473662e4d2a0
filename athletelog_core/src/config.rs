//! Configuration file support for athletelog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/athletelog/config.toml`.
//! Every section is optional; missing values fall back to defaults that match
//! the project layout (data under `./data`, report script under
//! `./python-report`, dashboard assets under `./ts-dashboard`).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub delegates: DelegatesConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// An external program run against the workout log.
///
/// The log path is appended after `args`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DelegateSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// External stats/report programs
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DelegatesConfig {
    #[serde(default = "default_stats_delegate")]
    pub stats: DelegateSpec,

    #[serde(default = "default_report_delegate")]
    pub report: DelegateSpec,
}

impl Default for DelegatesConfig {
    fn default() -> Self {
        Self {
            stats: default_stats_delegate(),
            report: default_report_delegate(),
        }
    }
}

/// Static dashboard server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_host")]
    pub host: String,

    #[serde(default = "default_dashboard_port")]
    pub port: u16,

    /// Where `/` redirects to
    #[serde(default = "default_dashboard_path")]
    pub path: String,

    /// Directory served as the site root
    #[serde(default = "default_dashboard_root")]
    pub root: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_dashboard_host(),
            port: default_dashboard_port(),
            path: default_dashboard_path(),
            root: default_dashboard_root(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_stats_delegate() -> DelegateSpec {
    DelegateSpec {
        program: "athletelog-stats".into(),
        args: Vec::new(),
    }
}

fn default_report_delegate() -> DelegateSpec {
    DelegateSpec {
        program: "python3".into(),
        args: vec!["python-report/report.py".into()],
    }
}

fn default_dashboard_host() -> String {
    "0.0.0.0".into()
}

fn default_dashboard_port() -> u16 {
    3000
}

fn default_dashboard_path() -> String {
    "/ts-dashboard/".into()
}

fn default_dashboard_root() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!("No config file found at {:?}, using defaults", config_path);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("athletelog").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        for (name, spec) in [("stats", &self.delegates.stats), ("report", &self.delegates.report)] {
            if spec.program.trim().is_empty() {
                return Err(Error::Config(format!("delegates.{}.program must not be empty", name)));
            }
        }
        if !self.dashboard.path.starts_with('/') {
            return Err(Error::Config(format!(
                "dashboard.path must start with '/', got {:?}",
                self.dashboard.path
            )));
        }
        Ok(())
    }
}
