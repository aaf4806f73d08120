//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// riskreg configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default organization name for reports
    pub organization: Option<String>,

    /// Directory the register CSV is written to (default: working directory)
    pub report_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/riskreg/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(org) = std::env::var("RISKREG_ORG") {
            config.organization = Some(org);
        }
        if let Ok(dir) = std::env::var("RISKREG_REPORT_DIR") {
            config.report_dir = Some(PathBuf::from(dir));
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "riskreg")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.organization.is_some() {
            self.organization = other.organization;
        }
        if other.report_dir.is_some() {
            self.report_dir = other.report_dir;
        }
    }

    /// Get the report directory, falling back to the working directory
    pub fn report_dir(&self) -> PathBuf {
        self.report_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
